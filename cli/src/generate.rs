#![deny(missing_docs)]

//! # Generate Command
//!
//! Generates a `SwaggerClient` subclass for a Swagger spec.

use std::path::PathBuf;

use clientgen_core::codegen::{generate_client, OutputSink};
use clientgen_core::{AppResult, GeneratorConfig};

/// Arguments for the generate command.
#[derive(clap::Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Name of the service; the generated class is `<NAME>Client`.
    #[clap(long)]
    pub name: String,

    /// Absolute or relative path of the Swagger spec (YAML or JSON).
    pub path: PathBuf,

    /// Write the generated module to this file instead of stdout.
    #[clap(long, short)]
    pub output: Option<PathBuf>,

    /// YAML file with generator options (preamble, suffixes, ...).
    #[clap(long, env = "CLIENTGEN_CONFIG")]
    pub config: Option<PathBuf>,
}

impl GenerateArgs {
    fn sink(&self) -> OutputSink {
        match &self.output {
            Some(path) => OutputSink::File(path.clone()),
            None => OutputSink::Stdout,
        }
    }

    fn generator_config(&self) -> AppResult<GeneratorConfig> {
        match &self.config {
            Some(path) => GeneratorConfig::from_file(path),
            None => Ok(GeneratorConfig::default()),
        }
    }
}

/// Executes the generation.
///
/// # Arguments
///
/// * `args` - Command arguments.
pub fn execute(args: &GenerateArgs) -> AppResult<()> {
    let config = args.generator_config()?;
    let sink = args.sink();
    generate_client(&args.path, &args.name, &config, &sink)?;

    if let OutputSink::File(path) = &sink {
        tracing::info!(output = %path.display(), "wrote generated client");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clientgen_core::AppError;
    use std::fs;
    use tempfile::tempdir;

    const SPEC: &str = r#"
swagger: '2.0'
info: {title: T, version: '1.0'}
paths:
  /health:
    get:
      tags: [health]
      operationId: check
      responses:
        '200': { description: OK }
"#;

    #[test]
    fn test_execute_generates_file() {
        let dir = tempdir().unwrap();
        let spec_path = dir.path().join("swagger.yaml");
        let output_path = dir.path().join("client").join("health.py");
        fs::write(&spec_path, SPEC).unwrap();

        let args = GenerateArgs {
            name: "Health".to_string(),
            path: spec_path,
            output: Some(output_path.clone()),
            config: None,
        };

        execute(&args).unwrap();

        let contents = fs::read_to_string(output_path).unwrap();
        assert!(contents.contains("class HealthClient(SwaggerClient):"));
        assert!(contents.contains("def check(self, _request_options=None):"));
        assert!(contents.contains("class checkHttpFuture(HttpFuture):"));
    }

    #[test]
    fn test_execute_uses_config_file() {
        let dir = tempdir().unwrap();
        let spec_path = dir.path().join("swagger.yaml");
        let config_path = dir.path().join("clientgen.yaml");
        let output_path = dir.path().join("health.py");
        fs::write(&spec_path, SPEC).unwrap();
        fs::write(&config_path, "resource_suffix: Api\n").unwrap();

        let args = GenerateArgs {
            name: "Health".to_string(),
            path: spec_path,
            output: Some(output_path.clone()),
            config: Some(config_path),
        };

        execute(&args).unwrap();
        let contents = fs::read_to_string(output_path).unwrap();
        assert!(contents.contains("class healthApi(object):"));
    }

    #[test]
    fn test_execute_missing_spec() {
        let dir = tempdir().unwrap();
        let output_path = dir.path().join("out.py");
        let args = GenerateArgs {
            name: "Svc".to_string(),
            path: dir.path().join("missing.yaml"),
            output: Some(output_path.clone()),
            config: None,
        };

        let err = execute(&args).unwrap_err();
        assert!(matches!(err, AppError::SpecLoad(_)));
        assert!(!output_path.exists());
    }

    #[test]
    fn test_execute_missing_config() {
        let dir = tempdir().unwrap();
        let spec_path = dir.path().join("swagger.yaml");
        fs::write(&spec_path, SPEC).unwrap();
        let args = GenerateArgs {
            name: "Svc".to_string(),
            path: spec_path,
            output: None,
            config: Some(dir.path().join("missing.yaml")),
        };

        let err = execute(&args).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
