#![deny(missing_docs)]

//! # Rendering
//!
//! Serializes code blocks to Python source and writes the result to an output
//! sink. The whole module is rendered into memory before anything is written.

use crate::codegen::blocks::{CodeBlock, GeneratedModule, MethodDef, WRAPPER_BASE_CLASS};
use crate::codegen::signature::{py_str, render_signature};
use crate::error::AppResult;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

/// Separator placed between consecutive blocks: one blank line.
pub const BLOCK_SEPARATOR: &str = "\n\n";

const INDENT: &str = "    ";

/// Where rendered output goes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OutputSink {
    /// Standard output.
    #[default]
    Stdout,
    /// A file, created or truncated.
    File(PathBuf),
}

impl OutputSink {
    /// Writes `text` to the sink in one go.
    pub fn write_all(&self, text: &str) -> AppResult<()> {
        match self {
            OutputSink::Stdout => {
                let stdout = io::stdout();
                let mut handle = stdout.lock();
                handle.write_all(text.as_bytes())?;
                handle.flush()?;
            }
            OutputSink::File(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    fs::create_dir_all(parent)?;
                }
                fs::write(path, text)?;
            }
        }
        Ok(())
    }
}

/// Renders a module to source text, blocks separated by a blank line.
pub fn render_module(module: &GeneratedModule) -> String {
    let mut text = module
        .blocks
        .iter()
        .map(render_block)
        .collect::<Vec<_>>()
        .join(BLOCK_SEPARATOR);
    text.push('\n');
    text
}

/// Renders a single block without leading or trailing newlines.
pub fn render_block(block: &CodeBlock) -> String {
    match block {
        CodeBlock::Preamble(text) => text.trim_end_matches('\n').to_string(),
        CodeBlock::ResourceAccessor {
            resource,
            class_name,
        } => format!(
            "{i}@property\n{i}def {resource}(self):\n{i}{i}return {class_name}(self.swagger_spec)",
            i = INDENT,
        ),
        CodeBlock::ResourceClass {
            class_name,
            methods,
        } => render_resource_class(class_name, methods),
        CodeBlock::ResultWrapper {
            class_name,
            summary,
        } => {
            let body = match summary {
                Some(text) => docstring(text, INDENT),
                None => format!("{}pass", INDENT),
            };
            format!("class {}({}):\n{}", class_name, WRAPPER_BASE_CLASS, body)
        }
    }
}

fn render_resource_class(class_name: &str, methods: &[MethodDef]) -> String {
    let mut parts = vec![
        format!("class {}(object):", class_name),
        format!(
            "{i}def __init__(self, swagger_spec):\n{i}{i}self._swagger_spec = swagger_spec",
            i = INDENT
        ),
    ];
    parts.extend(methods.iter().map(render_method));
    parts.join("\n\n")
}

fn render_method(method: &MethodDef) -> String {
    let i1 = INDENT;
    let i2 = INDENT.repeat(2);
    let i3 = INDENT.repeat(3);

    let mut request_args = vec!["operation".to_string(), "request_options".to_string()];
    request_args.extend(method.forwarded.iter().map(|p| format!("{0}={0}", p)));

    let also_return = if method.also_return_response {
        "True"
    } else {
        "False"
    };

    let lines = [
        format!("{i1}def {}({}):", method.name, render_signature(&method.signature)),
        format!(
            "{i2}operation = self._swagger_spec.resources[{}].{}",
            py_str(&method.resource),
            method.name
        ),
        format!("{i2}warn_for_deprecated_op(operation)"),
        format!("{i2}request_options = dict({} or {{}})", method.options_param),
        format!(
            "{i2}request_options['http_future_class'] = {}",
            method.wrapper_class
        ),
        format!(
            "{i2}request_config = RequestConfig(request_options, also_return_response_default={also_return})"
        ),
        String::new(),
        format!("{i2}request_params = construct_request("),
        format!("{i3}{},", request_args.join(", ")),
        format!("{i2})"),
        String::new(),
        format!("{i2}http_client = operation.swagger_spec.http_client"),
        String::new(),
        format!("{i2}return http_client.request("),
        format!("{i3}request_params,"),
        format!("{i3}operation=operation,"),
        format!("{i3}request_config=request_config,"),
        format!("{i2})"),
    ];
    lines.join("\n")
}

/// Triple-quoted docstring, indented; inner quotes and backslashes are escaped.
fn docstring(text: &str, indent: &str) -> String {
    let escaped = text.replace('\\', "\\\\").replace('"', "\\\"");
    let mut lines = escaped.lines();
    let first = lines.next().unwrap_or_default();
    let rest: Vec<&str> = lines.collect();
    if rest.is_empty() {
        return format!("{indent}\"\"\"{first}\"\"\"");
    }

    let mut out = format!("{indent}\"\"\"{first}\n");
    for line in rest {
        if line.trim().is_empty() {
            out.push('\n');
        } else {
            out.push_str(&format!("{indent}{}\n", line.trim_end()));
        }
    }
    out.push_str(&format!("{indent}\"\"\""));
    out
}
