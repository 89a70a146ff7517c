#![deny(missing_docs)]

//! # Generator Configuration
//!
//! Knobs controlling the emitted module. Every field has a default, so an empty
//! (or absent) config file yields the stock `SwaggerClient` layout.

use crate::error::{AppError, AppResult};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Placeholder substituted with the service name inside [`GeneratorConfig::preamble`].
pub const SERVICE_NAME_PLACEHOLDER: &str = "{service_name}";

/// Default module header: imports of the runtime names the generated code uses,
/// followed by the client class the resource accessors attach to.
pub const DEFAULT_PREAMBLE: &str = r#"# -*- coding: utf-8 -*-
from __future__ import absolute_import
from __future__ import unicode_literals

import logging

from bravado.client import SwaggerClient
from bravado.client import construct_request
from bravado.config import RequestConfig
from bravado.http_client import HttpClient
from bravado.http_future import HttpFuture
from bravado.response import BravadoResponseMetadata
from bravado.warning import warn_for_deprecated_op


log = logging.getLogger(__name__)


class {service_name}Client(SwaggerClient):
    """Generated client for the {service_name} service."""
"#;

const KNOWN_KEYS: [&str; 5] = [
    "preamble",
    "also_return_response",
    "request_options_param",
    "resource_suffix",
    "wrapper_suffix",
];

/// Options for a generation run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Module preamble. `{service_name}` is replaced by the service name.
    pub preamble: String,
    /// Default for `RequestConfig(..., also_return_response_default=...)`.
    pub also_return_response: bool,
    /// Name of the trailing per-call options parameter.
    pub request_options_param: String,
    /// Appended to a resource name to form its handle class name.
    pub resource_suffix: String,
    /// Appended to an operation id to form its result wrapper class name.
    pub wrapper_suffix: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            preamble: DEFAULT_PREAMBLE.to_string(),
            also_return_response: false,
            request_options_param: "_request_options".to_string(),
            resource_suffix: "_Resource".to_string(),
            wrapper_suffix: "HttpFuture".to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Loads a YAML config file. Keys this generator does not know are ignored.
    pub fn from_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_yaml(&content)
    }

    /// Parses YAML config text.
    pub fn from_yaml(content: &str) -> AppResult<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let raw: Value = serde_yaml::from_str(content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {}", e)))?;

        let raw = match raw {
            Value::Null => return Ok(Self::default()),
            Value::Object(mut map) => {
                map.retain(|key, _| {
                    let known = KNOWN_KEYS.contains(&key.as_str());
                    if !known {
                        tracing::warn!(key = %key, "ignoring unknown generator config key");
                    }
                    known
                });
                Value::Object(map)
            }
            _ => return Err(AppError::Config("Config root must be a mapping".into())),
        };

        serde_json::from_value(raw)
            .map_err(|e| AppError::Config(format!("Invalid config value: {}", e)))
    }

    /// Renders the preamble for `service_name`.
    pub fn render_preamble(&self, service_name: &str) -> String {
        self.preamble.replace(SERVICE_NAME_PLACEHOLDER, service_name)
    }

    /// Handle class name for a resource, e.g. `pet_Resource`.
    pub fn resource_class_name(&self, resource: &str) -> String {
        format!("{}{}", resource, self.resource_suffix)
    }

    /// Wrapper class name for an operation, e.g. `addPetHttpFuture`.
    pub fn wrapper_class_name(&self, operation_id: &str) -> String {
        format!("{}{}", operation_id, self.wrapper_suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert!(!config.also_return_response);
        assert_eq!(config.request_options_param, "_request_options");
        assert_eq!(config.resource_class_name("pet"), "pet_Resource");
        assert_eq!(config.wrapper_class_name("addPet"), "addPetHttpFuture");
    }

    #[test]
    fn test_render_preamble_substitutes_service_name() {
        let config = GeneratorConfig::default();
        let preamble = config.render_preamble("Petstore");
        assert!(preamble.contains("class PetstoreClient(SwaggerClient):"));
        assert!(preamble.contains("Generated client for the Petstore service."));
        assert!(!preamble.contains(SERVICE_NAME_PLACEHOLDER));
    }

    #[test]
    fn test_partial_yaml_keeps_other_defaults() {
        let config = GeneratorConfig::from_yaml("also_return_response: true\n").unwrap();
        assert!(config.also_return_response);
        assert_eq!(config.wrapper_suffix, "HttpFuture");
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let config =
            GeneratorConfig::from_yaml("disable_fallback_results: true\nwrapper_suffix: Future\n")
                .unwrap();
        assert_eq!(config.wrapper_suffix, "Future");
    }

    #[test]
    fn test_empty_and_invalid_yaml() {
        assert_eq!(GeneratorConfig::from_yaml("").unwrap(), GeneratorConfig::default());
        assert!(matches!(
            GeneratorConfig::from_yaml("- a"),
            Err(AppError::Config(_))
        ));
        assert!(matches!(
            GeneratorConfig::from_yaml("also_return_response: maybe"),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clientgen.yaml");
        fs::write(&path, "request_options_param: options\n").unwrap();
        let config = GeneratorConfig::from_file(&path).unwrap();
        assert_eq!(config.request_options_param, "options");

        let missing = GeneratorConfig::from_file(dir.path().join("missing.yaml"));
        assert!(matches!(missing, Err(AppError::Config(_))));
    }
}
