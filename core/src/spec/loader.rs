#![deny(missing_docs)]

//! # Spec Loading
//!
//! Parses a Swagger 2.0 document (YAML or JSON) into the [`Spec`] model.
//!
//! - Path-level parameters are merged into each operation; an operation-level
//!   parameter with the same `(name, in)` pair wins.
//! - `$ref` parameters are resolved against the document.
//! - An operation is filed under its first tag, or under the first path
//!   segment when untagged, so every operation id appears exactly once.
//! - Operation ids, resource names and parameter names are converted to
//!   Python identifiers. The raw tag is kept as the resource's lookup key.

use crate::error::{AppError, AppResult};
use crate::spec::models::{Operation, Parameter, Resource, Spec};
use crate::spec::naming::{
    derive_operation_id, parameter_identifier, python_identifier, trimmed_identifier,
};
use crate::spec::resolver::DocumentResolver;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// HTTP methods that may hold an operation inside a path item.
const HTTP_METHODS: [&str; 7] = ["get", "put", "post", "delete", "options", "head", "patch"];

/// Resource name used when neither a tag nor a path segment is available.
const FALLBACK_RESOURCE: &str = "_";

/// A local shim for the Swagger 2.0 Operation Object.
#[derive(Debug, Clone, Default, Deserialize)]
struct ShimOperation {
    #[serde(rename = "operationId")]
    operation_id: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    parameters: Vec<Value>,
    #[serde(default)]
    responses: IndexMap<String, Value>,
}

/// A local shim for the Swagger 2.0 Parameter Object.
#[derive(Debug, Clone, Deserialize)]
struct ShimParameter {
    name: String,
    #[serde(rename = "in", default)]
    location: String,
    #[serde(default)]
    required: bool,
    #[serde(rename = "type")]
    schema_type: Option<String>,
    #[serde(default, deserialize_with = "present_value")]
    default: Option<Value>,
}

/// Maps a present key to `Some`, so `default: null` stays distinguishable from no default.
fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Reads and parses the document at `path`.
pub fn load_spec(path: impl AsRef<Path>) -> AppResult<Spec> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        AppError::SpecLoad(format!("Failed to read {}: {}", path.display(), e))
    })?;
    parse_spec(&content)
}

/// Parses document text into a [`Spec`].
pub fn parse_spec(content: &str) -> AppResult<Spec> {
    let document: Value = serde_yaml::from_str(content)
        .map_err(|e| AppError::SpecLoad(format!("Failed to parse spec document: {}", e)))?;

    if !document.is_object() {
        return Err(AppError::SpecLoad(
            "Spec document root must be a mapping".into(),
        ));
    }

    let resources = build_resources(&document)?;
    Ok(Spec::new(resources, document))
}

fn build_resources(document: &Value) -> AppResult<Vec<Resource>> {
    let paths = match document.get("paths") {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Object(paths)) => paths,
        Some(_) => return Err(AppError::SpecLoad("'paths' must be a mapping".into())),
    };

    let resolver = DocumentResolver::new(document);
    // keyed by the raw resource key (tag), which the runtime client looks up
    let mut grouped: BTreeMap<String, Vec<Operation>> = BTreeMap::new();
    let mut seen_ids: BTreeMap<String, String> = BTreeMap::new();

    for (path, path_item) in paths {
        if path.starts_with("x-") {
            continue;
        }
        let path_item = resolver.resolve(path_item);
        let Some(item) = path_item.as_object() else {
            return Err(AppError::SpecLoad(format!(
                "Path item '{}' must be a mapping",
                path
            )));
        };

        let shared_params = match item.get("parameters") {
            Some(Value::Array(params)) => params.clone(),
            _ => Vec::new(),
        };

        for method in HTTP_METHODS {
            let Some(raw_op) = item.get(method) else {
                continue;
            };
            let location = format!("{} {}", method.to_uppercase(), path);
            let shim: ShimOperation = serde_json::from_value(raw_op.clone()).map_err(|e| {
                AppError::SpecLoad(format!("Failed to parse operation {}: {}", location, e))
            })?;

            let operation_id = match &shim.operation_id {
                Some(raw) => python_identifier(raw),
                None => derive_operation_id(method, path),
            };

            if let Some(previous) = seen_ids.insert(operation_id.clone(), location.clone()) {
                return Err(AppError::SpecIntegrity(format!(
                    "Duplicate operation id '{}' ({} and {})",
                    operation_id, previous, location
                )));
            }

            let params = merge_parameters(&resolver, &shared_params, &shim.parameters, &location)?;
            let resource = resource_key(&shim.tags, path, &operation_id);
            tracing::debug!(resource = %resource, operation = %operation_id, "loaded operation");

            grouped.entry(resource).or_default().push(Operation {
                operation_id,
                params,
                responses: shim.responses,
            });
        }
    }

    let mut names: BTreeMap<String, String> = BTreeMap::new();
    let mut resources = Vec::with_capacity(grouped.len());
    for (key, ops) in grouped {
        let name = python_identifier(&key);
        if let Some(previous) = names.insert(name.clone(), key.clone()) {
            return Err(AppError::SpecIntegrity(format!(
                "Resources '{}' and '{}' both map to the name '{}'",
                previous, key, name
            )));
        }
        resources.push(Resource::new(name, ops).with_key(key));
    }
    Ok(resources)
}

/// Merges path-level and operation-level parameters, keeping declaration order.
///
/// Names are converted to Python identifiers after the merge; two parameters
/// that end up with the same identifier are rejected.
fn merge_parameters(
    resolver: &DocumentResolver<'_>,
    shared: &[Value],
    own: &[Value],
    location: &str,
) -> AppResult<Vec<Parameter>> {
    let mut merged: IndexMap<(String, String), ShimParameter> = IndexMap::new();

    for raw in shared.iter().chain(own.iter()) {
        let resolved = resolver.resolve(raw);
        let shim: ShimParameter = serde_json::from_value(resolved.clone()).map_err(|e| {
            AppError::SpecLoad(format!("Failed to parse parameter of {}: {}", location, e))
        })?;
        let key = (shim.name.clone(), shim.location.clone());
        // IndexMap::insert keeps the original slot, so overrides stay in place
        merged.insert(key, shim);
    }

    let mut names: BTreeMap<String, String> = BTreeMap::new();
    let mut params = Vec::with_capacity(merged.len());
    for shim in merged.into_values() {
        let name = parameter_identifier(&shim.name);
        let raw = format!("{} ({})", shim.name, shim.location);
        if let Some(previous) = names.insert(name.clone(), raw.clone()) {
            return Err(AppError::SpecIntegrity(format!(
                "Parameters '{}' and '{}' of {} both map to the name '{}'",
                previous, raw, location, name
            )));
        }
        params.push(Parameter::new(name, shim.required, shim.default, shim.schema_type));
    }
    Ok(params)
}

/// The raw key an operation is filed under: its first tag, else its first path segment.
fn resource_key(tags: &[String], path: &str, operation_id: &str) -> String {
    if let Some((first, rest)) = tags.split_first() {
        if !rest.is_empty() {
            tracing::warn!(
                operation = %operation_id,
                resource = %first,
                dropped = ?rest,
                "operation has several tags; only the first is exposed"
            );
        }
        return first.clone();
    }
    path.trim_start_matches('/')
        .split('/')
        .next()
        .filter(|s| !s.is_empty())
        .map(trimmed_identifier)
        .unwrap_or_else(|| FALLBACK_RESOURCE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const PETSTORE: &str = r#"
swagger: '2.0'
info: {title: Petstore, version: '1.0'}
parameters:
  Limit:
    name: limit
    in: query
    type: integer
    default: 20
responses:
  NotFound:
    description: Not found
paths:
  /pet/{petId}:
    parameters:
      - {name: petId, in: path, required: true, type: integer}
    get:
      tags: [pet]
      operationId: getPetById
      responses:
        '200': {description: OK}
        '404': {$ref: '#/responses/NotFound'}
    delete:
      tags: [pet]
      operationId: deletePet
      deprecated: true
      parameters:
        - {name: api_key, in: header, type: string}
      responses:
        '400': {description: Invalid}
  /store/inventory:
    get:
      parameters:
        - $ref: '#/parameters/Limit'
      responses:
        default: {description: Inventory}
  x-internal: {}
"#;

    #[test]
    fn test_groups_operations_by_tag_and_path() {
        let spec = parse_spec(PETSTORE).unwrap();
        let names: Vec<_> = spec.resources.keys().cloned().collect();
        assert_eq!(names, vec!["pet", "store"]);

        let pet = &spec.resources["pet"];
        let ops: Vec<_> = pet.operations.keys().cloned().collect();
        assert_eq!(ops, vec!["deletePet", "getPetById"]);

        let store = &spec.resources["store"];
        assert!(store.operations.contains_key("get_store_inventory"));
    }

    #[test]
    fn test_path_parameters_are_merged() {
        let spec = parse_spec(PETSTORE).unwrap();
        let delete = &spec.resources["pet"].operations["deletePet"];
        let names: Vec<_> = delete.params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["petId", "api_key"]);
        assert!(delete.params[0].required);
    }

    #[test]
    fn test_operation_parameter_overrides_path_parameter() {
        let yaml = r#"
paths:
  /items/{id}:
    parameters:
      - {name: id, in: path, required: true, type: integer}
      - {name: verbose, in: query, type: boolean}
    get:
      operationId: getItem
      parameters:
        - {name: id, in: path, required: true, type: string}
"#;
        let spec = parse_spec(yaml).unwrap();
        let op = &spec.resources["items"].operations["getItem"];
        assert_eq!(op.params.len(), 2);
        assert_eq!(op.params[0].name, "id");
        assert_eq!(op.params[0].param_type.as_deref(), Some("string"));
        assert_eq!(op.params[1].name, "verbose");
    }

    #[test]
    fn test_referenced_parameter_is_resolved() {
        let spec = parse_spec(PETSTORE).unwrap();
        let op = &spec.resources["store"].operations["get_store_inventory"];
        assert_eq!(op.params.len(), 1);
        assert_eq!(op.params[0].name, "limit");
        assert_eq!(op.params[0].default, Some(json!(20)));
    }

    #[test]
    fn test_responses_keep_raw_references() {
        let spec = parse_spec(PETSTORE).unwrap();
        let op = &spec.resources["pet"].operations["getPetById"];
        assert_eq!(op.responses["404"], json!({"$ref": "#/responses/NotFound"}));
        let codes: Vec<_> = op.responses.keys().cloned().collect();
        assert_eq!(codes, vec!["200", "404"]);
    }

    #[test]
    fn test_duplicate_operation_id_is_rejected() {
        let yaml = r#"
paths:
  /a:
    get: {operationId: fetch}
  /b:
    get: {operationId: fetch}
"#;
        let err = parse_spec(yaml).unwrap_err();
        assert!(matches!(err, AppError::SpecIntegrity(_)));
        assert!(format!("{}", err).contains("fetch"));
    }

    #[test]
    fn test_invalid_documents() {
        assert!(matches!(parse_spec("- a\n- b\n"), Err(AppError::SpecLoad(_))));
        assert!(matches!(parse_spec("paths: [1, 2]"), Err(AppError::SpecLoad(_))));
        assert!(matches!(parse_spec("paths: {"), Err(AppError::SpecLoad(_))));
    }

    #[test]
    fn test_missing_paths_yields_empty_spec() {
        let spec = parse_spec("swagger: '2.0'\n").unwrap();
        assert!(spec.resources.is_empty());
    }

    #[test]
    fn test_load_spec_missing_file() {
        let err = load_spec("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, AppError::SpecLoad(_)));
    }

    #[test]
    fn test_derived_names() {
        assert_eq!(resource_key(&[], "/", "op"), "_");
        assert_eq!(resource_key(&["admin".into()], "/users", "op"), "admin");
        assert_eq!(resource_key(&[], "/user-profiles/{id}", "op"), "user_profiles");
        assert_eq!(resource_key(&[], "/2fa/verify", "op"), "_2fa");
    }

    #[test]
    fn test_names_become_python_identifiers() {
        let yaml = r#"
paths:
  /pets:
    get:
      tags: [Pet Store]
      operationId: list-pets
      parameters:
        - {name: X-Request-ID, in: header, type: string}
        - {name: from, in: query, type: string}
        - {name: self, in: query, type: string}
        - {name: ratio, in: query, type: number, default: "NaN"}
"#;
        let spec = parse_spec(yaml).unwrap();
        let names: Vec<_> = spec.resources.keys().cloned().collect();
        assert_eq!(names, vec!["Pet_Store"]);

        let resource = &spec.resources["Pet_Store"];
        assert_eq!(resource.key, "Pet Store");
        let op = &resource.operations["list_pets"];
        assert_eq!(op.operation_id, "list_pets");
        let params: Vec<_> = op.params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(params, vec!["X_Request_ID", "from_", "self_", "ratio"]);
        assert_eq!(op.params[3].default, Some(json!("NaN")));
    }

    #[test]
    fn test_keyword_operation_id_and_tag() {
        let yaml = r#"
paths:
  /imports:
    post:
      tags: [class]
      operationId: import
"#;
        let spec = parse_spec(yaml).unwrap();
        let resource = &spec.resources["class_"];
        assert_eq!(resource.key, "class");
        assert!(resource.operations.contains_key("import_"));
    }

    #[test]
    fn test_colliding_parameter_names_are_rejected() {
        let yaml = r#"
paths:
  /pets:
    get:
      operationId: listPets
      parameters:
        - {name: X-Request-ID, in: header, type: string}
        - {name: X_Request_ID, in: query, type: string}
"#;
        let err = parse_spec(yaml).unwrap_err();
        assert!(matches!(err, AppError::SpecIntegrity(_)));
        assert!(format!("{}", err).contains("X_Request_ID"));
    }

    #[test]
    fn test_same_name_in_two_locations_is_rejected() {
        let yaml = r#"
paths:
  /pets:
    get:
      operationId: listPets
      parameters:
        - {name: id, in: query, type: string}
        - {name: id, in: header, type: string}
"#;
        assert!(matches!(parse_spec(yaml), Err(AppError::SpecIntegrity(_))));
    }

    #[test]
    fn test_colliding_resource_names_are_rejected() {
        let yaml = r#"
paths:
  /a:
    get: {tags: [Pet Store], operationId: a}
  /b:
    get: {tags: [Pet-Store], operationId: b}
"#;
        let err = parse_spec(yaml).unwrap_err();
        assert!(matches!(err, AppError::SpecIntegrity(_)));
        assert!(format!("{}", err).contains("Pet_Store"));
    }

    #[test]
    fn test_colliding_operation_ids_are_rejected() {
        let yaml = r#"
paths:
  /a:
    get: {operationId: list-pets}
  /b:
    get: {operationId: list_pets}
"#;
        let err = parse_spec(yaml).unwrap_err();
        assert!(matches!(err, AppError::SpecIntegrity(_)));
        assert!(format!("{}", err).contains("list_pets"));
    }

    #[test]
    fn test_explicit_null_default_is_kept() {
        let yaml = r#"
paths:
  /items:
    get:
      operationId: listItems
      parameters:
        - {name: cursor, in: query, required: true, type: string, default: null}
        - {name: page, in: query, required: true, type: integer}
"#;
        let spec = parse_spec(yaml).unwrap();
        let op = &spec.resources["items"].operations["listItems"];
        assert_eq!(op.params[0].default, Some(Value::Null));
        assert!(op.params[0].is_positional_optional());
        assert_eq!(op.params[1].default, None);
        assert!(!op.params[1].is_positional_optional());
    }

    #[test]
    fn test_multi_tag_operation_uses_first_tag() {
        let yaml = r#"
paths:
  /pets:
    get:
      tags: [pet, store]
      operationId: listPets
"#;
        let spec = parse_spec(yaml).unwrap();
        let names: Vec<_> = spec.resources.keys().cloned().collect();
        assert_eq!(names, vec!["pet"]);
        assert_eq!(spec.operation_count(), 1);
    }
}
