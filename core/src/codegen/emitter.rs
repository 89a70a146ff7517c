#![deny(missing_docs)]

//! # Client Module Emitter
//!
//! Walks a [`Spec`] and produces the block sequence of the client module:
//!
//! 1. the preamble,
//! 2. one accessor property per resource,
//! 3. one handle class per resource,
//! 4. one result wrapper per operation.
//!
//! Every traversal goes through sorted maps, so the same spec always yields the
//! same blocks.

use crate::codegen::blocks::{CodeBlock, GeneratedModule, MethodDef};
use crate::codegen::responses::{response_description, select_happy_path_response};
use crate::codegen::signature::build_signature;
use crate::config::GeneratorConfig;
use crate::error::{AppError, AppResult};
use crate::spec::models::{Operation, Resource, Spec};
use crate::spec::naming::{is_python_identifier, SELF_PARAM};
use std::collections::BTreeMap;

/// Generates the client module for `spec`.
///
/// Fails with [`AppError::SpecIntegrity`] when an operation repeats a parameter
/// name, when two resources share an operation id (their wrapper classes
/// would collide), or when a resource, operation or parameter name is not a
/// Python identifier.
pub fn generate_module(
    spec: &Spec,
    service_name: &str,
    config: &GeneratorConfig,
) -> AppResult<GeneratedModule> {
    check_identifiers(spec)?;
    check_unique_operation_ids(spec)?;

    let mut blocks = vec![CodeBlock::Preamble(config.render_preamble(service_name))];

    for name in spec.resources.keys() {
        blocks.push(CodeBlock::ResourceAccessor {
            resource: name.clone(),
            class_name: config.resource_class_name(name),
        });
    }

    for resource in spec.resources.values() {
        tracing::debug!(
            resource = %resource.name,
            operations = resource.operations.len(),
            "emitting resource class"
        );
        blocks.push(resource_class(resource, config)?);
    }

    for resource in spec.resources.values() {
        for operation in resource.operations.values() {
            blocks.push(result_wrapper(spec, operation, config));
        }
    }

    tracing::debug!(blocks = blocks.len(), service = service_name, "generated module");
    Ok(GeneratedModule { blocks })
}

fn check_identifiers(spec: &Spec) -> AppResult<()> {
    let invalid = |what: &str, name: &str| {
        AppError::SpecIntegrity(format!("{} name '{}' is not a Python identifier", what, name))
    };

    for resource in spec.resources.values() {
        if !is_python_identifier(&resource.name) {
            return Err(invalid("Resource", &resource.name));
        }
        for operation in resource.operations.values() {
            if !is_python_identifier(&operation.operation_id) {
                return Err(invalid("Operation", &operation.operation_id));
            }
            if let Some(param) = operation
                .params
                .iter()
                .find(|p| p.name == SELF_PARAM || !is_python_identifier(&p.name))
            {
                return Err(invalid("Parameter", &param.name));
            }
        }
    }
    Ok(())
}

fn check_unique_operation_ids(spec: &Spec) -> AppResult<()> {
    let mut owners: BTreeMap<&str, &str> = BTreeMap::new();
    for resource in spec.resources.values() {
        for operation_id in resource.operations.keys() {
            if let Some(previous) = owners.insert(operation_id, &resource.name) {
                return Err(AppError::SpecIntegrity(format!(
                    "Operation id '{}' is declared by both '{}' and '{}'",
                    operation_id, previous, resource.name
                )));
            }
        }
    }
    Ok(())
}

fn resource_class(resource: &Resource, config: &GeneratorConfig) -> AppResult<CodeBlock> {
    let methods = resource
        .operations
        .values()
        .map(|operation| method_def(&resource.key, operation, config))
        .collect::<AppResult<Vec<_>>>()?;

    Ok(CodeBlock::ResourceClass {
        class_name: config.resource_class_name(&resource.name),
        methods,
    })
}

fn method_def(
    resource_key: &str,
    operation: &Operation,
    config: &GeneratorConfig,
) -> AppResult<MethodDef> {
    let signature = build_signature(operation, &config.request_options_param)?;
    Ok(MethodDef {
        name: operation.operation_id.clone(),
        resource: resource_key.to_string(),
        signature,
        forwarded: operation.params.iter().map(|p| p.name.clone()).collect(),
        wrapper_class: config.wrapper_class_name(&operation.operation_id),
        options_param: config.request_options_param.clone(),
        also_return_response: config.also_return_response,
    })
}

fn result_wrapper(spec: &Spec, operation: &Operation, config: &GeneratorConfig) -> CodeBlock {
    let happy_path = select_happy_path_response(&operation.responses, spec);
    if happy_path.is_none() {
        tracing::debug!(
            operation = %operation.operation_id,
            "no happy-path response, emitting bare wrapper"
        );
    }

    CodeBlock::ResultWrapper {
        class_name: config.wrapper_class_name(&operation.operation_id),
        summary: happy_path
            .and_then(response_description)
            .map(str::to_string),
    }
}
