#![deny(missing_docs)]

//! # Code Generation
//!
//! Turns a loaded [`Spec`] into the source of a Python client module.
//!
//! The pipeline is single-pass and leaves-first:
//! - `responses`: happy-path response selection.
//! - `signature`: parameter ordering and default literal rendering.
//! - `emitter`: ordered [`CodeBlock`] sequence for the whole module.
//! - `render`: block text and output sinks.

pub mod blocks;
pub mod emitter;
pub mod render;
pub mod responses;
pub mod signature;

use crate::config::GeneratorConfig;
use crate::error::AppResult;
use crate::spec::{load_spec, Spec};
use std::path::Path;

pub use blocks::{CodeBlock, GeneratedModule, MethodDef};
pub use emitter::generate_module;
pub use render::{render_module, OutputSink};
pub use responses::select_happy_path_response;
pub use signature::{build_signature, render_signature, SignatureParam};

/// Generates and renders the client module for an in-memory spec.
pub fn generate_source(
    spec: &Spec,
    service_name: &str,
    config: &GeneratorConfig,
) -> AppResult<String> {
    let module = generate_module(spec, service_name, config)?;
    Ok(render_module(&module))
}

/// Loads the document at `spec_path`, generates the client module and writes it to `sink`.
///
/// Nothing is written unless loading and generation both succeed.
pub fn generate_client(
    spec_path: impl AsRef<Path>,
    service_name: &str,
    config: &GeneratorConfig,
    sink: &OutputSink,
) -> AppResult<()> {
    let spec_path = spec_path.as_ref();
    tracing::info!(spec = %spec_path.display(), service = service_name, "generating client");

    let spec = load_spec(spec_path)?;
    let source = generate_source(&spec, service_name, config)?;
    sink.write_all(&source)?;

    tracing::info!(
        resources = spec.resources.len(),
        operations = spec.operation_count(),
        bytes = source.len(),
        "client generated"
    );
    Ok(())
}
