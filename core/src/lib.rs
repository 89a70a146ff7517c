#![deny(missing_docs)]

//! # Clientgen Core
//!
//! Core library for generating Python `SwaggerClient` subclasses from
//! Swagger 2.0 documents.

/// Shared error types.
pub mod error;

/// Generator configuration.
pub mod config;

/// Spec model, loading and reference resolution.
pub mod spec;

/// Code generation (response selection, signatures, emission, rendering).
pub mod codegen;

pub use codegen::{
    generate_client, generate_module, generate_source, render_module, CodeBlock,
    GeneratedModule, OutputSink,
};
pub use config::GeneratorConfig;
pub use error::{AppError, AppResult};
pub use spec::{load_spec, parse_spec, LiteralKind, Operation, Parameter, Resource, Spec};
