#![deny(missing_docs)]

//! # Spec Model
//!
//! The in-memory API description that code generation reads from, plus the
//! collaborators that build it (document loading) and query it (reference
//! resolution).

pub mod loader;
pub mod models;
pub mod naming;
pub mod resolver;

pub use loader::{load_spec, parse_spec};
pub use models::{LiteralKind, Operation, Parameter, Resource, Spec};
pub use resolver::{DocumentResolver, Resolver};
