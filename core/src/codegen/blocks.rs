#![deny(missing_docs)]

//! # Code Blocks
//!
//! Structured output units. The emitter decides *which* blocks exist and in
//! what order; [`crate::codegen::render`] decides how each one is spelled.

use crate::codegen::signature::SignatureParam;

/// Base class every result wrapper derives from.
pub const WRAPPER_BASE_CLASS: &str = "HttpFuture";

/// One unit of generated text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeBlock {
    /// Module header (imports + client class line), taken from configuration.
    Preamble(String),
    /// Read-only property on the client class returning a resource handle.
    ResourceAccessor {
        /// Property name; equals the resource name.
        resource: String,
        /// Handle class constructed by the property.
        class_name: String,
    },
    /// Handle class holding the shared spec and one method per operation.
    ResourceClass {
        /// Class name.
        class_name: String,
        /// Methods in operation-name order.
        methods: Vec<MethodDef>,
    },
    /// Empty per-operation marker subclass tagging the call result.
    ResultWrapper {
        /// Class name.
        class_name: String,
        /// Description of the happy-path response, when one was selected and described.
        summary: Option<String>,
    },
}

impl CodeBlock {
    /// Short name of the block variant, used in logs and tests.
    pub fn kind(&self) -> &'static str {
        match self {
            CodeBlock::Preamble(_) => "preamble",
            CodeBlock::ResourceAccessor { .. } => "resource_accessor",
            CodeBlock::ResourceClass { .. } => "resource_class",
            CodeBlock::ResultWrapper { .. } => "result_wrapper",
        }
    }
}

/// A generated operation method on a resource handle class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDef {
    /// Method name; equals the operation id.
    pub name: String,
    /// Key the operation's resource is looked up under at call time (the raw tag).
    pub resource: String,
    /// Ordered parameters (without `self`).
    pub signature: Vec<SignatureParam>,
    /// Declared parameter names forwarded to `construct_request`, in declaration order.
    pub forwarded: Vec<String>,
    /// Result wrapper class pinned as `http_future_class`.
    pub wrapper_class: String,
    /// Name of the trailing per-call options parameter.
    pub options_param: String,
    /// Value passed as `also_return_response_default`.
    pub also_return_response: bool,
}

/// The ordered sequence of blocks produced by one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GeneratedModule {
    /// Blocks in output order.
    pub blocks: Vec<CodeBlock>,
}

impl GeneratedModule {
    /// Number of blocks of the given [`CodeBlock::kind`].
    pub fn count_kind(&self, kind: &str) -> usize {
        self.blocks.iter().filter(|b| b.kind() == kind).count()
    }
}
