#![deny(missing_docs)]

//! # Spec Models
//!
//! Immutable value structures for a loaded API description.
//!
//! The loader builds these once; code generation only ever borrows them.

use indexmap::IndexMap;
use serde_json::Value;
use std::collections::BTreeMap;

/// The parsed, in-memory representation of an API description.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Spec {
    /// Resources keyed by name. Sorted so traversal order never depends on hashing.
    pub resources: BTreeMap<String, Resource>,
    /// The raw document the spec was loaded from, used to resolve `$ref` values.
    pub document: Value,
}

impl Spec {
    /// Creates a spec from resources and the raw source document.
    pub fn new(resources: impl IntoIterator<Item = Resource>, document: Value) -> Self {
        Self {
            resources: resources
                .into_iter()
                .map(|resource| (resource.name.clone(), resource))
                .collect(),
            document,
        }
    }

    /// Total number of operations across every resource.
    pub fn operation_count(&self) -> usize {
        self.resources.values().map(|r| r.operations.len()).sum()
    }
}

/// A named grouping of related operations.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Resource {
    /// Resource name as a Python identifier, unique within the spec.
    pub name: String,
    /// Key of the resource in the runtime client's resource table (the raw tag).
    pub key: String,
    /// Operations keyed by operation identifier.
    pub operations: BTreeMap<String, Operation>,
}

impl Resource {
    /// Creates a resource from its operations. The lookup key defaults to the name.
    pub fn new(name: impl Into<String>, operations: impl IntoIterator<Item = Operation>) -> Self {
        let name = name.into();
        Self {
            key: name.clone(),
            name,
            operations: operations
                .into_iter()
                .map(|op| (op.operation_id.clone(), op))
                .collect(),
        }
    }

    /// Sets the runtime lookup key when it differs from the identifier.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }
}

/// A single callable action (one HTTP endpoint).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Operation {
    /// Used as both the method name and the wrapper type name.
    pub operation_id: String,
    /// Parameters in declaration order.
    pub params: Vec<Parameter>,
    /// Raw response definitions keyed by status code (or `default`), in document order.
    pub responses: IndexMap<String, Value>,
}

impl Operation {
    /// Creates an operation with no responses.
    pub fn new(operation_id: impl Into<String>, params: Vec<Parameter>) -> Self {
        Self {
            operation_id: operation_id.into(),
            params,
            ..Self::default()
        }
    }

    /// Sets the response definitions.
    pub fn with_responses(mut self, responses: IndexMap<String, Value>) -> Self {
        self.responses = responses;
        self
    }
}

/// How a parameter's default value is written as a literal.
///
/// Decided once from the declared type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LiteralKind {
    /// `type: string`; defaults are quoted.
    String,
    /// `type: integer` or `type: number`.
    Number,
    /// `type: boolean`.
    Boolean,
    /// Anything else, including untyped body parameters.
    #[default]
    Other,
}

impl LiteralKind {
    /// Maps a Swagger primitive type tag to a literal kind.
    pub fn from_type_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("string") => LiteralKind::String,
            Some("integer") | Some("number") => LiteralKind::Number,
            Some("boolean") => LiteralKind::Boolean,
            _ => LiteralKind::Other,
        }
    }
}

/// An operation parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    /// Parameter name as a Python identifier, unique within the operation.
    pub name: String,
    /// Whether the parameter is marked `required`.
    pub required: bool,
    /// Declared default value, if any. An explicit `null` default is `Some(Value::Null)`.
    pub default: Option<Value>,
    /// Declared type tag (`string`, `integer`, ...). Absent for body parameters.
    pub param_type: Option<String>,
    /// Literal kind derived from `param_type`.
    pub literal_kind: LiteralKind,
}

impl Parameter {
    /// Creates a parameter; the literal kind is derived from `param_type`.
    pub fn new(
        name: impl Into<String>,
        required: bool,
        default: Option<Value>,
        param_type: Option<String>,
    ) -> Self {
        let literal_kind = LiteralKind::from_type_tag(param_type.as_deref());
        Self {
            name: name.into(),
            required,
            default,
            param_type,
            literal_kind,
        }
    }

    /// Shorthand for a required parameter without a default.
    pub fn required(name: impl Into<String>, param_type: &str) -> Self {
        Self::new(name, true, None, Some(param_type.to_string()))
    }

    /// Shorthand for an optional parameter with an optional default.
    pub fn optional(name: impl Into<String>, param_type: &str, default: Option<Value>) -> Self {
        Self::new(name, false, default, Some(param_type.to_string()))
    }

    /// True when the parameter belongs after the required ones in a signature.
    pub fn is_positional_optional(&self) -> bool {
        self.default.is_some() || !self.required
    }
}
