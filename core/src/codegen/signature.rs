#![deny(missing_docs)]

//! # Method Signatures
//!
//! Orders an operation's parameters for a Python method signature:
//! required parameters first, then defaulted/optional ones, then the trailing
//! per-call request options parameter. Both groups keep declaration order.

use crate::error::{AppError, AppResult};
use crate::spec::models::{LiteralKind, Operation, Parameter};
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;

/// Python's absent value.
pub const PY_NONE: &str = "None";

/// One rendered parameter declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureParam {
    /// Parameter name.
    pub name: String,
    /// Rendered default literal; `None` for a bare required parameter.
    pub default: Option<String>,
}

impl SignatureParam {
    fn bare(name: &str) -> Self {
        Self {
            name: name.to_string(),
            default: None,
        }
    }

    fn with_default(name: &str, default: String) -> Self {
        Self {
            name: name.to_string(),
            default: Some(default),
        }
    }
}

impl fmt::Display for SignatureParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.default {
            Some(default) => write!(f, "{}={}", self.name, default),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Builds the ordered parameter list for `operation`.
///
/// The receiver (`self`) is not included. The last entry is always
/// `options_param=None`.
pub fn build_signature(
    operation: &Operation,
    options_param: &str,
) -> AppResult<Vec<SignatureParam>> {
    let mut seen = HashSet::new();
    for param in &operation.params {
        if !seen.insert(param.name.as_str()) {
            return Err(AppError::SpecIntegrity(format!(
                "Operation '{}' declares parameter '{}' more than once",
                operation.operation_id, param.name
            )));
        }
    }
    if seen.contains(options_param) {
        return Err(AppError::SpecIntegrity(format!(
            "Operation '{}' declares parameter '{}', which collides with the request options parameter",
            operation.operation_id, options_param
        )));
    }

    let (optional, required): (Vec<&Parameter>, Vec<&Parameter>) = operation
        .params
        .iter()
        .partition(|p| p.is_positional_optional());

    let mut signature: Vec<SignatureParam> = required
        .into_iter()
        .map(|p| SignatureParam::bare(&p.name))
        .collect();

    signature.extend(
        optional
            .into_iter()
            .map(|p| SignatureParam::with_default(&p.name, render_default(p))),
    );

    signature.push(SignatureParam::with_default(options_param, PY_NONE.to_string()));
    Ok(signature)
}

/// Joins a signature into a method parameter list, prefixed with `self`.
pub fn render_signature(params: &[SignatureParam]) -> String {
    std::iter::once("self".to_string())
        .chain(params.iter().map(ToString::to_string))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Renders the default literal of an optional parameter.
pub fn render_default(param: &Parameter) -> String {
    let default = match &param.default {
        None | Some(Value::Null) => return PY_NONE.to_string(),
        Some(default) => default,
    };

    match param.literal_kind {
        LiteralKind::String => py_str(&plain_text(default)),
        LiteralKind::Number => match default {
            Value::String(s) if is_finite_number(s) => s.trim().to_string(),
            other => py_literal(other),
        },
        LiteralKind::Boolean => match default {
            Value::String(s) if s.eq_ignore_ascii_case("true") => "True".to_string(),
            Value::String(s) if s.eq_ignore_ascii_case("false") => "False".to_string(),
            other => py_literal(other),
        },
        LiteralKind::Other => py_literal(default),
    }
}

/// True for numeric text Python reads as a number literal; `NaN` and `inf` are not.
fn is_finite_number(text: &str) -> bool {
    text.trim().parse::<f64>().is_ok_and(f64::is_finite)
}

/// Text of a value as it would be interpolated into a string.
fn plain_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => py_literal(other),
    }
}

/// Python literal form of a JSON value.
pub fn py_literal(value: &Value) -> String {
    match value {
        Value::Null => PY_NONE.to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => py_str(s),
        Value::Array(items) => format!(
            "[{}]",
            items.iter().map(py_literal).collect::<Vec<_>>().join(", ")
        ),
        Value::Object(map) => format!(
            "{{{}}}",
            map.iter()
                .map(|(k, v)| format!("{}: {}", py_str(k), py_literal(v)))
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}

/// Single-quoted Python string literal.
pub fn py_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}
