#![deny(missing_docs)]

//! # Reference Resolution
//!
//! Dereferences `$ref` values against the document a spec was loaded from.
//!
//! Only local references (`#/...`) are followed; external documents are never
//! fetched. Resolution is lenient: a reference that cannot be followed resolves
//! to itself and a warning is logged.

use crate::spec::models::Spec;
use percent_encoding::percent_decode_str;
use serde_json::Value;

/// Upper bound on chained `$ref` hops before giving up.
const MAX_REF_DEPTH: usize = 32;

/// Capability for resolving a spec reference to its definition.
pub trait Resolver {
    /// Follows `value` while it is a `{"$ref": ...}` object.
    ///
    /// Values that are not references are returned unchanged.
    fn deref<'a>(&'a self, value: &'a Value) -> &'a Value;
}

/// Resolves references against a borrowed raw document.
#[derive(Debug, Clone, Copy)]
pub struct DocumentResolver<'d> {
    document: &'d Value,
}

impl<'d> DocumentResolver<'d> {
    /// Creates a resolver over `document`.
    pub fn new(document: &'d Value) -> Self {
        Self { document }
    }

    /// Looks up a single local reference such as `#/responses/NotFound`.
    pub fn lookup(&self, reference: &str) -> Option<&'d Value> {
        let pointer = reference.strip_prefix('#')?;
        if pointer.is_empty() {
            return Some(self.document);
        }
        let mut current = self.document;
        for segment in pointer.trim_start_matches('/').split('/') {
            let key = decode_pointer_segment(segment);
            current = match current {
                Value::Object(map) => map.get(&key)?,
                Value::Array(items) => items.get(key.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Follows `value` through chained references inside the document.
    pub fn resolve(&self, value: &'d Value) -> &'d Value {
        let mut current = value;
        for _ in 0..MAX_REF_DEPTH {
            let Some(reference) = ref_target(current) else {
                return current;
            };
            match self.lookup(reference) {
                Some(target) => current = target,
                None => {
                    tracing::warn!(reference, "unresolvable $ref, using reference as-is");
                    return current;
                }
            }
        }
        tracing::warn!("$ref chain exceeds {} hops, stopping", MAX_REF_DEPTH);
        current
    }
}

impl Resolver for DocumentResolver<'_> {
    fn deref<'a>(&'a self, value: &'a Value) -> &'a Value {
        DocumentResolver::new(self.document).resolve(value)
    }
}

impl Resolver for Spec {
    fn deref<'a>(&'a self, value: &'a Value) -> &'a Value {
        DocumentResolver::new(&self.document).resolve(value)
    }
}

/// Returns the `$ref` string when `value` is a reference object.
pub fn ref_target(value: &Value) -> Option<&str> {
    value.as_object()?.get("$ref")?.as_str()
}

/// Decodes a JSON Pointer segment (handles `~1`, `~0` and percent escapes).
pub(crate) fn decode_pointer_segment(segment: &str) -> String {
    let decoded = segment.replace("~1", "/").replace("~0", "~");
    percent_decode_str(&decoded)
        .decode_utf8_lossy()
        .into_owned()
}
