#![deny(missing_docs)]

//! # Happy-Path Response Selection
//!
//! Picks the response an operation's result wrapper stands for. Almost always
//! that is the `200` response, but some operations only declare `201`/`204`
//! or a `default` response.

use crate::spec::resolver::Resolver;
use indexmap::IndexMap;
use serde_json::Value;

/// Status codes comparing below this (as strings) count as success.
const FIRST_NON_SUCCESS: &str = "300";

/// Returns the response definition representing the canonical success result.
///
/// 1. `"200"` is returned verbatim, without dereferencing.
/// 2. Otherwise the lexicographically smallest key is dereferenced and returned
///    when it sorts below `"300"`.
/// 3. Otherwise a `"default"` entry is dereferenced and returned.
/// 4. Otherwise `None`.
///
/// Keys are compared as strings, which is only meaningful for three-digit codes.
pub fn select_happy_path_response<'a, R>(
    responses: &'a IndexMap<String, Value>,
    resolver: &'a R,
) -> Option<&'a Value>
where
    R: Resolver + ?Sized,
{
    if let Some(ok) = responses.get("200") {
        return Some(ok);
    }

    if let Some(smallest) = responses.keys().min() {
        if smallest.as_str() < FIRST_NON_SUCCESS {
            return Some(resolver.deref(&responses[smallest]));
        }
    }

    responses.get("default").map(|default| resolver.deref(default))
}

/// Human-readable description of a selected response, if it has one.
pub fn response_description(response: &Value) -> Option<&str> {
    response
        .get("description")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}
