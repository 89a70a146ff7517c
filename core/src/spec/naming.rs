#![deny(missing_docs)]

//! # Naming Utilities
//!
//! Helper functions for turning operation ids, tags and parameter names into
//! names that are valid Python identifiers.

use regex::Regex;
use std::sync::OnceLock;

/// Python reserved words (3.x, plus the Python 2 statements `print` and `exec`).
const PYTHON_KEYWORDS: [&str; 37] = [
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "exec", "finally", "for", "from",
    "global", "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "print",
    "raise", "return", "try", "while", "with", "yield",
];

/// Name of the receiver in generated methods.
pub const SELF_PARAM: &str = "self";

fn non_word() -> &'static Regex {
    static NON_WORD: OnceLock<Regex> = OnceLock::new();
    NON_WORD.get_or_init(|| Regex::new(r"\W+").expect("Invalid regex"))
}

fn identifier() -> &'static Regex {
    static IDENTIFIER: OnceLock<Regex> = OnceLock::new();
    IDENTIFIER.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("Invalid regex"))
}

/// Returns true for Python reserved words.
pub fn is_python_keyword(name: &str) -> bool {
    PYTHON_KEYWORDS.contains(&name)
}

/// Converts an arbitrary name into a Python identifier.
///
/// Non-word runs become `_`, a leading digit gets a `_` prefix and reserved
/// words get a `_` suffix. An empty result becomes `_`.
///
/// e.g. `Pet Store` -> `Pet_Store`, `X-Request-ID` -> `X_Request_ID`, `from` -> `from_`
pub fn python_identifier(raw: &str) -> String {
    let replaced = non_word().replace_all(raw, "_");
    // \W is unicode-aware; anything left outside ASCII is folded as well
    let mut name: String = replaced
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();

    if name.is_empty() {
        name.push('_');
    }
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }
    if is_python_keyword(&name) {
        name.push('_');
    }
    name
}

/// Like [`python_identifier`], but leading and trailing `_` runs are dropped first.
/// Used for names built from URL paths.
///
/// e.g. `/user-profiles/` -> `user_profiles`
pub fn trimmed_identifier(raw: &str) -> String {
    let replaced = non_word().replace_all(raw, "_");
    python_identifier(replaced.trim_matches('_'))
}

/// Like [`python_identifier`], but also keeps clear of the `self` receiver
/// that every generated method takes.
pub fn parameter_identifier(raw: &str) -> String {
    let name = python_identifier(raw);
    if name == SELF_PARAM {
        return format!("{}_", name);
    }
    name
}

/// Derives an operation id from the HTTP method and URL path.
///
/// e.g. `GET /pet/{petId}` -> `get_pet_petId`
pub fn derive_operation_id(method: &str, path: &str) -> String {
    trimmed_identifier(&format!("{}_{}", method, path))
}

/// True when `name` can be written as a Python name in a `def`, `class` or keyword argument.
pub fn is_python_identifier(name: &str) -> bool {
    identifier().is_match(name) && !is_python_keyword(name)
}
