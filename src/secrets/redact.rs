//! Picking one loggable entry out of a secret bundle.
//!
//! A write handler logs a single representative key/value pair to show the
//! bundle arrived. Values carrying certificate or key material are never
//! chosen.

use std::fmt;

use serde_json::Value;

use super::types::SecretBundle;

/// Substrings that mark a value as key or certificate material
pub const SENSITIVE_MARKERS: [&str; 3] = [
    "BEGIN CERTIFICATE",
    "BEGIN PGP PUBLIC KEY BLOCK",
    "BEGIN PRIVATE KEY",
];

/// Whether a value holds a string containing a sensitive marker.
///
/// Arrays and objects are searched recursively.
pub fn is_sensitive(value: &Value) -> bool {
    match value {
        Value::String(s) => SENSITIVE_MARKERS.iter().any(|marker| s.contains(marker)),
        Value::Array(items) => items.iter().any(is_sensitive),
        Value::Object(map) => map.values().any(is_sensitive),
        Value::Null | Value::Bool(_) | Value::Number(_) => false,
    }
}

/// The first non-sensitive entry in key order, or `None` when the bundle is
/// empty or every entry is sensitive. Stops at the first match.
pub fn representative_entry(bundle: &SecretBundle) -> Option<SecretPreview<'_>> {
    bundle
        .iter()
        .find(|(_, value)| !is_sensitive(value))
        .map(|(key, value)| SecretPreview { key, value })
}

/// A key/value pair safe to print
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SecretPreview<'a> {
    pub key: &'a str,
    pub value: &'a Value,
}

impl SecretPreview<'_> {
    /// The value as it is printed: strings raw, anything else as compact JSON
    pub fn value_text(&self) -> String {
        match self.value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for SecretPreview<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "key[{}] value[{}]", self.key, self.value_text())
    }
}
