//! Canonical string form used for membership checks.
//!
//! Every comparison between a submitted value and a domain element goes
//! through [`canonical_string`], so numbers, strings, booleans and `null`
//! compare by the same rule regardless of which script language produced
//! them.

use serde_json::Value;

/// Canonical form of an absent value.
pub const NULL_CANONICAL: &str = "null";

/// Natural string representation of an opaque value.
///
/// - strings are taken verbatim (no quotes)
/// - `null` maps to [`NULL_CANONICAL`]
/// - numbers and booleans use their display form
/// - arrays and objects use their compact JSON encoding
pub fn canonical_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => NULL_CANONICAL.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}
