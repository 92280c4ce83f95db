//! Script references and evaluation results.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

/// Opaque script reference handed to the script-evaluation collaborator.
///
/// The core never interprets the source; it only forwards it and identifies it
/// in diagnostics by digest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Script(String);

impl Script {
    pub fn new(source: impl Into<String>) -> Self {
        Self(source.into())
    }

    pub fn source(&self) -> &str {
        &self.0
    }

    /// SHA-256 hex digest of the script source.
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.0.as_bytes());
        hex::encode(hasher.finalize())
    }
}

impl From<&str> for Script {
    fn from(source: &str) -> Self {
        Self::new(source)
    }
}

impl From<String> for Script {
    fn from(source: String) -> Self {
        Self(source)
    }
}

/// Raw result of one script evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ScriptResult {
    /// An ordered sequence of opaque values.
    Sequence(Vec<Value>),
    /// A single value that is not a sequence.
    Scalar(Value),
    /// The script produced nothing.
    Absent,
}

impl From<Value> for ScriptResult {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(items) => ScriptResult::Sequence(items),
            Value::Null => ScriptResult::Absent,
            other => ScriptResult::Scalar(other),
        }
    }
}

impl std::fmt::Display for ScriptResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScriptResult::Sequence(items) => write!(f, "{}", Value::Array(items.clone())),
            ScriptResult::Scalar(value) => write!(f, "{}", value),
            ScriptResult::Absent => f.write_str("null"),
        }
    }
}
