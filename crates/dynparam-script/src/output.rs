//! Conversion of script stdout into a `ScriptResult`.

use dynparam_core::ScriptResult;
use serde_json::Value;

use crate::config::OutputFormat;

/// Interpret captured stdout according to `format`.
///
/// `Json`: blank output is `Absent`, a JSON document is classified by shape,
/// and anything else becomes the trimmed text as a string scalar.
/// `Lines`: each non-blank trimmed line is one string element, in order.
pub fn parse_output(stdout: &str, format: OutputFormat) -> ScriptResult {
    let trimmed = stdout.trim();
    match format {
        OutputFormat::Json => {
            if trimmed.is_empty() {
                return ScriptResult::Absent;
            }
            match serde_json::from_str::<Value>(trimmed) {
                Ok(value) => ScriptResult::from(value),
                Err(_) => ScriptResult::Scalar(Value::String(trimmed.to_string())),
            }
        }
        OutputFormat::Lines => ScriptResult::Sequence(
            stdout
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(|line| Value::String(line.to_string()))
                .collect(),
        ),
    }
}
