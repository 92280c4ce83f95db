//! Submitted and bound parameter values.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A validated parameter value, ready to be consumed by one job run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundParameterValue {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub description: String,
}

impl BoundParameterValue {
    pub fn new(
        name: impl Into<String>,
        value: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            description: description.into(),
        }
    }
}

/// Raw, unvalidated input for one parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// Zero or more raw strings, as carried by a query string.
    Values(Vec<String>),
    /// Structured form payload shaped like `{ "name": .., "value": .. }`.
    Form(Value),
}

impl Submission {
    pub fn single(value: impl Into<String>) -> Self {
        Submission::Values(vec![value.into()])
    }
}

/// Access to raw request values keyed by parameter name.
pub trait RequestParameters {
    /// All raw values submitted under `name`, or `None` when the key is absent.
    fn parameter_values(&self, name: &str) -> Option<&[String]>;
}

impl RequestParameters for HashMap<String, Vec<String>> {
    fn parameter_values(&self, name: &str) -> Option<&[String]> {
        self.get(name).map(Vec::as_slice)
    }
}

impl RequestParameters for BTreeMap<String, Vec<String>> {
    fn parameter_values(&self, name: &str) -> Option<&[String]> {
        self.get(name).map(Vec::as_slice)
    }
}

/// Form payload bound to the generic string-parameter shape.
///
/// The submitted `name` is ignored; the bound value always takes the name of
/// the definition it is validated against. `value` may be any JSON scalar.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct StringFormValue {
    #[serde(default)]
    pub value: Option<Value>,
}
