//! Parameter definitions consumed by the resolver and binder.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::DefinitionError;
use super::script::Script;
use super::value::BoundParameterValue;

/// Capabilities the host's parameter definition must provide.
///
/// The core only reads through this trait; a definition is never mutated
/// during resolution or validation.
pub trait ParameterSpec: Send + Sync {
    fn name(&self) -> &str;

    fn script(&self) -> &Script;

    fn description(&self) -> &str;

    fn identifier(&self) -> Option<&str> {
        None
    }

    /// Whether the script should be evaluated on a remote worker.
    fn is_remote(&self) -> bool;

    /// Value bound when a submission carries no entries for this parameter.
    fn default_value(&self) -> Option<BoundParameterValue>;
}

/// Choice parameter whose legal values are generated by a script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ChoiceParameterFields")]
pub struct ChoiceParameterDefinition {
    name: String,
    script: Script,
    description: String,
    identifier: Uuid,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    remote: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    default_value: Option<String>,
    #[serde(skip)]
    identifier_text: String,
}

/// Unvalidated definition fields as they appear in configuration.
#[derive(Debug, Clone, Deserialize)]
struct ChoiceParameterFields {
    name: String,
    script: Script,
    #[serde(default)]
    description: String,
    #[serde(default)]
    identifier: Option<String>,
    #[serde(default)]
    remote: bool,
    #[serde(default)]
    default_value: Option<String>,
}

impl TryFrom<ChoiceParameterFields> for ChoiceParameterDefinition {
    type Error = DefinitionError;

    fn try_from(fields: ChoiceParameterFields) -> Result<Self, Self::Error> {
        let definition = Self::new(
            fields.name,
            fields.script,
            fields.description,
            fields.identifier.as_deref(),
            fields.remote,
        )?;
        Ok(match fields.default_value {
            Some(value) => definition.with_default_value(value),
            None => definition,
        })
    }
}

impl ChoiceParameterDefinition {
    /// Create a new definition.
    ///
    /// A missing or empty `identifier` is replaced with a fresh v4 UUID.
    pub fn new(
        name: impl Into<String>,
        script: impl Into<Script>,
        description: impl Into<String>,
        identifier: Option<&str>,
        remote: bool,
    ) -> Result<Self, DefinitionError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DefinitionError::EmptyName);
        }

        let identifier = match identifier.map(str::trim).filter(|s| !s.is_empty()) {
            Some(text) => Uuid::parse_str(text)
                .map_err(|_| DefinitionError::InvalidIdentifier(text.to_string()))?,
            None => Uuid::new_v4(),
        };

        Ok(Self {
            name,
            script: script.into(),
            description: description.into(),
            identifier,
            remote,
            default_value: None,
            identifier_text: identifier.to_string(),
        })
    }

    /// Attach the value bound when a submission carries no entries.
    pub fn with_default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn uuid(&self) -> Uuid {
        self.identifier
    }
}

impl ParameterSpec for ChoiceParameterDefinition {
    fn name(&self) -> &str {
        &self.name
    }

    fn script(&self) -> &Script {
        &self.script
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn identifier(&self) -> Option<&str> {
        Some(&self.identifier_text)
    }

    fn is_remote(&self) -> bool {
        self.remote
    }

    fn default_value(&self) -> Option<BoundParameterValue> {
        self.default_value
            .as_ref()
            .map(|value| BoundParameterValue::new(&self.name, value, &self.description))
    }
}
