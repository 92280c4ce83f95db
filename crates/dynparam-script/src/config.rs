//! Host configuration: evaluator settings, logging and parameter definitions.
//!
//! Configuration is read from TOML. Invalid settings fail closed with
//! [`ConfigError::Validation`] rather than falling back to defaults.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use dynparam_core::{ChoiceParameterDefinition, LogSettings, ParameterSpec};
use serde::{Deserialize, Serialize};

/// Errors produced while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Validation(String),
}

/// How script stdout is turned into a result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Parse stdout as a JSON document.
    #[default]
    Json,
    /// Every non-blank line is one string choice.
    Lines,
}

/// Settings for [`CommandScriptEvaluator`](crate::CommandScriptEvaluator).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluatorConfig {
    /// Command prefix for local evaluation; the script source is appended.
    #[serde(default = "default_shell")]
    pub shell: Vec<String>,

    /// Command prefix for remote evaluation, e.g. `["ssh", "worker", "sh", "-c"]`.
    ///
    /// The launcher is expected to join its trailing arguments into one
    /// remote command line, as `ssh` does; the script source is appended
    /// shell-quoted.
    #[serde(default)]
    pub remote_launcher: Option<Vec<String>>,

    /// Timeout in seconds (0 = no timeout).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub output: OutputFormat,

    /// Extra environment variables for the script process.
    #[serde(default)]
    pub env: BTreeMap<String, String>,
}

fn default_shell() -> Vec<String> {
    vec!["sh".to_string(), "-c".to_string()]
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            shell: default_shell(),
            remote_launcher: None,
            timeout_secs: default_timeout_secs(),
            output: OutputFormat::default(),
            env: BTreeMap::new(),
        }
    }
}

impl EvaluatorConfig {
    /// Set the remote launcher prefix.
    pub fn with_remote_launcher(mut self, launcher: Vec<String>) -> Self {
        self.remote_launcher = Some(launcher);
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn with_output(mut self, output: OutputFormat) -> Self {
        self.output = output;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.shell.is_empty() {
            return Err(ConfigError::Validation(
                "evaluator.shell must name at least an executable".to_string(),
            ));
        }
        if matches!(&self.remote_launcher, Some(launcher) if launcher.is_empty()) {
            return Err(ConfigError::Validation(
                "evaluator.remote_launcher must not be empty when set".to_string(),
            ));
        }
        Ok(())
    }
}

/// Top-level host configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScriptHostConfig {
    #[serde(default)]
    pub logging: LogSettings,

    #[serde(default)]
    pub evaluator: EvaluatorConfig,

    #[serde(default)]
    pub parameters: Vec<ChoiceParameterDefinition>,
}

impl ScriptHostConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.evaluator.validate()?;

        let mut seen = HashSet::new();
        for parameter in &self.parameters {
            if !seen.insert(parameter.name()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate parameter name '{}'",
                    parameter.name()
                )));
            }
        }
        Ok(())
    }

    /// Look up a parameter definition by name.
    pub fn parameter(&self, name: &str) -> Option<&ChoiceParameterDefinition> {
        self.parameters.iter().find(|p| p.name() == name)
    }
}
