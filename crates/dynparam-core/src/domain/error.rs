//! Error taxonomy for choice resolution and parameter binding.

use serde::{Deserialize, Serialize};

/// Failures reported by a script-evaluation collaborator.
///
/// These are fatal for the call that triggered the evaluation and are never
/// retried by the resolver.
#[derive(Debug, thiserror::Error)]
pub enum EvaluationError {
    #[error("script exited with code {exit_code}: {stderr}")]
    ScriptFailed { exit_code: i32, stderr: String },

    #[error("script timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },

    #[error("remote execution requested but no remote worker is configured")]
    RemoteUnavailable,

    #[error("failed to launch script: {0}")]
    Launch(String),

    #[error("script evaluation failed: {0}")]
    Other(String),
}

/// Errors raised while constructing a parameter definition.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DefinitionError {
    #[error("parameter name must not be empty")]
    EmptyName,

    #[error("invalid parameter identifier: {0}")]
    InvalidIdentifier(String),
}

/// Rejection of a single binding attempt.
///
/// Every variant aborts only the current attempt. None of them is ever turned
/// into a default value by the binder.
#[derive(Debug, thiserror::Error)]
pub enum BindingError {
    #[error("Illegal choice: {value}")]
    IllegalChoice { name: String, value: String },

    #[error("Illegal number of parameter values for '{name}': {count}")]
    IllegalArgumentCount { name: String, count: usize },

    #[error("no default value available for parameter '{name}'")]
    MissingDefault { name: String },

    #[error("malformed submission for parameter '{name}': {reason}")]
    MalformedSubmission { name: String, reason: String },

    #[error("script evaluation failed for parameter '{name}': {source}")]
    Evaluation {
        name: String,
        #[source]
        source: EvaluationError,
    },
}

impl BindingError {
    /// Name of the parameter the rejected submission was meant for.
    pub fn parameter_name(&self) -> &str {
        match self {
            BindingError::IllegalChoice { name, .. }
            | BindingError::IllegalArgumentCount { name, .. }
            | BindingError::MissingDefault { name }
            | BindingError::MalformedSubmission { name, .. }
            | BindingError::Evaluation { name, .. } => name,
        }
    }

    /// Machine-readable reason for the rejection.
    pub fn kind(&self) -> RejectionKind {
        match self {
            BindingError::IllegalChoice { .. } => RejectionKind::IllegalChoice,
            BindingError::IllegalArgumentCount { .. } => RejectionKind::IllegalArgumentCount,
            BindingError::MissingDefault { .. } => RejectionKind::MissingDefault,
            BindingError::MalformedSubmission { .. } => RejectionKind::MalformedSubmission,
            BindingError::Evaluation { .. } => RejectionKind::EvaluationFailure,
        }
    }
}

/// Reason code attached to a rejected binding, for host-side presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionKind {
    IllegalChoice,
    IllegalArgumentCount,
    MissingDefault,
    MalformedSubmission,
    EvaluationFailure,
}

impl RejectionKind {
    /// Whether the submitter caused the rejection (a 4xx-class failure).
    ///
    /// Evaluation failures and a missing default are server-side conditions.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            RejectionKind::IllegalChoice
                | RejectionKind::IllegalArgumentCount
                | RejectionKind::MalformedSubmission
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RejectionKind::IllegalChoice => "illegal_choice",
            RejectionKind::IllegalArgumentCount => "illegal_argument_count",
            RejectionKind::MissingDefault => "missing_default",
            RejectionKind::MalformedSubmission => "malformed_submission",
            RejectionKind::EvaluationFailure => "evaluation_failure",
        }
    }
}

impl std::fmt::Display for RejectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result type for binding operations.
pub type Result<T> = std::result::Result<T, BindingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_illegal_choice_names_value() {
        let err = BindingError::IllegalChoice {
            name: "env".to_string(),
            value: "z".to_string(),
        };
        assert_eq!(err.to_string(), "Illegal choice: z");
        assert_eq!(err.parameter_name(), "env");
        assert_eq!(err.kind(), RejectionKind::IllegalChoice);
    }

    #[test]
    fn test_illegal_argument_count_names_parameter_and_count() {
        let err = BindingError::IllegalArgumentCount {
            name: "env".to_string(),
            count: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains("'env'"));
        assert!(msg.ends_with(": 2"));
    }

    #[test]
    fn test_evaluation_error_is_source() {
        let err = BindingError::Evaluation {
            name: "env".to_string(),
            source: EvaluationError::Timeout { timeout_secs: 5 },
        };
        let source = std::error::Error::source(&err).expect("source");
        assert!(source.to_string().contains("5 seconds"));
        assert_eq!(err.kind(), RejectionKind::EvaluationFailure);
    }

    #[test]
    fn test_client_error_classification() {
        assert!(RejectionKind::IllegalChoice.is_client_error());
        assert!(RejectionKind::IllegalArgumentCount.is_client_error());
        assert!(RejectionKind::MalformedSubmission.is_client_error());
        assert!(!RejectionKind::EvaluationFailure.is_client_error());
        assert!(!RejectionKind::MissingDefault.is_client_error());
    }

    #[test]
    fn test_rejection_kind_serializes_snake_case() {
        let json = serde_json::to_string(&RejectionKind::IllegalArgumentCount).unwrap();
        assert_eq!(json, "\"illegal_argument_count\"");
        assert_eq!(
            RejectionKind::IllegalArgumentCount.to_string(),
            "illegal_argument_count"
        );
    }
}
