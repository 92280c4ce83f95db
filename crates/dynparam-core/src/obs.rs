//! Structured observability hooks for choice resolution and binding.
//!
//! This module provides:
//! - A parameter-scoped tracing span via the `BindingSpan` RAII guard
//! - Emission functions for resolution and binding outcomes
//!
//! Every event carries a stable `event` field so log pipelines can filter on
//! it. Scripts are identified by digest, never by source.

use tracing::{info, warn};

/// RAII guard that enters a parameter-scoped span for one binding attempt.
///
/// # Example
///
/// ```ignore
/// let _span = BindingSpan::enter("env");
/// // every event emitted now carries parameter = "env"
/// ```
pub struct BindingSpan {
    _span: tracing::span::EnteredSpan,
}

impl BindingSpan {
    pub fn enter(parameter: &str) -> Self {
        let span = tracing::info_span!("dynparam.binding", parameter = %parameter);
        Self {
            _span: span.entered(),
        }
    }
}

/// Emit event: the script behind a parameter was evaluated.
pub fn emit_script_evaluated(parameter: &str, script_digest: &str, remote: bool, duration_ms: u64) {
    info!(
        event = "choices.script_evaluated",
        parameter = %parameter,
        script_digest = %script_digest,
        remote = remote,
        duration_ms = duration_ms,
    );
}

/// Emit event: a choice domain was resolved.
pub fn emit_choices_resolved(parameter: &str, choice_count: usize) {
    info!(event = "choices.resolved", parameter = %parameter, choice_count = choice_count);
}

/// Emit event: the script result was not a sequence, so the domain is empty.
pub fn emit_non_sequence_result(parameter: &str, result: &dyn std::fmt::Display) {
    info!(
        event = "choices.non_sequence",
        parameter = %parameter,
        result = %result,
        "Script parameter with name '{}' did not produce a list; the parameter value is: {}",
        parameter,
        result,
    );
}

/// Emit event: zero entries were submitted and the default value was bound.
pub fn emit_default_used(parameter: &str) {
    info!(event = "binding.default_used", parameter = %parameter);
}

/// Emit event: a submitted value was accepted.
pub fn emit_binding_accepted(parameter: &str) {
    info!(event = "binding.accepted", parameter = %parameter);
}

/// Emit event: a submitted value was rejected (warning level).
pub fn emit_binding_rejected(parameter: &str, kind: &str, detail: &dyn std::fmt::Display) {
    warn!(
        event = "binding.rejected",
        parameter = %parameter,
        kind = %kind,
        detail = %detail,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binding_span_create() {
        let _span = BindingSpan::enter("env");
    }
}
