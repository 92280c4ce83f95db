//! Script-evaluation collaborator interface.

use crate::domain::{EvaluationError, Script, ScriptResult};

/// Evaluates a script and returns its raw result.
///
/// Calls are synchronous and may block while a remote worker runs the
/// script. Timeouts, retries and sandboxing belong to the implementation.
pub trait ScriptEvaluator: Send + Sync {
    fn evaluate(
        &self,
        script: &Script,
        run_remotely: bool,
    ) -> Result<ScriptResult, EvaluationError>;
}
