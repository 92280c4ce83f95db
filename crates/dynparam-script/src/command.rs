//! Shell-backed `ScriptEvaluator`.

use dynparam_core::{EvaluationError, Script, ScriptEvaluator, ScriptResult};
use tokio::runtime::{Handle, RuntimeFlavor};
use tracing::{debug, warn};

use crate::config::EvaluatorConfig;
use crate::launch::LaunchPlan;
use crate::output::parse_output;
use crate::runner::run_plan;

/// Evaluates scripts by running them through a configured shell, locally or
/// through the configured remote launcher.
///
/// The synchronous [`ScriptEvaluator::evaluate`] drives the process on a
/// private current-thread runtime. Inside a multi-thread tokio runtime it
/// blocks in place on the ambient runtime instead; inside a current-thread
/// runtime it fails the evaluation, since blocking there would stall the
/// only worker. Async hosts use [`CommandScriptEvaluator::evaluate_async`].
#[derive(Debug, Clone, Default)]
pub struct CommandScriptEvaluator {
    config: EvaluatorConfig,
}

impl CommandScriptEvaluator {
    pub fn new(config: EvaluatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Run `script` and interpret its stdout.
    ///
    /// A non-zero exit status is an evaluation failure; its stdout is ignored.
    pub async fn evaluate_async(
        &self,
        script: &Script,
        run_remotely: bool,
    ) -> Result<ScriptResult, EvaluationError> {
        let plan = LaunchPlan::for_script(&self.config, script, run_remotely)?;
        let output = run_plan(&plan).await?;

        if !output.passed() {
            warn!(
                script_digest = %script.digest(),
                exit_code = output.exit_code,
                target_kind = plan.target.name(),
                "script exited unsuccessfully"
            );
            return Err(EvaluationError::ScriptFailed {
                exit_code: output.exit_code,
                stderr: output.stderr.trim().to_string(),
            });
        }

        debug!(
            script_digest = %script.digest(),
            duration_ms = output.duration_ms,
            stdout_bytes = output.stdout.len(),
            "script completed"
        );
        Ok(parse_output(&output.stdout, self.config.output))
    }
}

impl ScriptEvaluator for CommandScriptEvaluator {
    fn evaluate(
        &self,
        script: &Script,
        run_remotely: bool,
    ) -> Result<ScriptResult, EvaluationError> {
        if let Ok(handle) = Handle::try_current() {
            return match handle.runtime_flavor() {
                RuntimeFlavor::MultiThread => tokio::task::block_in_place(|| {
                    handle.block_on(self.evaluate_async(script, run_remotely))
                }),
                _ => Err(EvaluationError::Other(
                    "sync evaluate called inside a current-thread async runtime".to_string(),
                )),
            };
        }

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_io()
            .enable_time()
            .build()
            .map_err(|e| EvaluationError::Other(format!("runtime init failed: {}", e)))?;
        runtime.block_on(self.evaluate_async(script, run_remotely))
    }
}
