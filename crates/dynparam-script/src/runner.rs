//! Script process execution.

use std::process::Stdio;
use std::time::{Duration, Instant};

use dynparam_core::EvaluationError;
use tokio::process::Command;
use tracing::debug;

use crate::launch::LaunchPlan;

/// Captured output of one script process.
#[derive(Debug, Clone)]
pub struct ScriptOutput {
    /// Exit code (0 = success, -1 when killed by a signal).
    pub exit_code: i32,

    pub stdout: String,

    pub stderr: String,

    /// Duration in milliseconds.
    pub duration_ms: u64,

    /// Whether the process exited successfully.
    pub success: bool,
}

impl ScriptOutput {
    /// Whether this run passed (exit code 0).
    pub fn passed(&self) -> bool {
        self.success && self.exit_code == 0
    }
}

/// Run the plan's process to completion and capture its output.
///
/// The child is killed when the timeout elapses.
pub async fn run_plan(plan: &LaunchPlan) -> Result<ScriptOutput, EvaluationError> {
    let start = Instant::now();

    if plan.command.is_empty() {
        return Err(EvaluationError::Launch("empty command".to_string()));
    }

    debug!(
        target_kind = plan.target.name(),
        executable = %plan.executable(),
        timeout_secs = plan.timeout_secs,
        "launching script"
    );

    let child = Command::new(plan.executable())
        .args(plan.args())
        .envs(&plan.env)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| EvaluationError::Launch(format!("{}: {}", plan.executable(), e)))?;

    let waited = if plan.timeout_secs > 0 {
        tokio::time::timeout(
            Duration::from_secs(plan.timeout_secs),
            child.wait_with_output(),
        )
        .await
        .map_err(|_| EvaluationError::Timeout {
            timeout_secs: plan.timeout_secs,
        })?
    } else {
        child.wait_with_output().await
    };
    let output = waited.map_err(|e| EvaluationError::Launch(e.to_string()))?;

    let duration_ms = start.elapsed().as_millis() as u64;
    let exit_code = output.status.code().unwrap_or(-1);

    Ok(ScriptOutput {
        exit_code,
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        duration_ms,
        success: output.status.success(),
    })
}
