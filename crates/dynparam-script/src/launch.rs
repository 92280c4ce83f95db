//! Launch plans: how a script is turned into a process invocation.

use std::borrow::Cow;
use std::collections::BTreeMap;

use dynparam_core::{EvaluationError, Script};
use serde::{Deserialize, Serialize};

use crate::config::EvaluatorConfig;

/// Where a script runs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionTarget {
    /// Through the local shell.
    Local,
    /// Through the configured remote launcher.
    Remote,
}

impl ExecutionTarget {
    pub fn from_remote_flag(run_remotely: bool) -> Self {
        if run_remotely {
            ExecutionTarget::Remote
        } else {
            ExecutionTarget::Local
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ExecutionTarget::Local => "local",
            ExecutionTarget::Remote => "remote",
        }
    }
}

/// A fully resolved process invocation for one script evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchPlan {
    pub target: ExecutionTarget,

    /// Command to execute (first element is the executable).
    pub command: Vec<String>,

    /// Timeout in seconds (0 = no timeout).
    pub timeout_secs: u64,

    pub env: BTreeMap<String, String>,
}

impl LaunchPlan {
    /// Build the plan for `script`: the launcher prefix followed by the source
    /// as a single argument.
    ///
    /// Remote launchers such as `ssh` join their trailing arguments into one
    /// command line for the remote shell, so the source is shell-quoted for
    /// the remote target.
    pub fn for_script(
        config: &EvaluatorConfig,
        script: &Script,
        run_remotely: bool,
    ) -> Result<Self, EvaluationError> {
        let target = ExecutionTarget::from_remote_flag(run_remotely);
        let prefix = match target {
            ExecutionTarget::Local => config.shell.as_slice(),
            ExecutionTarget::Remote => config
                .remote_launcher
                .as_deref()
                .ok_or(EvaluationError::RemoteUnavailable)?,
        };
        if prefix.is_empty() {
            return Err(EvaluationError::Launch(format!(
                "no {} launcher configured",
                target.name()
            )));
        }

        let mut command = prefix.to_vec();
        command.push(match target {
            ExecutionTarget::Local => script.source().to_string(),
            ExecutionTarget::Remote => quote_for_remote(script.source()),
        });

        Ok(Self {
            target,
            command,
            timeout_secs: config.timeout_secs,
            env: config.env.clone(),
        })
    }

    pub fn executable(&self) -> &str {
        &self.command[0]
    }

    pub fn args(&self) -> &[String] {
        &self.command[1..]
    }
}

/// Quote `source` so a remote shell receives it as a single word.
fn quote_for_remote(source: &str) -> String {
    shell_escape::unix::escape(Cow::Borrowed(source)).into_owned()
}
