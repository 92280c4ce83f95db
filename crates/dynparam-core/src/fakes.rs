//! In-memory script evaluators (testing only)
//!
//! Provides `ScriptedEvaluator` and `FailingEvaluator`, which satisfy the
//! `ScriptEvaluator` contract without running any script.

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::domain::{EvaluationError, Script, ScriptResult};
use crate::evaluator::ScriptEvaluator;

// ---------------------------------------------------------------------------
// ScriptedEvaluator
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct Calls {
    scripts: Vec<Script>,
    remote_flags: Vec<bool>,
}

/// Evaluator that replays a fixed list of results.
///
/// Each call returns the next queued result; once a single result remains it
/// is returned for every further call. Every call is recorded.
#[derive(Debug)]
pub struct ScriptedEvaluator {
    results: Mutex<VecDeque<ScriptResult>>,
    calls: Mutex<Calls>,
}

impl ScriptedEvaluator {
    /// Return `result` for every call.
    pub fn always(result: ScriptResult) -> Self {
        Self::sequence(vec![result])
    }

    /// Return `results` in order, repeating the last one.
    pub fn sequence(results: Vec<ScriptResult>) -> Self {
        Self {
            results: Mutex::new(results.into()),
            calls: Mutex::new(Calls::default()),
        }
    }

    /// Replace everything queued with `result`, as if the script's output changed.
    pub fn set_result(&self, result: ScriptResult) {
        let mut results = self.results.lock().unwrap();
        results.clear();
        results.push_back(result);
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().scripts.len()
    }

    pub fn scripts(&self) -> Vec<Script> {
        self.calls.lock().unwrap().scripts.clone()
    }

    pub fn remote_flags(&self) -> Vec<bool> {
        self.calls.lock().unwrap().remote_flags.clone()
    }
}

impl ScriptEvaluator for ScriptedEvaluator {
    fn evaluate(
        &self,
        script: &Script,
        run_remotely: bool,
    ) -> Result<ScriptResult, EvaluationError> {
        {
            let mut calls = self.calls.lock().unwrap();
            calls.scripts.push(script.clone());
            calls.remote_flags.push(run_remotely);
        }

        let mut results = self.results.lock().unwrap();
        let next = if results.len() > 1 {
            results.pop_front()
        } else {
            results.front().cloned()
        };
        Ok(next.unwrap_or(ScriptResult::Absent))
    }
}

// ---------------------------------------------------------------------------
// FailingEvaluator
// ---------------------------------------------------------------------------

/// Evaluator whose every call fails with `EvaluationError::Other`.
#[derive(Debug)]
pub struct FailingEvaluator {
    message: String,
    calls: Mutex<usize>,
}

impl FailingEvaluator {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            calls: Mutex::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

impl ScriptEvaluator for FailingEvaluator {
    fn evaluate(
        &self,
        _script: &Script,
        _run_remotely: bool,
    ) -> Result<ScriptResult, EvaluationError> {
        *self.calls.lock().unwrap() += 1;
        Err(EvaluationError::Other(self.message.clone()))
    }
}
