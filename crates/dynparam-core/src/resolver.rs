//! Choice domain resolution.
//!
//! The resolver turns a parameter's script into the ordered sequence of values
//! that are currently legal for it. It keeps no state between calls: every
//! resolution re-evaluates the script, because the legal set may track live
//! infrastructure and change between the time a form is rendered and the
//! time it is submitted.

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::canonical::canonical_string;
use crate::domain::{EvaluationError, ParameterSpec, ScriptResult};
use crate::evaluator::ScriptEvaluator;
use crate::obs;

/// Legal values for one parameter as of one resolution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoiceDomain {
    /// Values in script order; not deduplicated, sorted or filtered.
    pub values: Vec<Value>,
    /// When the script that produced this domain was evaluated.
    pub resolved_at: DateTime<Utc>,
}

impl ChoiceDomain {
    pub fn new(values: Vec<Value>) -> Self {
        Self {
            values,
            resolved_at: Utc::now(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Canonical string of every element, in domain order.
    pub fn labels(&self) -> Vec<String> {
        self.values.iter().map(canonical_string).collect()
    }

    /// Whether any element's canonical form equals `candidate` exactly.
    pub fn contains_canonical(&self, candidate: &str) -> bool {
        self.values
            .iter()
            .any(|choice| canonical_string(choice) == candidate)
    }
}

/// Resolves choice domains by evaluating parameter scripts.
#[derive(Clone)]
pub struct ChoiceResolver {
    evaluator: Arc<dyn ScriptEvaluator>,
}

impl std::fmt::Debug for ChoiceResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChoiceResolver").finish_non_exhaustive()
    }
}

impl ChoiceResolver {
    pub fn new(evaluator: Arc<dyn ScriptEvaluator>) -> Self {
        Self { evaluator }
    }

    /// Evaluate the parameter's script and return its current domain.
    ///
    /// A result that is not a sequence (including an absent one) is logged and
    /// yields the empty domain, which no submission can validate against.
    /// Evaluation failures are propagated unchanged; no retry is attempted.
    pub fn resolve_choices(
        &self,
        spec: &dyn ParameterSpec,
    ) -> Result<ChoiceDomain, EvaluationError> {
        let name = spec.name();
        let script = spec.script();
        let remote = spec.is_remote();

        let start = Instant::now();
        let result = self.evaluator.evaluate(script, remote)?;
        obs::emit_script_evaluated(
            name,
            &script.digest(),
            remote,
            start.elapsed().as_millis() as u64,
        );

        let domain = match result {
            ScriptResult::Sequence(values) => ChoiceDomain::new(values),
            other => {
                obs::emit_non_sequence_result(name, &other);
                ChoiceDomain::empty()
            }
        };

        obs::emit_choices_resolved(name, domain.len());
        Ok(domain)
    }

    /// Canonical labels of the current domain, for presentation.
    pub fn choice_labels(&self, spec: &dyn ParameterSpec) -> Result<Vec<String>, EvaluationError> {
        Ok(self.resolve_choices(spec)?.labels())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ChoiceParameterDefinition;
    use crate::fakes::{FailingEvaluator, ScriptedEvaluator};
    use serde_json::json;

    fn spec(remote: bool) -> ChoiceParameterDefinition {
        ChoiceParameterDefinition::new("env", "list-envs", "Target", None, remote).unwrap()
    }

    #[test]
    fn test_sequence_preserves_order_and_duplicates() {
        let evaluator = ScriptedEvaluator::always(ScriptResult::Sequence(vec![
            json!("c"),
            json!("a"),
            json!("c"),
            json!(3),
        ]));
        let resolver = ChoiceResolver::new(Arc::new(evaluator));

        let domain = resolver.resolve_choices(&spec(false)).unwrap();
        assert_eq!(
            domain.values,
            vec![json!("c"), json!("a"), json!("c"), json!(3)]
        );
        assert_eq!(domain.labels(), vec!["c", "a", "c", "3"]);
    }

    #[test]
    fn test_scalar_degrades_to_empty_domain() {
        let evaluator = ScriptedEvaluator::always(ScriptResult::Scalar(json!(5)));
        let resolver = ChoiceResolver::new(Arc::new(evaluator));
        let domain = resolver.resolve_choices(&spec(false)).unwrap();
        assert!(domain.is_empty());
    }

    #[test]
    fn test_absent_degrades_to_empty_domain() {
        let evaluator = ScriptedEvaluator::always(ScriptResult::Absent);
        let resolver = ChoiceResolver::new(Arc::new(evaluator));
        assert!(resolver.resolve_choices(&spec(false)).unwrap().is_empty());
    }

    #[test]
    fn test_remote_flag_is_forwarded() {
        let evaluator = Arc::new(ScriptedEvaluator::always(ScriptResult::Sequence(vec![])));
        let resolver = ChoiceResolver::new(evaluator.clone());

        resolver.resolve_choices(&spec(true)).unwrap();
        resolver.resolve_choices(&spec(false)).unwrap();
        assert_eq!(evaluator.remote_flags(), vec![true, false]);
        assert_eq!(evaluator.scripts()[0].source(), "list-envs");
    }

    #[test]
    fn test_evaluation_failure_propagates() {
        let resolver = ChoiceResolver::new(Arc::new(FailingEvaluator::new("worker offline")));
        let err = resolver.resolve_choices(&spec(true)).unwrap_err();
        assert!(err.to_string().contains("worker offline"));
    }

    #[test]
    fn test_contains_canonical_is_exact() {
        let domain = ChoiceDomain::new(vec![json!("prod"), json!(5), Value::Null]);
        assert!(domain.contains_canonical("prod"));
        assert!(domain.contains_canonical("5"));
        assert!(domain.contains_canonical("null"));
        assert!(!domain.contains_canonical("Prod"));
        assert!(!domain.contains_canonical("prod "));
        assert!(!domain.contains_canonical("5.0"));
    }
}
