//! Dynparam Core Library
//!
//! Choice resolution and validation for script-driven job parameters:
//! - `resolver` evaluates a parameter's script into its current choice domain
//! - `binder` validates raw submissions against a freshly resolved domain
//! - `canonical` holds the single string-comparison rule both rely on

pub mod binder;
pub mod canonical;
pub mod domain;
pub mod evaluator;
pub mod fakes;
pub mod obs;
pub mod resolver;
pub mod telemetry;

pub use binder::ParameterBinder;
pub use canonical::{canonical_string, NULL_CANONICAL};
pub use domain::{
    BindingError, BoundParameterValue, ChoiceParameterDefinition, DefinitionError,
    EvaluationError, ParameterSpec, RejectionKind, RequestParameters, Result, Script,
    ScriptResult, Submission,
};
pub use evaluator::ScriptEvaluator;
pub use obs::{
    emit_binding_accepted, emit_binding_rejected, emit_choices_resolved, emit_default_used,
    emit_non_sequence_result, emit_script_evaluated, BindingSpan,
};
pub use resolver::{ChoiceDomain, ChoiceResolver};
pub use telemetry::{init_tracing, LogSettings};
