//! Domain types for dynamic choice parameters.

pub mod error;
pub mod parameter;
pub mod script;
pub mod value;

pub use error::{BindingError, DefinitionError, EvaluationError, RejectionKind, Result};
pub use parameter::{ChoiceParameterDefinition, ParameterSpec};
pub use script::{Script, ScriptResult};
pub use value::{BoundParameterValue, RequestParameters, Submission};
