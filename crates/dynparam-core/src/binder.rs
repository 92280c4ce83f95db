//! Validation and binding of submitted parameter values.
//!
//! Every submission is checked against a domain resolved at validation time.
//! A domain shown to the user when a form was rendered is never reused, so a
//! value that has since left the legal set is rejected.

use serde::Deserialize;
use serde_json::Value;

use crate::canonical::canonical_string;
use crate::domain::value::StringFormValue;
use crate::domain::{
    BindingError, BoundParameterValue, ParameterSpec, RequestParameters, Result, Submission,
};
use crate::obs;
use crate::resolver::ChoiceResolver;

/// Converts raw submissions into validated [`BoundParameterValue`]s.
#[derive(Debug, Clone)]
pub struct ParameterBinder {
    resolver: ChoiceResolver,
}

impl ParameterBinder {
    pub fn new(resolver: ChoiceResolver) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &ChoiceResolver {
        &self.resolver
    }

    /// Bind a submission of either shape.
    pub fn create_bound_value(
        &self,
        spec: &dyn ParameterSpec,
        submission: &Submission,
    ) -> Result<BoundParameterValue> {
        match submission {
            Submission::Values(values) => self.create_value(spec, values),
            Submission::Form(payload) => self.create_value_from_form(spec, payload),
        }
    }

    /// Bind the raw values a request carries under the parameter's name.
    ///
    /// A missing key counts as zero entries.
    pub fn create_value_from_request(
        &self,
        spec: &dyn ParameterSpec,
        request: &dyn RequestParameters,
    ) -> Result<BoundParameterValue> {
        let values = request.parameter_values(spec.name()).unwrap_or(&[]);
        self.create_value(spec, values)
    }

    /// Single-value path.
    ///
    /// - zero entries bind the definition's default without consulting the domain
    /// - one entry is validated against a freshly resolved domain
    /// - more entries are rejected before the domain is consulted
    pub fn create_value(
        &self,
        spec: &dyn ParameterSpec,
        values: &[String],
    ) -> Result<BoundParameterValue> {
        let name = spec.name();
        let _span = obs::BindingSpan::enter(name);

        let outcome = match values {
            [] => match spec.default_value() {
                Some(default) => {
                    obs::emit_default_used(name);
                    return Ok(default);
                }
                None => Err(BindingError::MissingDefault {
                    name: name.to_string(),
                }),
            },
            [value] => {
                let candidate = BoundParameterValue::new(name, value.as_str(), spec.description());
                self.find_predefined_value(spec, candidate)
            }
            many => Err(BindingError::IllegalArgumentCount {
                name: name.to_string(),
                count: many.len(),
            }),
        };

        report(name, outcome)
    }

    /// Structured-submission path.
    ///
    /// The payload is read as `{ "value": <scalar or null> }`. Numbers and
    /// bools are compared by their canonical string, so `{"value": 3}` matches
    /// a domain element `3` or `"3"`. The description always comes from the
    /// definition.
    pub fn create_value_from_form(
        &self,
        spec: &dyn ParameterSpec,
        payload: &Value,
    ) -> Result<BoundParameterValue> {
        let name = spec.name();
        let _span = obs::BindingSpan::enter(name);

        let outcome = parse_form(name, payload).and_then(|value| {
            let candidate = BoundParameterValue::new(name, value, spec.description());
            self.find_predefined_value(spec, candidate)
        });

        report(name, outcome)
    }

    /// Accept `candidate` only if its canonical form matches an element of the
    /// domain as resolved right now.
    fn find_predefined_value(
        &self,
        spec: &dyn ParameterSpec,
        candidate: BoundParameterValue,
    ) -> Result<BoundParameterValue> {
        let domain = self
            .resolver
            .resolve_choices(spec)
            .map_err(|source| BindingError::Evaluation {
                name: spec.name().to_string(),
                source,
            })?;

        if domain.contains_canonical(&candidate.value) {
            Ok(candidate)
        } else {
            Err(BindingError::IllegalChoice {
                name: candidate.name,
                value: candidate.value,
            })
        }
    }
}

/// Read the canonical submitted value out of a form payload.
fn parse_form(name: &str, payload: &Value) -> Result<String> {
    let malformed = |reason: String| BindingError::MalformedSubmission {
        name: name.to_string(),
        reason,
    };
    if !payload.is_object() {
        return Err(malformed("expected an object".to_string()));
    }
    let form = StringFormValue::deserialize(payload).map_err(|e| malformed(e.to_string()))?;
    match form.value.unwrap_or(Value::Null) {
        Value::Array(_) | Value::Object(_) => Err(malformed("value must be a scalar".to_string())),
        value => Ok(canonical_string(&value)),
    }
}

fn report(name: &str, outcome: Result<BoundParameterValue>) -> Result<BoundParameterValue> {
    match &outcome {
        Ok(_) => obs::emit_binding_accepted(name),
        Err(err) => obs::emit_binding_rejected(name, err.kind().as_str(), err),
    }
    outcome
}
