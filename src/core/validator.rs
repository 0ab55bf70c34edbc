//! Step validation
//!
//! Required fields are checked first, in declared order. Step constraints
//! (summary length, non-negative tallies) only run once every required field
//! is filled. Only the first failure is reported.

use crate::core::error::ValidationError;
use crate::core::parse::leading_integer;
use crate::core::source::FieldSource;
use crate::core::step::{Constraint, StepDefinition};

/// Where a validation failure is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Reporting {
    /// Forward the failure to the feedback sink
    #[default]
    Alert,
    /// Return the failure without user-facing feedback
    Silent,
}

/// Receives validation failures meant for the user
pub trait Feedback {
    fn alert(&mut self, error: &ValidationError);
}

/// Feedback sink that discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoFeedback;

impl Feedback for NoFeedback {
    fn alert(&mut self, _error: &ValidationError) {}
}

/// Validate a step's in-progress values
pub fn validate(step: &StepDefinition, source: &impl FieldSource) -> Result<(), ValidationError> {
    for &field in step.required {
        let value = source.raw_value(field).unwrap_or("");
        if value.trim().is_empty() {
            return Err(ValidationError::MissingRequiredField {
                step: step.number,
                field,
            });
        }
    }

    for constraint in step.constraints {
        check_constraint(step, constraint, source)?;
    }

    Ok(())
}

/// Validate and report the first failure through `feedback` unless silent
pub fn validate_with(
    step: &StepDefinition,
    source: &impl FieldSource,
    reporting: Reporting,
    feedback: &mut dyn Feedback,
) -> Result<(), ValidationError> {
    let result = validate(step, source);
    if let Err(ref err) = result {
        tracing::debug!(step = %step.number, field = err.field().as_str(), "validation failed");
        if reporting == Reporting::Alert {
            feedback.alert(err);
        }
    }
    result
}

fn check_constraint(
    step: &StepDefinition,
    constraint: &Constraint,
    source: &impl FieldSource,
) -> Result<(), ValidationError> {
    match *constraint {
        Constraint::MaxChars { field, limit } => {
            let actual = source.raw_value(field).map_or(0, |v| v.chars().count());
            if actual > limit {
                return Err(ValidationError::LengthExceeded {
                    step: step.number,
                    field,
                    limit,
                    actual,
                });
            }
        }
        Constraint::NonNegativeTallies => {
            for field in step.fields().filter(|f| f.is_tally()) {
                let parsed = source
                    .raw_value(field)
                    .and_then(leading_integer);
                if let Some(value) = parsed.filter(|n| *n < 0) {
                    return Err(ValidationError::NegativeValue {
                        step: step.number,
                        field,
                        value,
                    });
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::field::FieldId;
    use crate::core::profile::SchemaProfile;
    use crate::core::source::FormInputs;
    use crate::core::step::{definition, StepNumber};

    #[derive(Default)]
    struct Recorded(Vec<ValidationError>);

    impl Feedback for Recorded {
        fn alert(&mut self, error: &ValidationError) {
            self.0.push(error.clone());
        }
    }

    fn step(n: StepNumber) -> &'static StepDefinition {
        definition(SchemaProfile::HashAlgorithm, n)
    }

    #[test]
    fn test_first_missing_field_in_declared_order() {
        let err = validate(step(StepNumber::FIRST), &FormInputs::new()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingRequiredField {
                step: StepNumber::FIRST,
                field: FieldId::HashAlgorithm
            }
        );

        let inputs = FormInputs::new().with(FieldId::HashAlgorithm, "blake2b-256");
        let err = validate(step(StepNumber::FIRST), &inputs).unwrap_err();
        assert_eq!(err.field(), FieldId::Authors);
    }

    #[test]
    fn test_whitespace_only_is_missing() {
        let inputs = FormInputs::new()
            .with(FieldId::HashAlgorithm, "blake2b-256")
            .with(FieldId::Authors, "  \n ");
        assert!(validate(step(StepNumber::FIRST), &inputs).is_err());
    }

    #[test]
    fn test_subject_profile_requires_subject() {
        let def = definition(SchemaProfile::Subject, StepNumber::FIRST);
        let inputs = FormInputs::new()
            .with(FieldId::HashAlgorithm, "blake2b-256")
            .with(FieldId::Authors, "Alice");
        assert_eq!(validate(def, &inputs).unwrap_err().field(), FieldId::Subject);
    }

    #[test]
    fn test_summary_boundary() {
        let at_limit = "a".repeat(300);
        let inputs = FormInputs::new()
            .with(FieldId::Summary, at_limit)
            .with(FieldId::RationaleStatement, "r");
        assert!(validate(step(StepNumber::RATIONALE), &inputs).is_ok());

        let over = "a".repeat(301);
        let inputs = inputs.with(FieldId::Summary, over);
        assert!(matches!(
            validate(step(StepNumber::RATIONALE), &inputs),
            Err(ValidationError::LengthExceeded { actual: 301, limit: 300, .. })
        ));
    }

    #[test]
    fn test_summary_counts_characters_not_bytes() {
        let inputs = FormInputs::new()
            .with(FieldId::Summary, "é".repeat(300))
            .with(FieldId::RationaleStatement, "r");
        assert!(validate(step(StepNumber::RATIONALE), &inputs).is_ok());
    }

    #[test]
    fn test_length_checked_after_required() {
        let inputs = FormInputs::new().with(FieldId::Summary, "a".repeat(400));
        let err = validate(step(StepNumber::RATIONALE), &inputs).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingRequiredField {
                step: StepNumber::RATIONALE,
                field: FieldId::RationaleStatement
            }
        );
    }

    #[test]
    fn test_negative_tally_fails() {
        let inputs = FormInputs::new()
            .with(FieldId::ConstitutionalVotes, "3")
            .with(FieldId::AbstainVotes, "-2");
        let err = validate(step(StepNumber::VOTES), &inputs).unwrap_err();
        assert_eq!(
            err,
            ValidationError::NegativeValue {
                step: StepNumber::VOTES,
                field: FieldId::AbstainVotes,
                value: -2
            }
        );
    }

    #[test]
    fn test_fractional_tallies_use_leading_integer() {
        let inputs = FormInputs::new().with(FieldId::AgainstVote, "-3.5");
        let err = validate(step(StepNumber::VOTES), &inputs).unwrap_err();
        assert!(matches!(err, ValidationError::NegativeValue { value: -3, .. }));

        let inputs = FormInputs::new().with(FieldId::AgainstVote, "3.5");
        assert!(validate(step(StepNumber::VOTES), &inputs).is_ok());
    }

    #[test]
    fn test_non_numeric_and_empty_tallies_pass() {
        let inputs = FormInputs::new()
            .with(FieldId::ConstitutionalVotes, "many")
            .with(FieldId::AbstainVotes, "");
        assert!(validate(step(StepNumber::VOTES), &inputs).is_ok());
    }

    #[test]
    fn test_optional_steps_always_valid() {
        for n in [StepNumber::DISCUSSION, StepNumber::REFERENCES, StepNumber::LAST] {
            assert!(validate(step(n), &FormInputs::new()).is_ok());
        }
    }

    #[test]
    fn test_silent_mode_skips_feedback() {
        let mut sink = Recorded::default();
        let def = step(StepNumber::FIRST);

        let silent = validate_with(def, &FormInputs::new(), Reporting::Silent, &mut sink);
        assert!(silent.is_err());
        assert!(sink.0.is_empty());

        let alert = validate_with(def, &FormInputs::new(), Reporting::Alert, &mut sink);
        assert_eq!(silent, alert);
        assert_eq!(sink.0.len(), 1);
    }
}
