//! Error types for validation and document generation

use miette::Diagnostic;
use thiserror::Error;

use crate::core::field::FieldId;
use crate::core::step::StepNumber;

/// The first failed check of a step
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ValidationError {
    #[error("Please fill in the required field: {field}")]
    #[diagnostic(
        code(rationale::validate::missing_required_field),
        help("Step {step} cannot be completed while this field is blank")
    )]
    MissingRequiredField { step: StepNumber, field: FieldId },

    #[error("{field} must not exceed {limit} characters (currently {actual})")]
    #[diagnostic(code(rationale::validate::length_exceeded))]
    LengthExceeded {
        step: StepNumber,
        field: FieldId,
        limit: usize,
        actual: usize,
    },

    #[error("Internal vote count for {field} cannot be negative (got {value})")]
    #[diagnostic(
        code(rationale::validate::negative_value),
        help("Leave the field blank if the count is unknown")
    )]
    NegativeValue {
        step: StepNumber,
        field: FieldId,
        value: i64,
    },
}

impl ValidationError {
    /// The field that failed
    pub fn field(&self) -> FieldId {
        match self {
            ValidationError::MissingRequiredField { field, .. }
            | ValidationError::LengthExceeded { field, .. }
            | ValidationError::NegativeValue { field, .. } => *field,
        }
    }

    /// The step whose check failed
    pub fn step(&self) -> StepNumber {
        match self {
            ValidationError::MissingRequiredField { step, .. }
            | ValidationError::LengthExceeded { step, .. }
            | ValidationError::NegativeValue { step, .. } => *step,
        }
    }
}

/// Errors from the generate action
#[derive(Debug, Error, Diagnostic)]
pub enum GenerateError {
    #[error("Cannot generate: missing {}", format_fields(.missing))]
    #[diagnostic(
        code(rationale::generate::incomplete),
        help("Fill in the missing fields in step {redirect} and try again")
    )]
    IncompleteAtGenerationTime {
        missing: Vec<FieldId>,
        redirect: StepNumber,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Invalid(ValidationError),

    #[error("Error generating JSON: {0}")]
    #[diagnostic(code(rationale::generate::serialization))]
    Serialization(#[from] serde_json::Error),

    #[error("Embedded JSON-LD context for profile '{0}' is missing")]
    #[diagnostic(code(rationale::generate::context))]
    Context(String),
}

impl GenerateError {
    /// The step the user should be sent back to, if any
    pub fn redirect(&self) -> Option<StepNumber> {
        match self {
            GenerateError::IncompleteAtGenerationTime { redirect, .. } => Some(*redirect),
            GenerateError::Invalid(err) => Some(err.step()),
            GenerateError::Serialization(_) | GenerateError::Context(_) => None,
        }
    }
}

fn format_fields(fields: &[FieldId]) -> String {
    fields
        .iter()
        .map(FieldId::label)
        .collect::<Vec<_>>()
        .join(", ")
}
