//! Core wizard logic: fields, steps, validation, collection and the session

pub mod collector;
pub mod config;
pub mod error;
pub mod field;
pub mod parse;
pub mod profile;
pub mod record;
pub mod session;
pub mod source;
pub mod step;
pub mod validator;

pub use error::{GenerateError, ValidationError};
pub use field::FieldId;
pub use profile::SchemaProfile;
pub use record::{FieldValue, WorkingRecord};
pub use session::{GeneratedDocument, WizardSession};
pub use source::{FieldSource, FormInputs};
pub use step::{StepDefinition, StepNumber};
