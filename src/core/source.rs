//! Sources of raw, in-progress field values
//!
//! A [`FieldSource`] stands in for the form inputs currently on screen. The
//! validator and collector read from it; nothing else does.

use miette::Diagnostic;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

use crate::core::field::FieldId;
use crate::core::record::{FieldValue, WorkingRecord};

/// Read access to raw user-entered values
pub trait FieldSource {
    /// The raw (untrimmed) value of a field; `None` when the input is absent
    fn raw_value(&self, field: FieldId) -> Option<&str>;
}

/// In-memory form inputs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInputs {
    values: BTreeMap<FieldId, String>,
}

impl FormInputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter
    pub fn with(mut self, field: FieldId, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: FieldId, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    /// Pre-fill inputs from collected values, so revisiting a step shows what
    /// was entered before
    pub fn from_record(record: &WorkingRecord) -> Self {
        let values = record
            .iter()
            .filter_map(|(field, value)| match value {
                FieldValue::Text(s) => Some((field, s.clone())),
                FieldValue::Count(n) => Some((field, n.to_string())),
                FieldValue::Null => None,
            })
            .collect();
        Self { values }
    }

    /// Load inputs from a YAML (or JSON) answers file keyed by field identifier
    pub fn load(path: &Path) -> Result<Self, AnswersError> {
        let contents = std::fs::read_to_string(path).map_err(|e| AnswersError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_yaml(&contents)
    }

    /// Parse inputs from YAML text; JSON is accepted as a subset
    ///
    /// A blank or comment-only document yields an empty form.
    pub fn from_yaml(contents: &str) -> Result<Self, AnswersError> {
        if is_blank_yaml(contents) {
            return Ok(Self::default());
        }
        let raw: Option<BTreeMap<FieldId, Option<RawAnswer>>> =
            serde_yml::from_str(contents).map_err(|e| AnswersError::Parse(e.to_string()))?;

        let values = raw
            .unwrap_or_default()
            .into_iter()
            .filter_map(|(field, answer)| answer.map(|a| (field, a.into_text())))
            .collect();
        Ok(Self { values })
    }
}

/// True when a YAML document holds nothing but whitespace and comments
pub(crate) fn is_blank_yaml(contents: &str) -> bool {
    contents
        .lines()
        .map(str::trim)
        .all(|line| line.is_empty() || line.starts_with('#') || line == "---")
}

impl FieldSource for FormInputs {
    fn raw_value(&self, field: FieldId) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }
}

/// A scalar in an answers file
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawAnswer {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl RawAnswer {
    fn into_text(self) -> String {
        match self {
            RawAnswer::Integer(n) => n.to_string(),
            RawAnswer::Float(x) => x.to_string(),
            RawAnswer::Text(s) => s,
        }
    }
}

/// Errors loading an answers file
#[derive(Debug, Error, Diagnostic)]
pub enum AnswersError {
    #[error("Failed to read answers file {path}: {source}")]
    #[diagnostic(code(rationale::answers::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid answers file: {0}")]
    #[diagnostic(
        code(rationale::answers::parse),
        help("Answers are a mapping of field keys (e.g. summary, authors) to text or numbers")
    )]
    Parse(String),
}
