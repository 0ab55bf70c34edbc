//! Check metadata documents against the embedded JSON Schemas

use jsonschema::{validator_for, ValidationError as JsonSchemaError, Validator as JsonValidator};
use miette::{Diagnostic, NamedSource, SourceSpan};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

use crate::core::profile::SchemaProfile;
use crate::schema::registry::SchemaRegistry;

/// A document failed its schema check
#[derive(Debug, Error, Diagnostic)]
#[error("Document check failed: {summary}")]
#[diagnostic(code(rationale::check::failed))]
pub struct DocumentCheckError {
    summary: String,

    #[source_code]
    src: NamedSource<String>,

    #[related]
    violations: Vec<SchemaViolation>,
}

impl DocumentCheckError {
    pub fn new(filename: &str, source: &str, violations: Vec<SchemaViolation>) -> Self {
        let count = violations.len();
        let summary = if count == 1 {
            "1 error".to_string()
        } else {
            format!("{} errors", count)
        };
        Self {
            summary,
            src: NamedSource::new(filename, source.to_string()),
            violations,
        }
    }
}

/// A single schema violation
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
pub struct SchemaViolation {
    #[label("{}", self.hint)]
    span: SourceSpan,

    message: String,
    hint: String,
}

impl SchemaViolation {
    pub fn new(message: String, hint: String, span: SourceSpan) -> Self {
        Self {
            span,
            message,
            hint,
        }
    }
}

/// Compiled schemas by profile
pub struct DocumentChecker {
    compiled: HashMap<SchemaProfile, JsonValidator>,
}

impl DocumentChecker {
    /// Compile every profile schema found in the registry
    pub fn new(registry: &SchemaRegistry) -> Self {
        let mut compiled = HashMap::new();

        for profile in SchemaProfile::all() {
            if let Some(schema_str) = registry.schema(*profile) {
                if let Ok(schema_json) = serde_json::from_str::<Value>(schema_str) {
                    if let Ok(validator) = validator_for(&schema_json) {
                        compiled.insert(*profile, validator);
                    }
                }
            }
        }

        Self { compiled }
    }

    /// Guess the profile of a parsed document from its identifying key
    pub fn detect_profile(document: &Value) -> Option<SchemaProfile> {
        if document.get("subject").is_some() {
            Some(SchemaProfile::Subject)
        } else if document.get("hashAlgorithm").is_some() {
            Some(SchemaProfile::HashAlgorithm)
        } else {
            None
        }
    }

    /// Check JSON text, reporting every violation
    ///
    /// With no explicit profile the profile is detected from the document;
    /// the hash algorithm profile is the fallback.
    pub fn check(
        &self,
        content: &str,
        filename: &str,
        profile: Option<SchemaProfile>,
    ) -> Result<SchemaProfile, DocumentCheckError> {
        let document: Value = serde_json::from_str(content).map_err(|e| {
            let offset = line_col_offset(content, e.line(), e.column());
            let violation = SchemaViolation::new(
                format!("JSON parse error: {}", e),
                "invalid JSON".to_string(),
                (offset, 0).into(),
            );
            DocumentCheckError::new(filename, content, vec![violation])
        })?;

        let profile = profile
            .or_else(|| Self::detect_profile(&document))
            .unwrap_or_default();

        let Some(validator) = self.compiled.get(&profile) else {
            return Ok(profile);
        };

        let violations: Vec<SchemaViolation> = validator
            .iter_errors(&document)
            .map(|e| error_to_violation(content, &e))
            .collect();

        if violations.is_empty() {
            tracing::debug!(%profile, filename, "document passed schema check");
            Ok(profile)
        } else {
            Err(DocumentCheckError::new(filename, content, violations))
        }
    }
}

impl Default for DocumentChecker {
    fn default() -> Self {
        Self::new(&SchemaRegistry)
    }
}

fn error_to_violation(content: &str, error: &JsonSchemaError) -> SchemaViolation {
    let path = error.instance_path.to_string();
    let message = format_schema_error(error);
    let hint = format_error_hint(error);
    let span = find_path_span(content, &path);
    SchemaViolation::new(message, hint, span)
}

fn format_schema_error(error: &JsonSchemaError) -> String {
    let path = if error.instance_path.as_str().is_empty() {
        "document root".to_string()
    } else {
        format!("'{}'", error.instance_path)
    };

    match &error.kind {
        jsonschema::error::ValidationErrorKind::Required { property } => {
            let prop_str = property
                .as_str()
                .map(|s| s.to_string())
                .unwrap_or_else(|| property.to_string());
            format!("Missing required field: {} at {}", prop_str, path)
        }
        jsonschema::error::ValidationErrorKind::MaxLength { limit } => {
            format!("Value at {} is too long: maximum {} characters", path, limit)
        }
        jsonschema::error::ValidationErrorKind::MinLength { .. } => {
            format!("Value at {} must not be empty", path)
        }
        jsonschema::error::ValidationErrorKind::Minimum { limit } => {
            format!("Value at {} is too small: minimum {}", path, limit)
        }
        jsonschema::error::ValidationErrorKind::AdditionalProperties { unexpected } => {
            format!("Unknown field(s) at {}: {}", path, unexpected.join(", "))
        }
        _ => format!("Validation error at {}: {}", path, error),
    }
}

fn format_error_hint(error: &JsonSchemaError) -> String {
    match &error.kind {
        jsonschema::error::ValidationErrorKind::Required { .. } => "required field missing",
        jsonschema::error::ValidationErrorKind::MaxLength { .. } => "too long",
        jsonschema::error::ValidationErrorKind::MinLength { .. } => "empty",
        jsonschema::error::ValidationErrorKind::Minimum { .. } => "negative",
        jsonschema::error::ValidationErrorKind::AdditionalProperties { .. } => "unknown field",
        _ => "validation error",
    }
    .to_string()
}

/// Span of the last object key named in a JSON pointer, or the whole document
fn find_path_span(content: &str, pointer: &str) -> SourceSpan {
    let key = pointer
        .rsplit('/')
        .find(|seg| !seg.is_empty() && seg.parse::<usize>().is_err());

    key.and_then(|k| {
        let needle = format!("\"{}\"", k);
        content.find(&needle).map(|start| (start, needle.len()).into())
    })
    .unwrap_or_else(|| (0, content.len()).into())
}

/// Byte offset of a 1-based line and column
fn line_col_offset(content: &str, line: usize, column: usize) -> usize {
    let line_start: usize = content
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    (line_start + column.saturating_sub(1)).min(content.len())
}
