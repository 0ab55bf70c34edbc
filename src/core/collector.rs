//! Field collection: raw step inputs into a record fragment

use crate::core::field::FieldKind;
use crate::core::parse::parse_tally;
use crate::core::record::{FieldValue, WorkingRecord};
use crate::core::source::FieldSource;
use crate::core::step::StepDefinition;

/// Collect every field of a step from `source`
///
/// Text fields are stored trimmed; an absent input is stored as empty text.
/// Tally fields become a count when their leading integer is non-negative and
/// explicit null otherwise.
pub fn collect(step: &StepDefinition, source: &impl FieldSource) -> WorkingRecord {
    let mut fragment = WorkingRecord::new();

    for field in step.fields() {
        let raw = source.raw_value(field).unwrap_or("");
        let value = match field.kind() {
            FieldKind::Tally => parse_tally(raw).map_or(FieldValue::Null, FieldValue::Count),
            FieldKind::Line | FieldKind::Text => FieldValue::Text(raw.trim().to_string()),
        };
        fragment.insert(field, value);
    }

    tracing::debug!(step = %step.number, fields = fragment.len(), "collected step");
    fragment
}
