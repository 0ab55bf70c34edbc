//! The working record accumulated across wizard steps

use serde::Serialize;
use std::collections::BTreeMap;

use crate::core::field::FieldId;

/// A collected value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Count(u64),
    /// A tally that was left blank or could not be parsed as a non-negative integer
    Null,
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_count(&self) -> Option<u64> {
        match self {
            FieldValue::Count(n) => Some(*n),
            _ => None,
        }
    }
}

/// Field values collected so far, keyed by field
///
/// The record only changes through [`WorkingRecord::merge`], which the session
/// calls with the fragment collected from one step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WorkingRecord {
    values: BTreeMap<FieldId, FieldValue>,
}

impl WorkingRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: FieldId) -> Option<&FieldValue> {
        self.values.get(&field)
    }

    /// Text value of a field; empty when absent or not text
    pub fn text(&self, field: FieldId) -> &str {
        self.get(field).and_then(FieldValue::as_text).unwrap_or("")
    }

    /// Non-empty text value of a field
    pub fn non_empty_text(&self, field: FieldId) -> Option<&str> {
        Some(self.text(field)).filter(|s| !s.is_empty())
    }

    /// Tally value of a field; `None` for absent or null
    pub fn count(&self, field: FieldId) -> Option<u64> {
        self.get(field).and_then(FieldValue::as_count)
    }

    pub fn contains(&self, field: FieldId) -> bool {
        self.values.contains_key(&field)
    }

    pub fn insert(&mut self, field: FieldId, value: FieldValue) {
        self.values.insert(field, value);
    }

    /// Merge another record into this one; keys in `other` replace existing ones
    pub fn merge(&mut self, other: WorkingRecord) {
        self.values.extend(other.values);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldId, &FieldValue)> {
        self.values.iter().map(|(k, v)| (*k, v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_replaces_only_present_keys() {
        let mut record = WorkingRecord::new();
        record.insert(FieldId::Summary, FieldValue::Text("first".into()));
        record.insert(FieldId::Authors, FieldValue::Text("Alice".into()));

        let mut fragment = WorkingRecord::new();
        fragment.insert(FieldId::Summary, FieldValue::Text("second".into()));
        record.merge(fragment);

        assert_eq!(record.text(FieldId::Summary), "second");
        assert_eq!(record.text(FieldId::Authors), "Alice");
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn test_null_is_distinct_from_zero() {
        let mut record = WorkingRecord::new();
        record.insert(FieldId::AbstainVotes, FieldValue::Count(0));
        record.insert(FieldId::DidNotVote, FieldValue::Null);

        assert_eq!(record.count(FieldId::AbstainVotes), Some(0));
        assert_eq!(record.count(FieldId::DidNotVote), None);
        assert_eq!(record.get(FieldId::DidNotVote), Some(&FieldValue::Null));
    }

    #[test]
    fn test_non_empty_text() {
        let mut record = WorkingRecord::new();
        record.insert(FieldId::Conclusion, FieldValue::Text(String::new()));
        assert_eq!(record.non_empty_text(FieldId::Conclusion), None);
        assert_eq!(record.non_empty_text(FieldId::Summary), None);
    }
}
