//! Review projection: a read-only, sectioned view of the working record

use serde::Serialize;
use std::fmt;

use crate::core::field::FieldId;
use crate::core::parse::parse_references;
use crate::core::record::WorkingRecord;

/// How an entry is laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStyle {
    /// Label and value on one line
    Inline,
    /// Label followed by a preformatted block
    Block,
    /// A list item
    Item,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewEntry {
    pub label: String,
    pub value: String,
    pub style: EntryStyle,
}

impl ReviewEntry {
    fn new(label: impl Into<String>, value: impl Into<String>, style: EntryStyle) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            style,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewSection {
    pub title: &'static str,
    pub entries: Vec<ReviewEntry>,
}

/// Sections shown on the review step; a section appears only with entries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReviewProjection {
    pub sections: Vec<ReviewSection>,
}

impl ReviewProjection {
    /// Project the record into review sections
    pub fn from_record(record: &WorkingRecord) -> Self {
        let basic: Vec<ReviewEntry> = [FieldId::HashAlgorithm, FieldId::Subject, FieldId::Authors]
            .into_iter()
            .filter_map(|f| text_entry(record, f, EntryStyle::Inline))
            .collect();

        let rationale: Vec<ReviewEntry> = [FieldId::Summary, FieldId::RationaleStatement]
            .into_iter()
            .filter_map(|f| text_entry(record, f, EntryStyle::Block))
            .collect();

        let discussion: Vec<ReviewEntry> = [
            FieldId::PrecedentDiscussion,
            FieldId::CounterargumentDiscussion,
            FieldId::Conclusion,
        ]
        .into_iter()
        .filter_map(|f| text_entry(record, f, EntryStyle::Block))
        .collect();

        let votes: Vec<ReviewEntry> = FieldId::TALLIES
            .into_iter()
            .filter_map(|f| {
                record
                    .count(f)
                    .map(|n| ReviewEntry::new(f.label(), n.to_string(), EntryStyle::Item))
            })
            .collect();

        let references: Vec<ReviewEntry> = parse_references(record.text(FieldId::RelevantArticles))
            .into_iter()
            .chain(parse_references(record.text(FieldId::OtherReferences)))
            .map(|r| ReviewEntry::new(r.label, r.uri, EntryStyle::Item))
            .collect();

        let sections = [
            ("Basic Information", basic),
            ("Core Rationale", rationale),
            ("Supporting Discussion", discussion),
            ("Internal Votes", votes),
            ("References", references),
        ]
        .into_iter()
        .filter(|(_, entries)| !entries.is_empty())
        .map(|(title, entries)| ReviewSection { title, entries })
        .collect();

        Self { sections }
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn section(&self, title: &str) -> Option<&ReviewSection> {
        self.sections.iter().find(|s| s.title == title)
    }
}

fn text_entry(record: &WorkingRecord, field: FieldId, style: EntryStyle) -> Option<ReviewEntry> {
    record
        .non_empty_text(field)
        .map(|value| ReviewEntry::new(field.label(), value, style))
}

impl fmt::Display for ReviewProjection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, section) in self.sections.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{}", section.title)?;
            writeln!(f, "{}", "-".repeat(section.title.len()))?;
            for entry in &section.entries {
                match entry.style {
                    EntryStyle::Inline => writeln!(f, "{}: {}", entry.label, entry.value)?,
                    EntryStyle::Item => writeln!(f, "  - {}: {}", entry.label, entry.value)?,
                    EntryStyle::Block => {
                        writeln!(f, "{}:", entry.label)?;
                        for line in entry.value.lines() {
                            writeln!(f, "    {}", line)?;
                        }
                    }
                }
            }
        }
        Ok(())
    }
}
