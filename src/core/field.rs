//! Field identifiers for every input the wizard collects

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a field's raw text is interpreted when collected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Single-line text
    Line,
    /// Multi-line free text
    Text,
    /// Non-negative vote count; null when absent or invalid
    Tally,
}

impl FieldKind {
    /// Whether the value is entered as several lines
    pub fn is_multiline(self) -> bool {
        self == FieldKind::Text
    }
}

/// A field identifier, serialized with the key used in answers files
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FieldId {
    #[serde(rename = "hashAlgorithm")]
    HashAlgorithm,
    #[serde(rename = "subject")]
    Subject,
    #[serde(rename = "authors")]
    Authors,
    #[serde(rename = "summary")]
    Summary,
    #[serde(rename = "rationaleStatement")]
    RationaleStatement,
    #[serde(rename = "precedentDiscussion")]
    PrecedentDiscussion,
    #[serde(rename = "counterargumentDiscussion")]
    CounterargumentDiscussion,
    #[serde(rename = "conclusion")]
    Conclusion,
    #[serde(rename = "internal_constitutional_votes")]
    ConstitutionalVotes,
    #[serde(rename = "internal_unconstitutional_votes")]
    UnconstitutionalVotes,
    #[serde(rename = "internal_abstain_votes")]
    AbstainVotes,
    #[serde(rename = "internal_did_not_vote")]
    DidNotVote,
    #[serde(rename = "internal_against_vote")]
    AgainstVote,
    #[serde(rename = "relevantArticles")]
    RelevantArticles,
    #[serde(rename = "otherReferences")]
    OtherReferences,
}

impl FieldId {
    /// The five tally fields, in collection order
    pub const TALLIES: [FieldId; 5] = [
        FieldId::ConstitutionalVotes,
        FieldId::UnconstitutionalVotes,
        FieldId::AbstainVotes,
        FieldId::DidNotVote,
        FieldId::AgainstVote,
    ];

    /// Get all field identifiers
    pub fn all() -> &'static [FieldId] {
        &[
            FieldId::HashAlgorithm,
            FieldId::Subject,
            FieldId::Authors,
            FieldId::Summary,
            FieldId::RationaleStatement,
            FieldId::PrecedentDiscussion,
            FieldId::CounterargumentDiscussion,
            FieldId::Conclusion,
            FieldId::ConstitutionalVotes,
            FieldId::UnconstitutionalVotes,
            FieldId::AbstainVotes,
            FieldId::DidNotVote,
            FieldId::AgainstVote,
            FieldId::RelevantArticles,
            FieldId::OtherReferences,
        ]
    }

    /// The key used in answers files and log output
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldId::HashAlgorithm => "hashAlgorithm",
            FieldId::Subject => "subject",
            FieldId::Authors => "authors",
            FieldId::Summary => "summary",
            FieldId::RationaleStatement => "rationaleStatement",
            FieldId::PrecedentDiscussion => "precedentDiscussion",
            FieldId::CounterargumentDiscussion => "counterargumentDiscussion",
            FieldId::Conclusion => "conclusion",
            FieldId::ConstitutionalVotes => "internal_constitutional_votes",
            FieldId::UnconstitutionalVotes => "internal_unconstitutional_votes",
            FieldId::AbstainVotes => "internal_abstain_votes",
            FieldId::DidNotVote => "internal_did_not_vote",
            FieldId::AgainstVote => "internal_against_vote",
            FieldId::RelevantArticles => "relevantArticles",
            FieldId::OtherReferences => "otherReferences",
        }
    }

    /// Human-readable label shown in prompts, alerts and the review
    pub fn label(&self) -> &'static str {
        match self {
            FieldId::HashAlgorithm => "Hash Algorithm",
            FieldId::Subject => "Subject",
            FieldId::Authors => "Authors",
            FieldId::Summary => "Summary",
            FieldId::RationaleStatement => "Rationale Statement",
            FieldId::PrecedentDiscussion => "Precedent Discussion",
            FieldId::CounterargumentDiscussion => "Counterargument Discussion",
            FieldId::Conclusion => "Conclusion",
            FieldId::ConstitutionalVotes => "Constitutional",
            FieldId::UnconstitutionalVotes => "Unconstitutional",
            FieldId::AbstainVotes => "Abstain",
            FieldId::DidNotVote => "Did Not Vote",
            FieldId::AgainstVote => "Against Vote",
            FieldId::RelevantArticles => "Relevant Articles",
            FieldId::OtherReferences => "Other References",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            FieldId::HashAlgorithm | FieldId::Subject => FieldKind::Line,
            FieldId::ConstitutionalVotes
            | FieldId::UnconstitutionalVotes
            | FieldId::AbstainVotes
            | FieldId::DidNotVote
            | FieldId::AgainstVote => FieldKind::Tally,
            _ => FieldKind::Text,
        }
    }

    pub fn is_tally(&self) -> bool {
        self.kind() == FieldKind::Tally
    }

    /// Input hint shown next to the prompt
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            FieldId::HashAlgorithm => Some("e.g. blake2b-256"),
            FieldId::Authors => Some("one per line or separated by ';'"),
            FieldId::Summary => Some("max 300 characters"),
            FieldId::RelevantArticles | FieldId::OtherReferences => {
                Some("one per line: Label | URI")
            }
            _ if self.is_tally() => Some("non-negative whole number, blank to skip"),
            _ => None,
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for FieldId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldId::all()
            .iter()
            .copied()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| format!("Unknown field: {}", s))
    }
}
