//! Output document types
//!
//! Field declaration order is serialization order. Optional parts are omitted
//! entirely when empty; there are no empty-string placeholders.

use serde::Serialize;
use serde_json::Value;

use crate::core::parse::{Author, ReferenceEntry};

/// The generated rationale metadata document
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataDocument {
    /// JSON-LD context of the profile
    #[serde(rename = "@context")]
    pub context: Value,

    /// RFC 3339 publish time (subject profile only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash_algorithm: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    pub body: Body,

    pub authors: Vec<Author>,
}

/// Document body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Body {
    pub summary: String,

    pub rationale_statement: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub precedent_discussion: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub counterargument_discussion: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub conclusion: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub internal_vote: Option<InternalVote>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub relevant_articles: Vec<Reference>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<Reference>,
}

/// Internal vote tallies; only supplied counts are present
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalVote {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constitutional: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub unconstitutional: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub abstain: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub did_not_vote: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub against_vote: Option<u64>,
}

impl InternalVote {
    pub fn is_empty(&self) -> bool {
        self.constitutional.is_none()
            && self.unconstitutional.is_none()
            && self.abstain.is_none()
            && self.did_not_vote.is_none()
            && self.against_vote.is_none()
    }
}

/// Reference type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReferenceKind {
    Other,
    RelevantArticles,
}

/// A typed reference in the document body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reference {
    #[serde(rename = "@type")]
    pub kind: ReferenceKind,
    pub label: String,
    pub uri: String,
}

impl Reference {
    pub fn from_entry(kind: ReferenceKind, entry: ReferenceEntry) -> Self {
        Self {
            kind,
            label: entry.label,
            uri: entry.uri,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_body_omits_empty_optionals() {
        let body = Body {
            summary: "S".into(),
            rationale_statement: "R".into(),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"summary": "S", "rationaleStatement": "R"})
        );
    }

    #[test]
    fn test_internal_vote_keys() {
        let vote = InternalVote {
            did_not_vote: Some(0),
            against_vote: Some(2),
            ..Default::default()
        };
        assert!(!vote.is_empty());
        assert_eq!(
            serde_json::to_value(&vote).unwrap(),
            json!({"didNotVote": 0, "againstVote": 2})
        );
        assert!(InternalVote::default().is_empty());
    }

    #[test]
    fn test_reference_type_tag() {
        let r = Reference {
            kind: ReferenceKind::RelevantArticles,
            label: "Article 3".into(),
            uri: "https://example.org/3".into(),
        };
        assert_eq!(
            serde_json::to_value(&r).unwrap(),
            json!({"@type": "RelevantArticles", "label": "Article 3", "uri": "https://example.org/3"})
        );
    }
}
