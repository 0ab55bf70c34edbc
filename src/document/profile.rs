//! Output-shaping strategies, one per schema profile
//!
//! Both strategies receive the same [`DocumentParts`], parsed once from the
//! working record, and decide only where things go.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

use crate::core::parse::{Author, ReferenceEntry};
use crate::core::profile::SchemaProfile;
use crate::document::model::{Body, InternalVote, MetadataDocument, Reference, ReferenceKind};

/// Hash algorithm emitted when none was entered
pub const DEFAULT_HASH_ALGORITHM: &str = "blake2b-256";

/// Profile-independent pieces of a document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentParts {
    /// Trimmed identifier text (hash algorithm or subject); may be empty
    pub identifier: String,
    pub authors: Vec<Author>,
    pub summary: String,
    pub rationale_statement: String,
    pub precedent_discussion: Option<String>,
    pub counterargument_discussion: Option<String>,
    pub conclusion: Option<String>,
    pub internal_vote: Option<InternalVote>,
    pub relevant_articles: Vec<ReferenceEntry>,
    pub other_references: Vec<ReferenceEntry>,
}

impl DocumentParts {
    fn into_body(self, relevant_articles: Vec<Reference>, references: Vec<Reference>) -> Body {
        Body {
            summary: self.summary,
            rationale_statement: self.rationale_statement,
            precedent_discussion: self.precedent_discussion,
            counterargument_discussion: self.counterargument_discussion,
            conclusion: self.conclusion,
            internal_vote: self.internal_vote,
            relevant_articles,
            references,
        }
    }
}

/// Shapes parsed parts into a profile's document
pub trait DocumentProfile: Sync {
    fn shape(&self, parts: DocumentParts, context: Value, now: DateTime<Utc>) -> MetadataDocument;
}

/// `hashAlgorithm`-keyed documents with one concatenated reference list
#[derive(Debug, Clone, Copy)]
pub struct HashAlgorithmProfile;

impl DocumentProfile for HashAlgorithmProfile {
    fn shape(&self, mut parts: DocumentParts, context: Value, _now: DateTime<Utc>) -> MetadataDocument {
        let hash_algorithm = match std::mem::take(&mut parts.identifier) {
            s if s.is_empty() => DEFAULT_HASH_ALGORITHM.to_string(),
            s => s,
        };
        let authors = std::mem::take(&mut parts.authors);

        let references = std::mem::take(&mut parts.relevant_articles)
            .into_iter()
            .chain(std::mem::take(&mut parts.other_references))
            .map(|entry| Reference::from_entry(ReferenceKind::Other, entry))
            .collect();

        MetadataDocument {
            context,
            published_at: None,
            hash_algorithm: Some(hash_algorithm),
            subject: None,
            body: parts.into_body(Vec::new(), references),
            authors,
        }
    }
}

/// `subject`-keyed documents with separate relevant articles and a publish time
#[derive(Debug, Clone, Copy)]
pub struct SubjectProfile;

impl DocumentProfile for SubjectProfile {
    fn shape(&self, mut parts: DocumentParts, context: Value, now: DateTime<Utc>) -> MetadataDocument {
        let subject = std::mem::take(&mut parts.identifier);
        let authors = std::mem::take(&mut parts.authors);

        let relevant_articles = std::mem::take(&mut parts.relevant_articles)
            .into_iter()
            .map(|entry| Reference::from_entry(ReferenceKind::RelevantArticles, entry))
            .collect();
        let references = std::mem::take(&mut parts.other_references)
            .into_iter()
            .map(|entry| Reference::from_entry(ReferenceKind::Other, entry))
            .collect();

        MetadataDocument {
            context,
            published_at: Some(now.to_rfc3339_opts(SecondsFormat::Secs, true)),
            hash_algorithm: None,
            subject: Some(subject),
            body: parts.into_body(relevant_articles, references),
            authors,
        }
    }
}

/// The strategy for a profile
pub fn strategy(profile: SchemaProfile) -> &'static dyn DocumentProfile {
    match profile {
        SchemaProfile::HashAlgorithm => &HashAlgorithmProfile,
        SchemaProfile::Subject => &SubjectProfile,
    }
}
