//! Document builder: working record to metadata document

use chrono::{DateTime, Utc};

use crate::core::error::GenerateError;
use crate::core::field::FieldId;
use crate::core::parse::{parse_authors, parse_references};
use crate::core::profile::SchemaProfile;
use crate::core::record::WorkingRecord;
use crate::document::model::{InternalVote, MetadataDocument};
use crate::document::profile::{strategy, DocumentParts};
use crate::schema::registry::SchemaRegistry;

/// Builds documents for one schema profile
#[derive(Debug, Clone, Copy)]
pub struct DocumentBuilder {
    profile: SchemaProfile,
    registry: SchemaRegistry,
}

impl DocumentBuilder {
    pub fn new(profile: SchemaProfile) -> Self {
        Self {
            profile,
            registry: SchemaRegistry,
        }
    }

    /// Build a document stamped with the current time where the profile needs one
    pub fn build(&self, record: &WorkingRecord) -> Result<MetadataDocument, GenerateError> {
        self.build_at(record, Utc::now())
    }

    /// Build a document using `now` as the generation time
    ///
    /// Missing optional data is omitted and missing required text defaults to
    /// empty; callers enforce required fields before building.
    pub fn build_at(
        &self,
        record: &WorkingRecord,
        now: DateTime<Utc>,
    ) -> Result<MetadataDocument, GenerateError> {
        let context = self
            .registry
            .context_value(self.profile)
            .ok_or_else(|| GenerateError::Context(self.profile.to_string()))??;

        let parts = document_parts(self.profile, record);
        let document = strategy(self.profile).shape(parts, context, now);

        tracing::debug!(
            profile = %self.profile,
            authors = document.authors.len(),
            references = document.body.references.len() + document.body.relevant_articles.len(),
            internal_vote = document.body.internal_vote.is_some(),
            "built document"
        );
        Ok(document)
    }
}

/// Serialize a document with stable, indented formatting
pub fn to_pretty_json(document: &MetadataDocument) -> Result<String, GenerateError> {
    Ok(serde_json::to_string_pretty(document)?)
}

/// Parse the record into profile-independent parts
pub fn document_parts(profile: SchemaProfile, record: &WorkingRecord) -> DocumentParts {
    let optional = |field| record.non_empty_text(field).map(String::from);

    DocumentParts {
        identifier: record.text(profile.identifier_field()).to_string(),
        authors: parse_authors(record.text(FieldId::Authors)),
        summary: record.text(FieldId::Summary).to_string(),
        rationale_statement: record.text(FieldId::RationaleStatement).to_string(),
        precedent_discussion: optional(FieldId::PrecedentDiscussion),
        counterargument_discussion: optional(FieldId::CounterargumentDiscussion),
        conclusion: optional(FieldId::Conclusion),
        internal_vote: internal_vote(record),
        relevant_articles: parse_references(record.text(FieldId::RelevantArticles)),
        other_references: parse_references(record.text(FieldId::OtherReferences)),
    }
}

/// Tallies present in the record, or `None` when no tally was supplied
fn internal_vote(record: &WorkingRecord) -> Option<InternalVote> {
    let vote = InternalVote {
        constitutional: record.count(FieldId::ConstitutionalVotes),
        unconstitutional: record.count(FieldId::UnconstitutionalVotes),
        abstain: record.count(FieldId::AbstainVotes),
        did_not_vote: record.count(FieldId::DidNotVote),
        against_vote: record.count(FieldId::AgainstVote),
    };
    (!vote.is_empty()).then_some(vote)
}
