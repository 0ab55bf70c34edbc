//! Wizard session: the step state machine and its working record
//!
//! A session starts on step 1. `advance` validates the current step before
//! collecting it; `retreat` collects without validating so in-progress edits
//! survive; `enter` jumps directly. Step 6 is the review step. Reaching it
//! rebuilds the review projection.

use chrono::{DateTime, Utc};

use crate::core::collector::collect;
use crate::core::error::{GenerateError, ValidationError};
use crate::core::field::FieldId;
use crate::core::parse::parse_authors;
use crate::core::profile::SchemaProfile;
use crate::core::record::WorkingRecord;
use crate::core::source::{FieldSource, FormInputs};
use crate::core::step::{self, StepDefinition, StepNumber};
use crate::core::validator::{validate_with, Feedback, NoFeedback, Reporting};
use crate::document::builder::{to_pretty_json, DocumentBuilder};
use crate::document::model::MetadataDocument;
use crate::document::review::ReviewProjection;

/// A generated document ready to be written
#[derive(Debug, Clone)]
pub struct GeneratedDocument {
    /// Fixed file name of the profile
    pub file_name: &'static str,
    pub document: MetadataDocument,
    /// Pretty-printed JSON
    pub json: String,
}

/// One wizard run
#[derive(Debug, Clone)]
pub struct WizardSession {
    profile: SchemaProfile,
    current: StepNumber,
    record: WorkingRecord,
    review: Option<ReviewProjection>,
}

impl WizardSession {
    pub fn new(profile: SchemaProfile) -> Self {
        Self {
            profile,
            current: StepNumber::FIRST,
            record: WorkingRecord::new(),
            review: None,
        }
    }

    pub fn profile(&self) -> SchemaProfile {
        self.profile
    }

    pub fn current(&self) -> StepNumber {
        self.current
    }

    pub fn record(&self) -> &WorkingRecord {
        &self.record
    }

    /// Definition of the current step
    pub fn definition(&self) -> &'static StepDefinition {
        step::definition(self.profile, self.current)
    }

    /// Review projection, built when the review step was last shown
    pub fn review(&self) -> Option<&ReviewProjection> {
        self.review.as_ref()
    }

    /// Validate and collect the current step, then move forward
    ///
    /// On failure nothing changes: no step data is merged and the current
    /// step stays put.
    pub fn advance(&mut self, source: &impl FieldSource) -> Result<StepNumber, ValidationError> {
        self.advance_with(source, Reporting::Silent, &mut NoFeedback)
    }

    /// [`advance`](Self::advance) reporting failures to `feedback`
    pub fn advance_with(
        &mut self,
        source: &impl FieldSource,
        reporting: Reporting,
        feedback: &mut dyn Feedback,
    ) -> Result<StepNumber, ValidationError> {
        let def = self.definition();
        validate_with(def, source, reporting, feedback)?;
        self.record.merge(collect(def, source));
        self.show(self.current.next());
        Ok(self.current)
    }

    /// Collect the current step without validating, then move back
    pub fn retreat(&mut self, source: &impl FieldSource) -> StepNumber {
        let def = self.definition();
        self.record.merge(collect(def, source));
        self.show(self.current.prev());
        self.current
    }

    /// Jump directly to `step`
    pub fn enter(&mut self, step: StepNumber) {
        self.show(step);
    }

    /// Advance through every remaining step with one source until review
    ///
    /// Stops at the first step that fails validation and returns its error.
    pub fn complete(&mut self, source: &impl FieldSource) -> Result<(), ValidationError> {
        while !self.current.is_review() {
            self.advance(source)?;
        }
        Ok(())
    }

    fn show(&mut self, step: StepNumber) {
        tracing::debug!(from = %self.current, to = %step, "enter step");
        self.current = step;
        if step.is_review() {
            self.review = Some(ReviewProjection::from_record(&self.record));
        }
    }

    /// Fields of the minimal required set that are still missing
    pub fn missing_required(&self) -> Vec<FieldId> {
        let mut missing = Vec::new();
        let identifier = self.profile.identifier_field();
        if self.record.non_empty_text(identifier).is_none() {
            missing.push(identifier);
        }
        if parse_authors(self.record.text(FieldId::Authors)).is_empty() {
            missing.push(FieldId::Authors);
        }
        for field in [FieldId::Summary, FieldId::RationaleStatement] {
            if self.record.non_empty_text(field).is_none() {
                missing.push(field);
            }
        }
        missing
    }

    /// Build the document from the working record
    ///
    /// Refuses to build while required content is missing or a step check
    /// fails; in that case the session is moved to the earliest step that owns
    /// the offending field.
    pub fn generate(&mut self) -> Result<GeneratedDocument, GenerateError> {
        self.generate_at(Utc::now())
    }

    /// [`generate`](Self::generate) with an explicit generation time
    pub fn generate_at(&mut self, now: DateTime<Utc>) -> Result<GeneratedDocument, GenerateError> {
        if let Err(err) = self.verify() {
            if let Some(step) = err.redirect() {
                tracing::info!(redirect = %step, "generation refused: {}", err);
                self.enter(step);
            }
            return Err(err);
        }

        let document = DocumentBuilder::new(self.profile).build_at(&self.record, now)?;
        let json = to_pretty_json(&document)?;
        tracing::info!(profile = %self.profile, bytes = json.len(), "generated document");

        Ok(GeneratedDocument {
            file_name: self.profile.default_file_name(),
            document,
            json,
        })
    }

    /// Required-set check followed by a silent pass over every input step
    fn verify(&self) -> Result<(), GenerateError> {
        let missing = self.missing_required();
        let earliest = missing
            .iter()
            .filter_map(|f| step::owning_step(self.profile, *f))
            .min();
        if let Some(redirect) = earliest {
            return Err(GenerateError::IncompleteAtGenerationTime { missing, redirect });
        }

        let inputs = FormInputs::from_record(&self.record);
        for def in step::steps(self.profile).iter().filter(|d| !d.number.is_review()) {
            validate_with(def, &inputs, Reporting::Silent, &mut NoFeedback)
                .map_err(GenerateError::Invalid)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::FieldValue;
    use chrono::TimeZone;

    fn step_one() -> FormInputs {
        FormInputs::new()
            .with(FieldId::HashAlgorithm, "blake2b-256")
            .with(FieldId::Authors, "Alice Smith; Bob Jones")
    }

    fn step_two() -> FormInputs {
        FormInputs::new()
            .with(FieldId::Summary, "Constitutional.")
            .with(FieldId::RationaleStatement, "Consistent with Article 3.")
    }

    /// Walk a hash-profile session through every step
    fn completed_session() -> WizardSession {
        let mut session = WizardSession::new(SchemaProfile::HashAlgorithm);
        session.advance(&step_one()).unwrap();
        session.advance(&step_two()).unwrap();
        session
            .advance(&FormInputs::new().with(FieldId::Conclusion, "Approve."))
            .unwrap();
        session
            .advance(&FormInputs::new().with(FieldId::ConstitutionalVotes, "4"))
            .unwrap();
        session
            .advance(&FormInputs::new().with(FieldId::OtherReferences, "Forum | https://forum.example"))
            .unwrap();
        session
    }

    #[test]
    fn test_initial_state() {
        let session = WizardSession::new(SchemaProfile::Subject);
        assert_eq!(session.current(), StepNumber::FIRST);
        assert!(session.record().is_empty());
        assert!(session.review().is_none());
    }

    #[test]
    fn test_advance_blocked_by_missing_field() {
        let mut session = WizardSession::new(SchemaProfile::HashAlgorithm);
        let inputs = FormInputs::new().with(FieldId::HashAlgorithm, "blake2b-256");

        let err = session.advance(&inputs).unwrap_err();
        assert_eq!(err.field(), FieldId::Authors);
        assert_eq!(session.current(), StepNumber::FIRST);
        assert!(!session.record().contains(FieldId::HashAlgorithm));
    }

    #[test]
    fn test_alerted_advance_reports_once_and_stays() {
        struct Alerts(Vec<FieldId>);
        impl Feedback for Alerts {
            fn alert(&mut self, error: &ValidationError) {
                self.0.push(error.field());
            }
        }

        let mut session = WizardSession::new(SchemaProfile::Subject);
        let mut alerts = Alerts(Vec::new());
        let inputs = FormInputs::new().with(FieldId::Authors, "Alice");

        let err = session
            .advance_with(&inputs, Reporting::Alert, &mut alerts)
            .unwrap_err();
        assert_eq!(err.step(), StepNumber::FIRST);
        assert_eq!(alerts.0, [FieldId::Subject]);
        assert_eq!(session.current(), StepNumber::FIRST);

        let inputs = inputs.with(FieldId::Subject, "Budget");
        let step = session
            .advance_with(&inputs, Reporting::Alert, &mut alerts)
            .unwrap();
        assert_eq!(step, StepNumber::RATIONALE);
        assert_eq!(alerts.0.len(), 1);
    }

    #[test]
    fn test_failed_advance_keeps_earlier_data() {
        let mut session = WizardSession::new(SchemaProfile::HashAlgorithm);
        session.advance(&step_one()).unwrap();
        let before = session.record().clone();

        let too_long = step_two().with(FieldId::Summary, "x".repeat(301));
        assert!(session.advance(&too_long).is_err());
        assert_eq!(session.record(), &before);
        assert_eq!(session.current(), StepNumber::RATIONALE);
    }

    #[test]
    fn test_retreat_collects_without_validation() {
        let mut session = WizardSession::new(SchemaProfile::HashAlgorithm);
        session.advance(&step_one()).unwrap();

        let partial = FormInputs::new().with(FieldId::Summary, "  draft ");
        assert_eq!(session.retreat(&partial), StepNumber::FIRST);
        assert_eq!(session.record().text(FieldId::Summary), "draft");
        assert_eq!(session.record().text(FieldId::RationaleStatement), "");
    }

    #[test]
    fn test_retreat_at_first_step_stays() {
        let mut session = WizardSession::new(SchemaProfile::HashAlgorithm);
        assert_eq!(session.retreat(&FormInputs::new()), StepNumber::FIRST);
        assert!(session.record().contains(FieldId::Authors));
    }

    #[test]
    fn test_advance_does_not_pass_review() {
        let mut session = completed_session();
        assert_eq!(session.current(), StepNumber::LAST);
        assert_eq!(session.advance(&FormInputs::new()).unwrap(), StepNumber::LAST);
    }

    #[test]
    fn test_reaching_review_builds_projection() {
        let session = completed_session();
        let review = session.review().unwrap();
        assert!(review.section("Internal Votes").is_some());
        assert!(review.section("Supporting Discussion").is_some());
    }

    #[test]
    fn test_enter_review_rebuilds_projection() {
        let mut session = completed_session();
        session.enter(StepNumber::DISCUSSION);
        session
            .advance(&FormInputs::new().with(FieldId::Conclusion, ""))
            .unwrap();
        session.enter(StepNumber::LAST);
        assert!(session.review().unwrap().section("Supporting Discussion").is_none());
    }

    #[test]
    fn test_complete_from_single_source() {
        let mut all = step_one();
        all.set(FieldId::Summary, "Constitutional.");
        all.set(FieldId::RationaleStatement, "Because.");
        all.set(FieldId::DidNotVote, "2");

        let mut session = WizardSession::new(SchemaProfile::HashAlgorithm);
        session.complete(&all).unwrap();
        assert_eq!(session.current(), StepNumber::LAST);
        assert_eq!(session.record().count(FieldId::DidNotVote), Some(2));
        assert_eq!(session.record().get(FieldId::AgainstVote), Some(&FieldValue::Null));
    }

    #[test]
    fn test_complete_stops_at_failing_step() {
        let all = step_one().with(FieldId::Summary, "only summary");
        let mut session = WizardSession::new(SchemaProfile::HashAlgorithm);
        let err = session.complete(&all).unwrap_err();
        assert_eq!(err.field(), FieldId::RationaleStatement);
        assert_eq!(session.current(), StepNumber::RATIONALE);
    }

    #[test]
    fn test_generate_complete_session() {
        let mut session = completed_session();
        let generated = session.generate().unwrap();
        assert_eq!(generated.file_name, "cip136_metadata.json");
        assert_eq!(generated.document.authors.len(), 2);
        assert_eq!(
            generated.document.body.internal_vote.as_ref().and_then(|v| v.constitutional),
            Some(4)
        );
        assert!(generated.json.contains("\"conclusion\": \"Approve.\""));
    }

    #[test]
    fn test_generate_refuses_missing_authors() {
        let mut session = completed_session();
        session.enter(StepNumber::FIRST);
        session
            .advance(&step_one().with(FieldId::Authors, " ; "))
            .unwrap();
        session.enter(StepNumber::LAST);

        let err = session.generate().unwrap_err();
        assert!(matches!(
            &err,
            GenerateError::IncompleteAtGenerationTime { missing, redirect }
                if missing == &vec![FieldId::Authors] && *redirect == StepNumber::FIRST
        ));
        assert_eq!(session.current(), StepNumber::FIRST);
    }

    #[test]
    fn test_generate_redirects_to_rationale_step() {
        let mut session = WizardSession::new(SchemaProfile::HashAlgorithm);
        session.advance(&step_one()).unwrap();
        session.enter(StepNumber::LAST);

        let err = session.generate().unwrap_err();
        assert_eq!(err.redirect(), Some(StepNumber::RATIONALE));
        assert_eq!(session.current(), StepNumber::RATIONALE);
    }

    #[test]
    fn test_generate_redirects_to_earliest_step() {
        let mut session = WizardSession::new(SchemaProfile::Subject);
        session.enter(StepNumber::LAST);

        match session.generate().unwrap_err() {
            GenerateError::IncompleteAtGenerationTime { missing, redirect } => {
                assert_eq!(
                    missing,
                    vec![
                        FieldId::Subject,
                        FieldId::Authors,
                        FieldId::Summary,
                        FieldId::RationaleStatement
                    ]
                );
                assert_eq!(redirect, StepNumber::FIRST);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_generate_runs_silent_step_checks() {
        let mut session = completed_session();
        let mut record = session.record().clone();
        record.insert(FieldId::Summary, FieldValue::Text("y".repeat(350)));
        session.record = record;

        let err = session.generate().unwrap_err();
        assert!(matches!(err, GenerateError::Invalid(ValidationError::LengthExceeded { .. })));
        assert_eq!(session.current(), StepNumber::RATIONALE);
    }

    #[test]
    fn test_generate_at_is_reproducible() {
        let now = Utc.with_ymd_and_hms(2025, 2, 1, 9, 0, 0).unwrap();
        let mut session = WizardSession::new(SchemaProfile::Subject);
        session
            .advance(&FormInputs::new().with(FieldId::Subject, "Budget").with(FieldId::Authors, "Alice"))
            .unwrap();
        session.advance(&step_two()).unwrap();

        let first = session.generate_at(now).unwrap();
        let second = session.generate_at(now).unwrap();
        assert_eq!(first.json, second.json);
        assert_eq!(first.file_name, "rationale_metadata.json");
        assert!(first.json.contains("\"publishedAt\": \"2025-02-01T09:00:00Z\""));
    }
}
