//! Step numbers and the static step definitions

use serde::Serialize;
use std::fmt;

use crate::core::field::FieldId;
use crate::core::profile::SchemaProfile;

/// Maximum number of characters allowed in the summary
pub const SUMMARY_MAX_CHARS: usize = 300;

/// A step number in `1..=StepNumber::LAST`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct StepNumber(u8);

impl StepNumber {
    pub const FIRST: StepNumber = StepNumber(1);
    pub const RATIONALE: StepNumber = StepNumber(2);
    pub const DISCUSSION: StepNumber = StepNumber(3);
    pub const VOTES: StepNumber = StepNumber(4);
    pub const REFERENCES: StepNumber = StepNumber(5);
    /// Review step, display only
    pub const LAST: StepNumber = StepNumber(6);

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn is_review(self) -> bool {
        self == Self::LAST
    }

    /// Next step, saturating at the review step
    pub fn next(self) -> Self {
        if self < Self::LAST {
            Self(self.0 + 1)
        } else {
            self
        }
    }

    /// Previous step, saturating at step 1
    pub fn prev(self) -> Self {
        if self > Self::FIRST {
            Self(self.0 - 1)
        } else {
            self
        }
    }

    /// Iterate over all steps in order
    pub fn all() -> impl Iterator<Item = StepNumber> {
        (Self::FIRST.0..=Self::LAST.0).map(StepNumber)
    }
}

impl fmt::Display for StepNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A step-specific rule checked after all required fields are present
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// Raw value length in characters must not exceed the limit
    MaxChars { field: FieldId, limit: usize },
    /// Every tally field of the step, if it parses as an integer, must be >= 0
    NonNegativeTallies,
}

/// Static declaration of a step's fields and rules
#[derive(Debug, Clone, Copy)]
pub struct StepDefinition {
    pub number: StepNumber,
    pub title: &'static str,
    /// Checked in this order; the first empty one is reported
    pub required: &'static [FieldId],
    pub optional: &'static [FieldId],
    pub constraints: &'static [Constraint],
}

impl StepDefinition {
    /// All fields owned by this step, required first
    pub fn fields(&self) -> impl Iterator<Item = FieldId> + '_ {
        self.required.iter().chain(self.optional.iter()).copied()
    }

    pub fn owns(&self, field: FieldId) -> bool {
        self.fields().any(|f| f == field)
    }

    pub fn is_required(&self, field: FieldId) -> bool {
        self.required.contains(&field)
    }
}

const RATIONALE_STEP: StepDefinition = StepDefinition {
    number: StepNumber::RATIONALE,
    title: "Core Rationale",
    required: &[FieldId::Summary, FieldId::RationaleStatement],
    optional: &[],
    constraints: &[Constraint::MaxChars {
        field: FieldId::Summary,
        limit: SUMMARY_MAX_CHARS,
    }],
};

const DISCUSSION_STEP: StepDefinition = StepDefinition {
    number: StepNumber::DISCUSSION,
    title: "Supporting Discussion",
    required: &[],
    optional: &[
        FieldId::PrecedentDiscussion,
        FieldId::CounterargumentDiscussion,
        FieldId::Conclusion,
    ],
    constraints: &[],
};

const VOTES_STEP: StepDefinition = StepDefinition {
    number: StepNumber::VOTES,
    title: "Internal Votes",
    required: &[],
    optional: &FieldId::TALLIES,
    constraints: &[Constraint::NonNegativeTallies],
};

const REFERENCES_STEP: StepDefinition = StepDefinition {
    number: StepNumber::REFERENCES,
    title: "References",
    required: &[],
    optional: &[FieldId::RelevantArticles, FieldId::OtherReferences],
    constraints: &[],
};

const REVIEW_STEP: StepDefinition = StepDefinition {
    number: StepNumber::LAST,
    title: "Review",
    required: &[],
    optional: &[],
    constraints: &[],
};

static HASH_ALGORITHM_STEPS: [StepDefinition; 6] = [
    StepDefinition {
        number: StepNumber::FIRST,
        title: "Basic Information",
        required: &[FieldId::HashAlgorithm, FieldId::Authors],
        optional: &[],
        constraints: &[],
    },
    RATIONALE_STEP,
    DISCUSSION_STEP,
    VOTES_STEP,
    REFERENCES_STEP,
    REVIEW_STEP,
];

static SUBJECT_STEPS: [StepDefinition; 6] = [
    StepDefinition {
        number: StepNumber::FIRST,
        title: "Basic Information",
        required: &[FieldId::Subject, FieldId::Authors],
        optional: &[],
        constraints: &[],
    },
    RATIONALE_STEP,
    DISCUSSION_STEP,
    VOTES_STEP,
    REFERENCES_STEP,
    REVIEW_STEP,
];

/// The step table for a profile
pub fn steps(profile: SchemaProfile) -> &'static [StepDefinition; 6] {
    match profile {
        SchemaProfile::HashAlgorithm => &HASH_ALGORITHM_STEPS,
        SchemaProfile::Subject => &SUBJECT_STEPS,
    }
}

/// Definition of a single step for a profile
pub fn definition(profile: SchemaProfile, step: StepNumber) -> &'static StepDefinition {
    &steps(profile)[usize::from(step.get() - 1)]
}

/// The earliest step that owns `field` under `profile`
pub fn owning_step(profile: SchemaProfile, field: FieldId) -> Option<StepNumber> {
    steps(profile)
        .iter()
        .find(|def| def.owns(field))
        .map(|def| def.number)
}
