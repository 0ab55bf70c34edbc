//! Schema profile selection
//!
//! A profile chooses the output shape of the generated document. Both profiles
//! share the same field set and parsing rules; they differ in the identifying
//! field of step 1, the JSON-LD context and the placement of references.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::field::FieldId;

/// Which output shape to emit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SchemaProfile {
    /// Keyed on `hashAlgorithm`, references concatenated into one list
    #[default]
    HashAlgorithm,
    /// Keyed on `subject`, relevant articles kept apart, stamped with `publishedAt`
    Subject,
}

impl SchemaProfile {
    pub fn all() -> &'static [SchemaProfile] {
        &[SchemaProfile::HashAlgorithm, SchemaProfile::Subject]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaProfile::HashAlgorithm => "hash-algorithm",
            SchemaProfile::Subject => "subject",
        }
    }

    /// The step 1 field that identifies the document
    pub fn identifier_field(&self) -> FieldId {
        match self {
            SchemaProfile::HashAlgorithm => FieldId::HashAlgorithm,
            SchemaProfile::Subject => FieldId::Subject,
        }
    }

    /// Fixed file name offered for the generated document
    pub fn default_file_name(&self) -> &'static str {
        match self {
            SchemaProfile::HashAlgorithm => "cip136_metadata.json",
            SchemaProfile::Subject => "rationale_metadata.json",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            SchemaProfile::HashAlgorithm => {
                "Rationale keyed on a hash algorithm with a single reference list"
            }
            SchemaProfile::Subject => {
                "Rationale keyed on a subject with separate relevant articles and a publish time"
            }
        }
    }
}

impl fmt::Display for SchemaProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SchemaProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hash-algorithm" | "hash" => Ok(SchemaProfile::HashAlgorithm),
            "subject" => Ok(SchemaProfile::Subject),
            _ => Err(format!("Unknown schema profile: {}", s)),
        }
    }
}
