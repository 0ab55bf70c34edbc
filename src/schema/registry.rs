//! Embedded JSON Schemas and JSON-LD contexts, one pair per profile

use serde_json::Value;

use crate::core::profile::SchemaProfile;

/// Schema files embedded at compile time
const SCHEMAS: &[(SchemaProfile, &str)] = &[
    (
        SchemaProfile::HashAlgorithm,
        include_str!("../../schemas/hash-algorithm.schema.json"),
    ),
    (
        SchemaProfile::Subject,
        include_str!("../../schemas/subject.schema.json"),
    ),
];

/// JSON-LD contexts embedded at compile time
const CONTEXTS: &[(SchemaProfile, &str)] = &[
    (
        SchemaProfile::HashAlgorithm,
        include_str!("../../schemas/hash-algorithm.context.jsonld"),
    ),
    (
        SchemaProfile::Subject,
        include_str!("../../schemas/subject.context.jsonld"),
    ),
];

/// Lookup of embedded schema assets
#[derive(Debug, Default, Clone, Copy)]
pub struct SchemaRegistry;

impl SchemaRegistry {
    /// Raw JSON Schema text for a profile
    pub fn schema(&self, profile: SchemaProfile) -> Option<&'static str> {
        lookup(SCHEMAS, profile)
    }

    /// Raw JSON-LD context text for a profile
    pub fn context(&self, profile: SchemaProfile) -> Option<&'static str> {
        lookup(CONTEXTS, profile)
    }

    /// Parsed JSON-LD context for a profile
    pub fn context_value(&self, profile: SchemaProfile) -> Option<Result<Value, serde_json::Error>> {
        self.context(profile).map(serde_json::from_str)
    }
}

fn lookup(table: &[(SchemaProfile, &'static str)], profile: SchemaProfile) -> Option<&'static str> {
    table
        .iter()
        .find(|(p, _)| *p == profile)
        .map(|(_, content)| *content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_profile_has_assets() {
        let registry = SchemaRegistry;
        for profile in SchemaProfile::all() {
            assert!(registry.schema(*profile).is_some());
            let schema: Value = serde_json::from_str(registry.schema(*profile).unwrap()).unwrap();
            assert!(schema["title"].is_string());
            let context = registry.context_value(*profile).unwrap().unwrap();
            assert!(context.get("body").is_some());
        }
    }

    #[test]
    fn test_context_declares_every_tally() {
        let registry = SchemaRegistry;
        for profile in SchemaProfile::all() {
            let context = registry.context_value(*profile).unwrap().unwrap();
            let votes = &context["body"]["@context"]["internalVote"]["@context"];
            for key in ["constitutional", "unconstitutional", "abstain", "didNotVote", "againstVote"] {
                assert!(votes.get(key).is_some(), "{} missing {}", profile, key);
            }
        }
    }
}
