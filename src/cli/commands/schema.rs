//! Schema introspection
//!
//! Lists the schema profiles, shows the step sequence of a profile, and
//! prints the embedded JSON Schema or JSON-LD context.

use clap::Subcommand;
use miette::{IntoDiagnostic, Result};
use serde_json::Value;
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::{title_case, truncate_str};
use crate::core::field::FieldId;
use crate::core::profile::SchemaProfile;
use crate::core::step::{self, Constraint};
use crate::schema::registry::SchemaRegistry;

#[derive(Subcommand, Debug)]
pub enum SchemaCommands {
    /// List all schema profiles
    List,

    /// Show the steps and fields of a profile
    Show(ShowArgs),
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Profile to show
    #[arg(value_enum)]
    pub profile: SchemaProfile,

    /// Print the raw JSON Schema instead of the step table
    #[arg(long, conflicts_with = "context")]
    pub raw: bool,

    /// Print the JSON-LD context instead of the step table
    #[arg(long)]
    pub context: bool,
}

pub fn run(cmd: SchemaCommands) -> Result<()> {
    match cmd {
        SchemaCommands::List => list_profiles(),
        SchemaCommands::Show(args) => show_profile(args),
    }
}

fn list_profiles() -> Result<()> {
    let registry = SchemaRegistry;
    let mut builder = Builder::default();
    builder.push_record(["PROFILE", "TITLE", "FILE", "DESCRIPTION"]);

    for profile in SchemaProfile::all() {
        let title = match registry.schema(*profile) {
            Some(content) => {
                let schema: Value = serde_json::from_str(content).into_diagnostic()?;
                schema["title"].as_str().unwrap_or_default().to_string()
            }
            None => title_case(profile.as_str()),
        };
        builder.push_record([
            profile.as_str().to_string(),
            title,
            profile.default_file_name().to_string(),
            truncate_str(profile.description(), 50),
        ]);
    }

    println!("{}", builder.build().with(Style::sharp()));
    println!("\nUse 'rationale schema show <profile>' for step details");
    Ok(())
}

fn show_profile(args: ShowArgs) -> Result<()> {
    let registry = SchemaRegistry;

    if args.raw || args.context {
        let content = if args.raw {
            registry.schema(args.profile)
        } else {
            registry.context(args.profile)
        };
        let content =
            content.ok_or_else(|| miette::miette!("No embedded asset for profile {}", args.profile))?;
        println!("{}", content.trim_end());
        return Ok(());
    }

    let title = title_case(args.profile.as_str());
    println!("{}", title);
    println!("{}", "=".repeat(title.len()));
    println!("{}\n", args.profile.description());

    let mut builder = Builder::default();
    builder.push_record(["STEP", "TITLE", "REQUIRED", "OPTIONAL", "RULES"]);

    for def in step::steps(args.profile) {
        builder.push_record([
            def.number.to_string(),
            def.title.to_string(),
            join_keys(def.required),
            join_keys(def.optional),
            def.constraints
                .iter()
                .map(describe_constraint)
                .collect::<Vec<_>>()
                .join("; "),
        ]);
    }

    println!("{}", builder.build().with(Style::sharp()));
    println!("\nUse --raw for the JSON Schema or --context for the JSON-LD context");
    Ok(())
}

fn join_keys(fields: &[FieldId]) -> String {
    fields
        .iter()
        .map(FieldId::as_str)
        .collect::<Vec<_>>()
        .join("\n")
}

fn describe_constraint(constraint: &Constraint) -> String {
    match constraint {
        Constraint::MaxChars { field, limit } => format!("{} <= {} chars", field.as_str(), limit),
        Constraint::NonNegativeTallies => "tallies >= 0".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_constraint() {
        let c = Constraint::MaxChars {
            field: FieldId::Summary,
            limit: 300,
        };
        assert_eq!(describe_constraint(&c), "summary <= 300 chars");
        assert_eq!(describe_constraint(&Constraint::NonNegativeTallies), "tallies >= 0");
    }

    #[test]
    fn test_join_keys() {
        assert_eq!(join_keys(&[FieldId::Subject, FieldId::Authors]), "subject\nauthors");
        assert_eq!(join_keys(&[]), "");
    }
}
