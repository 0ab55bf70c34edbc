//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand};

use crate::cli::commands::{
    check::CheckArgs, completions::CompletionsArgs, generate::GenerateArgs, new::NewArgs,
    review::ReviewArgs, schema::SchemaCommands,
};
use crate::core::profile::SchemaProfile;

#[derive(Parser)]
#[command(name = "rationale")]
#[command(author, version, about = "Governance rationale metadata wizard")]
#[command(long_about = "A step-by-step wizard that collects governance rationale inputs and writes them as a JSON-LD metadata document.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Schema profile to emit (default: from config, else hash-algorithm)
    #[arg(long, short = 'p', global = true, value_enum)]
    pub profile: Option<SchemaProfile>,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose (debug) logging on stderr
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the interactive step-by-step wizard
    New(NewArgs),

    /// Generate a document from an answers file without prompting
    Generate(GenerateArgs),

    /// Show the review of an answers file
    Review(ReviewArgs),

    /// Check an existing document against its profile schema
    Check(CheckArgs),

    /// Inspect schema profiles and their steps
    #[command(subcommand)]
    Schema(SchemaCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}
