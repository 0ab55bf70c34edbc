//! `rationale check` command - Check a document against its profile schema

use console::style;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::cli::args::GlobalOpts;
use crate::schema::checker::DocumentChecker;

#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    /// Document to check
    pub file: PathBuf,
}

pub fn run(args: CheckArgs, global: &GlobalOpts) -> Result<()> {
    let content = std::fs::read_to_string(&args.file).into_diagnostic()?;
    let filename = args.file.display().to_string();

    let checker = DocumentChecker::default();
    let profile = checker.check(&content, &filename, global.profile)?;

    if !global.quiet {
        println!(
            "{} {} is a valid {} document",
            style("✓").green(),
            style(&filename).cyan(),
            style(profile).bold()
        );
    }
    Ok(())
}
