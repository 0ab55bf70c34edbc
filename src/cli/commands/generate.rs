//! `rationale generate` command - Build a document from an answers file

use miette::Result;
use std::path::PathBuf;

use crate::cli::args::GlobalOpts;
use crate::cli::helpers::{resolve_config, write_document};
use crate::core::session::WizardSession;
use crate::core::source::FormInputs;

#[derive(clap::Args, Debug)]
pub struct GenerateArgs {
    /// Answers file (YAML or JSON) keyed by field, e.g. `summary: ...`
    pub answers: PathBuf,

    /// Output file (default: profile file name in the configured output dir)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Print the document to stdout instead of writing a file
    #[arg(long, conflicts_with = "output")]
    pub stdout: bool,
}

pub fn run(args: GenerateArgs, global: &GlobalOpts) -> Result<()> {
    let config = resolve_config(global, args.output.as_deref())?;
    let inputs = FormInputs::load(&args.answers)?;

    let mut session = WizardSession::new(config.profile());
    session.complete(&inputs)?;
    let generated = session.generate()?;

    write_document(&generated, &config, args.stdout, global.quiet)
}
