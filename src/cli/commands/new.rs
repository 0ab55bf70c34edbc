//! `rationale new` command - Interactive step-by-step wizard

use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::cli::args::GlobalOpts;
use crate::cli::helpers::{resolve_config, write_document};
use crate::cli::wizard::InteractiveWizard;
use crate::core::session::WizardSession;
use crate::core::source::FormInputs;

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Pre-fill the form from an answers file (YAML or JSON)
    #[arg(long, short = 'a')]
    pub answers: Option<PathBuf>,

    /// Output file (default: profile file name in the configured output dir)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Print the document to stdout instead of writing a file
    #[arg(long, conflicts_with = "output")]
    pub stdout: bool,
}

pub fn run(args: NewArgs, global: &GlobalOpts) -> Result<()> {
    let config = resolve_config(global, args.output.as_deref())?;
    let profile = config.profile();

    let mut inputs = match &args.answers {
        Some(path) => FormInputs::load(path)?,
        None => FormInputs::new(),
    };

    println!();
    println!(
        "{} Creating a rationale document ({} profile)",
        style("◆").cyan(),
        style(profile).bold()
    );

    let mut session = WizardSession::new(profile);
    let generated = InteractiveWizard::new().run(&mut session, &mut inputs)?;

    match generated {
        Some(generated) => write_document(&generated, &config, args.stdout, global.quiet),
        None => {
            println!("{} Wizard cancelled, nothing written", style("!").yellow());
            Ok(())
        }
    }
}
