//! `rationale review` command - Show the review step for an answers file

use console::style;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::cli::args::GlobalOpts;
use crate::cli::helpers::resolve_config;
use crate::cli::wizard::print_review;
use crate::core::session::WizardSession;
use crate::core::source::FormInputs;
use crate::core::step::StepNumber;
use crate::schema::template::ReviewRenderer;

#[derive(clap::Args, Debug)]
pub struct ReviewArgs {
    /// Answers file (YAML or JSON) keyed by field
    pub answers: PathBuf,

    /// Render as Markdown
    #[arg(long)]
    pub markdown: bool,
}

pub fn run(args: ReviewArgs, global: &GlobalOpts) -> Result<()> {
    let config = resolve_config(global, None)?;
    let inputs = FormInputs::load(&args.answers)?;

    let mut session = WizardSession::new(config.profile());
    if let Err(err) = session.complete(&inputs) {
        // Show what was collected so far alongside the failure
        if !global.quiet {
            eprintln!("{} Step {}: {}", style("!").yellow(), err.step(), err);
        }
        session.retreat(&inputs);
        session.enter(StepNumber::LAST);
    }

    let Some(review) = session.review() else {
        return Ok(());
    };

    if args.markdown {
        let renderer = ReviewRenderer::new().into_diagnostic()?;
        let md = renderer
            .render_markdown(session.profile(), review)
            .into_diagnostic()?;
        print!("{}", md);
    } else {
        print_review(review);
    }
    Ok(())
}
