//! Shared helper functions for CLI commands

use console::style;
use miette::{IntoDiagnostic, Result};
use std::path::{Path, PathBuf};

use crate::cli::args::GlobalOpts;
use crate::core::config::Config;
use crate::core::session::GeneratedDocument;
use crate::core::validator::Feedback;
use crate::core::ValidationError;

/// Load layered config and apply command-line overrides on top
pub fn resolve_config(global: &GlobalOpts, output: Option<&Path>) -> Result<Config> {
    let mut config = Config::load()?;
    config.merge(Config {
        profile: global.profile,
        output_dir: None,
        file_name: None,
    });

    if let Some(path) = output {
        config.output_dir = path.parent().filter(|p| !p.as_os_str().is_empty()).map(PathBuf::from);
        config.file_name = path.file_name().map(|n| n.to_string_lossy().into_owned());
    }
    Ok(config)
}

/// Write a generated document to stdout or to the configured path
pub fn write_document(
    generated: &GeneratedDocument,
    config: &Config,
    to_stdout: bool,
    quiet: bool,
) -> Result<()> {
    if to_stdout {
        println!("{}", generated.json);
        return Ok(());
    }

    let path = config.output_path();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).into_diagnostic()?;
    }
    std::fs::write(&path, &generated.json).into_diagnostic()?;
    tracing::info!(path = %path.display(), "wrote document");

    if !quiet {
        println!(
            "{} Wrote {}",
            style("✓").green(),
            style(path.display()).cyan()
        );
    }
    Ok(())
}

/// Feedback sink printing validation alerts to stderr
#[derive(Debug, Default)]
pub struct ConsoleFeedback;

impl Feedback for ConsoleFeedback {
    fn alert(&mut self, error: &ValidationError) {
        eprintln!("{} {}", style("✗").red(), style(error).red());
    }
}

/// Title-case an identifier-like string (`did_not_vote` -> `Did Not Vote`)
pub fn title_case(s: &str) -> String {
    s.replace(['_', '-'], " ")
        .split_whitespace()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => c.to_uppercase().chain(chars).collect(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Truncate a string to max_len characters, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
