//! Interactive terminal front end for a wizard session
//!
//! The prompts only edit a [`FormInputs`] value standing in for the on-screen
//! form; every navigation decision goes through [`WizardSession`].

use console::style;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::ConsoleFeedback;
use crate::core::field::FieldId;
use crate::core::session::{GeneratedDocument, WizardSession};
use crate::core::source::{FieldSource, FormInputs};
use crate::core::step::{StepDefinition, StepNumber};
use crate::core::validator::Reporting;
use crate::document::review::{EntryStyle, ReviewProjection};

/// What the user picked at the bottom of a step
enum Action {
    Next,
    Back,
    Generate,
    Jump(StepNumber),
    Quit,
}

/// Prompt-driven wizard
pub struct InteractiveWizard {
    theme: ColorfulTheme,
    feedback: ConsoleFeedback,
}

impl InteractiveWizard {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
            feedback: ConsoleFeedback,
        }
    }

    /// Drive the session until a document is generated or the user quits
    pub fn run(
        &mut self,
        session: &mut WizardSession,
        inputs: &mut FormInputs,
    ) -> Result<Option<GeneratedDocument>> {
        loop {
            let def = session.definition();
            self.print_header(def);

            let action = if def.number.is_review() {
                if let Some(review) = session.review() {
                    print_review(review);
                }
                self.review_menu()?
            } else {
                for field in def.fields() {
                    self.prompt_field(def, field, inputs)?;
                }
                self.step_menu(def.number)?
            };

            match action {
                Action::Next => {
                    let advanced =
                        session.advance_with(&*inputs, Reporting::Alert, &mut self.feedback);
                    if let Err(err) = advanced {
                        // Already shown through the feedback sink; stay on this step
                        tracing::debug!(step = %err.step(), field = %err.field(), "step rejected");
                    }
                }
                Action::Back => {
                    session.retreat(&*inputs);
                }
                Action::Jump(step) => session.enter(step),
                Action::Generate => match session.generate() {
                    Ok(generated) => return Ok(Some(generated)),
                    Err(err) => {
                        eprintln!("{} {}", style("✗").red(), style(&err).red());
                        if let Some(step) = err.redirect() {
                            eprintln!("  Returning to step {}", step);
                        }
                    }
                },
                Action::Quit => return Ok(None),
            }
        }
    }

    fn print_header(&self, def: &StepDefinition) {
        println!();
        println!(
            "{} Step {}/{}: {}",
            style("◆").cyan(),
            def.number,
            StepNumber::LAST,
            style(def.title).bold()
        );
        println!("{}", style("─".repeat(50)).dim());
    }

    fn prompt_field(&self, def: &StepDefinition, field: FieldId, inputs: &mut FormInputs) -> Result<()> {
        let prompt = self.format_prompt(def, field);
        let current = inputs.raw_value(field).unwrap_or("").to_string();

        let value = if field.kind().is_multiline() {
            self.prompt_lines(&prompt, &current)?
        } else {
            let mut input = Input::<String>::with_theme(&self.theme)
                .with_prompt(&prompt)
                .allow_empty(true);
            if !current.is_empty() {
                input = input.with_initial_text(current);
            }
            input.interact_text().into_diagnostic()?
        };

        inputs.set(field, value);
        Ok(())
    }

    /// Collect one line at a time until a blank line
    fn prompt_lines(&self, prompt: &str, current: &str) -> Result<String> {
        let mut lines: Vec<String> = current.lines().map(String::from).collect();
        if !lines.is_empty() {
            println!("{}:", prompt);
            for line in &lines {
                println!("  {}", style(line).dim());
            }
            let keep = Select::with_theme(&self.theme)
                .with_prompt("Keep these entries?")
                .items(&["Keep and add more", "Start over"])
                .default(0)
                .interact()
                .into_diagnostic()?;
            if keep == 1 {
                lines.clear();
            }
        }

        loop {
            let line: String = Input::with_theme(&self.theme)
                .with_prompt(format!("{} (blank to finish)", prompt))
                .allow_empty(true)
                .interact_text()
                .into_diagnostic()?;
            if line.trim().is_empty() {
                break;
            }
            lines.push(line);
        }
        Ok(lines.join("\n"))
    }

    fn step_menu(&self, step: StepNumber) -> Result<Action> {
        let mut items = vec![("Next".to_string(), Action::Next)];
        if step > StepNumber::FIRST {
            items.push(("Back".to_string(), Action::Back));
        }
        items.push(("Quit".to_string(), Action::Quit));
        self.menu(items)
    }

    fn review_menu(&self) -> Result<Action> {
        let mut items = vec![
            ("Generate JSON".to_string(), Action::Generate),
            ("Back".to_string(), Action::Back),
        ];
        for step in StepNumber::all().filter(|s| !s.is_review()) {
            items.push((format!("Edit step {}", step), Action::Jump(step)));
        }
        items.push(("Quit".to_string(), Action::Quit));
        self.menu(items)
    }

    fn menu(&self, items: Vec<(String, Action)>) -> Result<Action> {
        let labels: Vec<&str> = items.iter().map(|(label, _)| label.as_str()).collect();
        let selection = Select::with_theme(&self.theme)
            .items(&labels)
            .default(0)
            .interact()
            .into_diagnostic()?;
        items
            .into_iter()
            .nth(selection)
            .map(|(_, action)| action)
            .ok_or_else(|| miette::miette!("Invalid menu selection"))
    }

    fn format_prompt(&self, def: &StepDefinition, field: FieldId) -> String {
        let mut prompt = field.label().to_string();
        if def.is_required(field) {
            prompt.push_str(" *");
        }
        match field.hint() {
            Some(hint) => format!("{} ({})", prompt, style(hint).dim()),
            None => prompt,
        }
    }
}

impl Default for InteractiveWizard {
    fn default() -> Self {
        Self::new()
    }
}

/// Print the review projection with section styling
pub fn print_review(review: &ReviewProjection) {
    if review.is_empty() {
        println!("{}", style("Nothing entered yet.").dim());
        return;
    }
    for section in &review.sections {
        println!();
        println!("{}", style(section.title).bold().underlined());
        for entry in &section.entries {
            match entry.style {
                EntryStyle::Inline => {
                    println!("{} {}", style(format!("{}:", entry.label)).cyan(), entry.value)
                }
                EntryStyle::Item => {
                    println!("  • {} {}", style(format!("{}:", entry.label)).cyan(), entry.value)
                }
                EntryStyle::Block => {
                    println!("{}", style(format!("{}:", entry.label)).cyan());
                    for line in entry.value.lines() {
                        println!("    {}", line);
                    }
                }
            }
        }
    }
}
