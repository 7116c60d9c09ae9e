//! Drives a [`Wizard`] through an interaction surface.
//!
//! The runner owns the loop: it opens the current step's form, asks the
//! interaction for each field, submits the form once every field has been
//! visited, and hands the validated partial record to the controller. The
//! interaction only renders and collects answers; it never sees the record
//! except as a read-only snapshot.

use tracing::{debug, warn};

use crate::cli::output;
use crate::cli::ui::formatting::Formatter;
use crate::cli::ui::prompts::{review_menu, text_input, ReviewPromptResult, TextPromptResult};
use crate::domain::{Displayable, Field, Record, StepId};
use crate::errors::WizardError;
use crate::form::StepForm;
use crate::submit::{SubmitSink, Submission};
use crate::validation::{FieldError, FieldRule, ValidationErrors};
use crate::wizard::Wizard;

/// Describes how a field prompt can be answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptResponse {
    /// User typed a value (possibly empty).
    Value(String),
    /// Keep the pre-filled value.
    Keep,
    /// Previous field, or previous step from the first field.
    Back,
    /// Show the field's rules.
    Help,
    /// Leave the wizard.
    Cancel,
}

/// Actions available on the review screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewResponse {
    Submit,
    Back,
    Quit,
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Left from the review screen after `submissions` submits.
    Finished { submissions: usize },
    /// Abandoned on a data-entry step.
    Cancelled { step: StepId },
}

/// Everything needed to render one field prompt.
pub struct PromptContext<'a> {
    pub step: StepId,
    pub field: Field,
    pub value: &'a str,
    pub errors: &'a [FieldError],
    pub index: usize,
    pub total: usize,
}

impl PromptContext<'_> {
    pub fn is_first_field(&self) -> bool {
        self.index == 0
    }
}

/// Rendering surface used by the runner.
///
/// Only the two prompts are required; the notices default to the shared
/// output helpers.
pub trait WizardInteraction {
    fn prompt_field(&mut self, context: &PromptContext<'_>) -> PromptResponse;

    fn review(&mut self, record: &Record, lines: &[String]) -> ReviewResponse;

    fn show_errors(&mut self, step: StepId, errors: &ValidationErrors) {
        render_errors(&Formatter::new(), step, errors);
    }

    fn show_help(&mut self, field: Field, lines: &[String]) {
        output::info(format!("{}: {}", field.label(), lines.join(" ")));
    }

    fn show_notice(&mut self, message: &str) {
        output::warning(message);
    }

    fn submit_failed(&mut self, err: &WizardError) {
        output::error(err);
    }

    fn submitted(&mut self, submission: &Submission) {
        output::success(format!(
            "Form submitted successfully! (submission {})",
            submission.id
        ));
    }
}

enum StepExit {
    Continue,
    Cancelled,
}

/// Runs the wizard loop until the user quits from review or cancels.
#[derive(Debug, Default)]
pub struct WizardRunner;

impl WizardRunner {
    pub fn new() -> Self {
        Self
    }

    pub fn run<I, S>(
        &self,
        wizard: &mut Wizard,
        interaction: &mut I,
        sink: &mut S,
    ) -> Result<RunOutcome, WizardError>
    where
        I: WizardInteraction + ?Sized,
        S: SubmitSink + ?Sized,
    {
        let mut submissions = 0;
        loop {
            if let Some(form) = wizard.open_step() {
                match self.run_step(wizard, form, interaction) {
                    StepExit::Continue => continue,
                    StepExit::Cancelled => {
                        return Ok(RunOutcome::Cancelled {
                            step: wizard.current_step(),
                        })
                    }
                }
            }

            let lines = review_lines(wizard.record())?;
            match interaction.review(wizard.record(), &lines) {
                ReviewResponse::Submit => match wizard.submit(sink) {
                    Ok(submission) => {
                        submissions += 1;
                        interaction.submitted(&submission);
                    }
                    // Record and position are untouched; review is shown again.
                    Err(err) => {
                        warn!(error = %err, "Submission failed");
                        interaction.submit_failed(&err);
                    }
                },
                ReviewResponse::Back => {
                    wizard.retreat();
                }
                ReviewResponse::Quit => return Ok(RunOutcome::Finished { submissions }),
            }
        }
    }

    fn run_step<I>(&self, wizard: &mut Wizard, mut form: StepForm, interaction: &mut I) -> StepExit
    where
        I: WizardInteraction + ?Sized,
    {
        let fields = form.fields();
        let mut index = 0;

        loop {
            if index >= fields.len() {
                if let Some(partial) = form.submit() {
                    wizard.merge_and_advance(partial);
                    return StepExit::Continue;
                }
                interaction.show_errors(form.step(), form.errors());
                // Resume at the first failing field; later fields keep their values.
                index = form
                    .errors()
                    .first_field()
                    .and_then(|failed| fields.iter().position(|field| *field == failed))
                    .unwrap_or(0);
                continue;
            }

            let field = fields[index];
            let response = {
                let context = PromptContext {
                    step: form.step(),
                    field,
                    value: form.value(field),
                    errors: form.errors_for(field),
                    index,
                    total: fields.len(),
                };
                interaction.prompt_field(&context)
            };

            match response {
                PromptResponse::Value(value) => {
                    form.set_value(field, value);
                    index += 1;
                }
                PromptResponse::Keep => index += 1,
                PromptResponse::Back if index > 0 => index -= 1,
                PromptResponse::Back => {
                    if wizard.retreat().moved() {
                        debug!(step = %form.step(), "Left step without submitting");
                        return StepExit::Continue;
                    }
                    interaction.show_notice("Already at the first step.");
                }
                PromptResponse::Help => {
                    let lines = form
                        .schema()
                        .rule(field)
                        .map(FieldRule::describe)
                        .unwrap_or_default();
                    interaction.show_help(field, &lines);
                }
                PromptResponse::Cancel => return StepExit::Cancelled,
            }
        }
    }
}

/// Pretty JSON of the record followed by a labelled listing.
pub fn review_lines(record: &Record) -> Result<Vec<String>, WizardError> {
    let mut lines: Vec<String> = record.to_json(true)?.lines().map(str::to_string).collect();
    lines.push(String::new());
    let entries: Vec<(&str, &str)> = record
        .iter()
        .map(|(field, value)| (field.label(), value))
        .collect();
    lines.extend(Formatter::new().two_column_rows(&entries));
    Ok(lines)
}

pub(crate) fn render_errors(formatter: &Formatter, step: StepId, errors: &ValidationErrors) {
    output::warning(format!(
        "{} could not be submitted: {} field(s) need attention.",
        step.title(),
        errors.len()
    ));
    for error in errors.iter() {
        formatter.print_field_error(error.field.label(), &error.message);
    }
}

pub(crate) fn render_field_prompt(formatter: &Formatter, context: &PromptContext<'_>) {
    if context.is_first_field() {
        formatter.print_header(context.step.display_label());
        let mut hint = String::from("Type a value and press Enter. :help shows the rules");
        if context.step.previous().is_some() {
            hint.push_str(", :back returns to the previous field or step");
        }
        hint.push_str(", :cancel quits.");
        formatter.print_detail(hint);
    }
    formatter.print_detail(format!(
        "{} ({} of {})",
        context.field.label(),
        context.index + 1,
        context.total
    ));
    if !context.value.is_empty() {
        formatter.print_detail(format!("Current: {}", context.value));
    }
    for error in context.errors {
        formatter.print_field_error(context.field.label(), &error.message);
    }
}

/// Keyboard-driven interaction built on the raw-mode prompts.
pub struct TerminalInteraction {
    formatter: Formatter,
}

impl Default for TerminalInteraction {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalInteraction {
    pub fn new() -> Self {
        Self {
            formatter: Formatter::new(),
        }
    }
}

impl WizardInteraction for TerminalInteraction {
    fn prompt_field(&mut self, context: &PromptContext<'_>) -> PromptResponse {
        render_field_prompt(&self.formatter, context);
        match text_input(context.field.label(), Some(context.value)) {
            Ok(TextPromptResult::Value(value)) => PromptResponse::Value(value),
            Ok(TextPromptResult::Keep) => PromptResponse::Keep,
            Ok(TextPromptResult::Back) => PromptResponse::Back,
            Ok(TextPromptResult::Help) => PromptResponse::Help,
            // ESC steps back, and leaves the wizard from its very first field.
            Ok(TextPromptResult::Escape) => {
                if context.is_first_field() && context.step.previous().is_none() {
                    PromptResponse::Cancel
                } else {
                    PromptResponse::Back
                }
            }
            Ok(TextPromptResult::Cancel) | Err(_) => PromptResponse::Cancel,
        }
    }

    fn review(&mut self, _record: &Record, lines: &[String]) -> ReviewResponse {
        match review_menu(lines) {
            Ok(ReviewPromptResult::Submit) => ReviewResponse::Submit,
            Ok(ReviewPromptResult::Back) => ReviewResponse::Back,
            Ok(ReviewPromptResult::Quit) | Err(_) => ReviewResponse::Quit,
        }
    }

    fn show_errors(&mut self, step: StepId, errors: &ValidationErrors) {
        render_errors(&self.formatter, step, errors);
    }
}
