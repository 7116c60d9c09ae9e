//! Line-oriented interaction selected by setting `WIZARD_CORE_CLI_SCRIPT`.
//!
//! Each field prompt consumes one line and understands the same colon
//! commands as the keyboard prompt. On the review screen a line reading
//! `submit`, `back` or `quit` picks the action. End of input cancels.

use std::io::{BufRead, Lines};

use crate::cli::forms::{
    render_errors, render_field_prompt, PromptContext, PromptResponse, ReviewResponse,
    WizardInteraction,
};
use crate::cli::output;
use crate::cli::ui::formatting::Formatter;
use crate::cli::ui::prompts::{interpret_buffer, TextPromptResult};
use crate::domain::{Record, StepId};
use crate::validation::ValidationErrors;

pub const SCRIPT_ENV: &str = "WIZARD_CORE_CLI_SCRIPT";

pub struct ScriptInteraction<R: BufRead> {
    lines: Lines<R>,
    formatter: Formatter,
}

impl<R: BufRead> ScriptInteraction<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            formatter: Formatter::new(),
        }
    }

    fn next_line(&mut self) -> Option<String> {
        match self.lines.next()? {
            Ok(line) => Some(line.trim_end_matches('\r').to_string()),
            Err(err) => {
                tracing::warn!("Failed to read script input: {}", err);
                None
            }
        }
    }
}

impl<R: BufRead> WizardInteraction for ScriptInteraction<R> {
    fn prompt_field(&mut self, context: &PromptContext<'_>) -> PromptResponse {
        render_field_prompt(&self.formatter, context);
        let Some(line) = self.next_line() else {
            return PromptResponse::Cancel;
        };
        match interpret_buffer(&line, Some(context.value)) {
            TextPromptResult::Value(value) => PromptResponse::Value(value),
            TextPromptResult::Keep => PromptResponse::Keep,
            TextPromptResult::Back | TextPromptResult::Escape => PromptResponse::Back,
            TextPromptResult::Help => PromptResponse::Help,
            TextPromptResult::Cancel => PromptResponse::Cancel,
        }
    }

    fn review(&mut self, _record: &Record, lines: &[String]) -> ReviewResponse {
        output::section(StepId::Review.title());
        for line in lines {
            println!("{line}");
        }
        self.formatter.print_detail("Type `submit`, `back` or `quit`.");

        loop {
            let Some(line) = self.next_line() else {
                return ReviewResponse::Quit;
            };
            match line.trim().to_ascii_lowercase().as_str() {
                "submit" | ":submit" => return ReviewResponse::Submit,
                "back" | ":back" => return ReviewResponse::Back,
                "quit" | ":quit" | ":cancel" => return ReviewResponse::Quit,
                "" => continue,
                other => output::warning(format!("Unknown review action `{other}`.")),
            }
        }
    }

    fn show_errors(&mut self, step: StepId, errors: &ValidationErrors) {
        render_errors(&self.formatter, step, errors);
    }
}
