use std::fmt;

use colored::Colorize;

use crate::cli::output::{current_preferences, OutputPreferences};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Style {
    Header,
    Detail,
    FieldError,
}

/// Renders wizard screens: step headers, hints, and inline field errors.
pub struct Formatter {
    prefs: OutputPreferences,
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter {
    pub fn new() -> Self {
        Self::with_preferences(current_preferences())
    }

    pub fn with_preferences(prefs: OutputPreferences) -> Self {
        Self { prefs }
    }

    pub fn print_header(&self, title: impl fmt::Display) {
        println!("\n{}", self.header_text(title));
    }

    pub fn header_text(&self, title: impl fmt::Display) -> String {
        self.apply_style(Style::Header, format!("=== {} ===", title))
    }

    pub fn print_detail(&self, message: impl fmt::Display) {
        println!("{}", self.apply_style(Style::Detail, message));
    }

    pub fn print_field_error(&self, label: &str, message: impl fmt::Display) {
        println!("{}", self.field_error_text(label, message));
    }

    /// `  ✖ Email: Invalid email format`, or a text label in plain mode.
    pub fn field_error_text(&self, label: &str, message: impl fmt::Display) -> String {
        let body = format!("{label}: {message}");
        if self.prefs.plain_mode {
            format!("  ERROR: {body}")
        } else {
            self.apply_style(Style::FieldError, format!("  ✖ {body}"))
        }
    }

    /// Aligned `label  value` rows.
    pub fn two_column_rows(&self, entries: &[(&str, &str)]) -> Vec<String> {
        let width = entries
            .iter()
            .map(|(label, _)| label.chars().count())
            .max()
            .unwrap_or(0);
        entries
            .iter()
            .map(|(label, value)| format!("  {:<width$}  {}", label, value, width = width))
            .collect()
    }

    fn apply_style(&self, style: Style, message: impl fmt::Display) -> String {
        let text = message.to_string();
        if self.prefs.plain_mode || !self.prefs.color_enabled {
            return text;
        }
        if self.prefs.high_contrast_mode {
            return match style {
                Style::Detail => text,
                _ => text.bold().to_string(),
            };
        }
        match style {
            Style::Header => text.bold().to_string(),
            Style::FieldError => text.red().to_string(),
            Style::Detail => text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> Formatter {
        Formatter::with_preferences(OutputPreferences {
            plain_mode: true,
            ..OutputPreferences::default()
        })
    }

    #[test]
    fn field_errors_are_labelled() {
        assert_eq!(
            plain().field_error_text("CVV", "CVV must be 3 or 4 digits"),
            "  ERROR: CVV: CVV must be 3 or 4 digits"
        );
    }

    #[test]
    fn two_column_rows_align_values() {
        let rows = plain().two_column_rows(&[("CVV", "123"), ("Card Number", "1234")]);
        assert_eq!(rows[0], "  CVV          123");
        assert_eq!(rows[1], "  Card Number  1234");
    }
}
