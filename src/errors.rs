use std::io;

use thiserror::Error;

use crate::config::ConfigError;
use crate::domain::{Field, StepId};

/// Error type for operational failures of the wizard.
///
/// Field validation failures are not represented here: they stay attached to
/// the form that produced them (see [`crate::validation::FieldError`]).
#[derive(Debug, Error)]
pub enum WizardError {
    #[error("Invalid pattern for `{field}`: {source}")]
    Pattern {
        field: Field,
        #[source]
        source: regex::Error,
    },
    #[error("Submit is only available on the review step (current step: {0})")]
    SubmitUnavailable(StepId),
    #[error("Submission failed: {0}")]
    Submit(String),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, WizardError>;

impl From<ConfigError> for WizardError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Io(io) => WizardError::Io(io),
            ConfigError::Serde(message) => WizardError::Config(message),
        }
    }
}

/// Errors surfaced by the terminal front end.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] WizardError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid input: {0}")]
    Input(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_parse_errors_become_config_variant() {
        let err: WizardError = ConfigError::Serde("bad json".into()).into();
        assert!(matches!(err, WizardError::Config(ref message) if message == "bad json"));
    }

    #[test]
    fn cli_error_is_transparent_over_core() {
        let err: CliError = WizardError::SubmitUnavailable(StepId::Payment).into();
        assert_eq!(
            err.to_string(),
            "Submit is only available on the review step (current step: payment)"
        );
    }
}
