use std::{env, io};

use crate::cli::forms::{RunOutcome, TerminalInteraction, WizardRunner};
use crate::cli::output::{self, OutputPreferences};
use crate::cli::script::{ScriptInteraction, SCRIPT_ENV};
use crate::cli::ui::test_mode;
use crate::config::ConfigManager;
use crate::domain::Displayable;
use crate::errors::CliError;
use crate::submit::JsonSink;
use crate::utils::build_info;
use crate::wizard::Wizard;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

impl CliMode {
    pub fn from_env() -> Self {
        if env::var_os(SCRIPT_ENV).is_some() {
            CliMode::Script
        } else {
            CliMode::Interactive
        }
    }
}

enum Action {
    Run,
    Version,
    Help,
}

fn parse_args<I>(args: I) -> Result<Action, CliError>
where
    I: IntoIterator<Item = String>,
{
    let mut action = Action::Run;
    for arg in args {
        action = match arg.as_str() {
            "--version" | "-V" => Action::Version,
            "--help" | "-h" => Action::Help,
            other => return Err(CliError::Input(format!("unknown argument `{other}`"))),
        };
    }
    Ok(action)
}

pub fn run_cli() -> Result<(), CliError> {
    match parse_args(env::args().skip(1))? {
        Action::Version => {
            println!("{}", build_info::current().summary());
            return Ok(());
        }
        Action::Help => {
            print_usage();
            return Ok(());
        }
        Action::Run => {}
    }

    let config = ConfigManager::from_env().load()?;
    output::set_preferences(OutputPreferences::from_config(&config));

    let mut wizard = Wizard::from_config(&config)?;
    let mut sink = JsonSink::new(io::stdout(), config.pretty_json);
    let runner = WizardRunner::new();

    let mode = if test_mode::is_enabled() {
        CliMode::Interactive
    } else {
        CliMode::from_env()
    };
    tracing::debug!(?mode, criteria = %wizard.criteria_mode(), "Starting wizard");

    let outcome = match mode {
        CliMode::Interactive => {
            runner.run(&mut wizard, &mut TerminalInteraction::new(), &mut sink)?
        }
        CliMode::Script => {
            let mut interaction = ScriptInteraction::new(io::stdin().lock());
            runner.run(&mut wizard, &mut interaction, &mut sink)?
        }
    };

    match outcome {
        RunOutcome::Finished { submissions } => {
            output::info(format!("Wizard closed after {submissions} submission(s)."));
        }
        RunOutcome::Cancelled { step } => {
            output::warning(format!("Wizard cancelled at {}.", step.display_label()));
        }
    }
    Ok(())
}

fn print_usage() {
    println!(
        "Usage: wizard_core_cli [--version | --help]\n\
         Collects personal, address and payment details, then submits them.\n\
         Set {SCRIPT_ENV}=1 to read answers line by line from stdin."
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|arg| arg.to_string()).collect()
    }

    #[test]
    fn no_arguments_runs_the_wizard() {
        assert!(matches!(parse_args(args(&[])), Ok(Action::Run)));
        assert!(matches!(parse_args(args(&["-V"])), Ok(Action::Version)));
    }

    #[test]
    fn script_mode_follows_the_environment_variable() {
        let previous = env::var_os(SCRIPT_ENV);

        env::remove_var(SCRIPT_ENV);
        assert_eq!(CliMode::from_env(), CliMode::Interactive);
        env::set_var(SCRIPT_ENV, "1");
        assert_eq!(CliMode::from_env(), CliMode::Script);

        match previous {
            Some(value) => env::set_var(SCRIPT_ENV, value),
            None => env::remove_var(SCRIPT_ENV),
        }
    }

    #[test]
    fn unknown_arguments_are_rejected() {
        let err = parse_args(args(&["--frobnicate"])).err().unwrap();
        assert_eq!(err.to_string(), "Invalid input: unknown argument `--frobnicate`");
    }
}
