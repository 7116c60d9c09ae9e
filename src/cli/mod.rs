pub mod forms;
pub mod output;
pub mod script;
mod shell;
pub mod ui;

pub use crate::errors::CliError;
pub use shell::{run_cli, CliMode};
