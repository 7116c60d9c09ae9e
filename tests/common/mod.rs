use std::path::Path;

use assert_cmd::Command;
use tempfile::TempDir;

pub const BIN: &str = "wizard_core_cli";

/// One answer per data-entry field, in prompt order, that passes every rule.
pub const VALID_ANSWERS: [&str; 9] = [
    "Ann",
    "Lee",
    "ann.lee@example.com",
    "1 Main St",
    "Springfield",
    "00001",
    "4111111111111111",
    "09/27",
    "123",
];

pub struct CliOutput {
    pub stdout: String,
    #[allow(dead_code)]
    pub stderr: String,
}

/// Runs the CLI against an isolated home directory.
pub struct WizardHarness {
    home: TempDir,
}

impl WizardHarness {
    pub fn new() -> Self {
        Self {
            home: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn home(&self) -> &Path {
        self.home.path()
    }

    fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin(BIN).expect("binary exists");
        cmd.env("WIZARD_CORE_HOME", self.home())
            .env("NO_COLOR", "1")
            .env_remove("WIZARD_CORE_CLI_SCRIPT")
            .env_remove("WIZARD_TEST_TEXT_INPUTS")
            .env_remove("WIZARD_TEST_MENU_EVENTS");
        cmd
    }

    #[allow(dead_code)]
    pub fn run_script(&self, script: &str) -> CliOutput {
        let mut cmd = self.command();
        cmd.env("WIZARD_CORE_CLI_SCRIPT", "1")
            .write_stdin(script.to_string());
        let output = cmd.output().expect("run script CLI");
        finish("script", output)
    }

    #[allow(dead_code)]
    pub fn run_interactive(&self, menu_sequences: &[&str], text_inputs: &[&str]) -> CliOutput {
        let mut cmd = self.command();
        cmd.env("WIZARD_TEST_TEXT_INPUTS", join_sequences(text_inputs));
        // The menu queue must be enabled even when no review screen is reached.
        cmd.env("WIZARD_TEST_MENU_EVENTS", join_sequences(menu_sequences));
        let output = cmd.output().expect("run interactive CLI");
        finish("interactive", output)
    }
}

fn finish(kind: &str, output: std::process::Output) -> CliOutput {
    if !output.status.success() {
        panic!(
            "{kind} CLI failed: status={}\nstdout:\n{}\nstderr:\n{}",
            output.status,
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
    }
    CliOutput {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}

/// Newline-joined script answers, ending with a trailing newline.
#[allow(dead_code)]
pub fn script_lines(lines: &[&str]) -> String {
    let mut script = lines.join("\n");
    script.push('\n');
    script
}

#[allow(dead_code)]
fn join_sequences(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("|")
}
