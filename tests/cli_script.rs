mod common;

use assert_cmd::Command;
use common::{script_lines, WizardHarness, BIN, VALID_ANSWERS};
use predicates::str::contains;

fn answers_then(tail: &[&str]) -> String {
    let mut lines = VALID_ANSWERS.to_vec();
    lines.extend_from_slice(tail);
    script_lines(&lines)
}

#[test]
fn script_mode_submits_the_record_as_json() {
    let harness = WizardHarness::new();
    let output = harness.run_script(&answers_then(&["submit", "quit"]));

    assert!(output.stdout.contains("=== Step 1 of 4 – Personal Details ==="));
    assert!(output.stdout.contains("=== Step 3 of 4 – Payment Details ==="));
    assert!(output.stdout.contains("Form submitted successfully!"));
    assert!(output.stdout.contains("\"firstName\": \"Ann\""));
    assert!(output.stdout.contains("\"cardNumber\": \"4111111111111111\""));
    assert!(output.stdout.contains("\"submittedAt\""));
    assert!(output.stdout.contains("Wizard closed after 1 submission(s)."));
}

#[test]
fn missing_first_name_is_reported_and_reprompted() {
    let harness = WizardHarness::new();
    // After the fix, the remaining fields of the step are offered again and
    // an empty line keeps their values.
    let mut lines = vec!["", "Lee", "ann@example.com", "Ann", "", ""];
    lines.extend_from_slice(&VALID_ANSWERS[3..]);
    lines.extend_from_slice(&["quit"]);
    let output = harness.run_script(&script_lines(&lines));

    assert!(output.stdout.contains("First Name is required"));
    assert!(output.stdout.contains("=== Step 2 of 4 – Address ==="));
    assert!(output.stdout.contains("Wizard closed after 0 submission(s)."));
    assert!(!output.stdout.contains("Form submitted successfully!"));
}

#[test]
fn payment_format_errors_use_rule_messages() {
    let harness = WizardHarness::new();
    let mut lines = VALID_ANSWERS[..6].to_vec();
    lines.extend_from_slice(&["1234", "13/27", "12"]);
    let output = harness.run_script(&script_lines(&lines));

    assert!(output.stdout.contains("Card Number must be 16 digits"));
    assert!(output.stdout.contains("Invalid expiry date format"));
    assert!(output.stdout.contains("CVV must be 3 or 4 digits"));
    assert!(output.stdout.contains("Wizard cancelled at Step 3 of 4 – Payment Details."));
}

#[test]
fn back_from_review_keeps_payment_values() {
    let harness = WizardHarness::new();
    let output = harness.run_script(&answers_then(&["back", "", "", "", "submit", "quit"]));

    assert!(output.stdout.contains("Current: 4111111111111111"));
    assert!(output.stdout.contains("Form submitted successfully!"));
}

#[test]
fn end_of_input_cancels_cleanly() {
    let harness = WizardHarness::new();
    let output = harness.run_script("Ann\n");

    assert!(output.stdout.contains("Wizard cancelled at Step 1 of 4 – Personal Details."));
}

#[test]
fn compact_json_is_used_when_configured() {
    let harness = WizardHarness::new();
    let config_dir = harness.home().join("config");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.json"), r#"{ "pretty_json": false }"#).unwrap();

    let output = harness.run_script(&answers_then(&["submit", "quit"]));

    assert!(output.stdout.contains("\"firstName\":\"Ann\""));
}

#[test]
fn broken_config_fails_with_error() {
    let harness = WizardHarness::new();
    let config_dir = harness.home().join("config");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.json"), "{ not json").unwrap();

    Command::cargo_bin(BIN)
        .unwrap()
        .env("WIZARD_CORE_HOME", harness.home())
        .env("WIZARD_CORE_CLI_SCRIPT", "1")
        .write_stdin("")
        .assert()
        .failure()
        .stderr(contains("Error:"));
}

#[test]
fn version_flag_prints_build_summary() {
    Command::cargo_bin(BIN)
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(contains(format!("wizard_core {}", env!("CARGO_PKG_VERSION"))));
}

#[test]
fn unknown_flag_is_rejected() {
    Command::cargo_bin(BIN)
        .unwrap()
        .arg("--bogus")
        .assert()
        .failure()
        .stderr(contains("unknown argument `--bogus`"));
}
