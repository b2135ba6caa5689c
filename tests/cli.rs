use assert_cmd::prelude::*;
use predicates::prelude::*;

#[test]
fn test_cli_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = assert_cmd::cargo_bin_cmd!("siteroi");
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
    Ok(())
}

#[test]
fn missing_input_file_fails() {
    let mut cmd = assert_cmd::cargo_bin_cmd!("siteroi");
    cmd.args(["insights", "-i", "/nonexistent/site.yaml"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to analyze site"));
}
