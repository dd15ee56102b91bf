use assert_cmd::cargo;

#[test]
fn prints_help() {
    let mut cmd = cargo::cargo_bin_cmd!();

    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicates::str::contains("Usage"))
        .stdout(predicates::str::contains("--notes"));
}

#[test]
fn prints_version() {
    let mut cmd = cargo::cargo_bin_cmd!();

    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicates::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn summarize_help_lists_base_argument() {
    let mut cmd = cargo::cargo_bin_cmd!();

    cmd.args(["summarize", "--help"])
        .assert()
        .success()
        .stdout(predicates::str::contains("<BASE>"));
}

#[test]
fn missing_api_key_fails_before_any_request() {
    let home = std::env::temp_dir().join("diffscribe-cli-test-home");
    let mut cmd = cargo::cargo_bin_cmd!();

    cmd.env_remove("OPENAI_API_KEY")
        .env("HOME", &home)
        .assert()
        .failure()
        .stderr(predicates::str::contains("OPENAI_API_KEY"));
}
