use assert_cmd::Command;
use predicates::prelude::*;

fn relay_cmd() -> Command {
    let mut cmd = Command::cargo_bin("gauth").unwrap();
    cmd.env_clear()
        .env("CLIENT_ID", "cli-client")
        .env("CLIENT_SECRET", "cli-secret")
        .env("REDIRECT_URL", "http://localhost:8080/oauth2callback");
    cmd
}

#[test]
fn start_server_false_prints_url_and_exits() {
    relay_cmd()
        .env("START_SERVER", "false")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "accounts.google.com/o/oauth2/v2/auth",
        ))
        .stdout(predicate::str::contains("client_id=cli-client"))
        .stdout(predicate::str::contains("access_type=offline"))
        .stdout(predicate::str::contains("state="));
}

#[test]
fn unset_mode_defaults_to_printing_url() {
    relay_cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("Authorization URL:"));
}

#[test]
fn auth_url_subcommand_prints_url() {
    relay_cmd()
        .arg("auth-url")
        .assert()
        .success()
        .stdout(predicate::str::contains("response_type=code"))
        .stdout(predicate::str::contains("include_granted_scopes=true"));
}

#[test]
fn missing_client_id_fails_fast() {
    let mut cmd = Command::cargo_bin("gauth").unwrap();
    cmd.env_clear()
        .env("CLIENT_SECRET", "cli-secret")
        .env("REDIRECT_URL", "http://localhost:8080/oauth2callback")
        .env("START_SERVER", "false")
        .assert()
        .failure()
        .stderr(predicate::str::contains("CLIENT_ID"));
}

#[test]
fn malformed_server_port_fails_fast() {
    relay_cmd()
        .env("SERVER_PORT", "not-a-port")
        .assert()
        .failure()
        .stderr(predicate::str::contains("SERVER_PORT"));
}
