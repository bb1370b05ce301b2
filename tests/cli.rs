use assert_cmd::prelude::*;
use predicates::str::contains;
use std::process::Command;

#[test]
fn client_cli_version() {
    Command::cargo_bin("bookstore-client")
        .unwrap()
        .args(&["-V"])
        .assert()
        .success()
        .stdout(contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn server_cli_version() {
    Command::cargo_bin("bookstore-server")
        .unwrap()
        .args(&["-V"])
        .assert()
        .success()
        .stdout(contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn client_cli_no_args() {
    Command::cargo_bin("bookstore-client")
        .unwrap()
        .assert()
        .failure();
}

#[test]
fn client_cli_invalid_rating() {
    Command::cargo_bin("bookstore-client")
        .unwrap()
        .args(&["review", "9780143127741", "five", "great", "--token", "t"])
        .assert()
        .failure()
        .stderr(contains("could not parse five into a rating"));
}

#[test]
fn client_cli_review_requires_token() {
    Command::cargo_bin("bookstore-client")
        .unwrap()
        .args(&["unreview", "9780143127741"])
        .assert()
        .failure();
}

#[test]
fn client_cli_invalid_url() {
    Command::cargo_bin("bookstore-client")
        .unwrap()
        .args(&["books", "--url", "not a url"])
        .assert()
        .failure()
        .stderr(contains("invalid url"));
}

#[test]
fn server_cli_invalid_addr() {
    Command::cargo_bin("bookstore-server")
        .unwrap()
        .args(&["--addr", "not-an-address"])
        .env_remove("PORT")
        .assert()
        .failure()
        .stderr(contains("could not parse not-an-address"));
}

#[test]
fn server_cli_invalid_store() {
    Command::cargo_bin("bookstore-server")
        .unwrap()
        .args(&["--store", "postgres"])
        .assert()
        .failure();
}
