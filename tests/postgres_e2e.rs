#![cfg(feature = "integration-tests")]

//! End-to-end tests against a real PostgreSQL instance.
//!
//! Run using: `cargo test --features integration-tests`
//! Requires DATABASE_URL to point at a database the tests may create tables in.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use uuid::Uuid;

fn database_url() -> String {
    std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for integration tests")
}

fn gator_cmd(home: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_gator"));
    cmd.env("HOME", home.path());
    cmd
}

fn config_path(home: &TempDir) -> PathBuf {
    home.path().join(".gatorconfig.json")
}

fn read_config(home: &TempDir) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(config_path(home)).unwrap()).unwrap()
}

/// Writes a fresh config and makes sure the schema exists.
fn setup() -> TempDir {
    let home = TempDir::new().unwrap();
    let config = serde_json::json!({ "db_url": database_url(), "current_user_name": "" });
    fs::write(config_path(&home), serde_json::to_string_pretty(&config).unwrap()).unwrap();

    gator_cmd(&home).arg("init-db").assert().success();
    home
}

/// Names are unique per run so the tests can share one database.
fn unique_name(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4().simple())
}

#[test]
fn test_register_sets_current_user() {
    let home = setup();
    let alice = unique_name("alice");

    gator_cmd(&home)
        .args(["register", &alice])
        .assert()
        .success()
        .stdout(predicate::str::contains("User created successfully"))
        .stdout(predicate::str::contains(alice.as_str()));

    let config = read_config(&home);
    assert_eq!(config["current_user_name"], alice.as_str());
    assert_eq!(config["db_url"], database_url().as_str());
}

#[test]
fn test_register_duplicate_name_fails() {
    let home = setup();
    let alice = unique_name("alice");

    gator_cmd(&home).args(["register", &alice]).assert().success();
    gator_cmd(&home)
        .args(["register", &alice])
        .assert()
        .failure()
        .stderr(predicate::str::contains("couldn't create user"));
}

#[test]
fn test_login_unknown_user_fails_and_keeps_config() {
    let home = setup();
    let before = fs::read_to_string(config_path(&home)).unwrap();

    gator_cmd(&home)
        .args(["login", &unique_name("bob")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("couldn't find user"));

    assert_eq!(fs::read_to_string(config_path(&home)).unwrap(), before);
}

#[test]
fn test_login_switches_between_registered_users() {
    let home = setup();
    let alice = unique_name("alice");
    let bob = unique_name("bob");

    gator_cmd(&home).args(["register", &alice]).assert().success();
    gator_cmd(&home).args(["register", &bob]).assert().success();
    assert_eq!(read_config(&home)["current_user_name"], bob.as_str());

    gator_cmd(&home)
        .args(["login", &alice])
        .assert()
        .success()
        .stdout(predicate::str::contains("User switched successfully!"));
    assert_eq!(read_config(&home)["current_user_name"], alice.as_str());
}
