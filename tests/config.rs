use std::fs;

use datahub_setup::SetupError;
use datahub_setup::config::Config;
use tempfile::tempdir;

#[test]
fn legacy_settings_round_trip() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("config.txt");
    fs::write(
        &path,
        "HOST=h\nPORT=1521\nSERVICE=s\nWEBIN=W\nADMIN_EMAIL=a@x.com\nEMAIL_PORT=465\n",
    )
    .expect("settings written");

    let config = Config::load(&path).expect("settings loaded");

    assert_eq!(config.host, "h");
    assert_eq!(config.port, 1521);
    assert_eq!(config.service, "s");
    assert_eq!(config.webin, "W");
    assert_eq!(config.admin_email, "a@x.com");
    assert_eq!(config.email_port, 465);
}

#[test]
fn structured_settings_use_the_same_key_set() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("config.toml");
    fs::write(
        &path,
        "HOST = \"h\"\nPORT = 1521\nSERVICE = \"s\"\nWEBIN = \"W\"\nADMIN_EMAIL = \"a@x.com\"\nEMAIL_PORT = 465\n",
    )
    .expect("settings written");

    let config = Config::load(&path).expect("settings loaded");

    assert_eq!(config.host, "h");
    assert_eq!(config.port, 1521);
    assert_eq!(config.admin_email, "a@x.com");
    assert_eq!(config.email_port, 465);
}

#[test]
fn line_without_separator_is_malformed() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("config.txt");
    fs::write(&path, "HOST=h\nPORT\n").expect("settings written");

    let error = Config::load(&path).expect_err("load should fail");
    assert!(matches!(error, SetupError::MalformedConfig(_)));
}

#[test]
fn line_with_two_separators_is_malformed() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("config.txt");
    fs::write(&path, "HOST=h=extra\n").expect("settings written");

    let error = Config::load(&path).expect_err("load should fail");
    assert!(matches!(error, SetupError::MalformedConfig(_)));
}

#[test]
fn missing_key_is_reported_by_name() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("config.txt");
    fs::write(
        &path,
        "HOST=h\nPORT=1521\nSERVICE=s\nWEBIN=W\nADMIN_EMAIL=a@x.com\n",
    )
    .expect("settings written");

    let error = Config::load(&path).expect_err("load should fail");
    match error {
        SetupError::MissingConfigKey(key) => assert_eq!(key, "EMAIL_PORT"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn non_numeric_port_is_malformed() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("config.txt");
    fs::write(
        &path,
        "HOST=h\nPORT=not-a-port\nSERVICE=s\nWEBIN=W\nADMIN_EMAIL=a@x.com\nEMAIL_PORT=465\n",
    )
    .expect("settings written");

    let error = Config::load(&path).expect_err("load should fail");
    assert!(matches!(error, SetupError::MalformedConfig(_)));
}

#[test]
fn missing_file_surfaces_io_error() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("absent.txt");

    let error = Config::load(&path).expect_err("load should fail");
    assert!(matches!(error, SetupError::Io(_)));
}
