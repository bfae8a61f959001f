use super::*;

use std::{collections::HashMap, io::Write};

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_read_keys_txt_into_openai_env_var() {
    let settings = Settings::default();
    assert_eq!(settings.credentials_path, PathBuf::from("keys.txt"));
    assert_eq!(settings.credentials_env_var, "OPENAI_API_KEY");
    assert_eq!(settings.model_temperature, 0.9);
    assert_eq!(settings.max_transcript_bytes, 200 * 1024 * 1024);
}

#[test]
fn settings_file_overrides_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("planner.toml");
    fs::write(
        &path,
        "bind_addr = \"0.0.0.0:9000\"\nmax_transcript_bytes = 1024\n",
    )
    .expect("write");

    let settings = load_settings_file(&path, Settings::default());
    assert_eq!(settings.server_bind, "0.0.0.0:9000");
    assert_eq!(settings.max_transcript_bytes, 1024);
    assert_eq!(settings.credentials_env_var, "OPENAI_API_KEY");
}

#[test]
fn missing_or_malformed_settings_file_keeps_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = load_settings_file(&dir.path().join("absent.toml"), Settings::default());
    assert_eq!(missing, Settings::default());

    let path = dir.path().join("broken.toml");
    fs::write(&path, "bind_addr = [").expect("write");
    assert_eq!(load_settings_file(&path, Settings::default()), Settings::default());
}

#[test]
fn app_prefixed_env_wins_over_legacy_name() {
    let settings = apply_env_overrides(
        Settings::default(),
        env(&[
            ("PLANNER_BIND", "127.0.0.1:1"),
            ("APP__BIND_ADDR", "127.0.0.1:2"),
            ("APP__CREDENTIALS_PATH", "/run/secrets/openai"),
            ("APP__MODEL_TEMPERATURE", "0.2"),
        ]),
    );
    assert_eq!(settings.server_bind, "127.0.0.1:2");
    assert_eq!(
        settings.credentials_path,
        PathBuf::from("/run/secrets/openai")
    );
    assert_eq!(settings.model_temperature, 0.2);
}

#[test]
fn unparsable_numeric_env_is_ignored() {
    let settings = apply_env_overrides(
        Settings::default(),
        env(&[("APP__MAX_TRANSCRIPT_BYTES", "lots")]),
    );
    assert_eq!(settings.max_transcript_bytes, DEFAULT_MAX_TRANSCRIPT_BYTES);
}

#[test]
fn credentials_are_trimmed() {
    let mut file = tempfile::NamedTempFile::new().expect("tempfile");
    writeln!(file, "  sk-test-token  ").expect("write");
    let credentials = load_credentials(file.path()).expect("credentials");
    assert_eq!(credentials.api_key(), "sk-test-token");
    assert!(!format!("{credentials:?}").contains("sk-test-token"));
}

#[test]
fn missing_credentials_file_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = load_credentials(&dir.path().join("keys.txt")).expect_err("missing");
    assert!(err.to_string().contains("failed to read credentials file"));
}

#[test]
fn blank_credentials_file_fails() {
    let mut file = tempfile::NamedTempFile::new().expect("tempfile");
    writeln!(file, "   ").expect("write");
    let err = load_credentials(file.path()).expect_err("blank");
    assert!(err.to_string().contains("is empty"));
}
