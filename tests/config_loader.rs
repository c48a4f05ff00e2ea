use library_view::config::{Config, ConfigError, LibraryConfig};
use library_view::operation::StalePolicy;
use std::fs;
use std::time::Duration;
use tempfile::TempDir;

/// Test that Config::default() produces the documented values.
#[test]
fn test_config_default_values() {
    let config = Config::default();
    assert_eq!(config.library.image_provider_delay_ms, 50);
    assert_eq!(config.library.image_provider_delay(), Duration::from_millis(50));
    assert_eq!(config.library.login_request_code, 0);
    assert_eq!(config.library.user_id, "me");
    assert_eq!(config.library.stale_results, StalePolicy::LastWriteWins);
    assert!(config.validate().is_ok());
}

/// Test that Config::config_path() returns a path ending with the expected filename.
#[test]
fn test_config_path_ends_with_expected() {
    let path = Config::config_path();
    assert!(path.ends_with("library-view/config.toml"));
}

#[test]
fn test_load_from_reads_all_keys() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
[library]
image_provider_delay_ms = 120
login_request_code = 42
user_id = "chrisbanes"
stale_results = "discard_out_of_order"
"#,
    )
    .unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(
        config.library,
        LibraryConfig {
            image_provider_delay_ms: 120,
            login_request_code: 42,
            user_id: "chrisbanes".to_string(),
            stale_results: StalePolicy::DiscardOutOfOrder,
        }
    );
}

#[test]
fn test_missing_keys_fall_back_to_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    fs::write(&path, "[library]\nlogin_request_code = 3\n").unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.library.login_request_code, 3);
    assert_eq!(config.library.image_provider_delay_ms, 50);
    assert_eq!(config.library.user_id, "me");

    fs::write(&path, "").unwrap();
    assert_eq!(Config::load_from(&path).unwrap(), Config::default());
}

#[test]
fn test_parse_error_reports_path() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    fs::write(&path, "invalid { toml }").unwrap();

    match Config::load_from(&path) {
        Err(ConfigError::ParseError { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("Expected ParseError, got {:?}", other),
    }
}

#[test]
fn test_unknown_stale_policy_is_a_parse_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    fs::write(&path, "[library]\nstale_results = \"sometimes\"\n").unwrap();
    assert!(matches!(
        Config::load_from(&path),
        Err(ConfigError::ParseError { .. })
    ));
}

#[test]
fn test_missing_file_is_a_read_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("absent.toml");
    assert!(matches!(
        Config::load_from(&path),
        Err(ConfigError::ReadError { .. })
    ));
}

#[test]
fn test_validation_rejects_blank_user_id() {
    let mut config = Config::default();
    config.library.user_id = "  ".to_string();
    match config.validate().unwrap_err() {
        ConfigError::ValidationError { message } => assert!(message.contains("user_id")),
        other => panic!("Expected ValidationError, got {:?}", other),
    }
}

#[test]
fn test_validation_rejects_excessive_delay() {
    let mut config = Config::default();
    config.library.image_provider_delay_ms = 60_000;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ValidationError { .. })
    ));
}
