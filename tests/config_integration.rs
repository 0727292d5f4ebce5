use purgo::config::Config;
use purgo::error::ConfigError;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn parse_complete_config_file() {
    let config_content = r#"
[explorer]
min_size = 10485760
exempt_directories = true

[tui]
no_color = true
show_disk_usage = false
"#;

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(config_content.as_bytes()).unwrap();

    let config = Config::load(Some(file.path())).unwrap();

    assert_eq!(config.explorer.min_size, 10 * 1024 * 1024);
    assert!(config.explorer.exempt_directories);
    assert!(config.tui.no_color);
    assert!(!config.tui.show_disk_usage);

    let options = config.list_options();
    assert_eq!(options.min_size, 10 * 1024 * 1024);
    assert!(options.exempt_directories);
}

#[test]
fn parse_partial_config_uses_defaults() {
    let config_content = r#"
[explorer]
min_size = 0
"#;

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(config_content.as_bytes()).unwrap();

    let config = Config::load(Some(file.path())).unwrap();

    // Explicit value
    assert_eq!(config.explorer.min_size, 0);
    // Default values
    assert!(!config.explorer.exempt_directories);
    assert!(config.tui.show_disk_usage);
}

#[test]
fn empty_config_file_is_all_defaults() {
    let file = NamedTempFile::new().unwrap();
    let config = Config::load(Some(file.path())).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn parse_invalid_toml_returns_error() {
    let config_content = "this is not valid toml [[[";

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(config_content.as_bytes()).unwrap();

    let result = Config::load(Some(file.path()));
    assert!(matches!(result, Err(ConfigError::ParseError { .. })));
}

#[test]
fn negative_min_size_returns_error() {
    let config_content = r#"
[explorer]
min_size = -1
"#;

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(config_content.as_bytes()).unwrap();

    let result = Config::load(Some(file.path()));
    assert!(result.is_err());
}

#[test]
fn explicit_missing_file_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = Config::load(Some(&dir.path().join("absent.toml")));
    assert!(matches!(result, Err(ConfigError::ReadError { .. })));
}

#[test]
fn command_line_min_size_wins_over_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"[explorer]\nmin_size = 4096\n").unwrap();

    let config = Config::load(Some(file.path()))
        .unwrap()
        .with_min_size_arg(Some("500K"))
        .unwrap();
    assert_eq!(config.explorer.min_size, 500 * 1024);
}
