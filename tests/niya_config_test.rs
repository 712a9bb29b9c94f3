//! Config file loading tests.

use std::io::Write;
use strictly_niya::{ControlMode, Layout, NiyaConfig};

#[test]
fn test_loads_full_config() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
red = "random"
black = "strong"
layout = "maple:sun cherry:sun pine:sun iris:sun maple:bird cherry:bird pine:bird iris:bird maple:rain cherry:rain pine:rain iris:rain maple:paper cherry:paper pine:paper iris:paper"
seed = 42
log_filter = "strictly_niya=debug"
"#
    )
    .unwrap();

    let config = NiyaConfig::from_file(file.path()).unwrap();
    assert_eq!(*config.red(), ControlMode::Random);
    assert_eq!(*config.black(), ControlMode::Strong);
    assert_eq!(*config.seed(), Some(42));
    assert_eq!(config.log_filter(), "strictly_niya=debug");
    assert_eq!(config.parsed_layout().unwrap(), Some(Layout::classic()));
}

#[test]
fn test_missing_fields_use_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "seed = 1").unwrap();

    let config = NiyaConfig::from_file(file.path()).unwrap();
    assert_eq!(*config.red(), ControlMode::Strong);
    assert_eq!(*config.black(), ControlMode::Human);
    assert_eq!(config.parsed_layout().unwrap(), None);
}

#[test]
fn test_missing_file_reports_location() {
    let dir = tempfile::tempdir().unwrap();
    let err = NiyaConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(err.message.contains("Failed to read config file"));
    assert!(err.file.ends_with("config.rs"));
}

#[test]
fn test_cli_overrides_win() {
    let config = NiyaConfig::default()
        .with_modes(Some(ControlMode::Random), None)
        .with_layout(Some("0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15".to_string()))
        .with_seed(Some(8));
    assert_eq!(*config.red(), ControlMode::Random);
    assert_eq!(*config.black(), ControlMode::Human);
    assert_eq!(*config.seed(), Some(8));
    assert_eq!(config.parsed_layout().unwrap().unwrap().ids()[15], 15);
}
