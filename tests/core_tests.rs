//! Integration tests for settings persistence
//!
//! Every test works in its own directory under the system temp dir.

use std::fs;
use std::path::PathBuf;

use xfcheckers::core::settings_persistence::{load_from, load_or_default, save_to};
use xfcheckers::core::{CoreError, EngineSettings};
use xfcheckers::game::ai::ComputerSide;
use xfcheckers::game::{Parity, Side};

/// Fresh scratch directory for one test
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "xfcheckers_{}_{}",
        name,
        std::process::id()
    ));
    let _ = fs::remove_dir_all(&dir);
    dir
}

#[test]
fn test_settings_round_trip() {
    //! Saved settings load back unchanged, and the parent directory is
    //! created on demand
    let dir = scratch_dir("round_trip");
    let path = dir.join("nested").join("settings.json");
    let settings = EngineSettings {
        board_size: 10,
        playable_parity: Parity::Even,
        first_side: Side::B,
        computer_side: ComputerSide::Both,
        think_delay_ms: 250,
        shuffle_scan_order: true,
        seed: Some(99),
    };

    save_to(&path, &settings).unwrap();
    let loaded = load_from(&path).unwrap();
    assert_eq!(loaded, settings);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let dir = scratch_dir("missing");
    let path = dir.join("settings.json");

    assert!(matches!(load_from(&path), Err(CoreError::SettingsIo(_))));
    assert_eq!(load_or_default(Some(&path)), EngineSettings::default());
}

#[test]
fn test_malformed_file_falls_back_to_defaults() {
    let dir = scratch_dir("malformed");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("settings.json");
    fs::write(&path, "{ not json").unwrap();

    assert!(matches!(
        load_from(&path),
        Err(CoreError::SettingsSerialization(_))
    ));
    assert_eq!(load_or_default(Some(&path)), EngineSettings::default());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_invalid_board_size_rejected_on_load() {
    let dir = scratch_dir("invalid");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("settings.json");
    fs::write(&path, r#"{ "board_size": 9 }"#).unwrap();

    assert!(matches!(
        load_from(&path),
        Err(CoreError::InvalidSettings { .. })
    ));
    assert_eq!(load_or_default(Some(&path)).board_size, 8);

    let _ = fs::remove_dir_all(&dir);
}
