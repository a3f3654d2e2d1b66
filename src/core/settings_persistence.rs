//! Settings persistence
//!
//! Saves and loads [`EngineSettings`] to/from a JSON file.
//!
//! # File Location
//!
//! By default settings live in `settings.json` in the user's configuration
//! directory, e.g. `~/.config/xfcheckers/settings.json` on Linux. An explicit
//! path can be given instead.
//!
//! # Error Handling
//!
//! [`load_or_default`] never fails: a missing, unreadable, malformed or
//! invalid file is logged and replaced by the defaults. [`load_from`] and
//! [`save_to`] report errors to the caller.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::{info, warn};

use crate::core::error::{CoreError, CoreResult};
use crate::core::settings::EngineSettings;

/// Settings filename
const SETTINGS_FILENAME: &str = "settings.json";

/// Path to `settings.json` in the user's configuration directory
pub fn default_settings_path() -> CoreResult<PathBuf> {
    ProjectDirs::from("com", "trilltino", "XFCheckers")
        .map(|dirs| dirs.config_dir().join(SETTINGS_FILENAME))
        .ok_or(CoreError::NoConfigDir)
}

/// Read and validate settings from `path`
pub fn load_from(path: &Path) -> CoreResult<EngineSettings> {
    let contents = fs::read_to_string(path)?;
    let settings: EngineSettings = serde_json::from_str(&contents)?;
    settings.validate()?;
    Ok(settings)
}

/// Load settings from `path` (or the default location), falling back to the
/// defaults on any failure
pub fn load_or_default(path: Option<&Path>) -> EngineSettings {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match default_settings_path() {
            Ok(path) => path,
            Err(e) => {
                warn!("[SETTINGS] {}. Using defaults.", e);
                return EngineSettings::default();
            }
        },
    };

    if !path.exists() {
        info!("[SETTINGS] No settings file found at {:?}. Using defaults.", path);
        return EngineSettings::default();
    }

    match load_from(&path) {
        Ok(settings) => {
            info!("[SETTINGS] Loaded settings from {:?}", path);
            settings
        }
        Err(e) => {
            warn!(
                "[SETTINGS] Failed to load settings file at {:?}: {}. Using defaults.",
                path, e
            );
            EngineSettings::default()
        }
    }
}

/// Write `settings` as pretty JSON, creating the parent directory
pub fn save_to(path: &Path, settings: &EngineSettings) -> CoreResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json)?;
    info!("[SETTINGS] Saved settings to {:?}", path);
    Ok(())
}
