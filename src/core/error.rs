//! Error types for core module
//!
//! Provides custom error types for core functionality: settings persistence
//! and settings validation.

use thiserror::Error;

/// Errors that can occur in the core module
#[derive(Error, Debug)]
pub enum CoreError {
    /// Settings file I/O error
    #[error("Settings I/O error: {0}")]
    SettingsIo(#[from] std::io::Error),

    /// Settings serialization/deserialization error
    #[error("Settings serialization error: {0}")]
    SettingsSerialization(#[from] serde_json::Error),

    /// Settings parsed but describe an unplayable game
    #[error("Invalid settings: {message}")]
    InvalidSettings { message: String },

    /// No configuration directory could be resolved on this platform
    #[error("No configuration directory available")]
    NoConfigDir,
}

/// Result type alias for core operations
pub type CoreResult<T> = Result<T, CoreError>;
