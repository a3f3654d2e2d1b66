//! Core module - application infrastructure around the rule engine
//!
//! - [`settings`] - [`EngineSettings`] with defaults and validation
//! - [`settings_persistence`] - JSON load/save in the user's config directory
//! - [`logging`] - `tracing` subscriber initialisation
//! - [`error`] - [`CoreError`] and the [`CoreResult`] alias

pub mod error;
pub mod logging;
pub mod settings;
pub mod settings_persistence;

pub use error::{CoreError, CoreResult};
pub use settings::EngineSettings;
