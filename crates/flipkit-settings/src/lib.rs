//! FlipKit Settings Crate
//!
//! Handles configuration loading, saving and validation.

pub mod config;
pub mod error;

pub use config::{Config, LoggingSettings, RegistrationSettings, APP_DIR, CONFIG_FILE};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
