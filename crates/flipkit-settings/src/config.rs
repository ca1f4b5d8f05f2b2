//! Configuration for FlipKit.
//!
//! Configuration is organized into two sections:
//! - Registration (tolerance, flip direction and mode, stock centering,
//!   target job naming)
//! - Logging (filter level, output format)
//!
//! Files are JSON or TOML, chosen by extension. Missing sections and keys
//! fall back to their defaults.

use std::path::{Path, PathBuf};

use flipkit_core::DEFAULT_TOLERANCE;
use flipkit_job::{AxisSelection, MirrorRequest, DEFAULT_TARGET_PREFIX};
use flipkit_registration::{FlipDirection, FlipMode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, ConfigResult, SettingsError, SettingsResult};

/// Application directory under the platform config dir.
pub const APP_DIR: &str = "flipkit";

/// Config file name inside [`APP_DIR`].
pub const CONFIG_FILE: &str = "config.toml";

/// Registration settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrationSettings {
    /// Distance under which two coordinates are considered equal
    pub tolerance: f64,
    /// Flip direction used when the axis comes from the stock
    pub flip_direction: FlipDirection,
    /// Mirror or half turn
    pub mode: FlipMode,
    /// Put the flip origin at the vertical middle of the stock
    pub center_on_stock_z: bool,
    /// Prefix for the target job label
    pub target_label_prefix: String,
}

impl Default for RegistrationSettings {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            flip_direction: FlipDirection::default(),
            mode: FlipMode::default(),
            center_on_stock_z: true,
            target_label_prefix: DEFAULT_TARGET_PREFIX.to_string(),
        }
    }
}

impl RegistrationSettings {
    /// A stock-axis mirror request with these settings.
    pub fn mirror_request(&self) -> MirrorRequest {
        MirrorRequest {
            axis_source: AxisSelection::Stock {
                direction: self.flip_direction,
            },
            mode: self.mode,
            tolerance: self.tolerance,
            center_on_stock_z: self.center_on_stock_z,
            target_label_prefix: self.target_label_prefix.clone(),
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(ConfigError::ValueOutOfRange {
                key: "registration.tolerance".to_string(),
                value: self.tolerance.to_string(),
            });
        }
        Ok(())
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Filter directive, e.g. "info" or "flipkit_registration=debug"
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl LoggingSettings {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.level.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "logging.level".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub registration: RegistrationSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> ConfigResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(ConfigError::UnsupportedFormat(
            other.unwrap_or("<none>").to_string(),
        )),
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform config path: `<config dir>/flipkit/config.toml`.
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no config directory on this platform".to_string())
            })
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load the config at `path`, or defaults if the file does not exist.
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML), creating parent directories.
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)?;
        debug!("Saved config to {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        self.registration.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::new();
        assert_eq!(config.registration.tolerance, 1e-7);
        assert_eq!(config.registration.flip_direction, FlipDirection::AlongX);
        assert_eq!(config.registration.mode, FlipMode::Reflect);
        assert!(config.registration.center_on_stock_z);
        assert_eq!(config.registration.target_label_prefix, "Reverse");
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_tolerance_must_be_positive_and_finite() {
        for bad in [0.0, -1e-7, f64::NAN, f64::INFINITY] {
            let mut config = Config::new();
            config.registration.tolerance = bad;
            assert!(matches!(
                config.validate(),
                Err(ConfigError::ValueOutOfRange { ref key, .. }) if key == "registration.tolerance"
            ));
        }
    }

    #[test]
    fn test_empty_log_level_rejected() {
        let mut config = Config::new();
        config.logging.level = "  ".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [registration]
            flip_direction = "along_y"
            mode = "rotate180"
            "#,
        )
        .unwrap();
        assert_eq!(config.registration.flip_direction, FlipDirection::AlongY);
        assert_eq!(config.registration.mode, FlipMode::Rotate180);
        assert_eq!(config.registration.tolerance, DEFAULT_TOLERANCE);
        assert_eq!(config.logging, LoggingSettings::default());
    }

    #[test]
    fn test_mirror_request() {
        let settings = RegistrationSettings {
            tolerance: 1e-5,
            flip_direction: FlipDirection::AlongY,
            mode: FlipMode::Rotate180,
            center_on_stock_z: false,
            target_label_prefix: "Back".to_string(),
        };
        let request = settings.mirror_request();
        assert_eq!(
            request.axis_source,
            AxisSelection::Stock {
                direction: FlipDirection::AlongY
            }
        );
        assert_eq!(request.mode, FlipMode::Rotate180);
        assert_eq!(request.tolerance, 1e-5);
        assert!(!request.center_on_stock_z);
        assert_eq!(request.target_label_prefix, "Back");
    }

    #[test]
    fn test_unsupported_extension() {
        assert_eq!(
            format_of(Path::new("config.yaml")),
            Err(ConfigError::UnsupportedFormat("yaml".to_string()))
        );
        assert_eq!(
            format_of(Path::new("config")),
            Err(ConfigError::UnsupportedFormat("<none>".to_string()))
        );
    }
}
