//! Startup configuration.
//!
//! Settings are read once from a TOML file and validated before the device
//! is opened. Nothing is re-read at runtime. Every field has a default, so a
//! missing default file (or an empty one) runs the stock dashboard.
//!
//! ```toml
//! refresh_interval_ms = 1000
//! font_path = "res/fonts/Ubuntu/Ubuntu-Bold.ttf"
//!
//! [display]
//! width = 320
//! height = 480
//! orientation = "reverse_landscape"
//! brightness = 10
//!
//! [service]
//! label = "docker"
//! process_names = ["dockerd", "com.docker.backend", "Docker Desktop.exe"]
//! ```
//!
//! [`layout`] holds the fixed widget positions.

pub mod layout;

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use embedded_graphics::prelude::Size;
use serde::Deserialize;

use crate::device::Orientation;

/// File loaded when no path is given on the command line.
pub const DEFAULT_CONFIG_FILE: &str = "monitor.toml";

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error reading {file}: {source}")]
    Io {
        file: String,
        #[source]
        source: io::Error,
    },

    #[error("Parse error in {file}: {source}")]
    Parse {
        file: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Field '{field}' has invalid value {value}: {reason}")]
    InvalidField {
        field: &'static str,
        value: String,
        reason: &'static str,
    },
}

// =============================================================================
// Schema
// =============================================================================

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Time between ticks in milliseconds.
    pub refresh_interval_ms: u64,
    pub font_path: PathBuf,
    pub display: DisplaySettings,
    pub device: DeviceSettings,
    pub background: BackgroundSettings,
    pub service: ServiceSettings,
    pub logging: LoggingSettings,
}

/// Panel geometry and power-on parameters.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DisplaySettings {
    /// Serial port, or `"AUTO"` for discovery. Ignored by the simulated panel.
    pub port: String,
    /// Width in portrait orientation.
    pub width: u32,
    /// Height in portrait orientation.
    pub height: u32,
    pub orientation: Orientation,
    /// Backlight level, 0–100.
    pub brightness: u8,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DeviceKind {
    /// Off-screen panel that writes a PNG screen capture per frame.
    #[default]
    Simulated,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DeviceSettings {
    pub kind: DeviceKind,
    /// Screen capture written by the simulated panel.
    pub screencap: PathBuf,
}

/// Where to find `<stem>_<W>x<H>.png`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct BackgroundSettings {
    pub dir: PathBuf,
    pub stem: String,
}

/// Background service shown by the status dot.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceSettings {
    pub label: String,
    /// Executable names that count as the service running.
    pub process_names: Vec<String>,
    pub logo: PathBuf,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSettings {
    pub debug: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            refresh_interval_ms: 1000,
            font_path: PathBuf::from("res/fonts/Ubuntu/Ubuntu-Bold.ttf"),
            display: DisplaySettings::default(),
            device: DeviceSettings::default(),
            background: BackgroundSettings::default(),
            service: ServiceSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            port: "AUTO".to_string(),
            width: 320,
            height: 480,
            orientation: Orientation::ReverseLandscape,
            brightness: 10,
        }
    }
}

impl Default for DeviceSettings {
    fn default() -> Self {
        Self {
            kind: DeviceKind::Simulated,
            screencap: PathBuf::from("screencap.png"),
        }
    }
}

impl Default for BackgroundSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("res/backgrounds"),
            stem: "death_star".to_string(),
        }
    }
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            label: "docker".to_string(),
            process_names: ["dockerd", "com.docker.backend", "Docker Desktop.exe"]
                .into_iter()
                .map(String::from)
                .collect(),
            logo: PathBuf::from("res/icons/docker_logo_50x50.png"),
        }
    }
}

impl Settings {
    #[inline]
    pub fn refresh_interval(&self) -> Duration { Duration::from_millis(self.refresh_interval_ms) }

    /// Check the structural invariants. Called by every loader.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let display = &self.display;
        if display.width == 0 || display.height == 0 {
            return Err(ConfigError::InvalidField {
                field: "display.width",
                value: format!("{}x{}", display.width, display.height),
                reason: "display dimensions must be non-zero",
            });
        }
        if display.width > display.height {
            return Err(ConfigError::InvalidField {
                field: "display.width",
                value: format!("{}x{}", display.width, display.height),
                reason: "give width/height for portrait orientation: width <= height",
            });
        }
        if display.brightness > 100 {
            return Err(ConfigError::InvalidField {
                field: "display.brightness",
                value: display.brightness.to_string(),
                reason: "brightness is a percentage (0-100)",
            });
        }
        if self.refresh_interval_ms == 0 {
            return Err(ConfigError::InvalidField {
                field: "refresh_interval_ms",
                value: "0".to_string(),
                reason: "refresh interval must be positive",
            });
        }
        Ok(())
    }
}

impl DisplaySettings {
    /// Resolution after the configured orientation is applied.
    pub const fn oriented_size(&self) -> Size {
        if self.orientation.is_landscape() {
            Size::new(self.height, self.width)
        } else {
            Size::new(self.width, self.height)
        }
    }
}

// =============================================================================
// Loading
// =============================================================================

/// Load and validate settings from a TOML file.
pub fn load_from_file(path: &Path) -> Result<Settings, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        file: path.display().to_string(),
        source: e,
    })?;

    load_from_str(&content, &path.display().to_string())
}

/// Load and validate settings from TOML text. `source_name` labels errors.
pub fn load_from_str(
    content: &str,
    source_name: &str,
) -> Result<Settings, ConfigError> {
    let settings: Settings = toml::from_str(content).map_err(|e| ConfigError::Parse {
        file: source_name.to_string(),
        source: e,
    })?;
    settings.validate()?;
    Ok(settings)
}

/// Load `path`, or the built-in defaults when it does not exist.
///
/// Used for the implicit default file only. An explicitly named file that
/// is missing is an error.
pub fn load_or_default(path: &Path) -> Result<Settings, ConfigError> {
    match load_from_file(path) {
        Err(ConfigError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(file = %path.display(), "no config file, using defaults");
            Ok(Settings::default())
        }
        other => other,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok(), "Built-in defaults must validate");
        assert_eq!(settings.refresh_interval(), Duration::from_secs(1));
        assert_eq!(settings.display.port, "AUTO");
        assert_eq!(settings.display.brightness, 10);
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        let settings = load_from_str("", "empty.toml");
        assert_eq!(settings.ok(), Some(Settings::default()), "Empty TOML should use every default");
    }

    #[test]
    fn test_partial_override() {
        let toml = r#"
refresh_interval_ms = 500

[display]
orientation = "portrait"

[service]
process_names = ["podman"]
"#;
        let settings = load_from_str(toml, "partial.toml").expect("valid config");
        assert_eq!(settings.refresh_interval_ms, 500);
        assert_eq!(settings.display.orientation, Orientation::Portrait);
        assert_eq!(settings.display.width, 320, "Unset fields keep their default");
        assert_eq!(settings.service.process_names, ["podman"]);
        assert_eq!(settings.service.label, "docker");
    }

    #[test]
    fn test_landscape_width_rejected() {
        let toml = "[display]\nwidth = 480\nheight = 320\n";
        let err = load_from_str(toml, "bad.toml").expect_err("width > height must fail");
        assert!(matches!(err, ConfigError::InvalidField { field: "display.width", .. }), "got {err}");
    }

    #[test]
    fn test_zero_interval_rejected() {
        let err = load_from_str("refresh_interval_ms = 0", "bad.toml").expect_err("zero interval must fail");
        assert!(err.to_string().contains("refresh_interval_ms"), "Error should name the field: {err}");
    }

    #[test]
    fn test_brightness_over_100_rejected() {
        let err = load_from_str("[display]\nbrightness = 150", "bad.toml").expect_err("150% must fail");
        assert!(matches!(err, ConfigError::InvalidField { field: "display.brightness", .. }));
    }

    #[test]
    fn test_unknown_field_is_parse_error() {
        let err = load_from_str("[display]\ncolour = 1", "typo.toml").expect_err("unknown key must fail");
        match err {
            ConfigError::Parse { file, .. } => assert_eq!(file, "typo.toml", "Error should carry the file name"),
            other => panic!("expected parse error, got {other}"),
        }
    }

    #[test]
    fn test_unknown_orientation_rejected() {
        assert!(load_from_str("[display]\norientation = \"sideways\"", "x.toml").is_err());
    }

    #[test]
    fn test_oriented_size() {
        let mut display = DisplaySettings::default();
        assert_eq!(display.oriented_size(), Size::new(480, 320), "Reverse landscape swaps axes");
        display.orientation = Orientation::ReversePortrait;
        assert_eq!(display.oriented_size(), Size::new(320, 480));
    }

    // -------------------------------------------------------------------------
    // File loading
    // -------------------------------------------------------------------------

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "[logging]\ndebug = true").expect("write");
        let settings = load_from_file(file.path()).expect("load");
        assert!(settings.logging.debug);
    }

    #[test]
    fn test_load_from_missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = load_from_file(&dir.path().join("nope.toml")).expect_err("missing file");
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let settings = load_or_default(&dir.path().join(DEFAULT_CONFIG_FILE)).expect("defaults");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_or_default_still_validates() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, "refresh_interval_ms = 0").expect("write");
        assert!(load_or_default(&path).is_err(), "An existing default file is still validated");
    }
}
