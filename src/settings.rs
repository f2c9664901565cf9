//! Settings loaded from TOML
//!
//! Read from ~/.config/tetrs/settings.toml (or platform equivalent). Every
//! field has a default, so a missing file or a partial one is fine.

use derive_more::{Display, Error, From};
use directories::ProjectDirs;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

/// Failure to read or parse the settings file
#[derive(Debug, Display, Error, From)]
pub enum SettingsError {
    #[display("Failed to read settings: {_0}")]
    Io(io::Error),
    #[display("Failed to parse settings: {_0}")]
    Parse(toml::de::Error),
}

/// Game settings
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub display: DisplaySettings,
    pub visual: VisualSettings,
    pub logging: LoggingSettings,
}

/// Frame pacing
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Frames per second the loop is capped at
    pub frame_rate: u32,
}

/// Visual settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct VisualSettings {
    /// Ghost piece visibility
    pub show_ghost: bool,
    /// Block style: "solid", "bracket", "round"
    pub block_style: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `tracing` filter directives, overridden by `RUST_LOG`
    pub filter: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self { frame_rate: 60 }
    }
}

impl Default for VisualSettings {
    fn default() -> Self {
        Self {
            show_ghost: true,
            block_style: "solid".to_string(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "tetrs_core=debug".to_string(),
        }
    }
}

impl Settings {
    /// Get the settings file path
    pub fn settings_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "tetrs", "tetrs")
            .map(|dirs| dirs.config_dir().join("settings.toml"))
    }

    /// Load settings from the config dir, defaults if there is no file
    pub fn load() -> Result<Self, SettingsError> {
        let Some(path) = Self::settings_path() else {
            return Ok(Self::default());
        };

        match fs::read_to_string(&path) {
            Ok(contents) => Self::parse(&contents),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Parse settings from TOML text
    pub fn parse(contents: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(contents)?)
    }
}

impl DisplaySettings {
    /// Duration of one frame at the configured rate
    pub fn frame_duration(&self) -> Duration {
        Duration::from_micros(1_000_000 / u64::from(self.frame_rate.max(1)))
    }
}

impl VisualSettings {
    /// Get the block characters based on style
    pub fn block_chars(&self) -> (&'static str, &'static str) {
        match self.block_style.as_str() {
            "bracket" => ("[]", ".."),
            "round" => ("()", ".."),
            _ => ("██", "░░"), // "solid" or default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(Settings::parse("").ok(), Some(Settings::default()));
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let settings = Settings::parse("[visual]\nblock_style = \"round\"\n").unwrap();
        assert_eq!(settings.visual.block_style, "round");
        assert!(settings.visual.show_ghost);
        assert_eq!(settings.display.frame_rate, 60);
        assert_eq!(settings.logging.filter, "tetrs_core=debug");
    }

    #[test]
    fn test_full_file() {
        let settings = Settings::parse(
            r#"
            [display]
            frame_rate = 30

            [visual]
            show_ghost = false
            block_style = "bracket"

            [logging]
            filter = "tetrs_core=trace"
            "#,
        )
        .unwrap();
        assert_eq!(settings.display.frame_duration(), Duration::from_micros(33_333));
        assert!(!settings.visual.show_ghost);
        assert_eq!(settings.visual.block_chars(), ("[]", ".."));
        assert_eq!(settings.logging.filter, "tetrs_core=trace");
    }

    #[test]
    fn test_bad_toml_is_a_parse_error() {
        let err = Settings::parse("[display]\nframe_rate = \"fast\"\n").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
        assert!(err.to_string().starts_with("Failed to parse settings"));
    }

    #[test]
    fn test_unknown_block_style_falls_back_to_solid() {
        let visual = VisualSettings {
            show_ghost: true,
            block_style: "fancy".to_string(),
        };
        assert_eq!(visual.block_chars(), ("██", "░░"));
    }

    #[test]
    fn test_zero_frame_rate_does_not_divide_by_zero() {
        let display = DisplaySettings { frame_rate: 0 };
        assert_eq!(display.frame_duration(), Duration::from_secs(1));
    }
}
