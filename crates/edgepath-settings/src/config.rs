//! Export configuration for edgepath
//!
//! Provides configuration file handling and validation for the two export
//! modes. Supports JSON and TOML file formats; the default file lives in
//! the platform configuration directory.
//!
//! Configuration is organized into sections:
//! - G-code export (feed rates, scale, transform handling)
//! - SVG export (scaling strategy, open loop policy, stroke style)

pub use edgepath_core::Axis;
use crate::error::{ConfigError, SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Pixels per millimetre at 96 dpi.
pub const PX_PER_MM: f64 = 3.7795275590551;

/// Config file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "edgepath.toml";

/// G-code export settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GcodeExportSettings {
    /// Apply the world matrix to coordinates before export
    pub apply_transformations: bool,
    /// Feed rate for moves that change the plunge axis (units/min)
    pub feed_speed_down: f64,
    /// Feed rate for moves within one plane (units/min)
    pub feed_speed_plane: f64,
    /// Scale factor applied to every coordinate (G-code expects mm)
    pub scale_factor: f64,
    /// Decimal places for coordinate words
    pub decimal_places: usize,
    /// Axis whose change marks an engaging move
    pub plunge_axis: Axis,
}

impl Default for GcodeExportSettings {
    fn default() -> Self {
        Self {
            apply_transformations: true,
            feed_speed_down: 50.0,
            feed_speed_plane: 100.0,
            scale_factor: 1.0,
            decimal_places: 3,
            plunge_axis: Axis::Z,
        }
    }
}

/// SVG outline export settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SvgExportSettings {
    /// Apply the world matrix to coordinates before export
    pub apply_transformations: bool,
    /// Abort when a merged polyline does not close on itself
    pub fail_on_open_loops: bool,
    /// Scale via the group transform instead of scaling every point
    pub scale_via_svg_scaling: bool,
    /// Scale factor (model units to px)
    pub scale_factor: f64,
    /// Inline style of each polyline
    pub stroke_style: String,
}

impl Default for SvgExportSettings {
    fn default() -> Self {
        Self {
            apply_transformations: false,
            fail_on_open_loops: false,
            scale_via_svg_scaling: true,
            scale_factor: PX_PER_MM,
            stroke_style: "stroke:black;stroke-width:.5;fill:none;".to_string(),
        }
    }
}

/// Complete export configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// G-code export settings
    pub gcode: GcodeExportSettings,
    /// SVG export settings
    pub svg: SvgExportSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config file location
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("edgepath").join(CONFIG_FILE_NAME))
            .ok_or_else(|| {
                ConfigError::UnsupportedPlatform(std::env::consts::OS.to_string()).into()
            })
    }

    /// Load from `path`, or from the default location when it exists,
    /// falling back to defaults
    pub fn load_or_default(path: Option<&Path>) -> SettingsResult<Self> {
        if let Some(path) = path {
            return Self::load_from_file(path);
        }
        match Self::default_path() {
            Ok(path) if path.exists() => Self::load_from_file(&path),
            _ => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("{}: {}", path.display(), e))
        })?;

        let config: Self = match Format::of(path)? {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                SettingsError::ConfigDirectory(format!("{}: {}", parent.display(), e))
            })?;
        }
        std::fs::write(path, content).map_err(|e| {
            SettingsError::SaveError(format!("{}: {}", path.display(), e))
        })?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        let g = &self.gcode;
        if !(g.feed_speed_down > 0.0) {
            return Err(SettingsError::invalid("gcode.feed_speed_down", "must be > 0"));
        }
        if !(g.feed_speed_plane > 0.0) {
            return Err(SettingsError::invalid("gcode.feed_speed_plane", "must be > 0"));
        }
        if !g.scale_factor.is_finite() || g.scale_factor == 0.0 {
            return Err(SettingsError::invalid(
                "gcode.scale_factor",
                "must be finite and non-zero",
            ));
        }
        if g.decimal_places > 10 {
            return Err(SettingsError::invalid("gcode.decimal_places", "must be <= 10"));
        }

        let s = &self.svg;
        if !(s.scale_factor.is_finite() && s.scale_factor > 0.0) {
            return Err(SettingsError::invalid(
                "svg.scale_factor",
                "must be finite and > 0",
            ));
        }

        Ok(())
    }
}

enum Format {
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_exporter() {
        let config = Config::new();
        assert!(config.gcode.apply_transformations);
        assert_eq!(config.gcode.feed_speed_down, 50.0);
        assert_eq!(config.gcode.feed_speed_plane, 100.0);
        assert_eq!(config.gcode.scale_factor, 1.0);
        assert!(config.svg.scale_via_svg_scaling);
        assert!(!config.svg.fail_on_open_loops);
        assert_eq!(config.svg.scale_factor, PX_PER_MM);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::new();
        config.gcode.feed_speed_down = 0.0;
        assert!(matches!(
            config.validate(),
            Err(SettingsError::InvalidSetting { ref key, .. }) if key == "gcode.feed_speed_down"
        ));

        let mut config = Config::new();
        config.svg.scale_factor = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = Config::new();
        config.gcode.scale_factor = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str("[gcode]\nfeed_speed_down = 25.0\n").unwrap();
        assert_eq!(config.gcode.feed_speed_down, 25.0);
        assert_eq!(config.gcode.feed_speed_plane, 100.0);
        assert_eq!(config.svg, SvgExportSettings::default());
    }

    #[test]
    fn test_unknown_extension() {
        let err = Config::new()
            .save_to_file(Path::new("settings.yaml"))
            .unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Config(ConfigError::UnsupportedFormat(ref ext)) if ext == "yaml"
        ));
    }

    #[test]
    fn test_save_reports_unusable_directory() {
        let blocker = tempfile::NamedTempFile::new().unwrap();
        let path = blocker.path().join("nested").join(CONFIG_FILE_NAME);

        let err = Config::new().save_to_file(&path).unwrap_err();
        assert!(matches!(err, SettingsError::ConfigDirectory(_)));
        assert!(err.to_string().starts_with("Config directory error: "));
    }
}
