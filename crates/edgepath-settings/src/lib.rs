//! Edgepath Settings Crate
//!
//! Handles export configuration, settings persistence and validation.

pub mod config;
pub mod error;

pub use config::{Axis, Config, GcodeExportSettings, SvgExportSettings, PX_PER_MM};
pub use error::{ConfigError, SettingsError, SettingsResult};
