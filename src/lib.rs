//! # Edgepath
//!
//! Exports mesh wireframes as CNC motion programs or SVG outlines by
//! reconstructing ordered paths from unordered edge lists.
//!
//! ## Architecture
//!
//! Edgepath is organized as a workspace with multiple crates:
//!
//! 1. **edgepath-core** - Graph model, wireframe input, shared errors
//! 2. **edgepath-toolpath** - Chain walking, step annotation, polyline merging, writers
//! 3. **edgepath-settings** - Export settings and their persistence
//! 4. **edgepath** - Command handlers and the `edgepath` binary

pub mod commands;

pub use edgepath_core::{Error, GraphModel, Point, Result, Wireframe};
pub use edgepath_settings::{Config, GcodeExportSettings, SvgExportSettings};
pub use edgepath_toolpath::{
    export_gcode, export_svg, walk, Chain, ChainWalker, ExportError, PolylineChain,
    PolylineMerger, StepAnnotator, WalkError,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging for the command line tool
///
/// Log lines go to stderr so exported programs can be piped from stdout.
/// `RUST_LOG` is honoured when no `-v` flag is given.
pub fn init_logging(verbosity: u8) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = match verbosity {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(verbosity > 1);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))?;

    Ok(())
}
