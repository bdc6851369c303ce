use clap::{Parser, Subcommand};
use edgepath::commands::{self, GcodeArgs, SvgArgs};
use edgepath::{init_logging, BUILD_DATE, VERSION};
use std::path::PathBuf;
use tracing::debug;

/// Export mesh wireframes as G-code toolpaths or SVG outlines
#[derive(Parser)]
#[command(name = "edgepath")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Settings file (.toml or .json), defaults to the user config directory
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Walk a single loop or open path from its start vertex and emit G-code
    Gcode(GcodeArgs),
    /// Merge all edges into polylines and emit an SVG outline
    Svg(SvgArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;
    debug!(version = VERSION, build_date = BUILD_DATE, "Starting edgepath");

    let config = cli.config.as_deref();
    match &cli.command {
        Commands::Gcode(args) => commands::run_gcode(args, config),
        Commands::Svg(args) => commands::run_svg(args, config),
    }
}
