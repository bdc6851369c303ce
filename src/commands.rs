//! Command handlers behind the `edgepath` binary.
//!
//! Each handler loads a wireframe, layers command line overrides on top of
//! the loaded config and writes the rendered export to a file or stdout.

use anyhow::Context;
use clap::Args;
use edgepath_core::{Axis, Wireframe};
use edgepath_settings::Config;
use edgepath_toolpath::{export_gcode, export_svg};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Export a single loop or open path as G-code
#[derive(Args, Debug, Clone, Default)]
pub struct GcodeArgs {
    /// Wireframe file (.json or .obj)
    pub input: PathBuf,

    /// Output file, stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Start vertex index, defaults to the single selected vertex
    #[arg(short, long)]
    pub start: Option<usize>,

    /// Feed rate for moves along the plunge axis
    #[arg(long)]
    pub feed_down: Option<f64>,

    /// Feed rate for planar moves
    #[arg(long)]
    pub feed_plane: Option<f64>,

    /// Scale factor applied to every move
    #[arg(long)]
    pub scale: Option<f64>,

    /// Decimal places in coordinate words
    #[arg(long)]
    pub decimals: Option<usize>,

    /// Axis whose change marks an engaging move (x, y or z)
    #[arg(long)]
    pub axis: Option<Axis>,

    /// Ignore the wireframe's world matrix
    #[arg(long)]
    pub no_transform: bool,
}

/// Export the wireframe's edges as an SVG outline
#[derive(Args, Debug, Clone, Default)]
pub struct SvgArgs {
    /// Wireframe file (.json or .obj)
    pub input: PathBuf,

    /// Output file, stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Fail when a polyline does not close on itself
    #[arg(long)]
    pub fail_on_open: bool,

    /// Scale factor (pixels per wireframe unit)
    #[arg(long)]
    pub scale: Option<f64>,

    /// Multiply the points instead of emitting an SVG scale transform
    #[arg(long)]
    pub no_svg_scaling: bool,

    /// Apply the wireframe's world matrix
    #[arg(long)]
    pub transform: bool,
}

/// Render the G-code program for `args` without writing it
pub fn render_gcode(args: &GcodeArgs, config: &Config) -> anyhow::Result<String> {
    let mut settings = config.gcode.clone();
    if let Some(feed) = args.feed_down {
        settings.feed_speed_down = feed;
    }
    if let Some(feed) = args.feed_plane {
        settings.feed_speed_plane = feed;
    }
    if let Some(scale) = args.scale {
        settings.scale_factor = scale;
    }
    if let Some(places) = args.decimals {
        settings.decimal_places = places;
    }
    if let Some(axis) = args.axis {
        settings.plunge_axis = axis;
    }
    if args.no_transform {
        settings.apply_transformations = false;
    }
    Config {
        gcode: settings.clone(),
        svg: config.svg.clone(),
    }
    .validate()
    .context("Invalid G-code settings")?;

    let wireframe = load_wireframe(&args.input)?;
    let start = wireframe
        .start_vertex(args.start)
        .context("Cannot determine the start vertex")?;
    let graph = wireframe
        .graph(settings.apply_transformations)
        .with_context(|| format!("Invalid wireframe {}", wireframe.name))?;

    export_gcode(&graph, start, &settings)
        .with_context(|| format!("Unable to export {} as G-code", wireframe.name))
}

/// Render the SVG document for `args` without writing it
pub fn render_svg(args: &SvgArgs, config: &Config) -> anyhow::Result<String> {
    let mut settings = config.svg.clone();
    if args.fail_on_open {
        settings.fail_on_open_loops = true;
    }
    if let Some(scale) = args.scale {
        settings.scale_factor = scale;
    }
    if args.no_svg_scaling {
        settings.scale_via_svg_scaling = false;
    }
    if args.transform {
        settings.apply_transformations = true;
    }
    Config {
        gcode: config.gcode.clone(),
        svg: settings.clone(),
    }
    .validate()
    .context("Invalid SVG settings")?;

    let wireframe = load_wireframe(&args.input)?;
    let graph = wireframe
        .graph(settings.apply_transformations)
        .with_context(|| format!("Invalid wireframe {}", wireframe.name))?;

    export_svg(&wireframe.name, &graph, &settings)
        .with_context(|| format!("Unable to export {} as SVG", wireframe.name))
}

pub fn run_gcode(args: &GcodeArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let gcode = render_gcode(args, &config)?;
    write_output(args.output.as_deref(), &gcode)
}

pub fn run_svg(args: &SvgArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let svg = render_svg(args, &config)?;
    write_output(args.output.as_deref(), &svg)
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    Config::load_or_default(path).context("Failed to load config")
}

fn load_wireframe(path: &Path) -> anyhow::Result<Wireframe> {
    let wireframe = Wireframe::load(path)
        .with_context(|| format!("Failed to read wireframe {}", path.display()))?;
    info!(
        name = %wireframe.name,
        vertices = wireframe.vertices.len(),
        edges = wireframe.edges.len(),
        "Loaded wireframe"
    );
    Ok(wireframe)
}

fn write_output(path: Option<&Path>, content: &str) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), bytes = content.len(), "Export written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(content.as_bytes())
                .context("Failed to write to stdout")?;
            stdout.flush()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const STEP_DOWN: &str = r#"{
        "name": "Step",
        "vertices": [[0, 0, 0], [1, 0, 0], [1, 0, -1], [2, 0, -1]],
        "edges": [[0, 1], [1, 2], [2, 3]],
        "selected": [0],
        "matrix_world": [
            [2, 0, 0, 0],
            [0, 2, 0, 0],
            [0, 0, 2, 0],
            [0, 0, 0, 1]
        ]
    }"#;

    fn write_input(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_gcode_uses_world_matrix_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let args = GcodeArgs {
            input: write_input(&dir, "step.json", STEP_DOWN),
            ..Default::default()
        };

        let gcode = render_gcode(&args, &Config::default()).unwrap();
        assert!(gcode.contains("(2->3)\nG1 F100\nG1 X4.000 Y0.000 Z-2.000\n"));
    }

    #[test]
    fn test_gcode_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let args = GcodeArgs {
            input: write_input(&dir, "step.json", STEP_DOWN),
            start: Some(3),
            feed_down: Some(12.5),
            decimals: Some(0),
            no_transform: true,
            ..Default::default()
        };

        let gcode = render_gcode(&args, &Config::default()).unwrap();
        assert!(gcode.contains("(2->1)\nG1 F12.5\nG1 X-1 Y0 Z1\n"));
    }

    #[test]
    fn test_gcode_rejects_invalid_override() {
        let dir = tempfile::tempdir().unwrap();
        let args = GcodeArgs {
            input: write_input(&dir, "step.json", STEP_DOWN),
            feed_plane: Some(-1.0),
            ..Default::default()
        };

        let err = render_gcode(&args, &Config::default()).unwrap_err();
        assert!(format!("{err:#}").contains("feed_speed_plane"));
    }

    #[test]
    fn test_gcode_requires_a_start() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(
            &dir,
            "open.obj",
            "o Open\nv 0 0 0\nv 1 0 0\nv 2 0 0\nl 1 2 3\n",
        );
        let args = GcodeArgs {
            input,
            ..Default::default()
        };

        let err = render_gcode(&args, &Config::default()).unwrap_err();
        assert!(err.to_string().contains("start vertex"));
    }

    #[test]
    fn test_gcode_reports_branching_vertex() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(
            &dir,
            "tee.obj",
            "o Tee\nv 0 0 0\nv 1 0 0\nv 2 0 0\nv 1 1 0\nl 1 2 3\nl 2 4\n",
        );
        let args = GcodeArgs {
            input,
            start: Some(0),
            ..Default::default()
        };

        let err = render_gcode(&args, &Config::default()).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("Unable to export Tee as G-code"));
        assert!(message.contains("At vertex [1] no unique path could be found"));
    }

    #[test]
    fn test_run_gcode_writes_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("step.gcode");
        let args = GcodeArgs {
            input: write_input(&dir, "step.json", STEP_DOWN),
            output: Some(output.clone()),
            ..Default::default()
        };

        run_gcode(&args, None).unwrap_or_else(|e| panic!("export failed: {e:#}"));
        let written = std::fs::read_to_string(output).unwrap();
        assert!(written.starts_with("(head)\n"));
        assert!(written.ends_with("(foot)\n\n"));
    }

    #[test]
    fn test_svg_with_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("edgepath.toml");
        std::fs::write(
            &config_path,
            "[svg]\nscale_factor = 10.0\nscale_via_svg_scaling = false\n",
        )
        .unwrap();
        let input = write_input(
            &dir,
            "square.obj",
            "o Square\nv 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n",
        );
        let output = dir.path().join("square.svg");
        let args = SvgArgs {
            input,
            output: Some(output.clone()),
            fail_on_open: true,
            ..Default::default()
        };

        run_svg(&args, Some(&config_path)).unwrap_or_else(|e| panic!("export failed: {e:#}"));
        let svg = std::fs::read_to_string(output).unwrap();
        assert!(svg.contains("width=\"10px\" height=\"10px\""));
        assert!(svg.contains("<g transform=\"translate(0,0)\">"));
        assert!(svg.contains("id=\"Square\""));
        assert_eq!(svg.matches("<polyline").count(), 1);
    }

    #[test]
    fn test_svg_open_loop_failure() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(&dir, "open.obj", "v 0 0 0\nv 1 0 0\nv 2 1 0\nl 1 2 3\n");
        let args = SvgArgs {
            input,
            fail_on_open: true,
            ..Default::default()
        };

        let err = render_svg(&args, &Config::default()).unwrap_err();
        assert!(format!("{err:#}").contains("Object open: non-closing polyline"));
    }
}
