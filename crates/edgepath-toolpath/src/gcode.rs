//! G-code generation from walked chains.
//!
//! Output is split into `(head)`, `(main)` and `(foot)` sections. Every
//! move is relative to the start vertex, which the head declares as the
//! machine origin with `G92`. A feed rate word is emitted only on steps
//! the annotator flags as transitions.

use crate::annotator::{Mode, StepAnnotation, StepAnnotator};
use crate::error::ExportResult;
use crate::walker::ChainWalker;
use edgepath_core::{round_to, GraphModel, Point, VertexId};
use edgepath_settings::GcodeExportSettings;
use tracing::info;

/// One G-code command, optionally preceded by a comment line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GcodeEntry {
    pub command: String,
    pub description: Option<String>,
}

impl GcodeEntry {
    pub fn new(command: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            description: Some(description.into()),
        }
    }
}

/// Converts annotated chains to G-code text
#[derive(Debug, Clone)]
pub struct GcodeWriter {
    settings: GcodeExportSettings,
}

impl GcodeWriter {
    pub fn new(settings: GcodeExportSettings) -> Self {
        Self { settings }
    }

    /// Program setup: millimetres, XY plane, absolute, current position is zero
    pub fn head() -> Vec<GcodeEntry> {
        vec![
            GcodeEntry::new("G21", "interpret given data in mm"),
            GcodeEntry::new("G17", "select X Y plane"),
            GcodeEntry::new("G90", "use absolute coordinates"),
            GcodeEntry::new(
                "G92 X0 Y0 Z0",
                "specify that the head's current XYZ position is 0, 0, 0",
            ),
        ]
    }

    pub fn foot() -> Vec<GcodeEntry> {
        Vec::new()
    }

    /// One entry per annotated step, with moves measured from `origin`
    pub fn body(&self, origin: &Point, annotations: &[StepAnnotation]) -> Vec<GcodeEntry> {
        annotations
            .iter()
            .map(|a| {
                let mv = self.move_command(origin, &a.to);
                let command = if a.is_transition {
                    format!("G1 F{}\n{}", self.feed_for(a.mode), mv)
                } else {
                    mv
                };
                GcodeEntry::new(command, format!("{}->{}", a.step.from, a.step.to))
            })
            .collect()
    }

    /// Feed rate word value for a mode
    pub fn feed_for(&self, mode: Mode) -> f64 {
        match mode {
            Mode::Engaging => self.settings.feed_speed_down,
            Mode::Traveling => self.settings.feed_speed_plane,
        }
    }

    fn move_command(&self, origin: &Point, to: &Point) -> String {
        let delta = (to - origin) * self.settings.scale_factor;
        format!(
            "G1 X{} Y{} Z{}",
            self.coord(delta.x),
            self.coord(delta.y),
            self.coord(delta.z)
        )
    }

    fn coord(&self, value: f64) -> String {
        let places = self.settings.decimal_places;
        // adding 0.0 turns -0.0 into 0.0
        let value = round_to(value, places as i32) + 0.0;
        format!("{:.*}", places, value)
    }

    /// Append a named section to `out`
    pub fn write_section(name: &str, entries: &[GcodeEntry], out: &mut String) {
        out.push_str(&format!("({})\n", name));
        for entry in entries {
            if let Some(description) = &entry.description {
                out.push_str(&format!("({})\n", description));
            }
            out.push_str(&entry.command);
            out.push('\n');
        }
        out.push('\n');
    }

    /// Generate a full program from annotations of a walk starting at `origin`
    pub fn generate(&self, origin: &Point, annotations: &[StepAnnotation]) -> String {
        let mut gcode = String::new();
        Self::write_section("head", &Self::head(), &mut gcode);
        Self::write_section("main", &self.body(origin, annotations), &mut gcode);
        Self::write_section("foot", &Self::foot(), &mut gcode);
        gcode
    }
}

/// Walk `graph` from `start`, annotate the moves and render the program
pub fn export_gcode(
    graph: &GraphModel,
    start: VertexId,
    settings: &GcodeExportSettings,
) -> ExportResult<String> {
    let chain = ChainWalker::new().walk(graph, start)?;
    let annotator = StepAnnotator::new().with_axis(settings.plunge_axis);
    let annotations = annotator.annotate(graph, &chain)?;
    let origin = graph.point_of(start)?;

    let writer = GcodeWriter::new(settings.clone());
    let gcode = writer.generate(origin, &annotations);

    info!(
        start,
        axis = %annotator.axis(),
        moves = annotations.len(),
        feed_changes = annotations.iter().filter(|a| a.is_transition).count(),
        "Generated G-code path"
    );
    Ok(gcode)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn writer() -> GcodeWriter {
        GcodeWriter::new(GcodeExportSettings::default())
    }

    #[test]
    fn test_section_layout() {
        let mut out = String::new();
        GcodeWriter::write_section(
            "main",
            &[
                GcodeEntry::new("G1 X1", "0->1"),
                GcodeEntry {
                    command: "M2".to_string(),
                    description: None,
                },
            ],
            &mut out,
        );
        assert_eq!(out, "(main)\n(0->1)\nG1 X1\nM2\n\n");
    }

    #[test]
    fn test_empty_foot_section() {
        let mut out = String::new();
        GcodeWriter::write_section("foot", &GcodeWriter::foot(), &mut out);
        assert_eq!(out, "(foot)\n\n");
    }

    #[test]
    fn test_coordinates_have_no_negative_zero() {
        let w = writer();
        assert_eq!(w.coord(-0.0), "0.000");
        assert_eq!(w.coord(-0.0001), "0.000");
        assert_eq!(w.coord(-1.25), "-1.250");
    }

    #[test]
    fn test_move_is_relative_and_scaled() {
        let settings = GcodeExportSettings {
            scale_factor: 10.0,
            ..Default::default()
        };
        let w = GcodeWriter::new(settings);
        let origin = Point::new(1.0, 1.0, 0.0);
        assert_eq!(
            w.move_command(&origin, &Point::new(2.0, 0.5, -0.25)),
            "G1 X10.000 Y-5.000 Z-2.500"
        );
    }

    #[test]
    fn test_feed_for_mode() {
        let w = writer();
        assert_eq!(w.feed_for(Mode::Engaging), 50.0);
        assert_eq!(w.feed_for(Mode::Traveling), 100.0);
    }
}
