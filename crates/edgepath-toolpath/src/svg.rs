//! SVG outline generation from merged polylines.
//!
//! The wireframe is projected onto the XY plane. X is measured from the
//! smallest X coordinate and Y is flipped from the largest Y coordinate,
//! so the outline sits at the document origin with Y pointing down.

use crate::error::{ExportError, ExportResult};
use crate::merger::{PolylineChain, PolylineMerger};
use edgepath_core::{Bounds2, GraphModel};
use edgepath_settings::SvgExportSettings;
use tracing::info;

/// Converts merged polylines to an SVG document
#[derive(Debug, Clone)]
pub struct SvgWriter {
    settings: SvgExportSettings,
}

impl SvgWriter {
    pub fn new(settings: SvgExportSettings) -> Self {
        Self { settings }
    }

    /// Render one object's chains as a complete document
    pub fn generate(
        &self,
        name: &str,
        graph: &GraphModel,
        chains: &[PolylineChain],
    ) -> ExportResult<String> {
        if self.settings.fail_on_open_loops {
            if let Some(open) = chains.iter().find(|c| !c.is_closed()) {
                return Err(ExportError::OpenPolyline {
                    object: name.to_string(),
                    first: open.first(),
                    last: open.last(),
                });
            }
        }

        let bounds = Bounds2::from_points(graph.points()).unwrap_or(Bounds2 {
            min_x: 0.0,
            min_y: 0.0,
            max_x: 0.0,
            max_y: 0.0,
        });
        let factor = self.settings.scale_factor;
        let width = bounds.width() * factor;
        let height = bounds.height() * factor;

        let mut svg = String::new();
        svg.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        svg.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\" version=\"1.1\" viewBox=\"0 0 {} {}\" width=\"{}px\" height=\"{}px\">\n",
            width, height, width, height
        ));

        let point_scale = if self.settings.scale_via_svg_scaling {
            svg.push_str(&format!(
                "<g transform=\"scale({}) translate(0,0)\">",
                factor
            ));
            1.0
        } else {
            svg.push_str("<g transform=\"translate(0,0)\">");
            factor
        };

        for chain in chains {
            svg.push_str(&self.polyline(name, graph, chain, &bounds, point_scale)?);
        }

        svg.push_str("</g>\n");
        svg.push_str("</svg>\n");
        Ok(svg)
    }

    fn polyline(
        &self,
        name: &str,
        graph: &GraphModel,
        chain: &PolylineChain,
        bounds: &Bounds2,
        scale: f64,
    ) -> ExportResult<String> {
        let points = chain
            .vertices()
            .iter()
            .map(|&v| -> ExportResult<String> {
                let p = graph.point_of(v)?;
                let x = (p.x - bounds.min_x) * scale;
                let y = (bounds.max_y - p.y) * scale;
                Ok(format!("{}, {}", x, y))
            })
            .collect::<ExportResult<Vec<_>>>()?
            .join(" ");

        Ok(format!(
            "\n<polyline id=\"{}\" style=\"{}\"\npoints=\"{}\"/>\n",
            escape_attr(name),
            escape_attr(&self.settings.stroke_style),
            points
        ))
    }
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Merge the graph's edges into polylines and render them
pub fn export_svg(
    name: &str,
    graph: &GraphModel,
    settings: &SvgExportSettings,
) -> ExportResult<String> {
    let chains = PolylineMerger::merge_graph(graph);
    let svg = SvgWriter::new(settings.clone()).generate(name, graph, &chains)?;

    info!(
        object = name,
        polylines = chains.len(),
        closed = chains.iter().filter(|c| c.is_closed()).count(),
        "Generated SVG outline"
    );
    Ok(svg)
}
