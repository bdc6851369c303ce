//! # Edgepath Toolpath
//!
//! Reconstructs ordered paths from an unordered wireframe graph and renders
//! them for downstream tools.
//!
//! ## Path reconstruction
//!
//! - **Chain Walker**: follows the unique continuation edge from a start
//!   vertex, for single loops or open paths
//! - **Step Annotator**: tags each walked move as engaging or traveling and
//!   marks the mode changes
//! - **Polyline Merger**: coalesces edges into maximal chains when there is
//!   no designated start
//!
//! ## Writers
//!
//! - **G-code**: motion program from an annotated walk
//! - **SVG**: 2D outline from merged polylines

pub mod annotator;
pub mod error;
pub mod gcode;
pub mod merger;
pub mod svg;
pub mod walker;

pub use annotator::{Mode, StepAnnotation, StepAnnotator, INITIAL_MODE};
pub use error::{ExportError, ExportResult, WalkError, WalkResult};
pub use gcode::{export_gcode, GcodeEntry, GcodeWriter};
pub use merger::{PolylineChain, PolylineMerger};
pub use svg::{export_svg, SvgWriter};
pub use walker::{walk, Chain, ChainWalker, IncompleteTraversal, Step};
