//! Feed mode tagging for walked chains.
//!
//! A feed rate, once issued, stays in effect until it is changed. The
//! annotator therefore tracks the current mode across steps and flags only
//! the steps where the mode changes.

use crate::walker::{Chain, Step};
use edgepath_core::{Axis, GraphError, GraphModel, Point};

/// Mode before the first step; no feed rate has been issued yet
pub const INITIAL_MODE: Mode = Mode::Traveling;

/// Physical meaning of a move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// The move changes the plunge axis coordinate
    Engaging,
    /// The move stays in one plane
    Traveling,
}

/// A step with resolved points and its feed mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepAnnotation {
    pub step: Step,
    pub from: Point,
    pub to: Point,
    pub mode: Mode,
    /// Mode differs from the previous step (or from the initial mode)
    pub is_transition: bool,
}

/// Tags chain steps with [`Mode`] transitions
#[derive(Debug, Clone, Copy, Default)]
pub struct StepAnnotator {
    axis: Axis,
}

impl StepAnnotator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different out-of-plane axis (defaults to Z)
    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Mode of a single move
    pub fn mode_of(&self, from: &Point, to: &Point) -> Mode {
        if self.axis.of(to) != self.axis.of(from) {
            Mode::Engaging
        } else {
            Mode::Traveling
        }
    }

    pub fn annotate(
        &self,
        graph: &GraphModel,
        chain: &Chain,
    ) -> Result<Vec<StepAnnotation>, GraphError> {
        let mut current = INITIAL_MODE;

        chain
            .steps()
            .iter()
            .map(|&step| -> Result<StepAnnotation, GraphError> {
                let from = *graph.point_of(step.from)?;
                let to = *graph.point_of(step.to)?;
                let mode = self.mode_of(&from, &to);
                let is_transition = mode != current;
                current = mode;
                Ok(StepAnnotation {
                    step,
                    from,
                    to,
                    mode,
                    is_transition,
                })
            })
            .collect()
    }
}
