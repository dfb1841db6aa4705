//! Turtle state and the turtle that owns it.

use crate::error::LSystemError;
use crate::spline::{CurveRequest, CurveSink, SplineConfig, SplineKind, flatten};
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};
use tracing::debug;

/// Wraps `angle` (radians) into `(-PI, PI]`.
///
/// Works for any finite angle, however many turns it spans. Non-finite input
/// yields NaN.
pub fn normalize_heading(angle: f32) -> f32 {
    let mut heading = angle.rem_euclid(TAU);
    while heading > PI {
        heading -= TAU;
    }
    while heading <= -PI {
        heading += TAU;
    }
    heading
}

/// One snapshot of the turtle: where it is, where it faces, what it has drawn.
///
/// Only [`Turtle`] mutates a state, so `heading` always stays in `(-PI, PI]`
/// and `path` is never empty.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurtleState {
    position: Vec3,
    heading: f32,
    pen_down: bool,
    path: Vec<Vec3>,
    spline_kind: SplineKind,
}

impl Default for TurtleState {
    fn default() -> Self {
        Self::new(Vec3::ZERO, SplineKind::default())
    }
}

impl TurtleState {
    /// A raised-pen state at `origin`, facing +X, with `origin` as its only path point.
    pub fn new(origin: Vec3, spline_kind: SplineKind) -> Self {
        Self {
            position: origin,
            heading: 0.0,
            pen_down: false,
            path: vec![origin],
            spline_kind,
        }
    }

    /// Current world-space position.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Current heading in radians, measured from +X about +Z.
    pub fn heading(&self) -> f32 {
        self.heading
    }

    pub fn is_pen_down(&self) -> bool {
        self.pen_down
    }

    /// Points recorded since the current segment started.
    pub fn path(&self) -> &[Vec3] {
        &self.path
    }

    pub fn spline_kind(&self) -> SplineKind {
        self.spline_kind
    }

    /// Unit vector the turtle would move along.
    pub fn direction(&self) -> Vec3 {
        Quat::from_rotation_z(self.heading) * Vec3::X
    }

    fn forward(&mut self, distance: f32) {
        self.position += self.direction() * distance;
        if self.pen_down {
            self.extend_path();
        }
    }

    fn turn(&mut self, angle: f32) {
        if self.pen_down && self.spline_kind.anchors_corners() {
            self.extend_path();
        }
        self.heading = normalize_heading(self.heading + angle);
    }

    fn extend_path(&mut self) {
        self.path.push(self.position);
    }

    fn new_path(&mut self) {
        self.path.clear();
        self.extend_path();
    }
}

/// Construction options for a [`Turtle`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurtleConfig {
    /// Starting position of the initial state.
    pub origin: Vec3,
    /// Maximum number of states, including the live one.
    pub max_stack_depth: usize,
    /// Forwarded to the sink with every curve.
    pub spline: SplineConfig,
}

impl Default for TurtleConfig {
    fn default() -> Self {
        Self {
            origin: Vec3::ZERO,
            max_stack_depth: 1024,
            spline: SplineConfig::default(),
        }
    }
}

/// A turtle that records paths and emits them as curves on pen-up.
///
/// The live state plus a stack of saved states. Each time the pen is raised
/// over a path of two or more points, the path is flattened and handed to the
/// sink; the returned handles are kept in creation order.
pub struct Turtle<S: CurveSink> {
    name: String,
    config: TurtleConfig,
    current: TurtleState,
    saved: Vec<TurtleState>,
    sink: S,
    curves: Vec<S::Handle>,
}

impl<S: CurveSink> Turtle<S> {
    /// Creates a turtle with the default configuration.
    pub fn new(name: impl Into<String>, spline_kind: SplineKind, sink: S) -> Self {
        Self::with_config(name, spline_kind, TurtleConfig::default(), sink)
    }

    pub fn with_config(
        name: impl Into<String>,
        spline_kind: SplineKind,
        config: TurtleConfig,
        sink: S,
    ) -> Self {
        Self {
            name: name.into(),
            current: TurtleState::new(config.origin, spline_kind),
            config,
            saved: Vec::new(),
            sink,
            curves: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &TurtleConfig {
        &self.config
    }

    pub fn spline_kind(&self) -> SplineKind {
        self.current.spline_kind
    }

    /// The live state.
    pub fn state(&self) -> &TurtleState {
        &self.current
    }

    /// Number of states on the stack, counting the live one. Starts at 1.
    pub fn depth(&self) -> usize {
        self.saved.len() + 1
    }

    /// Handles of every curve created so far, oldest first.
    pub fn curves(&self) -> &[S::Handle] {
        &self.curves
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Consumes the turtle, returning the sink and the created curve handles.
    pub fn into_parts(self) -> (S, Vec<S::Handle>) {
        (self.sink, self.curves)
    }

    /// Moves `distance` along the heading, recording the new position if the pen is down.
    pub fn forward(&mut self, distance: f32) {
        self.current.forward(distance);
    }

    /// Rotates by `angle` radians (positive is counter-clockwise seen from +Z).
    ///
    /// NURBS turtles with the pen down repeat the corner point first.
    pub fn turn(&mut self, angle: f32) {
        self.current.turn(angle);
    }

    /// Lowers the pen. A raised pen starts a fresh segment at the current position.
    pub fn pen_down(&mut self) {
        if !self.current.pen_down {
            self.current.pen_down = true;
            self.current.new_path();
        }
    }

    /// Raises the pen, emitting the recorded segment if it has two or more points.
    ///
    /// Returns the handle of the created curve, or `None` when nothing was drawn.
    pub fn pen_up(&mut self) -> Option<&S::Handle> {
        self.current.pen_down = false;
        if self.current.path.len() > 1 {
            self.finish_path();
            self.curves.last()
        } else {
            None
        }
    }

    /// Saves a copy of the live state.
    pub fn push(&mut self) -> Result<(), LSystemError> {
        if self.depth() >= self.config.max_stack_depth {
            return Err(LSystemError::StackOverflow {
                max: self.config.max_stack_depth,
            });
        }
        self.saved.push(self.current.clone());
        Ok(())
    }

    /// Discards the live state and restores the most recently saved one.
    pub fn pop(&mut self) -> Result<(), LSystemError> {
        self.current = self.saved.pop().ok_or(LSystemError::EmptyStack)?;
        Ok(())
    }

    fn finish_path(&mut self) {
        let kind = self.current.spline_kind;
        let vertices = flatten(&self.current.path, kind);
        let name = format!("{}-curve", self.name);
        let request = CurveRequest {
            name: &name,
            kind,
            vertices: &vertices,
            config: &self.config.spline,
        };
        let handle = self.sink.create_curve(&request);
        debug!(
            turtle = %self.name,
            points = self.current.path.len(),
            ?kind,
            "created curve"
        );
        self.curves.push(handle);
        self.current.new_path();
    }
}
