//! Walks a curve at even parametric steps, reporting a location and a
//! travel-aligned rotation at each one.
//!
//! Hosts use this to place objects along a path (a row of dominoes, say).
//! Any [`bevy_math`] [`Curve<Vec3>`] can be walked; [`PolylineCurve`] adapts a
//! path recorded by a turtle.

use crate::error::LSystemError;
use bevy_math::curve::{Curve, Interval};
use glam::{Mat3, Quat, Vec3};
use tracing::debug;

/// One stop along a walked curve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WalkStep {
    /// 1-based step index.
    pub step: usize,
    /// Curve parameter the location was sampled at.
    pub parameter: f32,
    pub location: Vec3,
    /// Maps local +X onto the direction of travel, keeping +Z as up.
    pub rotation: Quat,
}

/// Rotation that points local +X along `direction` with +Z as up.
///
/// Returns `None` for a zero-length direction. Vertical directions fall back
/// to +Y as the side axis.
pub fn track_rotation(direction: Vec3) -> Option<Quat> {
    let forward = direction.try_normalize()?;
    let side = Vec3::Z.cross(forward).try_normalize().unwrap_or(Vec3::Y);
    let up = forward.cross(side);
    Some(Quat::from_mat3(&Mat3::from_cols(forward, side, up)))
}

/// Samples `curve` at `steps` even positions across its domain and calls
/// `visit` for each.
///
/// Step `i` (1-based) samples `start + (end - start) * i / steps`; the
/// domain start itself is only used as the first "previous" location. A step
/// that does not move keeps the previous rotation.
pub fn walk_curve<C, F>(curve: &C, steps: usize, mut visit: F) -> Result<(), LSystemError>
where
    C: Curve<Vec3> + ?Sized,
    F: FnMut(&WalkStep),
{
    if steps == 0 {
        return Err(LSystemError::InvalidStepCount);
    }
    let domain = curve.domain();
    let (start, end) = (domain.start(), domain.end());
    if !start.is_finite() || !end.is_finite() {
        return Err(LSystemError::UnboundedDomain);
    }

    let mut previous = curve.sample_clamped(start);
    let mut rotation = Quat::IDENTITY;
    for step in 1..=steps {
        let parameter = start + (end - start) * (step as f32 / steps as f32);
        let location = curve.sample_clamped(parameter);
        if let Some(tracked) = track_rotation(location - previous) {
            rotation = tracked;
        }
        visit(&WalkStep {
            step,
            parameter,
            location,
            rotation,
        });
        previous = location;
    }

    debug!(steps, start, end, "walked curve");
    Ok(())
}

/// A piecewise-linear curve over `[0, 1]`, parametrized by arc length.
#[derive(Clone, Debug, PartialEq)]
pub struct PolylineCurve {
    points: Vec<Vec3>,
    cumulative: Vec<f32>,
}

impl PolylineCurve {
    pub fn new(points: impl Into<Vec<Vec3>>) -> Result<Self, LSystemError> {
        let points = points.into();
        if points.len() < 2 {
            return Err(LSystemError::DegeneratePath {
                points: points.len(),
            });
        }
        let mut cumulative = Vec::with_capacity(points.len());
        let mut total = 0.0;
        cumulative.push(total);
        for pair in points.windows(2) {
            total += pair[0].distance(pair[1]);
            cumulative.push(total);
        }
        Ok(Self { points, cumulative })
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Total arc length.
    pub fn length(&self) -> f32 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }
}

impl Curve<Vec3> for PolylineCurve {
    fn domain(&self) -> Interval {
        Interval::UNIT
    }

    fn sample_unchecked(&self, t: f32) -> Vec3 {
        let first = self.points[0];
        let total = self.length();
        if total <= f32::EPSILON {
            return first;
        }
        let target = t.clamp(0.0, 1.0) * total;
        let idx = self.cumulative.partition_point(|&len| len < target);
        if idx == 0 {
            return first;
        }
        if idx >= self.points.len() {
            return self.points[self.points.len() - 1];
        }
        let (a, b) = (self.cumulative[idx - 1], self.cumulative[idx]);
        let span = b - a;
        let f = if span > 0.0 { (target - a) / span } else { 0.0 };
        self.points[idx - 1].lerp(self.points[idx], f)
    }
}
