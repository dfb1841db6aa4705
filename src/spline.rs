//! Path finalization and the geometry seam.
//!
//! A recorded turtle path is flattened into the vertex layout its spline kind
//! expects and handed, read-only, to a [`CurveSink`]. The sink is whatever
//! creates real geometry (a scene, an exporter, a test collector); this crate
//! never inspects the handle it returns.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Curve representation a turtle records for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SplineKind {
    /// Straight segments between points. Vertices are `x, y, z, 0`.
    #[default]
    Poly,
    /// Rational spline with full-weight control points. Vertices are `x, y, z, 1`.
    Nurbs,
    /// Bezier control points. Vertices are `x, y, z`; handles belong to the sink.
    Bezier,
}

impl SplineKind {
    /// Number of floats each point occupies in a flattened buffer.
    pub fn stride(self) -> usize {
        match self {
            Self::Bezier => 3,
            Self::Poly | Self::Nurbs => 4,
        }
    }

    /// The homogeneous weight appended to every point, if the kind has one.
    pub fn weight(self) -> Option<f32> {
        match self {
            Self::Poly => Some(0.0),
            Self::Nurbs => Some(1.0),
            Self::Bezier => None,
        }
    }

    /// Whether turns must drop an extra control point so corners survive.
    ///
    /// NURBS interpolation rounds off corners unless the corner point is
    /// repeated.
    pub fn anchors_corners(self) -> bool {
        matches!(self, Self::Nurbs)
    }
}

/// Flattens `path` into the vertex buffer layout of `kind`.
pub fn flatten(path: &[Vec3], kind: SplineKind) -> Vec<f32> {
    let mut buffer = Vec::with_capacity(path.len() * kind.stride());
    for point in path {
        buffer.extend_from_slice(&point.to_array());
        if let Some(weight) = kind.weight() {
            buffer.push(weight);
        }
    }
    buffer
}

/// How the sink should derive Bezier handles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandleType {
    #[default]
    Automatic,
    Vector,
    Aligned,
    Free,
}

/// Whether the created curve lives in a plane or in full 3D.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CurveDimensions {
    #[default]
    TwoD,
    ThreeD,
}

/// Options forwarded to the sink with every curve.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SplineConfig {
    /// Join the last point back to the first.
    pub cyclic: bool,
    /// Make the curve pass through its end points.
    pub endpoint: bool,
    /// Spline order (NURBS).
    pub order: u8,
    /// Allow the curve to be used as an animation path.
    pub use_path: bool,
    pub handle_type: HandleType,
    pub dimensions: CurveDimensions,
    /// Optional world transform applied to the created object.
    pub transform: Option<Mat4>,
}

impl Default for SplineConfig {
    fn default() -> Self {
        Self {
            cyclic: false,
            endpoint: true,
            order: 2,
            use_path: true,
            handle_type: HandleType::Automatic,
            dimensions: CurveDimensions::TwoD,
            transform: None,
        }
    }
}

/// Everything a sink needs to build one curve.
#[derive(Clone, Copy, Debug)]
pub struct CurveRequest<'a> {
    pub name: &'a str,
    pub kind: SplineKind,
    pub vertices: &'a [f32],
    pub config: &'a SplineConfig,
}

impl CurveRequest<'_> {
    /// Number of points encoded in `vertices`.
    pub fn point_count(&self) -> usize {
        self.vertices.len() / self.kind.stride()
    }
}

/// Receives finished paths and turns them into geometry.
pub trait CurveSink {
    /// Opaque reference to whatever the sink created.
    type Handle;

    fn create_curve(&mut self, request: &CurveRequest<'_>) -> Self::Handle;
}

impl<S: CurveSink + ?Sized> CurveSink for &mut S {
    type Handle = S::Handle;

    fn create_curve(&mut self, request: &CurveRequest<'_>) -> Self::Handle {
        (**self).create_curve(request)
    }
}

/// An owned copy of a [`CurveRequest`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurveRecord {
    pub name: String,
    pub kind: SplineKind,
    pub vertices: Vec<f32>,
    pub config: SplineConfig,
}

impl CurveRecord {
    /// Decodes the point positions, dropping any weight channel.
    pub fn points(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.vertices
            .chunks_exact(self.kind.stride())
            .map(|chunk| Vec3::new(chunk[0], chunk[1], chunk[2]))
    }

    pub fn point_count(&self) -> usize {
        self.vertices.len() / self.kind.stride()
    }
}

impl From<&CurveRequest<'_>> for CurveRecord {
    fn from(request: &CurveRequest<'_>) -> Self {
        Self {
            name: request.name.to_owned(),
            kind: request.kind,
            vertices: request.vertices.to_vec(),
            config: *request.config,
        }
    }
}

/// In-memory sink that keeps every curve it is given. Handles are indices.
#[derive(Clone, Debug, Default)]
pub struct CurveCollector {
    pub curves: Vec<CurveRecord>,
}

impl CurveCollector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CurveSink for CurveCollector {
    type Handle = usize;

    fn create_curve(&mut self, request: &CurveRequest<'_>) -> usize {
        self.curves.push(CurveRecord::from(request));
        self.curves.len() - 1
    }
}
