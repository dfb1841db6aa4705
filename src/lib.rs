//! # lsystem-curves
//!
//! Procedural curve generation from L-System grammars.
//!
//! A [`LSystem`] rewrites its axiom for a number of generations. An
//! [`Interpreter`] then walks the resulting symbols, driving a [`Turtle`] that
//! records 3D paths. Whenever the turtle's pen is raised, the recorded path is
//! flattened into the vertex layout of its [`SplineKind`] and handed to a
//! [`CurveSink`], the engine-side collaborator that actually creates geometry.
//!
//! [`walk_curve`] goes the other way: it samples an existing curve at even
//! steps so a host can place objects along it.

pub mod error;
pub mod grammar;
pub mod interpreter;
pub mod presets;
pub mod spline;
pub mod turtle;
pub mod walker;

pub use error::*;
pub use grammar::*;
pub use interpreter::*;
pub use presets::*;
pub use spline::*;
pub use turtle::*;
pub use walker::*;
