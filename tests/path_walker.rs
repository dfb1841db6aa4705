// tests/path_walker.rs
use bevy_math::curve::{Curve, FunctionCurve, Interval};
use glam::Vec3;
use lsystem_curves::{
    CurveCollector, LSystemError, PolylineCurve, SplineKind, Turtle, WalkStep, walk_curve,
};
use std::f32::consts::FRAC_PI_2;

fn collect(curve: &impl Curve<Vec3>, steps: usize) -> Vec<WalkStep> {
    let mut out = Vec::new();
    walk_curve(curve, steps, |step| out.push(*step)).unwrap();
    out
}

#[test]
fn test_polyline_samples_by_arc_length() {
    let curve = PolylineCurve::new(vec![
        Vec3::ZERO,
        Vec3::new(3.0, 0.0, 0.0),
        Vec3::new(3.0, 1.0, 0.0),
    ])
    .unwrap();
    assert_eq!(curve.length(), 4.0);
    assert!(curve.sample_clamped(0.0).abs_diff_eq(Vec3::ZERO, 1e-6));
    assert!(
        curve
            .sample_clamped(0.5)
            .abs_diff_eq(Vec3::new(2.0, 0.0, 0.0), 1e-6)
    );
    assert!(
        curve
            .sample_clamped(0.875)
            .abs_diff_eq(Vec3::new(3.0, 0.5, 0.0), 1e-6)
    );
    assert!(
        curve
            .sample_clamped(1.0)
            .abs_diff_eq(Vec3::new(3.0, 1.0, 0.0), 1e-6)
    );
}

#[test]
fn test_polyline_needs_two_points() {
    assert_eq!(
        PolylineCurve::new(vec![Vec3::ONE]),
        Err(LSystemError::DegeneratePath { points: 1 })
    );
}

#[test]
fn test_walk_straight_line() {
    let curve = PolylineCurve::new(vec![Vec3::ZERO, Vec3::new(4.0, 0.0, 0.0)]).unwrap();
    let steps = collect(&curve, 4);

    assert_eq!(steps.len(), 4);
    for (i, step) in steps.iter().enumerate() {
        assert_eq!(step.step, i + 1);
        let expected = Vec3::new((i + 1) as f32, 0.0, 0.0);
        assert!(step.location.abs_diff_eq(expected, 1e-5));
        // Travelling along +X: local X already points that way.
        assert!((step.rotation * Vec3::X).abs_diff_eq(Vec3::X, 1e-5));
    }
}

#[test]
fn test_walk_follows_turtle_path_around_corner() {
    let mut turtle = Turtle::new("Path", SplineKind::Poly, CurveCollector::new());
    turtle.pen_down();
    turtle.forward(2.0);
    turtle.turn(FRAC_PI_2);
    turtle.forward(2.0);
    turtle.pen_up();

    let record = &turtle.sink().curves[0];
    let curve = PolylineCurve::new(record.points().collect::<Vec<_>>()).unwrap();
    let steps = collect(&curve, 4);

    // First half heads along +X, second half along +Y.
    assert!((steps[0].rotation * Vec3::X).abs_diff_eq(Vec3::X, 1e-5));
    assert!((steps[3].rotation * Vec3::X).abs_diff_eq(Vec3::Y, 1e-5));
    assert!(steps[3].location.abs_diff_eq(Vec3::new(2.0, 2.0, 0.0), 1e-5));
    // Up stays up.
    for step in &steps {
        assert!((step.rotation * Vec3::Z).abs_diff_eq(Vec3::Z, 1e-5));
    }
}

#[test]
fn test_walk_function_curve_domain() {
    let domain = Interval::new(0.0, 2.0).unwrap();
    let curve = FunctionCurve::new(domain, |t: f32| Vec3::new(0.0, t * 5.0, 0.0));
    let steps = collect(&curve, 2);

    assert_eq!(steps[0].parameter, 1.0);
    assert_eq!(steps[1].parameter, 2.0);
    assert!(steps[1].location.abs_diff_eq(Vec3::new(0.0, 10.0, 0.0), 1e-5));
    assert!((steps[1].rotation * Vec3::X).abs_diff_eq(Vec3::Y, 1e-5));
}

#[test]
fn test_stationary_steps_keep_rotation() {
    let curve = FunctionCurve::new(Interval::UNIT, |t: f32| {
        Vec3::new(t.min(0.5), 0.0, 0.0)
    });
    let steps = collect(&curve, 4);
    assert!(steps[3].location.abs_diff_eq(Vec3::new(0.5, 0.0, 0.0), 1e-6));
    assert_eq!(steps[3].rotation, steps[1].rotation);
}

#[test]
fn test_zero_steps_rejected() {
    let curve = PolylineCurve::new(vec![Vec3::ZERO, Vec3::X]).unwrap();
    assert_eq!(
        walk_curve(&curve, 0, |_| {}),
        Err(LSystemError::InvalidStepCount)
    );
}
