use approx::assert_relative_eq;
use nalgebra::{Point2, Vector2};

use crate::forces::{Attractor, CentralAttractor, ForceModel, circular_velocity};
use crate::particle::Color;
use crate::state::ParticleStore;

fn make_model(mass: f64, softening: f64) -> CentralAttractor {
    CentralAttractor::new(Attractor::new(Point2::new(500.0, 350.0), mass), 10.0, softening)
}

#[test]
fn test_acceleration_toward_center() {
    let model = make_model(40.0, 6.0);
    let accel = model.acceleration(Point2::new(600.0, 350.0));

    assert!(accel.x < 0.0);
    assert!(accel.y.abs() < 1e-12);
}

#[test]
fn test_acceleration_magnitude_matches_softened_law() {
    let model = make_model(40.0, 6.0);
    let accel = model.acceleration(Point2::new(500.0, 450.0));

    // r = 100, s = 6: |a| = G·M·r / (r² + s²)^{3/2}
    let expected = 10.0 * 40.0 * 100.0 / (100.0_f64 * 100.0 + 36.0).powf(1.5);
    assert_relative_eq!(accel.magnitude(), expected, max_relative = 1e-12);
    assert!(accel.y < 0.0);
}

#[test]
fn test_far_field_approaches_inverse_square() {
    let model = make_model(40.0, 6.0);
    let r = 1.0e5;
    let accel = model.acceleration(Point2::new(500.0 + r, 350.0));

    assert_relative_eq!(accel.magnitude(), 10.0 * 40.0 / (r * r), max_relative = 1e-6);
}

#[test]
fn test_zero_at_center() {
    let model = make_model(40.0, 6.0);
    let accel = model.acceleration(Point2::new(500.0, 350.0));

    assert_eq!(accel, Vector2::zeros());
}

#[test]
fn test_softening_bounds_close_approach() {
    let soft = make_model(40.0, 6.0);
    let hard = make_model(40.0, 1e-9);
    let near = Point2::new(500.01, 350.0);

    let accel_soft = soft.acceleration(near);
    let accel_hard = hard.acceleration(near);

    assert!(accel_soft.magnitude() < accel_hard.magnitude());
    assert!(accel_soft.magnitude().is_finite());
}

#[test]
fn test_acceleration_scales_with_mass() {
    let light = make_model(40.0, 6.0);
    let heavy = make_model(80.0, 6.0);
    let p = Point2::new(650.0, 300.0);

    assert_relative_eq!(
        heavy.acceleration(p).magnitude(),
        2.0 * light.acceleration(p).magnitude(),
        max_relative = 1e-12
    );
}

#[test]
fn test_force_model_dispatch() {
    let model: ForceModel = make_model(40.0, 6.0).into();
    let p = Point2::new(600.0, 350.0);

    assert_eq!(model.acceleration(p), make_model(40.0, 6.0).acceleration(p));
    assert_eq!(model.attractor().map(|a| a.horizon_radius()), Some(80.0));
}

#[test]
fn test_attractor_mut_rescales_horizon() {
    let mut model: ForceModel = make_model(40.0, 6.0).into();

    if let Some(attractor) = model.attractor_mut() {
        attractor.mass = 10.0;
    }

    assert_eq!(model.attractor().map(|a| a.horizon_radius()), Some(20.0));
}

#[test]
fn test_potential_energy_negative() {
    let model = make_model(40.0, 6.0);
    let mut store = ParticleStore::new();
    store.add_particle(
        1.0,
        0.0,
        Point2::new(600.0, 350.0),
        Vector2::zeros(),
        Color::TRACER,
        0,
    );

    assert!(model.potential_energy(&store) < 0.0);
}

#[test]
fn test_potential_deeper_closer_in() {
    let model = make_model(40.0, 6.0);
    let mut near = ParticleStore::new();
    let mut far = ParticleStore::new();
    near.add_particle(1.0, 0.0, Point2::new(550.0, 350.0), Vector2::zeros(), Color::TRACER, 0);
    far.add_particle(1.0, 0.0, Point2::new(800.0, 350.0), Vector2::zeros(), Color::TRACER, 0);

    assert!(model.potential_energy(&near) < model.potential_energy(&far));
}

#[test]
fn test_circular_velocity_finite_at_center() {
    let v = circular_velocity(10.0, 40.0, 0.0);
    assert!(v.is_finite());
    assert_relative_eq!(v, (400.0_f64 / 1e-3).sqrt());
}
