use approx::{assert_abs_diff_eq, assert_relative_eq};
use nalgebra::{Point2, Vector2};

use crate::collisions::detection::{check_pair, detect_contacts};
use crate::collisions::resolution::*;
use crate::particle::{Color, Particle, ParticleId};
use crate::state::ParticleStore;
use crate::trail::Trail;

fn make_disc(id: u64, x: f64, y: f64, vx: f64, vy: f64, radius: f64, mass: f64) -> Particle {
    Particle {
        id: ParticleId(id),
        position: Point2::new(x, y),
        velocity: Vector2::new(vx, vy),
        radius,
        mass,
        color: Color::TRACER,
        trail: Trail::with_capacity(0),
    }
}

#[test]
fn test_head_on_equal_mass_elastic_exchange() {
    let mut a = make_disc(0, 0.0, 0.0, 1.0, 0.0, 1.0, 1.0);
    let mut b = make_disc(1, 1.5, 0.0, -1.0, 0.0, 1.0, 1.0);

    let outcome = resolve_pair(&mut a, &mut b, 1.0);

    assert!(matches!(outcome, PairOutcome::Bounced { .. }));
    assert_eq!(a.velocity, Vector2::new(-1.0, 0.0));
    assert_eq!(b.velocity, Vector2::new(1.0, 0.0));
}

#[test]
fn test_positional_correction_removes_overlap() {
    let mut a = make_disc(0, 100.0, 100.0, 0.0, 0.0, 10.0, 100.0);
    let mut b = make_disc(1, 113.4, 100.0, 0.0, 0.0, 10.0, 100.0);

    resolve_pair(&mut a, &mut b, 1.0);

    assert_relative_eq!(a.distance_to(&b), 20.0, max_relative = 1e-12);
    assert_relative_eq!(a.position.x, 96.7, max_relative = 1e-12);
    assert_relative_eq!(b.position.x, 116.7, max_relative = 1e-12);
}

#[test]
fn test_positional_correction_conserves_center_of_mass() {
    let mut a = make_disc(0, 10.0, 20.0, 0.0, 0.0, 6.0, 36.0);
    let mut b = make_disc(1, 14.0, 25.0, 0.0, 0.0, 9.0, 81.0);
    let (a0, b0) = (a.position, b.position);

    let contact = check_pair(&a, &b).unwrap();
    correct_positions(&mut a, &mut b, &contact);

    let moment = (a.position - a0) * a.mass + (b.position - b0) * b.mass;
    assert_abs_diff_eq!(moment.x, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(moment.y, 0.0, epsilon = 1e-9);
    assert_relative_eq!(a.distance_to(&b), 15.0, max_relative = 1e-12);
}

#[test]
fn test_heavier_particle_moves_less() {
    let mut light = make_disc(0, 0.0, 0.0, 0.0, 0.0, 5.0, 1.0);
    let mut heavy = make_disc(1, 8.0, 0.0, 0.0, 0.0, 5.0, 9.0);

    resolve_pair(&mut light, &mut heavy, 1.0);

    // Overlap of 2 split 9:1
    assert_relative_eq!(light.position.x, -1.8, max_relative = 1e-12);
    assert_relative_eq!(heavy.position.x, 8.2, max_relative = 1e-12);
}

#[test]
fn test_separating_pair_gets_position_only() {
    let mut a = make_disc(0, 0.0, 0.0, -3.0, 0.0, 5.0, 25.0);
    let mut b = make_disc(1, 8.0, 0.0, 3.0, 0.0, 5.0, 25.0);

    let outcome = resolve_pair(&mut a, &mut b, 1.0);

    assert_eq!(outcome, PairOutcome::Corrected);
    assert_eq!(a.velocity, Vector2::new(-3.0, 0.0));
    assert_eq!(b.velocity, Vector2::new(3.0, 0.0));
    assert!(check_pair(&a, &b).is_none());
}

#[test]
fn test_already_separated_pair_is_untouched() {
    let mut a = make_disc(0, 0.0, 0.0, 4.0, 1.0, 5.0, 25.0);
    let mut b = make_disc(1, 10.0, 0.0, -4.0, 2.0, 5.0, 25.0);
    let (a0, b0) = (a.clone(), b.clone());

    let outcome = resolve_pair(&mut a, &mut b, 1.0);

    assert_eq!(outcome, PairOutcome::Separated);
    assert_eq!(a.position, a0.position);
    assert_eq!(a.velocity, a0.velocity);
    assert_eq!(b.position, b0.position);
    assert_eq!(b.velocity, b0.velocity);
}

#[test]
fn test_coincident_centers_are_skipped() {
    let mut a = make_disc(0, 5.0, 5.0, 1.0, 0.0, 5.0, 25.0);
    let mut b = make_disc(1, 5.0, 5.0, -1.0, 0.0, 5.0, 25.0);

    assert_eq!(resolve_pair(&mut a, &mut b, 1.0), PairOutcome::Separated);
    assert_eq!(a.velocity.x, 1.0);
    assert_eq!(b.velocity.x, -1.0);
}

#[test]
fn test_impulse_conserves_momentum() {
    let mut a = make_disc(0, 0.0, 0.0, 30.0, 10.0, 4.0, 16.0);
    let mut b = make_disc(1, 6.0, 3.0, -20.0, 5.0, 7.0, 49.0);
    let before = a.momentum() + b.momentum();

    resolve_pair(&mut a, &mut b, 0.95);

    let after = a.momentum() + b.momentum();
    assert_relative_eq!(after.x, before.x, max_relative = 1e-12);
    assert_relative_eq!(after.y, before.y, max_relative = 1e-12);
}

#[test]
fn test_elastic_impulse_conserves_kinetic_energy() {
    let mut a = make_disc(0, 0.0, 0.0, 30.0, 10.0, 4.0, 16.0);
    let mut b = make_disc(1, 6.0, 3.0, -20.0, 5.0, 7.0, 49.0);
    let before = a.kinetic_energy() + b.kinetic_energy();

    resolve_pair(&mut a, &mut b, 1.0);

    let after = a.kinetic_energy() + b.kinetic_energy();
    assert_relative_eq!(after, before, max_relative = 1e-12);
}

#[test]
fn test_inelastic_kills_relative_normal_velocity() {
    let mut a = make_disc(0, 0.0, 0.0, 10.0, 0.0, 5.0, 25.0);
    let mut b = make_disc(1, 9.0, 0.0, -10.0, 0.0, 5.0, 25.0);

    resolve_pair(&mut a, &mut b, 0.0);

    assert_abs_diff_eq!(a.velocity.x, b.velocity.x, epsilon = 1e-12);
    assert_abs_diff_eq!(a.velocity.x, 0.0, epsilon = 1e-12);
}

#[test]
fn test_restitution_scales_rebound() {
    let mut a = make_disc(0, 0.0, 0.0, 10.0, 0.0, 5.0, 25.0);
    let mut b = make_disc(1, 9.0, 0.0, -10.0, 0.0, 5.0, 25.0);

    resolve_pair(&mut a, &mut b, 0.5);

    // Relative normal speed 20 in, 10 out
    assert_relative_eq!(b.velocity.x - a.velocity.x, 10.0, max_relative = 1e-12);
}

#[test]
fn test_tangential_velocity_preserved() {
    let mut a = make_disc(0, 0.0, 0.0, 10.0, 7.0, 5.0, 25.0);
    let mut b = make_disc(1, 9.0, 0.0, -10.0, -3.0, 5.0, 25.0);

    resolve_pair(&mut a, &mut b, 1.0);

    assert_eq!(a.velocity.y, 7.0);
    assert_eq!(b.velocity.y, -3.0);
}

#[test]
fn test_sweep_resolves_chain_in_order() {
    let mut store = ParticleStore::new();
    store.add_particle(100.0, 10.0, Point2::new(100.0, 100.0), Vector2::zeros(), Color::TRACER, 0);
    store.add_particle(100.0, 10.0, Point2::new(118.0, 100.0), Vector2::zeros(), Color::TRACER, 0);
    store.add_particle(100.0, 10.0, Point2::new(200.0, 100.0), Vector2::zeros(), Color::TRACER, 0);

    let stats = resolve_collisions(&mut store, 1.0);

    assert_eq!(stats, CollisionStats { contacts: 1, impulses: 1 });
    assert!(detect_contacts(&store).is_empty());
}

#[test]
fn test_sweep_is_idempotent_once_separated() {
    let mut store = ParticleStore::new();
    store.add_particle(100.0, 10.0, Point2::new(100.0, 100.0), Vector2::new(5.0, 0.0), Color::TRACER, 0);
    store.add_particle(100.0, 10.0, Point2::new(130.0, 100.0), Vector2::new(-5.0, 0.0), Color::TRACER, 0);
    let before: Vec<(Point2<f64>, Vector2<f64>)> =
        store.iter().map(|p| (p.position, p.velocity)).collect();

    let stats = resolve_collisions(&mut store, 1.0);

    let after: Vec<(Point2<f64>, Vector2<f64>)> =
        store.iter().map(|p| (p.position, p.velocity)).collect();
    assert_eq!(stats, CollisionStats::default());
    assert_eq!(before, after);
}

#[test]
fn test_sweep_conserves_total_momentum() {
    let mut store = ParticleStore::new();
    store.add_particle(25.0, 5.0, Point2::new(50.0, 50.0), Vector2::new(12.0, -4.0), Color::TRACER, 0);
    store.add_particle(36.0, 6.0, Point2::new(58.0, 52.0), Vector2::new(-7.0, 3.0), Color::TRACER, 0);
    store.add_particle(16.0, 4.0, Point2::new(54.0, 60.0), Vector2::new(1.0, -9.0), Color::TRACER, 0);
    let before = store.total_momentum();

    resolve_collisions(&mut store, 0.95);

    let after = store.total_momentum();
    assert_abs_diff_eq!(after.x, before.x, epsilon = 1e-9);
    assert_abs_diff_eq!(after.y, before.y, epsilon = 1e-9);
}
