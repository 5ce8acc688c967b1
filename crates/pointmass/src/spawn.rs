//! Seeded particle spawners
//!
//! These are interaction helpers, not physics: they turn a click, a drag or a
//! "fill the box" request into concrete positions and velocities. All
//! randomness comes from a caller-owned `ChaChaRng` so a seeded simulation
//! replays exactly.

use std::f64::consts::TAU;

use nalgebra::{Point2, Vector2};
use rand::Rng;
use rand::seq::IndexedRandom;
use rand_chacha::ChaChaRng;
use serde::{Deserialize, Serialize};

use crate::boundary::Domain;
use crate::forces::{Attractor, circular_velocity};
use crate::particle::{Color, ParticleSpec};

/// Closed interval sampled uniformly; `min == max` always yields `min`, as
/// does any interval whose width is not finite
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn sample(&self, rng: &mut ChaChaRng) -> f64 {
        if self.min >= self.max || !(self.max - self.min).is_finite() {
            return self.min;
        }
        rng.random_range(self.min..=self.max)
    }

    pub fn is_ordered(&self) -> bool {
        self.min <= self.max
    }
}

/// Tuning constants for every spawner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpawnTuning {
    /// Orbital clicks closer than this to the attractor are ignored
    pub min_orbit_radius: f64,
    /// Per-axis factor applied to the circular velocity of an orbital click
    pub orbit_jitter: Interval,
    /// Cloud size when a request does not name one
    pub cloud_count: usize,
    /// Upper bound on the particles a single cloud or fill request places
    pub max_batch: usize,
    /// Distance band around the attractor that clouds are drawn from
    pub cloud_radius: Interval,
    /// Per-axis factor applied to the circular velocity of cloud particles
    pub cloud_velocity_factor: Interval,
    /// Extra per-axis kick, as a fraction of the circular velocity
    pub cloud_perturbation: f64,
    /// Drift spawns get a velocity in `[-drift_speed, drift_speed]` per axis
    pub drift_speed: f64,
    /// Drags shorter than this are treated as clicks
    pub fling_threshold: f64,
    /// Velocity per unit of drag length
    pub fling_scale: f64,
    pub fill_attempts_per_particle: usize,
    pub fill_radius: Interval,
    /// Fill velocities are drawn from `[-fill_speed, fill_speed]` per axis
    pub fill_speed: f64,
    /// Hex digits used to build random fill colors
    pub palette: String,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            min_orbit_radius: 5.0,
            orbit_jitter: Interval::new(0.95, 1.05),
            cloud_count: 60,
            max_batch: 2000,
            cloud_radius: Interval::new(120.0, 320.0),
            cloud_velocity_factor: Interval::new(0.8, 1.2),
            cloud_perturbation: 0.05,
            drift_speed: 0.6,
            fling_threshold: 6.0,
            fling_scale: 0.06,
            fill_attempts_per_particle: 200,
            fill_radius: Interval::new(18.0, 18.0),
            fill_speed: 150.0,
            palette: "89ABCDEF".to_string(),
        }
    }
}

/// Velocity for a circular orbit through `position`, counter-clockwise in
/// screen coordinates, before any jitter.
pub fn orbital_velocity(g: f64, attractor: &Attractor, position: Point2<f64>) -> Vector2<f64> {
    let offset = position - attractor.center;
    let r = offset.magnitude();
    if r == 0.0 {
        return Vector2::zeros();
    }
    let v_circ = circular_velocity(g, attractor.mass, r);
    Vector2::new(-offset.y, offset.x) * (v_circ / r)
}

/// A click near the attractor: spawn on a roughly circular orbit.
///
/// Returns `None` when the click is within `min_orbit_radius` of the center.
pub fn orbital(
    rng: &mut ChaChaRng,
    tuning: &SpawnTuning,
    g: f64,
    attractor: &Attractor,
    position: Point2<f64>,
) -> Option<ParticleSpec> {
    if attractor.distance_to(position) < tuning.min_orbit_radius {
        return None;
    }

    let v = orbital_velocity(g, attractor, position);
    let vx = v.x * tuning.orbit_jitter.sample(rng);
    let vy = v.y * tuning.orbit_jitter.sample(rng);
    Some(ParticleSpec::at(position.x, position.y).with_velocity(vx, vy))
}

/// A ring-shaped cloud of `count` tracers on perturbed circular orbits,
/// capped at `max_batch`
pub fn cloud(
    rng: &mut ChaChaRng,
    tuning: &SpawnTuning,
    g: f64,
    attractor: &Attractor,
    count: usize,
) -> Vec<ParticleSpec> {
    let c = attractor.center;
    (0..count.min(tuning.max_batch))
        .map(|_| {
            let r = tuning.cloud_radius.sample(rng);
            let theta = rng.random_range(0.0..TAU);
            let (sin, cos) = theta.sin_cos();
            let v_circ = circular_velocity(g, attractor.mass, r);

            let mut vx = -v_circ * sin * tuning.cloud_velocity_factor.sample(rng);
            let mut vy = v_circ * cos * tuning.cloud_velocity_factor.sample(rng);
            vx += perturbation(rng, tuning.cloud_perturbation) * v_circ;
            vy += perturbation(rng, tuning.cloud_perturbation) * v_circ;

            ParticleSpec::at(c.x + r * cos, c.y + r * sin).with_velocity(vx, vy)
        })
        .collect()
}

fn perturbation(rng: &mut ChaChaRng, half_width: f64) -> f64 {
    Interval::new(-half_width, half_width).sample(rng)
}

/// Spawn with a small random drift
pub fn drifting(rng: &mut ChaChaRng, tuning: &SpawnTuning, position: Point2<f64>) -> ParticleSpec {
    let vx = perturbation(rng, tuning.drift_speed);
    let vy = perturbation(rng, tuning.drift_speed);
    ParticleSpec::at(position.x, position.y).with_velocity(vx, vy)
}

/// Drag-to-throw. The particle starts where the drag began and moves along
/// the drag direction.
///
/// Returns `None` for drags no longer than `fling_threshold`; the caller
/// should handle those as plain clicks.
///
/// # Examples
///
/// ```
/// use pointmass::spawn::{SpawnTuning, fling};
/// use nalgebra::Point2;
///
/// let tuning = SpawnTuning::default();
///
/// let spec = fling(&tuning, Point2::new(100.0, 100.0), Point2::new(200.0, 150.0)).unwrap();
/// assert_eq!(spec.position, Point2::new(100.0, 100.0));
/// assert!((spec.velocity.x - 6.0).abs() < 1e-12);
/// assert!((spec.velocity.y - 3.0).abs() < 1e-12);
///
/// assert!(fling(&tuning, Point2::new(100.0, 100.0), Point2::new(103.0, 104.0)).is_none());
/// ```
pub fn fling(tuning: &SpawnTuning, start: Point2<f64>, end: Point2<f64>) -> Option<ParticleSpec> {
    let drag = end - start;
    if drag.magnitude() <= tuning.fling_threshold {
        return None;
    }
    let v = drag * tuning.fling_scale;
    Some(ParticleSpec::at(start.x, start.y).with_velocity(v.x, v.y))
}

/// Random light color built from the palette digits
pub fn pastel(rng: &mut ChaChaRng, palette: &str) -> Color {
    let digits: Vec<char> = palette.chars().filter(|c| c.is_ascii_hexdigit()).collect();
    let hex: String = (0..6)
        .map(|_| digits.choose(rng).copied().unwrap_or('F'))
        .collect();
    Color::from_hex(&hex).unwrap_or(Color::TRACER)
}

/// Place up to `count` non-overlapping discs inside `domain`, capped at
/// `max_batch`.
///
/// Uses rejection sampling with at most `count × fill_attempts_per_particle`
/// tries, so a crowded box may come back with fewer than asked for. Mass is
/// `r²`. Discs that cannot fit in the domain at all are never placed.
pub fn fill(
    rng: &mut ChaChaRng,
    tuning: &SpawnTuning,
    domain: &Domain,
    count: usize,
) -> Vec<ParticleSpec> {
    let count = count.min(tuning.max_batch);
    let mut placed: Vec<ParticleSpec> = Vec::new();
    let max_attempts = count.saturating_mul(tuning.fill_attempts_per_particle);
    let mut attempts = 0;

    while placed.len() < count && attempts < max_attempts {
        attempts += 1;

        let r = tuning.fill_radius.sample(rng);
        if 2.0 * r > domain.width || 2.0 * r > domain.height {
            continue;
        }
        let x = Interval::new(r, domain.width - r).sample(rng);
        let y = Interval::new(r, domain.height - r).sample(rng);
        let vx = perturbation(rng, tuning.fill_speed);
        let vy = perturbation(rng, tuning.fill_speed);
        let color = pastel(rng, &tuning.palette);

        let position = Point2::new(x, y);
        let overlaps = placed.iter().any(|other| {
            let reach = r + other.radius.unwrap_or(0.0);
            (other.position - position).magnitude_squared() < reach * reach
        });
        if overlaps {
            continue;
        }

        placed.push(
            ParticleSpec::at(x, y)
                .with_velocity(vx, vy)
                .with_radius(r)
                .with_mass(r * r)
                .with_color(color),
        );
    }

    placed
}
