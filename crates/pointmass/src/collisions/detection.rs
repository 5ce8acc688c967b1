//! Overlap detection between discs
//!
//! Uses a direct O(N²) scan over ascending index pairs. Expected particle
//! counts are in the tens to low hundreds, where a broad phase buys nothing.

use nalgebra::Vector2;

use crate::particle::{Particle, ParticleId};
use crate::state::ParticleStore;

/// An overlapping pair found by [`check_pair`]
#[derive(Debug, Clone, PartialEq)]
pub struct Contact {
    pub a: ParticleId,
    pub b: ParticleId,
    /// Center separation
    pub distance: f64,
    /// Penetration depth, `r_a + r_b - distance`
    pub overlap: f64,
    /// Unit vector from `a` toward `b`
    pub normal: Vector2<f64>,
}

/// Test two discs for overlap.
///
/// Returns `None` when they are apart or just touching (`d >= r_a + r_b`),
/// and also when the centers coincide (`d == 0`) since no normal exists.
///
/// # Examples
///
/// ```
/// use pointmass::collisions::check_pair;
/// use pointmass::particle::Color;
/// use pointmass::state::ParticleStore;
/// use nalgebra::{Point2, Vector2};
///
/// let mut store = ParticleStore::new();
/// store.add_particle(100.0, 10.0, Point2::new(100.0, 100.0), Vector2::zeros(), Color::TRACER, 0);
/// store.add_particle(100.0, 10.0, Point2::new(115.0, 100.0), Vector2::zeros(), Color::TRACER, 0);
///
/// let contact = check_pair(&store.as_slice()[0], &store.as_slice()[1]).unwrap();
/// assert_eq!(contact.overlap, 5.0);
/// assert_eq!(contact.normal, Vector2::new(1.0, 0.0));
/// ```
pub fn check_pair(a: &Particle, b: &Particle) -> Option<Contact> {
    let delta = b.position - a.position;
    let reach = a.radius + b.radius;
    let dist2 = delta.magnitude_squared();

    if dist2 >= reach * reach || dist2 == 0.0 {
        return None;
    }

    let distance = dist2.sqrt();
    Some(Contact {
        a: a.id,
        b: b.id,
        distance,
        overlap: reach - distance,
        normal: delta / distance,
    })
}

/// Every overlapping pair, in ascending `(i, j)` order with `i < j`.
///
/// Read-only; useful for diagnostics and for checking that a resolution pass
/// left nothing behind.
pub fn detect_contacts(store: &ParticleStore) -> Vec<Contact> {
    let particles = store.as_slice();
    let n = particles.len();

    (0..n)
        .flat_map(|i| ((i + 1)..n).filter_map(move |j| check_pair(&particles[i], &particles[j])))
        .collect()
}
