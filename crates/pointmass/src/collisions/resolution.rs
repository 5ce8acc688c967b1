//! Contact resolution: positional correction followed by an impulse exchange
//!
//! Pairs are visited once per tick in ascending index order and each pair is
//! resolved against the positions left by the pairs before it. There are no
//! relaxation passes, so dense stacks settle approximately and may drift a
//! little in energy.

use nalgebra::Vector2;

use crate::collisions::detection::{Contact, check_pair};
use crate::particle::Particle;
use crate::state::ParticleStore;

/// What happened to a pair during resolution
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PairOutcome {
    /// Not overlapping, or centers coincide; nothing changed
    Separated,
    /// Overlap removed but the pair was already moving apart
    Corrected,
    /// Overlap removed and an impulse of this magnitude exchanged
    Bounced { impulse: f64 },
}

/// Totals from one resolution sweep
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionStats {
    /// Pairs that overlapped and were pushed apart
    pub contacts: usize,
    /// Contacts that also exchanged an impulse
    pub impulses: usize,
}

/// Push two overlapping discs apart along the contact normal.
///
/// Each moves by the overlap weighted by the *other* particle's share of the
/// total mass: `a` backs off by `overlap·m_b/(m_a+m_b)` and `b` advances by
/// `overlap·m_a/(m_a+m_b)`. That removes the overlap exactly and leaves the
/// pair's center of mass where it was.
pub fn correct_positions(a: &mut Particle, b: &mut Particle, contact: &Contact) {
    let total_mass = a.mass + b.mass;
    let shift = contact.normal * contact.overlap;

    a.position -= shift * (b.mass / total_mass);
    b.position += shift * (a.mass / total_mass);
}

/// Exchange an impulse along `normal` (pointing from `a` to `b`).
///
/// Returns `None` without touching the velocities when the pair is already
/// separating along the normal. Otherwise applies
/// `j = -(1 + e)·v_n / (1/m_a + 1/m_b)` and returns `j`.
///
/// # Examples
///
/// ```
/// use pointmass::collisions::apply_impulse;
/// use pointmass::particle::{Color, Particle, ParticleId};
/// use pointmass::trail::Trail;
/// use nalgebra::{Point2, Vector2};
///
/// let disc = |x: f64, vx: f64| Particle {
///     id: ParticleId(0),
///     position: Point2::new(x, 0.0),
///     velocity: Vector2::new(vx, 0.0),
///     radius: 1.0,
///     mass: 1.0,
///     color: Color::TRACER,
///     trail: Trail::with_capacity(0),
/// };
///
/// let mut a = disc(0.0, 1.0);
/// let mut b = disc(1.5, -1.0);
///
/// let j = apply_impulse(&mut a, &mut b, Vector2::new(1.0, 0.0), 1.0);
///
/// assert_eq!(j, Some(2.0));
/// assert_eq!(a.velocity.x, -1.0);
/// assert_eq!(b.velocity.x, 1.0);
/// ```
pub fn apply_impulse(
    a: &mut Particle,
    b: &mut Particle,
    normal: Vector2<f64>,
    restitution: f64,
) -> Option<f64> {
    let normal_speed = (b.velocity - a.velocity).dot(&normal);
    if normal_speed > 0.0 {
        return None;
    }

    let j = -(1.0 + restitution) * normal_speed / (1.0 / a.mass + 1.0 / b.mass);
    let impulse = normal * j;
    a.velocity -= impulse / a.mass;
    b.velocity += impulse / b.mass;

    Some(j)
}

/// Detect and resolve a single pair
pub fn resolve_pair(a: &mut Particle, b: &mut Particle, restitution: f64) -> PairOutcome {
    let Some(contact) = check_pair(a, b) else {
        return PairOutcome::Separated;
    };

    correct_positions(a, b, &contact);

    match apply_impulse(a, b, contact.normal, restitution) {
        Some(impulse) => PairOutcome::Bounced { impulse },
        None => PairOutcome::Corrected,
    }
}

/// One sequential sweep over every pair `(i, j)` with `i < j`.
///
/// # Examples
///
/// ```
/// use pointmass::collisions::{detect_contacts, resolve_collisions};
/// use pointmass::particle::Color;
/// use pointmass::state::ParticleStore;
/// use nalgebra::{Point2, Vector2};
///
/// let mut store = ParticleStore::new();
/// store.add_particle(100.0, 10.0, Point2::new(100.0, 100.0), Vector2::new(50.0, 0.0), Color::TRACER, 0);
/// store.add_particle(100.0, 10.0, Point2::new(115.0, 100.0), Vector2::new(-50.0, 0.0), Color::TRACER, 0);
///
/// let stats = resolve_collisions(&mut store, 1.0);
///
/// assert_eq!(stats.contacts, 1);
/// assert_eq!(stats.impulses, 1);
/// assert!(detect_contacts(&store).is_empty());
/// ```
pub fn resolve_collisions(store: &mut ParticleStore, restitution: f64) -> CollisionStats {
    let particles = store.as_mut_slice();
    let n = particles.len();
    let mut stats = CollisionStats::default();

    for i in 0..n {
        let (head, tail) = particles.split_at_mut(i + 1);
        let a = &mut head[i];

        for b in tail.iter_mut() {
            match resolve_pair(a, b, restitution) {
                PairOutcome::Separated => {}
                PairOutcome::Corrected => stats.contacts += 1,
                PairOutcome::Bounced { .. } => {
                    stats.contacts += 1;
                    stats.impulses += 1;
                }
            }
        }
    }

    stats
}
