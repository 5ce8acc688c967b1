//! Domain boundaries: horizon absorption and wall reflection
//!
//! Around an attractor, particles that fall inside the horizon are removed.
//! Inside a box, particles bounce off the four walls.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

#[cfg(feature = "tsify")]
use tsify_next::Tsify;

use crate::forces::Attractor;
use crate::particle::{Particle, ParticleId};
use crate::state::ParticleStore;

/// Axis-aligned rectangle spanning `[0, width] × [0, height]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tsify", derive(Tsify))]
#[cfg_attr(feature = "tsify", tsify(into_wasm_abi, from_wasm_abi))]
pub struct Domain {
    pub width: f64,
    pub height: f64,
}

impl Domain {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Point2<f64> {
        Point2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Largest disc that fits at all
    pub fn max_disc_radius(&self) -> f64 {
        0.5 * self.width.min(self.height)
    }

    /// Whether a disc of `radius` at `position` lies fully inside
    pub fn contains_disc(&self, position: Point2<f64>, radius: f64) -> bool {
        position.x - radius >= 0.0
            && position.x + radius <= self.width
            && position.y - radius >= 0.0
            && position.y + radius <= self.height
    }
}

/// Which walls a particle bounced off during one reflection pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallHits {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

impl WallHits {
    pub fn any(&self) -> bool {
        self.left || self.right || self.top || self.bottom
    }

    pub fn count(&self) -> usize {
        [self.left, self.right, self.top, self.bottom]
            .iter()
            .filter(|&&hit| hit)
            .count()
    }
}

/// Boundary policy, selected per mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Boundary {
    /// Remove particles that cross the attractor's horizon
    Horizon,
    /// Reflect particles off the edges of the domain
    Walls(Domain),
}

/// Reflect a particle off any wall its disc crosses.
///
/// Each edge is handled on its own, so a corner hit flips both components.
/// The center is clamped back to `radius` from the wall and the normal
/// velocity component is pointed back into the domain with its magnitude
/// preserved.
///
/// # Examples
///
/// ```
/// use pointmass::boundary::{Domain, reflect_walls};
/// use pointmass::particle::{Color, Particle, ParticleId};
/// use pointmass::trail::Trail;
/// use nalgebra::{Point2, Vector2};
///
/// let mut p = Particle {
///     id: ParticleId(0),
///     position: Point2::new(9.2, 300.0),
///     velocity: Vector2::new(-50.0, 0.0),
///     radius: 10.0,
///     mass: 100.0,
///     color: Color::TRACER,
///     trail: Trail::with_capacity(0),
/// };
///
/// let hits = reflect_walls(&mut p, &Domain::new(800.0, 600.0));
///
/// assert!(hits.left);
/// assert_eq!(p.position.x, 10.0);
/// assert_eq!(p.velocity.x, 50.0);
/// ```
pub fn reflect_walls(particle: &mut Particle, domain: &Domain) -> WallHits {
    let r = particle.radius;
    let mut hits = WallHits::default();

    if particle.position.x - r < 0.0 {
        particle.position.x = r;
        particle.velocity.x = particle.velocity.x.abs();
        hits.left = true;
    }
    if particle.position.x + r > domain.width {
        particle.position.x = domain.width - r;
        particle.velocity.x = -particle.velocity.x.abs();
        hits.right = true;
    }
    if particle.position.y - r < 0.0 {
        particle.position.y = r;
        particle.velocity.y = particle.velocity.y.abs();
        hits.top = true;
    }
    if particle.position.y + r > domain.height {
        particle.position.y = domain.height - r;
        particle.velocity.y = -particle.velocity.y.abs();
        hits.bottom = true;
    }

    hits
}

/// Reflect every particle in the store, returning the number of wall contacts
pub fn reflect_all(store: &mut ParticleStore, domain: &Domain) -> usize {
    store
        .iter_mut()
        .map(|p| reflect_walls(p, domain).count())
        .sum()
}

/// Ids of particles at or inside the attractor's horizon.
///
/// Every particle is evaluated exactly once and nothing is removed here.
pub fn detect_absorptions(store: &ParticleStore, attractor: &Attractor) -> Vec<ParticleId> {
    let horizon = attractor.horizon_radius();
    store
        .iter()
        .filter(|p| attractor.distance_to(p.position) <= horizon)
        .map(|p| p.id)
        .collect()
}

/// Detect then remove absorbed particles as one batch.
///
/// # Examples
///
/// ```
/// use pointmass::boundary::absorb;
/// use pointmass::forces::Attractor;
/// use pointmass::particle::Color;
/// use pointmass::state::ParticleStore;
/// use nalgebra::{Point2, Vector2};
///
/// let attractor = Attractor::new(Point2::new(0.0, 0.0), 40.0);
/// let mut store = ParticleStore::new();
/// store.add_particle(1.0, 0.0, Point2::new(50.0, 0.0), Vector2::zeros(), Color::TRACER, 0);
/// store.add_particle(1.0, 0.0, Point2::new(300.0, 0.0), Vector2::zeros(), Color::TRACER, 0);
///
/// let absorbed = absorb(&mut store, &attractor);
///
/// assert_eq!(absorbed.len(), 1);
/// assert_eq!(store.len(), 1);
/// ```
pub fn absorb(store: &mut ParticleStore, attractor: &Attractor) -> Vec<ParticleId> {
    let absorbed = detect_absorptions(store, attractor);
    store.remove_batch(&absorbed);
    absorbed
}
