//! Softened inverse-square attraction toward a single fixed point

use nalgebra::{Point2, Vector2};

use crate::forces::Attractor;
use crate::state::ParticleStore;

/// Central attractor with Plummer-style softening.
///
/// `a = -G·M·(p - c) / (|p - c|² + s²)^{3/2}`
///
/// The softening length `s` keeps the acceleration bounded as a particle
/// approaches the center. Near `r ≈ s` the force is slightly underestimated
/// compared to a pure inverse-square law.
///
/// # Examples
///
/// ```
/// use pointmass::forces::{Attractor, CentralAttractor};
/// use nalgebra::Point2;
///
/// let model = CentralAttractor::new(Attractor::new(Point2::new(0.0, 0.0), 40.0), 10.0, 6.0);
/// let accel = model.acceleration(Point2::new(100.0, 0.0));
///
/// // Pulls toward the center
/// assert!(accel.x < 0.0);
/// assert_eq!(accel.y, 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CentralAttractor {
    pub attractor: Attractor,
    /// Gravitational constant in simulation units
    pub g: f64,
    /// Softening length, strictly positive
    pub softening: f64,
}

impl CentralAttractor {
    pub fn new(attractor: Attractor, g: f64, softening: f64) -> Self {
        Self {
            attractor,
            g,
            softening,
        }
    }

    pub fn acceleration(&self, position: Point2<f64>) -> Vector2<f64> {
        let offset = position - self.attractor.center;
        let r2 = offset.magnitude_squared();

        // Exactly zero at the center regardless of softening
        if r2 == 0.0 {
            return Vector2::zeros();
        }

        let eps2 = self.softening * self.softening;
        let denom = (r2 + eps2).powf(1.5);
        -offset * (self.g * self.attractor.mass / denom)
    }

    /// Softened potential `-G·M·m / √(r² + s²)` summed over all particles
    pub fn potential_energy(&self, store: &ParticleStore) -> f64 {
        let eps2 = self.softening * self.softening;
        let gm = self.g * self.attractor.mass;

        store
            .iter()
            .map(|p| {
                let r2 = (p.position - self.attractor.center).magnitude_squared();
                -gm * p.mass / (r2 + eps2).sqrt()
            })
            .sum()
    }
}

/// Speed of a circular orbit at distance `r`, `√(G·M / r)`.
///
/// `r` is floored at 1e-3 so the result stays finite at the center.
///
/// # Examples
///
/// ```
/// use pointmass::forces::circular_velocity;
///
/// let v = circular_velocity(10.0, 40.0, 100.0);
/// assert!((v - 2.0).abs() < 1e-12);
/// ```
pub fn circular_velocity(g: f64, mass: f64, r: f64) -> f64 {
    (g * mass / r.max(1e-3)).sqrt()
}
