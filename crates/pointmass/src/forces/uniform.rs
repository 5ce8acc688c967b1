//! Constant acceleration field

use nalgebra::{Point2, Vector2};

use crate::state::ParticleStore;

/// The same acceleration everywhere, independent of position.
///
/// Screen coordinates are used, so a positive `y` component pulls toward the
/// bottom of the domain.
#[derive(Debug, Clone, PartialEq)]
pub struct UniformGravity {
    pub gravity: Vector2<f64>,
}

impl UniformGravity {
    pub fn new(gravity: Vector2<f64>) -> Self {
        Self { gravity }
    }

    /// Downward gravity of magnitude `g`
    pub fn downward(g: f64) -> Self {
        Self::new(Vector2::new(0.0, g))
    }

    pub fn none() -> Self {
        Self::new(Vector2::zeros())
    }

    pub fn acceleration(&self, _position: Point2<f64>) -> Vector2<f64> {
        self.gravity
    }

    /// `-m·(g · p)` summed over all particles, measured from the origin
    pub fn potential_energy(&self, store: &ParticleStore) -> f64 {
        store
            .iter()
            .map(|p| -p.mass * self.gravity.dot(&p.position.coords))
            .sum()
    }
}
