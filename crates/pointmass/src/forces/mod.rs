//! Acceleration models
//!
//! Two interchangeable models are provided and picked once when a simulation
//! is built: a softened central attractor for tracer particles, and uniform
//! gravity for particles bouncing around a box.

use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

use crate::state::ParticleStore;

pub mod central;
pub mod uniform;

#[cfg(test)]
mod central_test;

pub use central::{CentralAttractor, circular_velocity};
pub use uniform::UniformGravity;

/// Fixed point mass sitting at the center of the domain.
///
/// The absorption radius is derived from the mass on every read, so it can
/// never go stale when the mass is rescaled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Attractor {
    pub center: Point2<f64>,
    pub mass: f64,
}

impl Attractor {
    pub fn new(center: Point2<f64>, mass: f64) -> Self {
        Self { center, mass }
    }

    /// `r_s = 2·M` with the gravitational constant and reference speed both 1
    ///
    /// # Examples
    ///
    /// ```
    /// use pointmass::forces::Attractor;
    /// use nalgebra::Point2;
    ///
    /// let mut attractor = Attractor::new(Point2::new(500.0, 350.0), 40.0);
    /// assert_eq!(attractor.horizon_radius(), 80.0);
    ///
    /// attractor.mass *= 1.5;
    /// assert_eq!(attractor.horizon_radius(), 120.0);
    /// ```
    pub fn horizon_radius(&self) -> f64 {
        2.0 * self.mass
    }

    pub fn distance_to(&self, position: Point2<f64>) -> f64 {
        (position - self.center).magnitude()
    }
}

/// Acceleration model, selected once at construction
#[derive(Debug, Clone, PartialEq)]
pub enum ForceModel {
    CentralAttractor(CentralAttractor),
    UniformGravity(UniformGravity),
}

impl ForceModel {
    /// Acceleration at `position`. Pure: depends only on the position and the
    /// model's current state.
    pub fn acceleration(&self, position: Point2<f64>) -> Vector2<f64> {
        match self {
            ForceModel::CentralAttractor(model) => model.acceleration(position),
            ForceModel::UniformGravity(model) => model.acceleration(position),
        }
    }

    /// Potential energy of every particle in the field, for diagnostics
    pub fn potential_energy(&self, store: &ParticleStore) -> f64 {
        match self {
            ForceModel::CentralAttractor(model) => model.potential_energy(store),
            ForceModel::UniformGravity(model) => model.potential_energy(store),
        }
    }

    pub fn attractor(&self) -> Option<&Attractor> {
        match self {
            ForceModel::CentralAttractor(model) => Some(&model.attractor),
            ForceModel::UniformGravity(_) => None,
        }
    }

    pub fn attractor_mut(&mut self) -> Option<&mut Attractor> {
        match self {
            ForceModel::CentralAttractor(model) => Some(&mut model.attractor),
            ForceModel::UniformGravity(_) => None,
        }
    }
}

impl From<CentralAttractor> for ForceModel {
    fn from(model: CentralAttractor) -> Self {
        ForceModel::CentralAttractor(model)
    }
}

impl From<UniformGravity> for ForceModel {
    fn from(model: UniformGravity) -> Self {
        ForceModel::UniformGravity(model)
    }
}
