//! Time integration
//!
//! The engine advances particles with semi-implicit (symplectic) Euler:
//! the velocity is kicked first and the new velocity is used for the drift.
//! That ordering is what keeps orbits from spiralling outward over long runs,
//! which explicit Euler does. Explicit Euler is kept only for comparison.

use crate::forces::ForceModel;
use crate::state::ParticleStore;

/// A fixed-step time integrator.
pub trait Integrator {
    /// Advance every particle by one step of length `dt`.
    ///
    /// # Arguments
    ///
    /// * `store` - Particles to advance (modified in place)
    /// * `dt` - Step length in simulation time units
    /// * `force` - Acceleration model
    /// * `damping` - Multiplicative velocity decay applied each step, 1.0 = none
    ///
    /// # Panics
    ///
    /// Panics if any particle ends the step with a non-finite position or
    /// velocity. That only happens when the model or the step is broken.
    fn step(&self, store: &mut ParticleStore, dt: f64, force: &ForceModel, damping: f64);

    /// Advance by `n_steps` steps of length `dt`
    fn integrate(
        &self,
        store: &mut ParticleStore,
        dt: f64,
        n_steps: usize,
        force: &ForceModel,
        damping: f64,
    ) {
        for _ in 0..n_steps {
            self.step(store, dt, force, damping);
        }
    }
}

/// Semi-implicit (symplectic) Euler.
///
/// 1. Kick: v ← (v + a(x)·dt)·damping
/// 2. Drift: x ← x + v·dt
///
/// One acceleration evaluation per particle, at the pre-update position.
///
/// # Examples
///
/// ```
/// use pointmass::forces::{ForceModel, UniformGravity};
/// use pointmass::integrator::{Integrator, SemiImplicitEuler};
/// use pointmass::particle::Color;
/// use pointmass::state::ParticleStore;
/// use nalgebra::{Point2, Vector2};
///
/// let mut store = ParticleStore::new();
/// let id = store.add_particle(1.0, 1.0, Point2::new(0.0, 0.0), Vector2::new(1.0, 0.0), Color::TRACER, 0);
///
/// let force: ForceModel = UniformGravity::downward(10.0).into();
/// SemiImplicitEuler.step(&mut store, 0.5, &force, 1.0);
///
/// let p = store.get(id).unwrap();
/// assert_eq!(p.velocity, Vector2::new(1.0, 5.0));
/// // Drift uses the already-updated velocity
/// assert_eq!(p.position, Point2::new(0.5, 2.5));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SemiImplicitEuler;

impl Integrator for SemiImplicitEuler {
    fn step(&self, store: &mut ParticleStore, dt: f64, force: &ForceModel, damping: f64) {
        store.iter_mut().for_each(|p| {
            let accel = force.acceleration(p.position);
            p.velocity = (p.velocity + accel * dt) * damping;
            p.position += p.velocity * dt;
        });

        assert_finite(store);
    }
}

/// Explicit (forward) Euler, for comparison only.
///
/// Drifts with the old velocity before kicking, which pumps energy into
/// orbits. Do not use it to drive a simulation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExplicitEuler;

impl Integrator for ExplicitEuler {
    fn step(&self, store: &mut ParticleStore, dt: f64, force: &ForceModel, damping: f64) {
        store.iter_mut().for_each(|p| {
            let accel = force.acceleration(p.position);
            p.position += p.velocity * dt;
            p.velocity = (p.velocity + accel * dt) * damping;
        });

        assert_finite(store);
    }
}

fn assert_finite(store: &ParticleStore) {
    if let Some(p) = store.iter().find(|p| !p.is_finite()) {
        panic!(
            "particle {:?} left the step with non-finite state: position {:?}, velocity {:?}",
            p.id, p.position, p.velocity
        );
    }
}
