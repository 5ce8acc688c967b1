//! Requests from the presentation layer.
//!
//! Commands are queued with [`Simulation::submit`](crate::simulation::Simulation::submit)
//! and applied in order at the start of the next tick, so a tick never sees
//! a half-applied change.

use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

use crate::params::Parameter;
use crate::particle::{ParticleId, ParticleSpec};

/// Mass multiplier for a normal press of the mass-up control
pub const MASS_STEP_UP: f64 = 1.1;
/// Mass multiplier for a normal press of the mass-down control
pub const MASS_STEP_DOWN: f64 = 0.9;
/// Mass multiplier while the fast modifier is held
pub const MASS_STEP_FAST: f64 = 1.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum Command {
    Spawn(ParticleSpec),
    /// Click near the attractor: circular orbit through the point
    SpawnOrbital { x: f64, y: f64 },
    /// A ring of tracers around the attractor; `None` uses the configured
    /// cloud size
    SpawnCloud {
        #[serde(default)]
        count: Option<usize>,
    },
    /// Spawn with a small random velocity
    SpawnDrifting { x: f64, y: f64 },
    /// Drag-to-throw from `start` to `end`
    Fling { start: Point2<f64>, end: Point2<f64> },
    Clear,
    Reset,
    SetParameter(Parameter),
    ScaleAttractorMass(f64),
    ScaleSpeed(f64),
    SpeedUp,
    SpeedDown,
    /// Move a particle under the cursor and give it the cursor's velocity
    Drag {
        id: ParticleId,
        position: Point2<f64>,
        velocity: Vector2<f64>,
    },
    Pause,
    Resume,
    TogglePause,
    SingleStep,
}

impl Command {
    /// Grow the attractor mass, faster with the modifier held
    pub fn mass_up(fast: bool) -> Self {
        Command::ScaleAttractorMass(if fast { MASS_STEP_FAST } else { MASS_STEP_UP })
    }

    /// Shrink the attractor mass, faster with the modifier held
    pub fn mass_down(fast: bool) -> Self {
        Command::ScaleAttractorMass(if fast {
            1.0 / MASS_STEP_FAST
        } else {
            MASS_STEP_DOWN
        })
    }
}
