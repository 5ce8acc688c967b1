//! Discrete-time 2D point-mass physics.
//!
//! Two modes share one tick pipeline:
//!
//! - **Attractor**: tracers orbit a softened central mass and are removed
//!   when they fall inside its horizon (`r_s = 2·M`).
//! - **Container**: finite discs fall under uniform gravity, bounce off the
//!   walls of a box and collide with each other.
//!
//! The presentation layer drives a [`Simulation`] with [`Command`]s and draws
//! the [`Snapshot`] it reads back after each tick.

pub mod boundary;
pub mod collisions;
pub mod command;
pub mod config;
pub mod error;
pub mod forces;
pub mod integrator;
pub mod params;
pub mod particle;
pub mod simulation;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod trail;

#[cfg(test)]
mod config_test;
#[cfg(test)]
mod params_test;
#[cfg(test)]
mod trail_test;

pub use command::Command;
pub use config::{ModeConfig, SimulationConfig};
pub use error::{Error, Result};
pub use particle::{Color, ParticleId, ParticleSpec};
pub use simulation::{Simulation, TickReport};
pub use snapshot::{Diagnostics, ParticleView, Snapshot};
