//! Read-only views handed to the renderer between ticks.

use serde::Serialize;

#[cfg(feature = "tsify")]
use tsify_next::Tsify;

use crate::particle::{Color, Particle};

/// One particle as the renderer sees it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "tsify", derive(Tsify))]
#[cfg_attr(feature = "tsify", tsify(into_wasm_abi))]
pub struct ParticleView {
    pub id: u64,
    pub position: [f64; 2],
    pub velocity: [f64; 2],
    pub radius: f64,
    pub color: Color,
    /// Oldest first
    pub trail: Vec<[f64; 2]>,
}

impl ParticleView {
    pub fn from_particle(particle: &Particle, include_trail: bool) -> Self {
        let trail = if include_trail {
            particle.trail.points().map(|p| [p.x, p.y]).collect()
        } else {
            Vec::new()
        };
        Self {
            id: particle.id.0,
            position: [particle.position.x, particle.position.y],
            velocity: [particle.velocity.x, particle.velocity.y],
            radius: particle.radius,
            color: particle.color,
            trail,
        }
    }
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "tsify", derive(Tsify))]
#[cfg_attr(feature = "tsify", tsify(into_wasm_abi))]
pub struct Snapshot {
    pub time: f64,
    pub paused: bool,
    pub speed: f64,
    pub dt: f64,
    /// Attractor mode only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attractor_mass: Option<f64>,
    /// Attractor mode only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horizon_radius: Option<f64>,
    pub particles: Vec<ParticleView>,
}

/// Conserved and semi-conserved quantities, for HUDs and tests
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "tsify", derive(Tsify))]
#[cfg_attr(feature = "tsify", tsify(into_wasm_abi))]
pub struct Diagnostics {
    pub time: f64,
    pub ticks: u64,
    pub particle_count: usize,
    pub kinetic_energy: f64,
    pub potential_energy: f64,
    pub total_energy: f64,
    pub momentum: [f64; 2],
    /// Particles removed at the horizon since the last reset
    pub absorbed_total: usize,
}
