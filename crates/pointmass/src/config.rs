//! Simulation configuration and the two stock presets.

use serde::{Deserialize, Serialize};

use crate::boundary::Domain;
use crate::error::{Error, Result};
use crate::params::SpeedRange;
use crate::spawn::SpawnTuning;

/// Mode-specific physics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ModeConfig {
    /// Tracers orbiting a fixed central mass
    Attractor {
        /// Gravitational constant
        g: f64,
        /// Starting attractor mass
        mass: f64,
        /// Floor the mass can never be scaled below
        min_mass: f64,
        /// Softening length added in quadrature to the distance
        softening: f64,
    },
    /// Colliding discs in a walled box
    Container {
        /// Downward acceleration (+y)
        gravity: f64,
        restitution: f64,
        /// Per-step velocity multiplier, 1.0 = none
        damping: f64,
    },
}

impl ModeConfig {
    pub fn name(&self) -> &'static str {
        match self {
            ModeConfig::Attractor { .. } => "attractor",
            ModeConfig::Container { .. } => "container",
        }
    }
}

/// Multipliers applied by the speed up / speed down controls
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedStep {
    pub up: f64,
    pub down: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SimulationConfig {
    pub domain: Domain,
    /// Unscaled step length
    pub base_dt: f64,
    pub speed_range: SpeedRange,
    pub initial_speed: f64,
    pub speed_step: SpeedStep,
    /// Positions kept per trail, 0 disables history
    pub trail_length: usize,
    pub trails_enabled: bool,
    /// Particles placed when the simulation is built
    pub initial_count: usize,
    pub seed: u64,
    pub spawn: SpawnTuning,
    pub mode: ModeConfig,
}

impl SimulationConfig {
    /// Tracers around a central mass
    ///
    /// # Examples
    ///
    /// ```
    /// use pointmass::config::SimulationConfig;
    ///
    /// let config = SimulationConfig::black_hole();
    /// assert_eq!(config.domain.width, 1000.0);
    /// assert_eq!(config.trail_length, 30);
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn black_hole() -> Self {
        Self {
            domain: Domain::new(1000.0, 700.0),
            base_dt: 1.0 / 60.0,
            speed_range: SpeedRange::new(0.125, 8.0),
            initial_speed: 1.0,
            speed_step: SpeedStep { up: 2.0, down: 0.5 },
            trail_length: 30,
            trails_enabled: true,
            initial_count: 80,
            seed: 0,
            spawn: SpawnTuning::default(),
            mode: ModeConfig::Attractor {
                g: 10.0,
                mass: 40.0,
                min_mass: 1.0,
                softening: 6.0,
            },
        }
    }

    /// Bouncing discs in a box
    pub fn container() -> Self {
        Self {
            domain: Domain::new(800.0, 600.0),
            base_dt: 0.016,
            speed_range: SpeedRange::new(0.1, 10.0),
            initial_speed: 1.0,
            speed_step: SpeedStep { up: 1.1, down: 0.9 },
            trail_length: 0,
            trails_enabled: false,
            initial_count: 1,
            seed: 0,
            spawn: SpawnTuning::default(),
            mode: ModeConfig::Container {
                gravity: 200.0,
                restitution: 0.95,
                damping: 1.0,
            },
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_initial_count(mut self, count: usize) -> Self {
        self.initial_count = count;
        self
    }

    /// Reject configurations the engine cannot run.
    ///
    /// Only structural problems are errors. Values with a natural valid
    /// interval, such as restitution, are clamped when applied.
    pub fn validate(&self) -> Result<()> {
        positive(self.domain.width, "domain width")?;
        positive(self.domain.height, "domain height")?;
        positive(self.base_dt, "base_dt")?;
        positive(self.speed_range.min, "speed_range.min")?;
        finite(self.speed_range.max, "speed_range.max")?;
        if self.speed_range.min > self.speed_range.max {
            return Err(invalid(format!(
                "speed_range is inverted: [{}, {}]",
                self.speed_range.min, self.speed_range.max
            )));
        }
        finite(self.initial_speed, "initial_speed")?;
        positive(self.speed_step.up, "speed_step.up")?;
        positive(self.speed_step.down, "speed_step.down")?;

        let spawn = &self.spawn;
        for (name, interval) in [
            ("spawn.orbitJitter", spawn.orbit_jitter),
            ("spawn.cloudRadius", spawn.cloud_radius),
            ("spawn.cloudVelocityFactor", spawn.cloud_velocity_factor),
            ("spawn.fillRadius", spawn.fill_radius),
        ] {
            finite(interval.min, name)?;
            finite(interval.max, name)?;
            if !interval.is_ordered() {
                return Err(invalid(format!("{name} is inverted")));
            }
        }
        if spawn.fill_radius.min < 0.0 {
            return Err(invalid("spawn.fillRadius must be non-negative".to_string()));
        }
        for (name, value) in [
            ("spawn.minOrbitRadius", spawn.min_orbit_radius),
            ("spawn.cloudPerturbation", spawn.cloud_perturbation),
            ("spawn.driftSpeed", spawn.drift_speed),
            ("spawn.flingThreshold", spawn.fling_threshold),
            ("spawn.flingScale", spawn.fling_scale),
            ("spawn.fillSpeed", spawn.fill_speed),
        ] {
            non_negative(value, name)?;
        }

        match self.mode {
            ModeConfig::Attractor {
                g,
                mass,
                min_mass,
                softening,
            } => {
                finite(g, "g")?;
                positive(mass, "attractor mass")?;
                positive(min_mass, "minimum attractor mass")?;
                positive(softening, "softening")?;
            }
            ModeConfig::Container {
                gravity,
                restitution,
                damping,
            } => {
                finite(gravity, "gravity")?;
                finite(restitution, "restitution")?;
                finite(damping, "damping")?;
            }
        }

        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::black_hole()
    }
}

fn invalid(message: String) -> Error {
    Error::InvalidConfig(message)
}

fn finite(value: f64, name: &str) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be finite, got {value}")))
    }
}

fn non_negative(value: f64, name: &str) -> Result<()> {
    finite(value, name)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be non-negative, got {value}")))
    }
}

fn positive(value: f64, name: &str) -> Result<()> {
    finite(value, name)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be positive, got {value}")))
    }
}
