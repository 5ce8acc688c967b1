//! Runtime-adjustable simulation parameters.
//!
//! Every setter clamps into the valid interval instead of failing and hands
//! back the value that was actually applied.

use serde::{Deserialize, Serialize};

#[cfg(feature = "tsify")]
use tsify_next::Tsify;

use crate::error::{Error, Result, ensure_finite};

/// Closed interval the speed multiplier is kept in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tsify", derive(Tsify))]
#[cfg_attr(feature = "tsify", tsify(into_wasm_abi, from_wasm_abi))]
pub struct SpeedRange {
    pub min: f64,
    pub max: f64,
}

impl SpeedRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn clamp(&self, speed: f64) -> f64 {
        speed.clamp(self.min, self.max)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    /// Unscaled step, e.g. one display frame
    pub base_dt: f64,
    speed: f64,
    pub speed_range: SpeedRange,
    restitution: f64,
    /// Multiplicative per-step velocity decay, 1.0 = none
    damping: f64,
    pub trails_enabled: bool,
    /// Floor applied to the attractor mass
    pub min_attractor_mass: f64,
}

impl Parameters {
    pub fn new(base_dt: f64, speed_range: SpeedRange) -> Self {
        Self {
            base_dt,
            speed: speed_range.clamp(1.0),
            speed_range,
            restitution: 1.0,
            damping: 1.0,
            trails_enabled: true,
            min_attractor_mass: 1.0,
        }
    }

    /// Effective step: base step scaled by the speed multiplier
    ///
    /// # Examples
    ///
    /// ```
    /// use pointmass::params::{Parameters, SpeedRange};
    ///
    /// let mut params = Parameters::new(0.016, SpeedRange::new(0.1, 10.0));
    /// params.set_speed(2.0);
    /// assert!((params.dt() - 0.032).abs() < 1e-12);
    ///
    /// // Out-of-range speeds are clamped, never rejected
    /// assert_eq!(params.set_speed(0.0), 0.1);
    /// ```
    pub fn dt(&self) -> f64 {
        self.base_dt * self.speed
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f64) -> f64 {
        self.speed = self.speed_range.clamp(speed);
        self.speed
    }

    pub fn restitution(&self) -> f64 {
        self.restitution
    }

    pub fn set_restitution(&mut self, restitution: f64) -> f64 {
        self.restitution = restitution.clamp(0.0, 1.0);
        self.restitution
    }

    pub fn damping(&self) -> f64 {
        self.damping
    }

    pub fn set_damping(&mut self, damping: f64) -> f64 {
        self.damping = damping.clamp(0.0, 1.0);
        self.damping
    }

    pub fn clamp_attractor_mass(&self, mass: f64) -> f64 {
        mass.max(self.min_attractor_mass)
    }
}

/// A single parameter change, as carried by a command.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", content = "value", rename_all = "snake_case")]
pub enum Parameter {
    AttractorMass(f64),
    SpeedMultiplier(f64),
    Restitution(f64),
    Damping(f64),
    TrailsEnabled(bool),
}

impl Parameter {
    /// Builds a parameter from its string name, the form used by
    /// `set_parameter(name, value)`. Flags treat any non-zero value as `true`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pointmass::params::Parameter;
    ///
    /// assert_eq!(
    ///     Parameter::from_name("speed", 2.0),
    ///     Ok(Parameter::SpeedMultiplier(2.0))
    /// );
    /// assert_eq!(
    ///     Parameter::from_name("trails", 0.0),
    ///     Ok(Parameter::TrailsEnabled(false))
    /// );
    /// assert!(Parameter::from_name("warp", 1.0).is_err());
    /// ```
    pub fn from_name(name: &str, value: f64) -> Result<Self> {
        let value = ensure_finite(value, "parameter value")?;
        match name {
            "attractor_mass" | "mass" => Ok(Parameter::AttractorMass(value)),
            "speed" | "speed_multiplier" => Ok(Parameter::SpeedMultiplier(value)),
            "restitution" => Ok(Parameter::Restitution(value)),
            "damping" | "friction" => Ok(Parameter::Damping(value)),
            "trails" | "trails_enabled" => Ok(Parameter::TrailsEnabled(value != 0.0)),
            other => Err(Error::UnknownParameter(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Parameter::AttractorMass(_) => "attractor_mass",
            Parameter::SpeedMultiplier(_) => "speed_multiplier",
            Parameter::Restitution(_) => "restitution",
            Parameter::Damping(_) => "damping",
            Parameter::TrailsEnabled(_) => "trails_enabled",
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        match *self {
            Parameter::AttractorMass(v)
            | Parameter::SpeedMultiplier(v)
            | Parameter::Restitution(v)
            | Parameter::Damping(v) => ensure_finite(v, self.name()).map(|_| ()),
            Parameter::TrailsEnabled(_) => Ok(()),
        }
    }
}
