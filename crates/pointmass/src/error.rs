//! Recoverable errors for the command and configuration surface.
//!
//! Physical inputs are clamped rather than rejected, so these only cover
//! malformed commands and configurations. Broken physics invariants (non-positive
//! mass, negative radius, non-finite state after a step) panic instead.

use thiserror::Error;

use crate::particle::ParticleId;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("unknown parameter: {0}")]
    UnknownParameter(String),

    #[error("parameter `{parameter}` has no effect in {mode} mode")]
    UnsupportedParameter {
        parameter: &'static str,
        mode: &'static str,
    },

    #[error("`{command}` is not available in {mode} mode")]
    UnsupportedCommand {
        command: &'static str,
        mode: &'static str,
    },

    #[error("non-finite value for {0}")]
    NonFiniteInput(&'static str),

    #[error("particle {0:?} not found")]
    ParticleNotFound(ParticleId),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Reject NaN and infinities coming in from the command surface.
pub(crate) fn ensure_finite(value: f64, what: &'static str) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::NonFiniteInput(what))
    }
}
