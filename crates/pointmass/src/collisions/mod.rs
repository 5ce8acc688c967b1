//! Pairwise circle-circle collisions
//!
//! Overlapping discs are pushed apart along the contact normal (positional
//! correction) and then exchange an impulse along that normal, scaled by the
//! coefficient of restitution.

pub mod detection;
pub mod resolution;

#[cfg(test)]
mod resolution_test;

pub use detection::{Contact, check_pair, detect_contacts};
pub use resolution::{
    CollisionStats, PairOutcome, apply_impulse, correct_positions, resolve_collisions,
    resolve_pair,
};
