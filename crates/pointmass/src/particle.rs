use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tsify")]
use tsify_next::Tsify;

use crate::trail::Trail;

/// Stable handle returned by `spawn`; never reused within one simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParticleId(pub u64);

/// Render-only tint. Has no effect on the physics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "tsify", derive(Tsify))]
#[cfg_attr(feature = "tsify", tsify(into_wasm_abi, from_wasm_abi))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Pale blue used for tracers around the attractor
    pub const TRACER: Color = Color::rgb(200, 220, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#RRGGBB` (the leading `#` is optional).
    ///
    /// # Examples
    ///
    /// ```
    /// use pointmass::particle::Color;
    ///
    /// assert_eq!(Color::from_hex("#89ABCD"), Some(Color::rgb(0x89, 0xAB, 0xCD)));
    /// assert_eq!(Color::from_hex("nope"), None);
    /// ```
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::TRACER
    }
}

#[derive(Debug, Clone)]
pub struct Particle {
    pub id: ParticleId,
    pub position: Point2<f64>,
    pub velocity: Vector2<f64>,
    /// Collision footprint. Zero marks a point tracer.
    pub radius: f64,
    pub mass: f64,
    pub color: Color,
    pub trail: Trail,
}

impl Particle {
    pub fn momentum(&self) -> Vector2<f64> {
        self.velocity * self.mass
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.magnitude_squared()
    }

    pub fn speed(&self) -> f64 {
        self.velocity.magnitude()
    }

    pub fn distance_to(&self, other: &Particle) -> f64 {
        (other.position - self.position).magnitude()
    }

    /// Pick test used by drag handling: is `point` inside this particle's disc?
    pub fn contains_point(&self, point: Point2<f64>) -> bool {
        (point - self.position).magnitude_squared() <= self.radius * self.radius
    }

    pub fn is_finite(&self) -> bool {
        self.position.coords.iter().all(|c| c.is_finite())
            && self.velocity.iter().all(|c| c.is_finite())
    }
}

/// Everything needed to spawn a particle.
///
/// Radius and mass are optional; the simulation fills them from its mode
/// (point tracers of unit mass around an attractor, `m = r²` discs in a box).
///
/// # Examples
///
/// ```
/// use pointmass::particle::ParticleSpec;
///
/// let spec = ParticleSpec::at(100.0, 100.0)
///     .with_velocity(50.0, 0.0)
///     .with_radius(10.0)
///     .with_mass(100.0);
///
/// assert_eq!(spec.velocity.x, 50.0);
/// assert_eq!(spec.mass, Some(100.0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "tsify", derive(Tsify))]
#[cfg_attr(feature = "tsify", tsify(into_wasm_abi, from_wasm_abi))]
pub struct ParticleSpec {
    #[cfg_attr(feature = "tsify", tsify(type = "[number, number]"))]
    pub position: Point2<f64>,
    #[cfg_attr(feature = "tsify", tsify(type = "[number, number]"))]
    #[serde(default = "Vector2::zeros")]
    pub velocity: Vector2<f64>,
    #[serde(default)]
    pub radius: Option<f64>,
    #[serde(default)]
    pub mass: Option<f64>,
    #[serde(default)]
    pub color: Option<Color>,
}

impl ParticleSpec {
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            position: Point2::new(x, y),
            velocity: Vector2::zeros(),
            radius: None,
            mass: None,
            color: None,
        }
    }

    pub fn with_velocity(mut self, vx: f64, vy: f64) -> Self {
        self.velocity = Vector2::new(vx, vy);
        self
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = Some(radius);
        self
    }

    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = Some(mass);
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}
