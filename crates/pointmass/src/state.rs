use nalgebra::{Point2, Vector2};

use crate::particle::{Color, Particle, ParticleId};
use crate::trail::Trail;

/// Ordered collection that exclusively owns every particle record.
///
/// Iteration order is insertion order, which is also the order the collision
/// sweep visits pairs in. Ids come from a monotonic counter and are never
/// handed out twice, even after `clear`.
#[derive(Debug, Clone, Default)]
pub struct ParticleStore {
    particles: Vec<Particle>,
    next_id: u64,
}

impl ParticleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a particle and returns its id
    ///
    /// # Panics
    ///
    /// Panics if `mass` is not strictly positive or `radius` is negative; both
    /// are resolved by the caller before they reach the store.
    ///
    /// # Examples
    ///
    /// ```
    /// use pointmass::particle::Color;
    /// use pointmass::state::ParticleStore;
    /// use nalgebra::{Point2, Vector2};
    ///
    /// let mut store = ParticleStore::new();
    /// let id = store.add_particle(
    ///     1.0,
    ///     0.0,
    ///     Point2::new(10.0, 0.0),
    ///     Vector2::new(0.0, 2.0),
    ///     Color::TRACER,
    ///     30,
    /// );
    ///
    /// assert_eq!(store.len(), 1);
    /// assert!(store.get(id).is_some());
    /// ```
    pub fn add_particle(
        &mut self,
        mass: f64,
        radius: f64,
        position: Point2<f64>,
        velocity: Vector2<f64>,
        color: Color,
        trail_capacity: usize,
    ) -> ParticleId {
        assert!(mass > 0.0, "particle mass must be positive, got {mass}");
        assert!(radius >= 0.0, "particle radius must be non-negative, got {radius}");

        let id = ParticleId(self.next_id);
        self.next_id += 1;
        self.particles.push(Particle {
            id,
            position,
            velocity,
            radius,
            mass,
            color,
            trail: Trail::with_capacity(trail_capacity),
        });
        id
    }

    pub fn remove(&mut self, id: ParticleId) -> Option<Particle> {
        self.particles
            .iter()
            .position(|p| p.id == id)
            .map(|idx| self.particles.remove(idx))
    }

    /// Removes every listed particle in a single pass, keeping the order of
    /// the survivors. Returns how many were removed.
    pub fn remove_batch(&mut self, ids: &[ParticleId]) -> usize {
        if ids.is_empty() {
            return 0;
        }
        let before = self.particles.len();
        self.particles.retain(|p| !ids.contains(&p.id));
        before - self.particles.len()
    }

    /// Drops every particle, returning how many there were
    pub fn clear(&mut self) -> usize {
        let count = self.particles.len();
        self.particles.clear();
        count
    }

    pub fn get(&self, id: ParticleId) -> Option<&Particle> {
        self.particles.iter().find(|p| p.id == id)
    }

    pub fn get_mut(&mut self, id: ParticleId) -> Option<&mut Particle> {
        self.particles.iter_mut().find(|p| p.id == id)
    }

    /// The most recently added particle whose disc contains `point`
    pub fn topmost_at(&self, point: Point2<f64>) -> Option<ParticleId> {
        self.particles
            .iter()
            .rev()
            .find(|p| p.contains_point(point))
            .map(|p| p.id)
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.particles.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Particle> {
        self.particles.iter_mut()
    }

    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn total_mass(&self) -> f64 {
        self.particles.iter().map(|p| p.mass).sum()
    }

    /// Total linear momentum. Conserved by the collision resolver, not by
    /// walls or external forces.
    pub fn total_momentum(&self) -> Vector2<f64> {
        self.particles
            .iter()
            .map(|p| p.momentum())
            .fold(Vector2::zeros(), |acc, m| acc + m)
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.particles.iter().map(|p| p.kinetic_energy()).sum()
    }

    /// Mass-weighted mean position, or `None` for an empty store
    pub fn center_of_mass(&self) -> Option<Point2<f64>> {
        let total = self.total_mass();
        if self.particles.is_empty() || total <= 0.0 {
            return None;
        }
        let weighted = self
            .particles
            .iter()
            .map(|p| p.position.coords * p.mass)
            .fold(Vector2::zeros(), |acc, c| acc + c);
        Some(Point2::from(weighted / total))
    }
}

impl<'a> IntoIterator for &'a ParticleStore {
    type Item = &'a Particle;
    type IntoIter = std::slice::Iter<'a, Particle>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
