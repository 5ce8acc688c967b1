//! The tick pipeline and the command/query surface.
//!
//! One [`Simulation`] owns the particle store, the parameters and the force
//! model. Each [`tick`](Simulation::tick) runs to completion:
//!
//! 1. Apply queued commands in submission order
//! 2. Integrate (skipped while paused)
//! 3. Absorb at the horizon, or reflect off the walls and resolve collisions
//! 4. Append positions to the trails
//! 5. Advance the clock

use std::collections::VecDeque;

use log::{debug, info, warn};
use nalgebra::{Point2, Vector2};
use rand::SeedableRng;
use rand_chacha::ChaChaRng;

use crate::boundary::{self, Boundary, Domain};
use crate::collisions::{CollisionStats, resolve_collisions};
use crate::command::Command;
use crate::config::{ModeConfig, SimulationConfig};
use crate::error::{Error, Result, ensure_finite};
use crate::forces::{Attractor, CentralAttractor, ForceModel, UniformGravity};
use crate::integrator::{Integrator, SemiImplicitEuler};
use crate::params::{Parameter, Parameters};
use crate::particle::{Color, ParticleId, ParticleSpec};
use crate::snapshot::{Diagnostics, ParticleView, Snapshot};
use crate::spawn;
use crate::state::ParticleStore;

/// Discs spawned in a box with a non-positive radius get this one instead
pub const MIN_DISC_RADIUS: f64 = 1.0;

/// What one call to [`Simulation::tick`] did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Integration steps taken, including queued single steps
    pub steps: usize,
    /// Particles removed at the horizon, in store order
    pub absorbed: Vec<ParticleId>,
    pub wall_hits: usize,
    pub collisions: CollisionStats,
    pub commands_applied: usize,
    pub commands_rejected: usize,
}

impl TickReport {
    pub fn stepped(&self) -> bool {
        self.steps > 0
    }

    fn merge(&mut self, other: TickReport) {
        self.steps += other.steps;
        self.absorbed.extend(other.absorbed);
        self.wall_hits += other.wall_hits;
        self.collisions.contacts += other.collisions.contacts;
        self.collisions.impulses += other.collisions.impulses;
        self.commands_applied += other.commands_applied;
        self.commands_rejected += other.commands_rejected;
    }
}

pub struct Simulation {
    config: SimulationConfig,
    store: ParticleStore,
    params: Parameters,
    force: ForceModel,
    boundary: Boundary,
    integrator: SemiImplicitEuler,
    rng: ChaChaRng,
    queue: VecDeque<Command>,
    paused: bool,
    time: f64,
    ticks: u64,
    absorbed_total: usize,
}

impl Simulation {
    /// Build a simulation and place its initial particles.
    ///
    /// # Examples
    ///
    /// ```
    /// use pointmass::config::SimulationConfig;
    /// use pointmass::simulation::Simulation;
    ///
    /// let mut sim = Simulation::new(SimulationConfig::black_hole()).unwrap();
    /// assert_eq!(sim.particle_count(), 80);
    /// assert_eq!(sim.horizon_radius(), Some(80.0));
    ///
    /// let report = sim.tick();
    /// assert!(report.stepped());
    /// ```
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;

        let mut params = Parameters::new(config.base_dt, config.speed_range);
        params.set_speed(config.initial_speed);
        params.trails_enabled = config.trails_enabled;

        let (force, boundary): (ForceModel, Boundary) = match config.mode {
            ModeConfig::Attractor {
                g,
                mass,
                min_mass,
                softening,
            } => {
                params.min_attractor_mass = min_mass;
                let attractor =
                    Attractor::new(config.domain.center(), params.clamp_attractor_mass(mass));
                (
                    CentralAttractor::new(attractor, g, softening).into(),
                    Boundary::Horizon,
                )
            }
            ModeConfig::Container {
                gravity,
                restitution,
                damping,
            } => {
                params.set_restitution(restitution);
                params.set_damping(damping);
                (
                    UniformGravity::downward(gravity).into(),
                    Boundary::Walls(config.domain),
                )
            }
        };

        let mut sim = Self {
            rng: ChaChaRng::seed_from_u64(config.seed),
            config,
            store: ParticleStore::new(),
            params,
            force,
            boundary,
            integrator: SemiImplicitEuler,
            queue: VecDeque::new(),
            paused: false,
            time: 0.0,
            ticks: 0,
            absorbed_total: 0,
        };

        let placed = sim.populate(sim.config.initial_count)?;
        info!(
            "created {} simulation: {}x{} domain, {} particles, seed {}",
            sim.mode_name(),
            sim.config.domain.width,
            sim.config.domain.height,
            placed,
            sim.config.seed
        );

        Ok(sim)
    }

    // =========================================================================
    // Tick pipeline
    // =========================================================================

    /// Queue a command for the start of the next tick
    pub fn submit(&mut self, command: Command) {
        self.queue.push_back(command);
    }

    pub fn pending_commands(&self) -> usize {
        self.queue.len()
    }

    /// Apply queued commands, then advance one step unless paused
    pub fn tick(&mut self) -> TickReport {
        let mut report = self.drain_commands();
        if !self.paused {
            let stepped = self.advance();
            report.merge(stepped);
        }
        report
    }

    /// Advance exactly one step, but only while paused.
    ///
    /// Returns `None` and does nothing when the simulation is running.
    pub fn single_step(&mut self) -> Option<TickReport> {
        if !self.paused {
            debug!("single_step ignored while running");
            return None;
        }
        Some(self.advance())
    }

    fn drain_commands(&mut self) -> TickReport {
        let mut report = TickReport::default();
        while let Some(command) = self.queue.pop_front() {
            match self.apply(command) {
                Ok(applied) => {
                    report.merge(applied);
                    report.commands_applied += 1;
                }
                Err(err) => {
                    warn!("command rejected: {err}");
                    report.commands_rejected += 1;
                }
            }
        }
        report
    }

    /// Apply one command immediately.
    ///
    /// The report only carries steps taken by a `SingleStep`; everything else
    /// returns an empty one.
    pub fn apply(&mut self, command: Command) -> Result<TickReport> {
        let mut report = TickReport::default();
        let outcome = match command {
            Command::Spawn(spec) => self.spawn(spec).map(drop),
            Command::SpawnOrbital { x, y } => self.spawn_orbital(x, y).map(drop),
            Command::SpawnCloud { count } => {
                let count = count.unwrap_or(self.config.spawn.cloud_count);
                self.spawn_cloud(count).map(drop)
            }
            Command::SpawnDrifting { x, y } => self.spawn_drifting(x, y).map(drop),
            Command::Fling { start, end } => self.fling(start, end).map(drop),
            Command::Clear => {
                self.clear();
                Ok(())
            }
            Command::Reset => self.reset(),
            Command::SetParameter(parameter) => self.set_parameter(parameter).map(drop),
            Command::ScaleAttractorMass(factor) => self.scale_attractor_mass(factor).map(drop),
            Command::ScaleSpeed(factor) => self.scale_speed(factor).map(drop),
            Command::SpeedUp => {
                self.speed_up();
                Ok(())
            }
            Command::SpeedDown => {
                self.speed_down();
                Ok(())
            }
            Command::Drag {
                id,
                position,
                velocity,
            } => self.drag_particle(id, position, velocity),
            Command::Pause => {
                self.pause();
                Ok(())
            }
            Command::Resume => {
                self.resume();
                Ok(())
            }
            Command::TogglePause => {
                self.toggle_pause();
                Ok(())
            }
            Command::SingleStep => {
                if let Some(stepped) = self.single_step() {
                    report.merge(stepped);
                }
                Ok(())
            }
        };
        outcome.map(|()| report)
    }

    fn advance(&mut self) -> TickReport {
        let dt = self.params.dt();
        let mut report = TickReport {
            steps: 1,
            ..TickReport::default()
        };

        self.integrator
            .step(&mut self.store, dt, &self.force, self.params.damping());

        match &self.boundary {
            Boundary::Horizon => {
                if let Some(attractor) = self.force.attractor() {
                    report.absorbed = boundary::absorb(&mut self.store, attractor);
                }
                if !report.absorbed.is_empty() {
                    debug!("absorbed {} particles", report.absorbed.len());
                    self.absorbed_total += report.absorbed.len();
                }
            }
            Boundary::Walls(domain) => {
                report.wall_hits = boundary::reflect_all(&mut self.store, domain);
                report.collisions = resolve_collisions(&mut self.store, self.params.restitution());
            }
        }

        for particle in self.store.iter_mut() {
            let position = particle.position;
            particle.trail.push(position);
        }

        self.time += dt;
        self.ticks += 1;
        report
    }

    // =========================================================================
    // Spawning
    // =========================================================================

    /// Add a particle, filling in whatever the `ParticleSpec` leaves open from the mode.
    ///
    /// Around an attractor the defaults are a point tracer of unit mass. In a
    /// box the radius is drawn from the fill range, the mass is `r²` and the
    /// color is a random pastel. Non-positive masses fall back to the default.
    /// Disc radii are kept between [`MIN_DISC_RADIUS`] and half the box's
    /// shorter side.
    pub fn spawn(&mut self, spec: ParticleSpec) -> Result<ParticleId> {
        ensure_finite(spec.position.x, "spawn x")?;
        ensure_finite(spec.position.y, "spawn y")?;
        ensure_finite(spec.velocity.x, "spawn vx")?;
        ensure_finite(spec.velocity.y, "spawn vy")?;
        if let Some(radius) = spec.radius {
            ensure_finite(radius, "spawn radius")?;
        }
        if let Some(mass) = spec.mass {
            ensure_finite(mass, "spawn mass")?;
        }

        let given_mass = spec.mass.filter(|&m| m > 0.0);
        let (radius, mass, color) = match self.config.mode {
            ModeConfig::Attractor { .. } => {
                let radius = spec.radius.unwrap_or(0.0).max(0.0);
                (radius, given_mass.unwrap_or(1.0), spec.color.unwrap_or(Color::TRACER))
            }
            ModeConfig::Container { .. } => {
                let mut radius = match spec.radius {
                    Some(r) => r,
                    None => self.config.spawn.fill_radius.sample(&mut self.rng),
                };
                if radius <= 0.0 {
                    debug!("disc radius {radius} raised to {MIN_DISC_RADIUS}");
                    radius = MIN_DISC_RADIUS;
                }
                let max_radius = self.config.domain.max_disc_radius();
                if radius > max_radius {
                    debug!("disc radius {radius} lowered to {max_radius}");
                    radius = max_radius;
                }
                let color = match spec.color {
                    Some(c) => c,
                    None => spawn::pastel(&mut self.rng, &self.config.spawn.palette),
                };
                (radius, given_mass.unwrap_or(radius * radius), color)
            }
        };

        let id = self.store.add_particle(
            mass,
            radius,
            spec.position,
            spec.velocity,
            color,
            self.config.trail_length,
        );
        debug!("spawned {id:?} at ({}, {})", spec.position.x, spec.position.y);
        Ok(id)
    }

    /// Click near the attractor. `Ok(None)` when the click is too close to
    /// the center to orbit.
    pub fn spawn_orbital(&mut self, x: f64, y: f64) -> Result<Option<ParticleId>> {
        let (attractor, g) = self.central("spawn_orbital")?;
        let position = finite_point(x, y)?;
        match spawn::orbital(&mut self.rng, &self.config.spawn, g, &attractor, position) {
            Some(spec) => self.spawn(spec).map(Some),
            None => {
                debug!("orbital spawn at ({x}, {y}) is inside the minimum radius");
                Ok(None)
            }
        }
    }

    /// A ring of tracers around the attractor, at most `spawn.max_batch` of them
    pub fn spawn_cloud(&mut self, count: usize) -> Result<Vec<ParticleId>> {
        let (attractor, g) = self.central("spawn_cloud")?;
        if count > self.config.spawn.max_batch {
            debug!("cloud of {count} capped at {}", self.config.spawn.max_batch);
        }
        let specs = spawn::cloud(&mut self.rng, &self.config.spawn, g, &attractor, count);
        specs.into_iter().map(|spec| self.spawn(spec)).collect()
    }

    pub fn spawn_drifting(&mut self, x: f64, y: f64) -> Result<ParticleId> {
        let position = finite_point(x, y)?;
        let spec = spawn::drifting(&mut self.rng, &self.config.spawn, position);
        self.spawn(spec)
    }

    /// Drag-to-throw. `Ok(None)` for drags too short to count.
    pub fn fling(&mut self, start: Point2<f64>, end: Point2<f64>) -> Result<Option<ParticleId>> {
        let start = finite_point(start.x, start.y)?;
        let end = finite_point(end.x, end.y)?;
        match spawn::fling(&self.config.spawn, start, end) {
            Some(spec) => self.spawn(spec).map(Some),
            None => Ok(None),
        }
    }

    /// Pack up to `count` non-overlapping discs into the box, at most
    /// `spawn.max_batch` per call
    pub fn fill(&mut self, count: usize) -> Result<Vec<ParticleId>> {
        let domain = match self.boundary {
            Boundary::Walls(domain) => domain,
            Boundary::Horizon => {
                return Err(Error::UnsupportedCommand {
                    command: "fill",
                    mode: self.mode_name(),
                });
            }
        };
        let count = count.min(self.config.spawn.max_batch);
        let specs = spawn::fill(&mut self.rng, &self.config.spawn, &domain, count);
        if specs.len() < count {
            debug!("placed {} of {count} discs", specs.len());
        }
        specs.into_iter().map(|spec| self.spawn(spec)).collect()
    }

    fn populate(&mut self, count: usize) -> Result<usize> {
        let placed = match self.config.mode {
            ModeConfig::Attractor { .. } => self.spawn_cloud(count)?,
            ModeConfig::Container { .. } => self.fill(count)?,
        };
        Ok(placed.len())
    }

    fn central(&self, command: &'static str) -> Result<(Attractor, f64)> {
        match &self.force {
            ForceModel::CentralAttractor(model) => Ok((model.attractor, model.g)),
            ForceModel::UniformGravity(_) => Err(Error::UnsupportedCommand {
                command,
                mode: self.mode_name(),
            }),
        }
    }

    // =========================================================================
    // Store-level commands
    // =========================================================================

    /// Remove every particle, returning how many there were
    pub fn clear(&mut self) -> usize {
        let removed = self.store.clear();
        info!("cleared {removed} particles");
        removed
    }

    /// Rebuild the population and restart the clock. Parameters are kept.
    ///
    /// Around an attractor a fresh initial cloud is spawned. A box is refilled
    /// with as many discs as it held, or the configured initial count when it
    /// was empty.
    pub fn reset(&mut self) -> Result<()> {
        let count = match self.config.mode {
            ModeConfig::Attractor { .. } => self.config.initial_count,
            ModeConfig::Container { .. } if self.store.is_empty() => self.config.initial_count,
            ModeConfig::Container { .. } => self.store.len(),
        };

        self.store.clear();
        self.time = 0.0;
        self.ticks = 0;
        self.absorbed_total = 0;
        let placed = self.populate(count)?;
        info!("reset {} simulation with {placed} particles", self.mode_name());
        Ok(())
    }

    /// Pick the topmost particle under a point
    pub fn particle_at(&self, x: f64, y: f64) -> Option<ParticleId> {
        self.store.topmost_at(Point2::new(x, y))
    }

    /// Move a particle to the cursor and give it the cursor's velocity
    pub fn drag_particle(
        &mut self,
        id: ParticleId,
        position: Point2<f64>,
        velocity: Vector2<f64>,
    ) -> Result<()> {
        let position = finite_point(position.x, position.y)?;
        ensure_finite(velocity.x, "drag vx")?;
        ensure_finite(velocity.y, "drag vy")?;

        let particle = self.store.get_mut(id).ok_or(Error::ParticleNotFound(id))?;
        particle.position = position;
        particle.velocity = velocity;
        Ok(())
    }

    // =========================================================================
    // Parameters
    // =========================================================================

    /// Apply a parameter change, clamped into its valid interval.
    ///
    /// Returns the value actually applied. Parameters that mean nothing in
    /// the current mode, such as restitution around an attractor, are
    /// rejected rather than silently stored.
    ///
    /// # Examples
    ///
    /// ```
    /// use pointmass::config::SimulationConfig;
    /// use pointmass::params::Parameter;
    /// use pointmass::simulation::Simulation;
    ///
    /// let mut sim = Simulation::new(SimulationConfig::container().with_initial_count(0)).unwrap();
    ///
    /// let applied = sim.set_parameter(Parameter::Restitution(1.7)).unwrap();
    /// assert_eq!(applied, Parameter::Restitution(1.0));
    ///
    /// assert!(sim.set_parameter(Parameter::AttractorMass(10.0)).is_err());
    /// ```
    pub fn set_parameter(&mut self, parameter: Parameter) -> Result<Parameter> {
        parameter.validate()?;
        let mode = self.mode_name();
        let unsupported = || Error::UnsupportedParameter {
            parameter: parameter.name(),
            mode,
        };

        let applied = match parameter {
            Parameter::AttractorMass(mass) => {
                let mass = self.params.clamp_attractor_mass(mass);
                let attractor = self.force.attractor_mut().ok_or_else(unsupported)?;
                attractor.mass = mass;
                Parameter::AttractorMass(mass)
            }
            Parameter::SpeedMultiplier(speed) => {
                Parameter::SpeedMultiplier(self.params.set_speed(speed))
            }
            Parameter::Restitution(e) => {
                if !self.is_container() {
                    return Err(unsupported());
                }
                Parameter::Restitution(self.params.set_restitution(e))
            }
            Parameter::Damping(d) => {
                if !self.is_container() {
                    return Err(unsupported());
                }
                Parameter::Damping(self.params.set_damping(d))
            }
            Parameter::TrailsEnabled(enabled) => {
                self.params.trails_enabled = enabled;
                parameter
            }
        };

        if applied != parameter {
            debug!("{} clamped: {parameter:?} -> {applied:?}", parameter.name());
        }
        Ok(applied)
    }

    /// String form of [`set_parameter`](Self::set_parameter)
    pub fn set_parameter_named(&mut self, name: &str, value: f64) -> Result<Parameter> {
        let parameter = Parameter::from_name(name, value)?;
        self.set_parameter(parameter)
    }

    /// Multiply the attractor mass, respecting the floor. Returns the new mass.
    pub fn scale_attractor_mass(&mut self, factor: f64) -> Result<f64> {
        let factor = ensure_finite(factor, "mass factor")?;
        let current = self.central("scale_attractor_mass")?.0.mass;
        match self.set_parameter(Parameter::AttractorMass(current * factor))? {
            Parameter::AttractorMass(mass) => Ok(mass),
            _ => Ok(current),
        }
    }

    /// Multiply the speed multiplier, clamped to its range. Returns the new speed.
    pub fn scale_speed(&mut self, factor: f64) -> Result<f64> {
        let factor = ensure_finite(factor, "speed factor")?;
        let speed = self.params.speed() * factor;
        Ok(self.params.set_speed(speed))
    }

    pub fn speed_up(&mut self) -> f64 {
        let speed = self.params.speed() * self.config.speed_step.up;
        self.params.set_speed(speed)
    }

    pub fn speed_down(&mut self) -> f64 {
        let speed = self.params.speed() * self.config.speed_step.down;
        self.params.set_speed(speed)
    }

    // =========================================================================
    // Pause control
    // =========================================================================

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Returns the new paused state
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Render view of the current state. Trails are left empty while they
    /// are switched off.
    pub fn snapshot(&self) -> Snapshot {
        let include_trail = self.params.trails_enabled;
        Snapshot {
            time: self.time,
            paused: self.paused,
            speed: self.params.speed(),
            dt: self.params.dt(),
            attractor_mass: self.attractor().map(|a| a.mass),
            horizon_radius: self.horizon_radius(),
            particles: self
                .store
                .iter()
                .map(|p| ParticleView::from_particle(p, include_trail))
                .collect(),
        }
    }

    pub fn diagnostics(&self) -> Diagnostics {
        let kinetic_energy = self.store.kinetic_energy();
        let potential_energy = self.force.potential_energy(&self.store);
        let momentum = self.store.total_momentum();
        Diagnostics {
            time: self.time,
            ticks: self.ticks,
            particle_count: self.store.len(),
            kinetic_energy,
            potential_energy,
            total_energy: kinetic_energy + potential_energy,
            momentum: [momentum.x, momentum.y],
            absorbed_total: self.absorbed_total,
        }
    }

    /// `2·M` around an attractor, `None` in a box
    pub fn horizon_radius(&self) -> Option<f64> {
        self.attractor().map(Attractor::horizon_radius)
    }

    pub fn attractor(&self) -> Option<&Attractor> {
        self.force.attractor()
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    /// Current effective step
    pub fn dt(&self) -> f64 {
        self.params.dt()
    }

    pub fn speed(&self) -> f64 {
        self.params.speed()
    }

    pub fn particle_count(&self) -> usize {
        self.store.len()
    }

    pub fn particles(&self) -> &ParticleStore {
        &self.store
    }

    pub fn parameters(&self) -> &Parameters {
        &self.params
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn domain(&self) -> Domain {
        self.config.domain
    }

    pub fn mode_name(&self) -> &'static str {
        self.config.mode.name()
    }

    fn is_container(&self) -> bool {
        matches!(self.config.mode, ModeConfig::Container { .. })
    }
}

fn finite_point(x: f64, y: f64) -> Result<Point2<f64>> {
    Ok(Point2::new(
        ensure_finite(x, "x coordinate")?,
        ensure_finite(y, "y coordinate")?,
    ))
}
