//! WASM bindings for the pointmass engine.
//!
//! A JavaScript renderer plays the presentation layer: it turns input events
//! into commands and draws the snapshot read back after each tick.
//!
//! # Architecture
//!
//! Simulations live in thread-local storage (WASM is single-threaded).
//! Functions hand out opaque simulation IDs for the mutable state and return
//! serializable snapshots for reading it.
//!
//! # Example Usage (JavaScript)
//!
//! ```javascript
//! // Attractor mode with the stock settings
//! const simId = simulation_create("black_hole");
//!
//! // Left click near the attractor
//! simulation_spawn_orbital(simId, 700, 350);
//!
//! // Once per animation frame
//! simulation_tick(simId);
//! const frame = simulation_snapshot(simId);
//! ```

use std::cell::RefCell;
use std::collections::HashMap;

use log::info;
use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use pointmass::{Command, ParticleId, ParticleSpec, Simulation, SimulationConfig, TickReport};

// =============================================================================
// Serialization helpers
// =============================================================================

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsError::new(&e.to_string()))
}

fn from_js<T: serde::de::DeserializeOwned>(value: JsValue) -> Result<T, JsError> {
    serde_wasm_bindgen::from_value(value).map_err(|e| JsError::new(&e.to_string()))
}

fn engine_error(err: pointmass::Error) -> JsError {
    JsError::new(&err.to_string())
}

// =============================================================================
// Thread-local storage for simulation state
// =============================================================================

thread_local! {
    static SIMULATIONS: RefCell<HashMap<u32, Simulation>> = RefCell::new(HashMap::new());
    static NEXT_SIM_ID: RefCell<u32> = const { RefCell::new(0) };
}

fn register(simulation: Simulation) -> u32 {
    let id = NEXT_SIM_ID.with(|next_id| {
        let mut id = next_id.borrow_mut();
        let current = *id;
        *id += 1;
        current
    });

    info!("registered {} simulation {id}", simulation.mode_name());
    SIMULATIONS.with(|sims| {
        sims.borrow_mut().insert(id, simulation);
    });

    id
}

fn with_sim<T>(
    sim_id: u32,
    f: impl FnOnce(&Simulation) -> Result<T, JsError>,
) -> Result<T, JsError> {
    SIMULATIONS.with(|sims| {
        let sims = sims.borrow();
        let sim = sims
            .get(&sim_id)
            .ok_or_else(|| JsError::new(&format!("Simulation {} not found", sim_id)))?;
        f(sim)
    })
}

fn with_sim_mut<T>(
    sim_id: u32,
    f: impl FnOnce(&mut Simulation) -> Result<T, JsError>,
) -> Result<T, JsError> {
    SIMULATIONS.with(|sims| {
        let mut sims = sims.borrow_mut();
        let sim = sims
            .get_mut(&sim_id)
            .ok_or_else(|| JsError::new(&format!("Simulation {} not found", sim_id)))?;
        f(sim)
    })
}

// =============================================================================
// Serializable types for JavaScript interop
// =============================================================================

/// Per-tick summary for JavaScript
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TickSummary {
    /// Integration steps taken (0 while paused)
    pub steps: usize,
    /// IDs swallowed by the horizon this tick
    pub absorbed: Vec<u64>,
    pub wall_hits: usize,
    pub contacts: usize,
    pub commands_rejected: usize,
    pub time: f64,
}

impl TickSummary {
    fn new(report: &TickReport, time: f64) -> Self {
        Self {
            steps: report.steps,
            absorbed: report.absorbed.iter().map(|id| id.0).collect(),
            wall_hits: report.wall_hits,
            contacts: report.collisions.contacts,
            commands_rejected: report.commands_rejected,
            time,
        }
    }
}

/// Spawn request coming from a click or a script
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpawnInput {
    pub position: [f64; 2],
    #[serde(default)]
    pub velocity: [f64; 2],
    #[serde(default)]
    pub radius: Option<f64>,
    #[serde(default)]
    pub mass: Option<f64>,
    /// `#RRGGBB`
    #[serde(default)]
    pub color: Option<String>,
}

impl SpawnInput {
    fn into_spec(self) -> Result<ParticleSpec, JsError> {
        let mut spec = ParticleSpec::at(self.position[0], self.position[1])
            .with_velocity(self.velocity[0], self.velocity[1]);
        spec.radius = self.radius;
        spec.mass = self.mass;
        if let Some(hex) = self.color {
            let color = pointmass::Color::from_hex(&hex)
                .ok_or_else(|| JsError::new(&format!("invalid color {hex}")))?;
            spec.color = Some(color);
        }
        Ok(spec)
    }
}

// =============================================================================
// Simulation management
// =============================================================================

/// Create a simulation from a preset name: "black_hole" or "container".
///
/// # Returns
/// The simulation ID
#[wasm_bindgen]
pub fn simulation_create(preset: &str) -> Result<u32, JsError> {
    let config = match preset {
        "black_hole" | "attractor" => SimulationConfig::black_hole(),
        "container" | "box" => SimulationConfig::container(),
        other => return Err(JsError::new(&format!("unknown preset {other}"))),
    };
    let simulation = Simulation::new(config).map_err(engine_error)?;
    Ok(register(simulation))
}

/// Create a simulation from a full configuration object.
///
/// Missing fields take the attractor preset's values.
#[wasm_bindgen]
pub fn simulation_create_with_config(config: JsValue) -> Result<u32, JsError> {
    let config: SimulationConfig = from_js(config)?;
    let simulation = Simulation::new(config).map_err(engine_error)?;
    Ok(register(simulation))
}

/// Delete a simulation to free memory.
#[wasm_bindgen]
pub fn simulation_delete(sim_id: u32) {
    let removed = SIMULATIONS.with(|sims| sims.borrow_mut().remove(&sim_id));
    if removed.is_some() {
        info!("deleted simulation {sim_id}");
    }
}

// =============================================================================
// Commands
// =============================================================================

/// Queue a command object for the next tick, e.g.
/// `{ type: "scaleSpeed", data: 2 }`, `{ type: "spawnCloud", data: {} }` or
/// `{ type: "clear" }`.
#[wasm_bindgen]
pub fn simulation_submit(sim_id: u32, command: JsValue) -> Result<(), JsError> {
    let command: Command = from_js(command)?;
    with_sim_mut(sim_id, |sim| {
        sim.submit(command);
        Ok(())
    })
}

/// Spawn a particle immediately.
///
/// # Returns
/// The new particle's ID
#[wasm_bindgen]
pub fn simulation_spawn(sim_id: u32, input: JsValue) -> Result<u64, JsError> {
    let spec = from_js::<SpawnInput>(input)?.into_spec()?;
    with_sim_mut(sim_id, |sim| sim.spawn(spec).map(|id| id.0).map_err(engine_error))
}

/// Click near the attractor.
///
/// # Returns
/// The new particle's ID, or `undefined` when the click is too close to the center
#[wasm_bindgen]
pub fn simulation_spawn_orbital(sim_id: u32, x: f64, y: f64) -> Result<Option<u64>, JsError> {
    with_sim_mut(sim_id, |sim| {
        sim.spawn_orbital(x, y)
            .map(|id| id.map(|id| id.0))
            .map_err(engine_error)
    })
}

/// Drag-to-throw.
///
/// # Returns
/// The new particle's ID, or `undefined` when the drag was too short
#[wasm_bindgen]
pub fn simulation_fling(
    sim_id: u32,
    start_x: f64,
    start_y: f64,
    end_x: f64,
    end_y: f64,
) -> Result<Option<u64>, JsError> {
    with_sim_mut(sim_id, |sim| {
        sim.fling(Point2::new(start_x, start_y), Point2::new(end_x, end_y))
            .map(|id| id.map(|id| id.0))
            .map_err(engine_error)
    })
}

/// Move a grabbed particle to the cursor and give it the cursor's velocity.
#[wasm_bindgen]
pub fn simulation_drag(
    sim_id: u32,
    particle_id: u64,
    x: f64,
    y: f64,
    vx: f64,
    vy: f64,
) -> Result<(), JsError> {
    with_sim_mut(sim_id, |sim| {
        sim.drag_particle(ParticleId(particle_id), Point2::new(x, y), Vector2::new(vx, vy))
            .map_err(engine_error)
    })
}

/// Set a parameter by name ("mass", "speed", "restitution", "damping",
/// "trails").
///
/// # Returns
/// The value actually applied after clamping (1 or 0 for flags)
#[wasm_bindgen]
pub fn simulation_set_parameter(sim_id: u32, name: &str, value: f64) -> Result<f64, JsError> {
    use pointmass::params::Parameter;

    with_sim_mut(sim_id, |sim| {
        let applied = sim.set_parameter_named(name, value).map_err(engine_error)?;
        Ok(match applied {
            Parameter::AttractorMass(v)
            | Parameter::SpeedMultiplier(v)
            | Parameter::Restitution(v)
            | Parameter::Damping(v) => v,
            Parameter::TrailsEnabled(on) => f64::from(u8::from(on)),
        })
    })
}

/// Remove every particle.
///
/// # Returns
/// Number of particles removed
#[wasm_bindgen]
pub fn simulation_clear(sim_id: u32) -> Result<usize, JsError> {
    with_sim_mut(sim_id, |sim| Ok(sim.clear()))
}

/// # Returns
/// The new paused state
#[wasm_bindgen]
pub fn simulation_toggle_pause(sim_id: u32) -> Result<bool, JsError> {
    with_sim_mut(sim_id, |sim| Ok(sim.toggle_pause()))
}

// =============================================================================
// Stepping
// =============================================================================

/// Apply queued commands and advance one step unless paused.
#[wasm_bindgen]
pub fn simulation_tick(sim_id: u32) -> Result<JsValue, JsError> {
    with_sim_mut(sim_id, |sim| {
        let report = sim.tick();
        to_js(&TickSummary::new(&report, sim.time()))
    })
}

/// Advance one step while paused; a no-op while running.
///
/// # Returns
/// Whether a step was taken
#[wasm_bindgen]
pub fn simulation_single_step(sim_id: u32) -> Result<bool, JsError> {
    with_sim_mut(sim_id, |sim| Ok(sim.single_step().is_some()))
}

// =============================================================================
// State queries
// =============================================================================

/// Everything needed to draw one frame.
#[wasm_bindgen]
pub fn simulation_snapshot(sim_id: u32) -> Result<JsValue, JsError> {
    with_sim(sim_id, |sim| to_js(&sim.snapshot()))
}

/// Energy, momentum and counters for a HUD.
#[wasm_bindgen]
pub fn simulation_diagnostics(sim_id: u32) -> Result<JsValue, JsError> {
    with_sim(sim_id, |sim| to_js(&sim.diagnostics()))
}

/// Topmost particle under the cursor.
#[wasm_bindgen]
pub fn simulation_particle_at(sim_id: u32, x: f64, y: f64) -> Result<Option<u64>, JsError> {
    with_sim(sim_id, |sim| Ok(sim.particle_at(x, y).map(|id| id.0)))
}

/// Horizon radius `2·M`, or `undefined` in container mode.
#[wasm_bindgen]
pub fn simulation_horizon_radius(sim_id: u32) -> Result<Option<f64>, JsError> {
    with_sim(sim_id, |sim| Ok(sim.horizon_radius()))
}

#[wasm_bindgen]
pub fn simulation_particle_count(sim_id: u32) -> Result<usize, JsError> {
    with_sim(sim_id, |sim| Ok(sim.particle_count()))
}
