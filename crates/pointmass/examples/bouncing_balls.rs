//! Headless run of the container mode
//!
//! Fills the box with discs and tracks momentum, energy and collision counts
//! while they fall, bounce and collide.
//!
//! Run with: cargo run --package pointmass --example bouncing_balls [count]

use pointmass::params::Parameter;
use pointmass::{Simulation, SimulationConfig};

fn main() {
    let count = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<usize>().ok())
        .map(|n| n.max(1))
        .unwrap_or(24);

    println!("Bouncing balls: {count} discs in a box\n");
    println!("{}", "=".repeat(60));

    let config = SimulationConfig::container()
        .with_initial_count(count)
        .with_seed(7);
    let mut sim = match Simulation::new(config) {
        Ok(sim) => sim,
        Err(err) => {
            eprintln!("bad configuration: {err}");
            return;
        }
    };

    let domain = sim.domain();
    println!("Domain: {} x {}", domain.width, domain.height);
    println!("Placed: {} discs", sim.particle_count());
    println!(
        "Restitution: {:.2}, damping: {:.2}",
        sim.parameters().restitution(),
        sim.parameters().damping()
    );

    let mut contacts = 0;
    let mut wall_hits = 0;

    println!(
        "\n{:>6} {:>8} {:>12} {:>12} {:>10} {:>8}",
        "tick", "time", "kinetic", "total", "contacts", "walls"
    );
    for tick in 1..=1200 {
        if tick == 600 {
            println!("  -- switching to fully elastic collisions --");
            if let Err(err) = sim.set_parameter(Parameter::Restitution(1.0)) {
                eprintln!("{err}");
            }
        }

        let report = sim.tick();
        contacts += report.collisions.contacts;
        wall_hits += report.wall_hits;

        if tick % 100 == 0 {
            let d = sim.diagnostics();
            println!(
                "{:>6} {:>8.2} {:>12.4e} {:>12.4e} {:>10} {:>8}",
                tick, d.time, d.kinetic_energy, d.total_energy, contacts, wall_hits
            );
        }
    }

    let d = sim.diagnostics();
    println!("\nFinal momentum: ({:.2}, {:.2})", d.momentum[0], d.momentum[1]);
    println!("Total contacts: {contacts}, wall bounces: {wall_hits}");
}
