//! Headless run of the attractor mode
//!
//! Spawns the default cloud, lets it orbit for a while, grows the attractor
//! and reports how many tracers were swallowed.
//!
//! Run with: cargo run --package pointmass --example black_hole

use pointmass::{Command, Simulation, SimulationConfig};

fn main() {
    println!("Black hole: tracers around a softened central mass\n");
    println!("{}", "=".repeat(60));

    let config = SimulationConfig::black_hole().with_seed(2024);
    let mut sim = match Simulation::new(config) {
        Ok(sim) => sim,
        Err(err) => {
            eprintln!("bad configuration: {err}");
            return;
        }
    };

    let attractor = sim.attractor().copied();
    if let Some(a) = attractor {
        println!("Attractor: M = {:.1}, r_s = {:.1}", a.mass, a.horizon_radius());
        println!("Center: ({:.0}, {:.0})", a.center.x, a.center.y);
    }
    println!("Initial tracers: {}", sim.particle_count());

    let initial = sim.diagnostics();
    println!("\nInitial energy:");
    println!("  Kinetic:   {:.4e}", initial.kinetic_energy);
    println!("  Potential: {:.4e}", initial.potential_energy);
    println!("  Total:     {:.4e}", initial.total_energy);

    // Speed up to 8x so the run covers a useful stretch of orbit
    for _ in 0..3 {
        sim.submit(Command::SpeedUp);
    }

    println!(
        "\n{:>8} {:>10} {:>10} {:>10} {:>12}",
        "tick", "time", "tracers", "absorbed", "energy"
    );
    for tick in 1..=3000 {
        if tick == 1500 {
            println!("  -- growing the attractor x1.5 twice --");
            sim.submit(Command::mass_up(true));
            sim.submit(Command::mass_up(true));
        }
        sim.tick();

        if tick % 300 == 0 {
            let d = sim.diagnostics();
            println!(
                "{:>8} {:>10.2} {:>10} {:>10} {:>12.4e}",
                tick, d.time, d.particle_count, d.absorbed_total, d.total_energy
            );
        }
    }

    let snapshot = sim.snapshot();
    println!("\nFinal state:");
    println!("  Time: {:.2}", snapshot.time);
    println!("  Speed: x{:.3} (dt = {:.5})", snapshot.speed, snapshot.dt);
    if let Some(r_s) = snapshot.horizon_radius {
        println!("  Horizon radius: {:.1}", r_s);
    }
    println!("  Tracers left: {}", snapshot.particles.len());

    let longest = snapshot
        .particles
        .iter()
        .map(|p| p.trail.len())
        .max()
        .unwrap_or(0);
    println!("  Longest trail: {} points", longest);
}
