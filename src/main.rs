/*
 * Boid Flocking Simulation
 *
 * Windowed entry point. Boids follow three rules:
 * 1. Separation: Avoid crowding neighbors
 * 2. Alignment: Steer towards the average heading of neighbors
 * 3. Cohesion: Steer towards the average position of neighbors
 *
 * Usage: flocking [config.json]
 * The config path may also come from FLOCK_CONFIG; otherwise defaults apply.
 * Escape or Q quits.
 */

use std::path::PathBuf;

use anyhow::{Context, Result};
use flocking::{app, Flock, SimulationParams};
use tracing::info;

fn main() -> Result<()> {
    flocking::init_tracing();

    let path = std::env::args_os().nth(1).map(PathBuf::from);
    let params = SimulationParams::resolve(path.as_deref()).context("invalid configuration")?;
    info!(?params, "configuration loaded");

    let flock = Flock::create(params).context("failed to create flock")?;
    app::launch(flock);
    Ok(())
}
