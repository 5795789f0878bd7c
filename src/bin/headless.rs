/*
 * Headless Boid Flocking Simulation
 *
 * Runs the flock without a window and logs how ordered it became.
 *
 * Usage: headless [ticks] [config.json]
 * Defaults to 600 ticks. Set FLOCK_PACED=1 to run at the configured tick rate
 * instead of as fast as possible.
 */

use std::path::PathBuf;

use anyhow::{Context, Result};
use flocking::{runner, Flock, LoopOptions, RunFlag, SimulationParams};
use tracing::{debug, info};

const DEFAULT_TICKS: u64 = 600;

fn main() -> Result<()> {
    flocking::init_tracing();

    let mut args = std::env::args().skip(1);
    let ticks = match args.next() {
        Some(arg) => arg
            .parse::<u64>()
            .with_context(|| format!("tick count must be a whole number, got {arg:?}"))?,
        None => DEFAULT_TICKS,
    };
    let path = args.next().map(PathBuf::from);

    let params = SimulationParams::resolve(path.as_deref()).context("invalid configuration")?;
    info!(?params, ticks, "configuration loaded");

    let mut flock = Flock::create(params).context("failed to create flock")?;
    let options = LoopOptions {
        max_ticks: Some(ticks),
        paced: std::env::var_os("FLOCK_PACED").is_some(),
    };

    let start_order = flock.order_parameter();
    let ran = runner::run(&mut flock, &RunFlag::new(), options, |flock| {
        if flock.ticks() % 60 == 0 {
            debug!(tick = flock.ticks(), order = flock.order_parameter(), "progress");
        }
    });

    info!(
        ticks = ran,
        seed = flock.seed(),
        start_order,
        end_order = flock.order_parameter(),
        "run complete"
    );
    Ok(())
}
