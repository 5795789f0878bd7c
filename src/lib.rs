/*
 * Boid Flocking Simulation - Module Definitions
 *
 * This file defines the module structure for the flocking simulation.
 * The simulation core (params, vector, rng, boid, flock, throttle, runner)
 * has no window dependency beyond nannou's vector types; the app, renderer,
 * ui and input modules form the windowed shell around it.
 */

// Re-export key components for easier access
pub use boid::{Boid, Neighborhood};
pub use error::ConfigurationError;
pub use flock::Flock;
pub use params::SimulationParams;
pub use runner::LoopOptions;
pub use throttle::{RunFlag, TickThrottle};

// Define modules
pub mod app;
pub mod boid;
pub mod debug;
pub mod error;
pub mod flock;
pub mod input;
pub mod params;
pub mod renderer;
pub mod rng;
pub mod runner;
pub mod throttle;
pub mod ui;
pub mod vector;

// Install the fmt subscriber, honoring RUST_LOG and defaulting to `info`
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
