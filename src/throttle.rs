/*
 * Throttle Module
 *
 * Wall-clock pacing for the fixed-step simulation and the shared quit signal.
 *
 * Real frame time is fed into an accumulator and drained in whole simulation
 * steps. A step always advances the flock by exactly one unit, so a slow or
 * fast frame only changes how many steps run, never how far each one moves.
 * The backlog is capped so a long stall does not trigger a burst of catch-up.
 */

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::params::SimulationParams;

#[derive(Debug, Clone)]
pub struct TickThrottle {
    step: Duration,
    accumulator: Duration,
    max_catch_up: u32,
}

impl TickThrottle {
    pub fn new(tick_rate: f32, max_catch_up: u32) -> Self {
        Self {
            step: Duration::from_secs_f32(1.0 / tick_rate),
            accumulator: Duration::ZERO,
            max_catch_up: max_catch_up.max(1),
        }
    }

    pub fn from_params(params: &SimulationParams) -> Self {
        Self::new(params.tick_rate, params.max_catch_up_ticks)
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    // Add elapsed wall time and return how many ticks are due now
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulator += elapsed;

        let mut due = 0;
        while self.accumulator >= self.step && due < self.max_catch_up {
            self.accumulator -= self.step;
            due += 1;
        }

        if self.accumulator >= self.step {
            debug!(
                dropped_ms = self.accumulator.as_secs_f64() * 1000.0,
                "dropping simulation backlog"
            );
            self.accumulator = Duration::ZERO;
        }

        due
    }

    // Time left until the next tick becomes due
    pub fn until_next(&self) -> Duration {
        self.step.saturating_sub(self.accumulator)
    }
}

// Cooperative quit signal, checked once per tick
#[derive(Debug, Clone)]
pub struct RunFlag(Arc<AtomicBool>);

impl Default for RunFlag {
    fn default() -> Self {
        Self::new()
    }
}

impl RunFlag {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn is_running(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub fn stop(&self) {
        self.0.store(false, Ordering::Release);
    }
}
