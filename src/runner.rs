/*
 * Runner Module
 *
 * Headless tick loop. Runs the flock until the run flag is cleared or an
 * optional tick limit is reached, optionally paced to the configured tick
 * rate. The flag is checked once before every tick.
 */

use std::time::Instant;

use tracing::info;

use crate::flock::Flock;
use crate::throttle::{RunFlag, TickThrottle};

#[derive(Debug, Clone, Copy, Default)]
pub struct LoopOptions {
    pub max_ticks: Option<u64>,
    pub paced: bool,
}

// Returns the number of ticks run. `on_tick` sees the flock after every tick.
pub fn run(
    flock: &mut Flock,
    flag: &RunFlag,
    options: LoopOptions,
    mut on_tick: impl FnMut(&Flock),
) -> u64 {
    let mut throttle = TickThrottle::from_params(flock.params());
    let mut last = Instant::now();
    let mut ran = 0u64;
    let below_limit = |ran: u64| options.max_ticks.map_or(true, |max| ran < max);

    'outer: while flag.is_running() && below_limit(ran) {
        let due = if options.paced {
            let now = Instant::now();
            let due = throttle.advance(now.duration_since(last));
            last = now;
            if due == 0 {
                std::thread::sleep(throttle.until_next());
                continue;
            }
            due
        } else {
            1
        };

        for _ in 0..due {
            if !flag.is_running() || !below_limit(ran) {
                break 'outer;
            }
            flock.tick();
            ran += 1;
            on_tick(flock);
        }
    }

    info!(ticks = ran, stopped = !flag.is_running(), "simulation loop finished");
    ran
}
