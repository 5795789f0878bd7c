/*
 * Application Module
 *
 * This module defines the nannou model for the windowed simulation and its
 * per-frame update. The window is sized to the arena. Each frame:
 * - the control panel is refreshed
 * - the quit signal is checked
 * - real frame time is turned into a whole number of fixed simulation ticks
 *
 * Drawing lives in the renderer module and input handling in the input module.
 */

use std::sync::Mutex;
use std::time::Instant;

use nannou::prelude::*;
use nannou_egui::Egui;
use tracing::info;

use crate::debug::DebugInfo;
use crate::flock::Flock;
use crate::input;
use crate::renderer;
use crate::throttle::{RunFlag, TickThrottle};
use crate::ui;

// nannou builds the model from a plain fn pointer, so the flock created in
// `launch` is handed over through this slot
static PENDING_FLOCK: Mutex<Option<Flock>> = Mutex::new(None);

// Main model for the application
pub struct Model {
    pub flock: Flock,
    pub egui: Egui,
    pub debug_info: DebugInfo,
    pub throttle: TickThrottle,
    pub run_flag: RunFlag,
    pub show_debug: bool,
    pub last_update_time: Instant,
}

// Open the window and run until the quit signal is raised
pub fn launch(flock: Flock) {
    match PENDING_FLOCK.lock() {
        Ok(mut slot) => *slot = Some(flock),
        Err(poisoned) => *poisoned.into_inner() = Some(flock),
    }

    nannou::app(model).update(update).run();
}

// Initialize the model
pub fn model(app: &App) -> Model {
    let flock = PENDING_FLOCK
        .lock()
        .ok()
        .and_then(|mut slot| slot.take())
        .expect("launch() must hand over a flock before the app starts");

    let params = flock.params().clone();

    let window_id = app
        .new_window()
        .title("Boid Flocking Simulator")
        .size(params.arena_width as u32, params.arena_height as u32)
        .view(renderer::view)
        .key_pressed(input::key_pressed)
        .raw_event(input::raw_window_event)
        .build()
        .expect("Failed to create window");

    let window = app.window(window_id).expect("Window vanished after creation");
    let egui = Egui::from_window(&window);

    info!(
        width = params.arena_width,
        height = params.arena_height,
        tick_rate = params.tick_rate,
        "window opened"
    );

    Model {
        throttle: TickThrottle::from_params(&params),
        flock,
        egui,
        debug_info: DebugInfo::default(),
        run_flag: RunFlag::new(),
        show_debug: false,
        last_update_time: Instant::now(),
    }
}

// Update the model
pub fn update(app: &App, model: &mut Model, update: Update) {
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;

    let quit_clicked = ui::update_ui(
        &mut model.egui,
        &mut model.show_debug,
        &model.debug_info,
        &model.flock,
    );
    if quit_clicked {
        model.run_flag.stop();
    }

    if !model.run_flag.is_running() {
        info!(ticks = model.flock.ticks(), "quit requested");
        app.quit();
        return;
    }

    // Turn elapsed wall time into fixed ticks
    let now = Instant::now();
    let elapsed = now.duration_since(model.last_update_time);
    model.last_update_time = now;

    let due = model.throttle.advance(elapsed);
    let mut ran = 0;
    for _ in 0..due {
        if !model.run_flag.is_running() {
            break;
        }
        model.flock.tick();
        ran += 1;
    }

    model.debug_info.ticks_this_frame = ran;
    model.debug_info.total_ticks = model.flock.ticks();

    // Log roughly every ten seconds of simulated time
    let ticks = model.flock.ticks();
    if ran > 0 && ticks / 600 != (ticks - <u64 as From<_>>::from(ran)) / 600 {
        info!(
            ticks,
            order = model.flock.order_parameter(),
            fps = model.debug_info.fps,
            "simulation progress"
        );
    }
}
