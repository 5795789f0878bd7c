/*
 * Input Module
 *
 * Keyboard handling for the simulation window:
 * - Escape or Q raises the quit signal; the app exits on the next update
 * - D toggles the debug overlay
 *
 * Raw window events are also forwarded to egui here.
 */

use nannou::prelude::*;

use crate::app::Model;

pub fn key_pressed(_app: &App, model: &mut Model, key: Key) {
    match key {
        Key::Escape | Key::Q => model.run_flag.stop(),
        Key::D => model.show_debug = !model.show_debug,
        _ => {}
    }
}

// Handle raw window events for egui
pub fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}
