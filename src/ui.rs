/*
 * UI Module
 *
 * This module contains the egui control panel and the on-canvas debug text.
 * The configuration is fixed for the whole run, so the panel only reports it;
 * the only controls are the debug overlay toggle and the quit button.
 */

use nannou_egui::{egui, Egui};

use crate::debug::DebugInfo;
use crate::flock::Flock;

// Refresh the panel. Returns true when the user asked to quit.
pub fn update_ui(
    egui: &mut Egui,
    show_debug: &mut bool,
    debug_info: &DebugInfo,
    flock: &Flock,
) -> bool {
    let mut quit = false;
    let params = flock.params();

    let ctx = egui.begin_frame();

    egui::Window::new("Simulation")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.collapsing("Flock", |ui| {
                ui.label(format!("Boids: {}", flock.len()));
                ui.label(format!("Arena: {:.0}x{:.0}", params.arena_width, params.arena_height));
                ui.label(format!("Speed: {:.2}", params.speed));
                ui.label(format!("Sight radius: {:.1}", params.sight_radius));
                ui.label(format!("Mass: {:.1}", params.mass));
                ui.label(format!("Seed: {}", flock.seed()));
                ui.label(format!("Order: {:.3}", flock.order_parameter()));
            });

            ui.collapsing("Performance", |ui| {
                for line in debug_info.lines(flock.len()) {
                    ui.label(line);
                }
            });

            ui.checkbox(show_debug, "Show Debug Info");
            if ui.button("Quit").clicked() {
                quit = true;
            }
        });

    quit
}

// Draw debug information on the screen
pub fn draw_debug_info(
    draw: &nannou::Draw,
    debug_info: &DebugInfo,
    window_rect: nannou::geom::Rect,
    boids_len: usize,
) {
    let lines = debug_info.lines(boids_len);

    // Background panel in the top-right corner, clear of the egui window
    let margin = 20.0;
    let line_height = 20.0;
    let panel_width = 200.0;
    let panel_height = line_height * lines.len() as f32 + margin;
    let panel_x = window_rect.right() - panel_width / 2.0;
    let panel_y = window_rect.top() - panel_height / 2.0;

    draw.rect()
        .x_y(panel_x, panel_y)
        .w_h(panel_width, panel_height)
        .color(nannou::color::rgba(0.0, 0.0, 0.0, 0.7));

    let text_y = window_rect.top() - margin;
    for (i, text) in lines.iter().enumerate() {
        let y = text_y - (i as f32 * line_height);
        draw.text(text)
            .x_y(panel_x, y)
            .w(panel_width - margin)
            .left_justify()
            .color(nannou::color::WHITE)
            .font_size(14);
    }
}
