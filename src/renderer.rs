/*
 * Renderer Module
 *
 * This module draws the flock. The simulation works in arena space (origin
 * at the top-left, y growing downward); nannou draws with the origin at the
 * window center and y growing upward, so every point is mapped before drawing.
 *
 * Each boid is a triangle sprite of boid_length x boid_width, centered on its
 * render anchor and rotated to its heading. Headings already treat screen "up"
 * as positive, which is nannou's rotation sense, so they are used as-is.
 */

use nannou::prelude::*;
use tracing::error;

use crate::app::Model;
use crate::boid::Boid;
use crate::params::SimulationParams;
use crate::ui;

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();

    // Clear the background
    draw.background().color(BLACK);

    let params = model.flock.params();
    let arena = params.arena();

    for boid in model.flock.members() {
        draw_boid(&draw, boid, params, arena);
    }

    if model.show_debug {
        // Sight radius and velocity of the first boid
        if let Some(first) = model.flock.members().first() {
            let center = arena_to_screen(first.render_anchor(), arena);

            draw.ellipse()
                .xy(center)
                .radius(params.sight_radius)
                .no_fill()
                .stroke(GREEN)
                .stroke_weight(1.0);

            draw.arrow()
                .start(center)
                .end(center + direction_to_screen(first.velocity()) * 5.0)
                .color(YELLOW)
                .stroke_weight(2.0);
        }

        ui::draw_debug_info(&draw, &model.debug_info, app.window_rect(), model.flock.len());
    }

    if let Err(err) = draw.to_frame(app, &frame) {
        report_draw_error("flock", &err);
    }

    if let Err(err) = model.egui.draw_to_frame(&frame) {
        report_draw_error("control panel", &err);
    }
}

fn draw_boid(draw: &Draw, boid: &Boid, params: &SimulationParams, arena: Vec2) {
    let half_length = params.boid_length / 2.0;
    let half_width = params.boid_width / 2.0;

    let points = [
        pt2(half_length, 0.0),
        pt2(-half_length, half_width),
        pt2(-half_length, -half_width),
    ];

    draw.polygon()
        .color(rgb(220u8, 220, 220))
        .points(points)
        .xy(arena_to_screen(boid.render_anchor(), arena))
        .rotate(boid.heading());
}

fn report_draw_error(what: &str, err: &dyn std::fmt::Debug) {
    error!(error = ?err, "failed to draw {}", what);
}

// Arena space (top-left origin, y down) to nannou space (centered, y up)
pub fn arena_to_screen(point: Vec2, arena: Vec2) -> Point2 {
    pt2(point.x - arena.x / 2.0, arena.y / 2.0 - point.y)
}

// Directions only flip the vertical axis
pub fn direction_to_screen(v: Vec2) -> Vec2 {
    vec2(v.x, -v.y)
}
