/*
 * Boid Module
 *
 * This module defines the Boid struct and its per-tick behavior.
 * Each tick a boid:
 * 1. Scans the whole flock for neighbors inside its sight radius
 * 2. Folds separation, alignment and cohesion into its steering accumulator
 * 3. Treats the accumulated steering as a force and turns toward it
 * 4. Picks up a small random heading increment
 * 5. Moves one velocity step and wraps around the arena edges
 *
 * Speed is fixed: steering only ever changes the direction of travel.
 * The steering accumulator is never cleared, which gives the flock inertia.
 */

use nannou::prelude::{vec2, Vec2};
use tracing::trace;

use crate::params::SimulationParams;
use crate::rng::BoidRng;
use crate::vector::{heading_of, scaled_to, velocity_from_heading, RunningMean};

// Alignment sums shorter than this fraction of (speed * neighbors) are treated
// as having cancelled out
const ALIGNMENT_CANCEL_RATIO: f32 = 1e-5;

#[derive(Debug, Clone)]
pub struct Boid {
    position: Vec2,
    velocity: Vec2,
    heading: f32,
    steering: Vec2,
    // Sprite center, kept at a fixed offset from `position`
    render_anchor: Vec2,
    rng: BoidRng,
}

// Everything one scan learns about the flock-mates in sight
#[derive(Debug, Clone, Copy, Default)]
pub struct Neighborhood {
    pub separation: Vec2,
    pub alignment: Vec2,
    pub cohesion: RunningMean,
}

impl Neighborhood {
    pub fn count(&self) -> usize {
        self.cohesion.count()
    }

    // Steering contribution for a boid at `position` moving with `velocity`,
    // or None when nothing was in sight
    pub fn steering(&self, position: Vec2, velocity: Vec2, speed: f32) -> Option<Vec2> {
        let center = self.cohesion.mean()?;
        let mut force = self.separation + (center - position);

        let cancel_below = ALIGNMENT_CANCEL_RATIO * speed * self.count() as f32;
        let desired = if self.alignment.length() > cancel_below {
            scaled_to(self.alignment, speed)
        } else {
            None
        };
        match desired {
            Some(desired) => force += desired - velocity,
            None => trace!(neighbors = self.count(), "alignment sum cancelled out"),
        }
        Some(force)
    }
}

impl Boid {
    pub fn new(position: Vec2, heading: f32, params: &SimulationParams, rng: BoidRng) -> Self {
        Self {
            position,
            velocity: velocity_from_heading(heading, params.speed),
            heading,
            steering: Vec2::ZERO,
            render_anchor: position + params.anchor_offset(),
            rng,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn heading(&self) -> f32 {
        self.heading
    }

    pub fn steering(&self) -> Vec2 {
        self.steering
    }

    pub fn render_anchor(&self) -> Vec2 {
        self.render_anchor
    }

    // Scan every flock-mate. `index` is this boid's own slot in `boids`; it is
    // skipped by identity before any distance test. A distinct boid sitting on
    // the exact same point is then dropped by the `0 < d` bound.
    pub fn scan_neighbors(&self, index: usize, boids: &[Boid], sight_radius: f32) -> Neighborhood {
        let mut hood = Neighborhood::default();

        for (other_index, other) in boids.iter().enumerate() {
            if other_index == index {
                continue;
            }

            let offset = self.position - other.position;
            let d = offset.length();
            if d > 0.0 && d <= sight_radius {
                hood.separation += offset / d;
                hood.alignment += other.velocity;
                hood.cohesion.push(other.position);
            }
        }

        hood
    }

    // Read-only half of the update: what this tick adds to the steering
    // accumulator, computed against the settled state of `boids`
    pub fn steering_contribution(
        &self,
        index: usize,
        boids: &[Boid],
        params: &SimulationParams,
    ) -> Option<Vec2> {
        self.scan_neighbors(index, boids, params.sight_radius)
            .steering(self.position, self.velocity, params.speed)
    }

    // Mutating half of the update. Touches nothing but this boid.
    pub fn update(&mut self, contribution: Option<Vec2>, params: &SimulationParams) {
        if let Some(force) = contribution {
            self.steering += force;
        }

        self.apply_force(params);

        let jitter = self.rng.jitter(params.heading_jitter);
        self.turn(jitter, params.speed);

        self.change_pos(self.velocity);
        self.wrap_edges(params);
    }

    // Steering acts as a force on a fixed mass; only the resulting direction
    // is kept and the velocity is rebuilt at the fixed speed
    pub fn apply_force(&mut self, params: &SimulationParams) {
        let acceleration = self.steering / params.mass;
        let candidate = self.velocity + acceleration;

        // A zero or non-finite candidate has no direction; keep the old heading
        if candidate.x.is_finite() && candidate.y.is_finite() && candidate.length_squared() > 0.0 {
            self.heading = heading_of(candidate);
        }
        self.velocity = velocity_from_heading(self.heading, params.speed);
    }

    fn turn(&mut self, delta: f32, speed: f32) {
        if delta != 0.0 {
            self.heading += delta;
            self.velocity = velocity_from_heading(self.heading, speed);
        }
    }

    // Move position and sprite anchor together
    pub fn change_pos(&mut self, delta: Vec2) {
        self.position += delta;
        self.render_anchor += delta;
    }

    // Toroidal wrap with a margin of two boid lengths so the sprite has fully
    // left the arena before it reappears on the other side. At most one
    // correction per axis.
    pub fn wrap_edges(&mut self, params: &SimulationParams) {
        let arena = params.arena();
        let length = params.boid_length;

        let shift = vec2(
            wrap_offset(self.render_anchor.x, arena.x, length),
            wrap_offset(self.render_anchor.y, arena.y, length),
        );

        if shift != Vec2::ZERO {
            trace!(x = shift.x, y = shift.y, "boid wrapped");
            self.change_pos(shift);
        }
    }
}

fn wrap_offset(anchor: f32, extent: f32, length: f32) -> f32 {
    let margin = 2.0 * length;
    if anchor < -margin {
        extent + length
    } else if anchor > extent + margin {
        -(extent + length)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn params() -> SimulationParams {
        SimulationParams {
            heading_jitter: 0.0,
            seed: Some(1),
            ..SimulationParams::default()
        }
    }

    fn boid_at(x: f32, y: f32, heading: f32, index: usize) -> Boid {
        Boid::new(vec2(x, y), heading, &params(), BoidRng::new(1, index))
    }

    #[test]
    fn new_boid_moves_at_fixed_speed() {
        let p = params();
        let boid = boid_at(10.0, 10.0, 1.3, 0);
        assert!((boid.velocity().length() - p.speed).abs() < 1e-5);
        assert_eq!(boid.render_anchor(), vec2(10.0, 10.0) + p.anchor_offset());
    }

    #[test]
    fn self_is_excluded_by_index() {
        let boids = vec![boid_at(100.0, 100.0, 0.0, 0), boid_at(150.0, 100.0, 0.0, 1)];
        let hood = boids[0].scan_neighbors(0, &boids, 100.0);
        assert_eq!(hood.count(), 1);
        assert_eq!(hood.cohesion.mean(), Some(vec2(150.0, 100.0)));
    }

    #[test]
    fn coincident_boid_is_not_a_neighbor() {
        let boids = vec![boid_at(100.0, 100.0, 0.0, 0), boid_at(100.0, 100.0, PI, 1)];
        let hood = boids[0].scan_neighbors(0, &boids, 100.0);
        assert_eq!(hood.count(), 0);
        assert!(hood.separation.x.is_finite() && hood.separation.y.is_finite());
    }

    #[test]
    fn sight_radius_is_inclusive() {
        let boids = vec![boid_at(0.0, 0.0, 0.0, 0), boid_at(100.0, 0.0, 0.0, 1)];
        assert_eq!(boids[0].scan_neighbors(0, &boids, 100.0).count(), 1);
        assert_eq!(boids[0].scan_neighbors(0, &boids, 99.9).count(), 0);
    }

    #[test]
    fn separation_points_away_from_neighbor() {
        let boids = vec![boid_at(100.0, 100.0, 0.0, 0), boid_at(110.0, 100.0, 0.0, 1)];
        let hood = boids[0].scan_neighbors(0, &boids, 100.0);
        assert!((hood.separation - vec2(-1.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn cohesion_mean_ignores_discovery_order() {
        let mut boids = vec![
            boid_at(200.0, 200.0, 0.0, 0),
            boid_at(220.0, 190.0, 0.0, 1),
            boid_at(170.0, 230.0, 0.0, 2),
            boid_at(205.0, 260.0, 0.0, 3),
            boid_at(900.0, 600.0, 0.0, 4),
        ];
        let forward = boids[0].scan_neighbors(0, &boids, 100.0).cohesion;

        boids[1..].reverse();
        let backward = boids[0].scan_neighbors(0, &boids, 100.0).cohesion;

        let expected = vec2(220.0 + 170.0 + 205.0, 190.0 + 230.0 + 260.0) / 3.0;
        assert_eq!(forward.count(), 3);
        assert!((forward.mean().unwrap() - expected).length() < 1e-3);
        assert!((backward.mean().unwrap() - expected).length() < 1e-3);
    }

    #[test]
    fn opposing_velocities_skip_alignment() {
        let p = params();
        // Two flankers moving in exactly opposite directions cancel out
        let boids = vec![
            boid_at(100.0, 100.0, PI / 2.0, 0),
            boid_at(100.0, 120.0, 0.0, 1),
            boid_at(100.0, 80.0, PI, 2),
        ];
        let hood = boids[0].scan_neighbors(0, &boids, 100.0);
        assert!(hood.alignment.length() < 1e-5);

        let force = boids[0].steering_contribution(0, &boids, &p).unwrap();
        assert!(force.x.is_finite() && force.y.is_finite());
        // Separation cancels too and the center of mass is the boid itself,
        // so without an alignment term nothing is left
        assert!(force.length() < 1e-3, "got {force:?}");
    }

    #[test]
    fn no_neighbors_leaves_steering_untouched() {
        let p = params();
        let mut boids = vec![boid_at(100.0, 100.0, 0.0, 0), boid_at(600.0, 500.0, 0.0, 1)];
        boids[0].steering = vec2(4.0, -2.0);

        let contribution = boids[0].steering_contribution(0, &boids, &p);
        assert_eq!(contribution, None);

        boids[0].update(contribution, &p);
        assert_eq!(boids[0].steering(), vec2(4.0, -2.0));
    }

    #[test]
    fn steering_accumulates_with_neighbors() {
        let p = params();
        let mut boids = vec![boid_at(100.0, 100.0, 0.0, 0), boid_at(140.0, 120.0, 2.0, 1)];
        let carried = vec2(4.0, -2.0);
        boids[0].steering = carried;

        let contribution = boids[0].steering_contribution(0, &boids, &p).unwrap();
        assert_ne!(contribution, Vec2::ZERO);

        boids[0].update(Some(contribution), &p);
        assert_eq!(boids[0].steering(), carried + contribution);
    }

    #[test]
    fn huge_steering_keeps_speed() {
        let p = params();
        let mut boid = boid_at(300.0, 300.0, 0.0, 0);
        boid.steering = vec2(-1.0e6, 3.0e5);
        boid.update(None, &p);
        assert!((boid.velocity().length() - p.speed).abs() < 1e-4);
        assert!((boid.velocity() - velocity_from_heading(boid.heading(), p.speed)).length() < 1e-5);
    }

    #[test]
    fn zero_candidate_velocity_keeps_heading() {
        let p = SimulationParams {
            mass: 1.0,
            ..params()
        };
        let mut boid = boid_at(300.0, 300.0, 0.25, 0);
        // Steering exactly cancels the velocity
        boid.steering = -boid.velocity();
        boid.apply_force(&p);
        assert!((boid.heading() - 0.25).abs() < 1e-6);
        assert!((boid.velocity().length() - p.speed).abs() < 1e-5);
    }

    #[test]
    fn jitter_turns_without_changing_speed() {
        let p = SimulationParams {
            heading_jitter: 0.1,
            ..params()
        };
        let mut boid = Boid::new(vec2(300.0, 300.0), 0.0, &p, BoidRng::new(9, 0));
        boid.update(None, &p);
        assert!(boid.heading() >= 0.0 && boid.heading() < 0.1);
        assert!((boid.velocity().length() - p.speed).abs() < 1e-5);
    }

    #[test]
    fn wraps_past_right_edge() {
        let p = params();
        let l = p.boid_length;
        let anchor_x = p.arena_width + 2.0 * l + 1.0;
        let mut boid = boid_at(anchor_x - p.boid_length / 2.0, 300.0, 0.7, 0);
        let (velocity, heading) = (boid.velocity(), boid.heading());

        boid.wrap_edges(&p);

        assert!((boid.render_anchor().x - (l + 1.0)).abs() < 1e-3);
        assert!((boid.render_anchor() - boid.position() - p.anchor_offset()).length() < 1e-3);
        assert_eq!(boid.velocity(), velocity);
        assert_eq!(boid.heading(), heading);
    }

    #[test]
    fn wraps_past_top_edge() {
        let p = params();
        let l = p.boid_length;
        let mut boid = boid_at(400.0, -2.0 * l - 5.0 - p.boid_width / 2.0, 0.0, 0);
        boid.wrap_edges(&p);
        assert!((boid.render_anchor().y - (p.arena_height - l - 5.0)).abs() < 1e-3);
        assert!((boid.render_anchor().x - (400.0 + l / 2.0)).abs() < 1e-3);
    }

    #[test]
    fn inside_margin_does_not_wrap() {
        let p = params();
        let mut boid = boid_at(-p.boid_length, p.arena_height + p.boid_length, 0.0, 0);
        let before = boid.position();
        boid.wrap_edges(&p);
        assert_eq!(boid.position(), before);
    }
}
