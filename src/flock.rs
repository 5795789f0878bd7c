/*
 * Flock Module
 *
 * This module owns the fixed population of boids and drives the tick.
 *
 * A tick runs in two phases so that every boid sees the same snapshot:
 * 1. Steering: each boid scans the untouched flock and reports what it will
 *    add to its steering accumulator. Nothing is written in this phase.
 * 2. Integration: each boid folds in its contribution, turns, moves and wraps.
 *    A boid only touches its own state here.
 *
 * Both phases can run on rayon's pool. Because of the split above and because
 * every boid owns its RNG, the parallel path produces the same trajectories
 * as the sequential one.
 */

use std::f32::consts::TAU;

use nannou::prelude::{vec2, Vec2};
use rand::Rng;
use rayon::prelude::*;
use tracing::{info, trace};

use crate::boid::Boid;
use crate::error::ConfigurationError;
use crate::params::SimulationParams;
use crate::rng::{placement_rng, resolve_seed, BoidRng};

pub struct Flock {
    members: Vec<Boid>,
    params: SimulationParams,
    seed: u64,
    ticks: u64,
}

impl Flock {
    // Scatter `flock_size` boids uniformly over the arena with uniform headings
    pub fn create(params: SimulationParams) -> Result<Self, ConfigurationError> {
        params.validate()?;

        let seed = resolve_seed(params.seed);
        let mut rng = placement_rng(seed);
        let placements: Vec<(Vec2, f32)> = (0..params.flock_size)
            .map(|_| {
                let x = rng.gen_range(0.0..params.arena_width);
                let y = rng.gen_range(0.0..params.arena_height);
                (vec2(x, y), rng.gen_range(0.0..TAU))
            })
            .collect();

        Ok(Self::build(params, seed, placements))
    }

    // Build a flock from explicit (position, heading) pairs. The flock size is
    // the number of placements.
    pub fn with_placements(
        params: SimulationParams,
        placements: impl IntoIterator<Item = (Vec2, f32)>,
    ) -> Result<Self, ConfigurationError> {
        params.validate()?;
        let seed = resolve_seed(params.seed);
        Ok(Self::build(params, seed, placements))
    }

    fn build(
        mut params: SimulationParams,
        seed: u64,
        placements: impl IntoIterator<Item = (Vec2, f32)>,
    ) -> Self {
        let members: Vec<Boid> = placements
            .into_iter()
            .enumerate()
            .map(|(i, (position, heading))| {
                Boid::new(position, heading, &params, BoidRng::new(seed, i))
            })
            .collect();

        params.flock_size = members.len();
        info!(
            boids = members.len(),
            seed,
            width = params.arena_width,
            height = params.arena_height,
            parallel = params.parallel,
            "flock created"
        );

        Self {
            members,
            params,
            seed,
            ticks: 0,
        }
    }

    pub fn tick(&mut self) {
        let contributions: Vec<Option<Vec2>> = if self.params.parallel {
            self.members
                .par_iter()
                .enumerate()
                .map(|(i, boid)| boid.steering_contribution(i, &self.members, &self.params))
                .collect()
        } else {
            self.members
                .iter()
                .enumerate()
                .map(|(i, boid)| boid.steering_contribution(i, &self.members, &self.params))
                .collect()
        };

        let steered = contributions.iter().filter(|c| c.is_some()).count();

        let params = &self.params;
        if params.parallel {
            self.members
                .par_iter_mut()
                .zip(contributions.into_par_iter())
                .for_each(|(boid, contribution)| boid.update(contribution, params));
        } else {
            for (boid, contribution) in self.members.iter_mut().zip(contributions) {
                boid.update(contribution, params);
            }
        }

        self.ticks += 1;
        trace!(tick = self.ticks, steered, "flock tick");
    }

    pub fn members(&self) -> &[Boid] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    // Length of the mean unit velocity: 0 for a disordered flock, 1 when
    // every boid flies the same way
    pub fn order_parameter(&self) -> f32 {
        if self.members.is_empty() {
            return 0.0;
        }

        let sum = self
            .members
            .iter()
            .fold(Vec2::ZERO, |acc, boid| acc + boid.velocity() / self.params.speed);
        (sum / self.members.len() as f32).length()
    }
}
