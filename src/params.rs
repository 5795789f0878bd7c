/*
 * Simulation Parameters Module
 *
 * This module defines the SimulationParams struct that holds every constant the
 * flock needs: arena size, flock size, boid render size, speed, sight radius,
 * mass, tick rate and randomness settings. The value is built once at startup
 * (defaults, optionally overlaid by a JSON file), validated, and then handed to
 * the flock by shared reference. Nothing mutates it while the simulation runs.
 */

use std::path::Path;
use std::time::Duration;

use nannou::prelude::{vec2, Vec2};
use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    pub arena_width: f32,
    pub arena_height: f32,
    pub flock_size: usize,
    // Sprite size; the length also sets the wrap margin
    pub boid_length: f32,
    pub boid_width: f32,
    pub speed: f32,
    pub sight_radius: f32,
    pub mass: f32,
    pub tick_rate: f32,
    // Upper bound of the uniform per-tick heading increment, in radians
    pub heading_jitter: f32,
    pub seed: Option<u64>,
    pub parallel: bool,
    pub max_catch_up_ticks: u32,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            arena_width: 1000.0,
            arena_height: 700.0,
            flock_size: 50,
            boid_length: 20.0,
            boid_width: 10.0,
            speed: 3.0,
            sight_radius: 100.0,
            mass: 100.0,
            tick_rate: 60.0,
            heading_jitter: 0.1,
            seed: None,
            parallel: false,
            max_catch_up_ticks: 4,
        }
    }
}

impl SimulationParams {
    // Load a (possibly partial) JSON document over the defaults and validate it
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigurationError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let params: Self = serde_json::from_str(&text).map_err(|source| ConfigurationError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        params.validate()?;
        Ok(params)
    }

    // Resolve the startup configuration from an optional path: explicit path
    // first, then FLOCK_CONFIG, then the defaults
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigurationError> {
        let from_env = std::env::var_os("FLOCK_CONFIG");
        match path.or(from_env.as_deref().map(Path::new)) {
            Some(path) => Self::from_json_file(path),
            None => {
                let params = Self::default();
                params.validate()?;
                Ok(params)
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !positive(self.arena_width) || !positive(self.arena_height) {
            return Err(ConfigurationError::InvalidArena {
                width: self.arena_width,
                height: self.arena_height,
            });
        }
        if !positive(self.boid_length) || !positive(self.boid_width) {
            return Err(ConfigurationError::InvalidBoidSize {
                length: self.boid_length,
                width: self.boid_width,
            });
        }

        let checks = [
            ("speed", self.speed),
            ("sight_radius", self.sight_radius),
            ("mass", self.mass),
            ("tick_rate", self.tick_rate),
        ];
        for (name, value) in checks {
            if !positive(value) {
                return Err(invalid(name, value));
            }
        }

        // One tick period has to fit in a Duration
        if Duration::try_from_secs_f32(self.tick_rate.recip()).is_err() {
            return Err(invalid("tick_rate", self.tick_rate));
        }
        // The wrap shifts a boid once per axis per tick, which only keeps up
        // while a single step is shorter than the arena
        if self.speed >= self.arena_width.min(self.arena_height) {
            return Err(invalid("speed", self.speed));
        }

        if !self.heading_jitter.is_finite() || self.heading_jitter < 0.0 {
            return Err(invalid("heading_jitter", self.heading_jitter));
        }
        if self.max_catch_up_ticks == 0 {
            return Err(ConfigurationError::InvalidParameter {
                name: "max_catch_up_ticks",
                value: 0.0,
            });
        }
        Ok(())
    }

    pub fn arena(&self) -> Vec2 {
        vec2(self.arena_width, self.arena_height)
    }

    // Offset from a boid's position to the center of its sprite
    pub fn anchor_offset(&self) -> Vec2 {
        vec2(self.boid_length / 2.0, self.boid_width / 2.0)
    }
}

fn positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

fn invalid(name: &'static str, value: f32) -> ConfigurationError {
    ConfigurationError::InvalidParameter {
        name,
        value: f64::from(value),
    }
}
