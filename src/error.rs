/*
 * Error Module
 *
 * Construction-time failures for the flock. Runtime numeric edge cases are
 * handled locally inside the boid update and never surface here.
 */

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("arena must have positive finite extent, got {width}x{height}")]
    InvalidArena { width: f32, height: f32 },

    #[error("boid render size must be positive and finite, got {length}x{width}")]
    InvalidBoidSize { length: f32, width: f32 },

    #[error("parameter `{name}` is out of range: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
