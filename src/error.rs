//! Error types for configuration loading and renderer setup.
//!
//! The maze core itself is infallible; these cover the outer surfaces only.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("grid size must be at least 1, got {0}")]
    InvalidGridSize(usize),

    #[error("carve start ({x}, {y}) is outside the {size}x{size} grid")]
    StartOutOfBounds { x: usize, y: usize, size: usize },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

#[derive(Error, Debug)]
pub enum RendererError {
    #[error("no suitable GPU adapter found")]
    NoAdapter,

    #[error("GPU device creation failed: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("surface creation failed: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("surface reports no supported texture formats")]
    UnsupportedSurface,
}
