//! Maze3D entry point.
//!
//! Parses the command line, loads and validates the configuration, initializes
//! logging and runs the winit event loop until the window closes.
//!
//! # Usage
//! ```text
//! maze3d [--config maze3d.toml] [--size 20] [--seed 42]
//! ```
//! Set `RUST_LOG=debug` for per-frame upload logs.

use clap::Parser;
use log::{error, info};
use maze3d::app::App;
use maze3d::config::Config;
use maze3d::error::ConfigError;
use std::path::PathBuf;
use std::process::ExitCode;
use winit::event_loop::{ControlFlow, EventLoop};

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

/// Command line arguments. Flags override values from the config file.
#[derive(Parser, Debug, Default)]
#[command(name = "maze3d", version, about = "First-person 3D maze demo")]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Maze grid size (cells per side)
    #[arg(short, long)]
    size: Option<usize>,

    /// Seed for the maze generator
    #[arg(long)]
    seed: Option<u64>,
}

impl Args {
    /// Loads the config file (or defaults), applies flag overrides and validates.
    fn resolve_config(&self) -> Result<Config, ConfigError> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        if let Some(size) = self.size {
            config.maze.size = size;
        }
        if let Some(seed) = self.seed {
            config.maze.seed = Some(seed);
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> ExitCode {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = match args.resolve_config() {
        Ok(config) => config,
        Err(err) => {
            error!("Invalid configuration: {}", err);
            return ExitCode::FAILURE;
        }
    };

    info!(
        "Starting maze3d: {}x{} grid, seed {:?}, window {}x{}",
        config.maze.size,
        config.maze.size,
        config.maze.seed,
        config.render.width,
        config.render.height
    );
    info!("Controls: WASD/arrows move, mouse looks, Space regenerates, Escape quits");

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(err) => {
            error!("Error creating event loop: {}", err);
            return ExitCode::FAILURE;
        }
    };
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    if let Err(err) = event_loop.run_app(&mut app) {
        error!("Event loop failed: {}", err);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
