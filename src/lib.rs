//! Maze3D - A first-person 3D maze demo
//!
//! Generates a random perfect maze on an N×N grid, turns it into textured wall
//! and floor geometry plus an overhead minimap, and lets the player walk through
//! it with collision against the walls.
//!
//! # Features
//! - **Maze generation**: Randomized depth-first carving with a seedable generator
//! - **Mesh building**: Wall quads, a floor quad and an exit marker in one indexed mesh
//! - **Collision**: Axis-aligned box tests against the walls around the player
//! - **Minimap**: Line-list overlay in the bottom-left corner
//! - **Regeneration**: Space builds a fresh maze without restarting
//!
//! # Architecture
//! - `app/`: Window lifecycle and event handling
//! - `game/`: Player, input state and collision
//! - `maze/`: Grid, generator, mesh and minimap builders
//! - `renderer/`: WGPU pipelines, textures and uniforms
//! - `math/`: Vector and matrix utilities for 3D graphics
//! - `config`/`error`: Runtime configuration and error types

pub mod app;
pub mod config;
pub mod error;
pub mod game;
pub mod math;
pub mod maze;
pub mod renderer;
