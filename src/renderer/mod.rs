//! Main renderer module.
//!
//! This module contains the wgpu rendering collaborator: pipeline and buffer helpers, vertex and
//! uniform layouts, texture loading, and the maze and minimap renderers driven by
//! [`wgpu_lib::WgpuRenderer`].

/// 3D maze mesh rendering.
pub mod maze_renderer;
/// Overhead minimap rendering.
pub mod minimap_renderer;
/// Pipeline building utilities for WGPU.
pub mod pipeline_builder;
/// Wall and floor textures with the checkerboard fallback.
pub mod texture;
/// Uniform buffer layouts.
pub mod uniform;
/// Mesh vertex layout and material tags.
pub mod vertex;
/// Core WGPU library and utilities.
pub mod wgpu_lib;
