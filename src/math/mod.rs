//! Math utilities for the maze camera and renderer.
//!
//! This module provides the small vector and matrix types the game needs, plus
//! angle conversions. All types are `bytemuck::Pod` so they can be written into
//! GPU uniform buffers without conversion.
//!
//! # Module Organization
//!
//! - [`vec`] contains [`Vec3`] and its operators
//! - [`mat`] contains the column-major [`Mat4`] and projection helpers

pub mod mat;
pub mod vec;

pub use mat::Mat4;
pub use vec::Vec3;

/// Converts degrees to radians.
///
/// # Example
/// ```
/// use maze3d::math::deg_to_rad;
///
/// assert_eq!(deg_to_rad(180.0), std::f32::consts::PI);
/// ```
pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees * (std::f32::consts::PI / 180.0)
}
