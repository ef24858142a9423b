//! Uniform buffer layouts shared with the WGSL shaders.
//!
//! Field order and padding mirror the WGSL structs exactly, so the structs can
//! be uploaded with [`bytemuck::bytes_of`].

/// Per-draw uniforms for the maze pipeline (`@group(0) @binding(0)` in `maze.wgsl`).
///
/// WGSL layout: `mat4x4<f32>` at 0, `vec4<f32>` at 64, `vec2<f32>` at 80,
/// `f32` at 88, `u32` at 92; 96 bytes total.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniforms {
    /// Projection times view, column-major.
    pub view_proj: [[f32; 4]; 4],
    /// Flat colour for the exit marker.
    pub exit_color: [f32; 4],
    /// Wall texture repeats per quad along (u, v).
    pub wall_tiling: [f32; 2],
    /// Floor texture repeats across the whole floor.
    pub floor_tiling: f32,
    /// Non-zero paints every fragment with `exit_color`.
    pub highlight_exit: u32,
}

impl SceneUniforms {
    pub fn new(exit_color: [f32; 4], wall_tiling: [f32; 2], floor_tiling: f32) -> Self {
        Self {
            view_proj: crate::math::Mat4::identity().0,
            exit_color,
            wall_tiling,
            floor_tiling,
            highlight_exit: 0,
        }
    }

    /// The same uniforms with the exit highlight switched on.
    pub fn highlighted(mut self) -> Self {
        self.highlight_exit = 1;
        self
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

/// Uniforms for the minimap pipeline: an orthographic projection and a line colour.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MinimapUniforms {
    pub proj: [[f32; 4]; 4],
    pub color: [f32; 4],
}

impl MinimapUniforms {
    /// Projects `[0, size] x [0, size]` onto the minimap viewport, in white.
    pub fn for_grid(size: usize) -> Self {
        let n = size.max(1) as f32;
        Self {
            proj: crate::math::Mat4::ortho(0.0, n, 0.0, n, -1.0, 1.0).0,
            color: [1.0, 1.0, 1.0, 1.0],
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}
