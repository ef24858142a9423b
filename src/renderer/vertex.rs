//! GPU vertex layouts.
//!
//! [`Vertex`] and [`Material`] live with the mesh builder; this module adds the
//! wgpu buffer layout the maze pipeline reads them with. The minimap uploads
//! [`Segment`](crate::maze::minimap::Segment)s directly as pairs of 2D points
//! (see [`create_vertex_2d_layout`](crate::renderer::pipeline_builder::create_vertex_2d_layout)).

pub use crate::maze::mesh::{Material, Vertex};

const VERTEX_ATTRIBUTES: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
    0 => Float32x3, // position
    1 => Float32x2, // tex_coords
    2 => Uint32,    // material
];

impl Vertex {
    /// Returns the vertex buffer layout for use in a wgpu pipeline.
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &VERTEX_ATTRIBUTES,
        }
    }
}
