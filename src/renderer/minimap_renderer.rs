//! Overhead minimap drawn as white lines in the bottom-left corner.

use crate::maze::minimap::Minimap;
use crate::renderer::pipeline_builder::{
    BindGroupLayoutBuilder, PipelineBuilder, create_init_buffer, create_uniform_buffer,
    create_vertex_2d_layout,
};
use crate::renderer::uniform::MinimapUniforms;

/// Gap between the minimap and the window edges, in pixels.
pub const MINIMAP_INSET: f32 = 10.0;

/// Viewport rectangle in framebuffer pixels, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// A quarter of the window on each axis, inset from the bottom-left corner.
pub fn minimap_viewport(surface_width: u32, surface_height: u32) -> Viewport {
    let width = surface_width as f32 / 4.0;
    let height = surface_height as f32 / 4.0;
    Viewport {
        x: MINIMAP_INSET,
        y: (surface_height as f32 - height - MINIMAP_INSET).max(0.0),
        width,
        height,
    }
}

pub struct MinimapRenderer {
    pub pipeline: wgpu::RenderPipeline,
    pub vertex_buffer: wgpu::Buffer,
    pub vertex_count: u32,
    pub uniform_buffer: wgpu::Buffer,
    pub uniform_bind_group: wgpu::BindGroup,
}

impl MinimapRenderer {
    pub fn new(
        device: &wgpu::Device,
        surface_config: &wgpu::SurfaceConfiguration,
        minimap: &Minimap,
        grid_size: usize,
    ) -> Self {
        let uniform_layout = BindGroupLayoutBuilder::new(device)
            .with_label("Minimap Uniform Layout")
            .with_uniform_buffer(0, wgpu::ShaderStages::VERTEX_FRAGMENT)
            .build();

        let pipeline = PipelineBuilder::new(
            device,
            surface_config.format,
            include_str!("shaders/minimap.wgsl"),
        )
        .with_label("Minimap Pipeline")
        .with_vertex_buffer(create_vertex_2d_layout())
        .with_bind_group_layout(&uniform_layout)
        .with_topology(wgpu::PrimitiveTopology::LineList)
        .build();

        let uniform_buffer = create_uniform_buffer(
            device,
            &MinimapUniforms::for_grid(grid_size),
            "Minimap Uniform Buffer",
        );
        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Minimap Bind Group"),
            layout: &uniform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        Self {
            pipeline,
            vertex_buffer: Self::create_vertex_buffer(device, minimap),
            vertex_count: minimap.vertex_count(),
            uniform_buffer,
            uniform_bind_group,
        }
    }

    fn create_vertex_buffer(device: &wgpu::Device, minimap: &Minimap) -> wgpu::Buffer {
        create_init_buffer(
            device,
            minimap.points(),
            wgpu::BufferUsages::VERTEX,
            "Minimap Vertex Buffer",
        )
    }

    /// Replaces the line buffer after the maze is regenerated.
    pub fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, minimap: &Minimap) {
        let bytes: &[u8] = bytemuck::cast_slice(minimap.points());
        if self.vertex_buffer.size() == bytes.len() as u64 {
            queue.write_buffer(&self.vertex_buffer, 0, bytes);
        } else {
            self.vertex_buffer = Self::create_vertex_buffer(device, minimap);
        }
        self.vertex_count = minimap.vertex_count();
    }

    pub fn render(&self, pass: &mut wgpu::RenderPass, surface_width: u32, surface_height: u32) {
        if self.vertex_count == 0 {
            return;
        }
        let viewport = minimap_viewport(surface_width, surface_height);
        if viewport.width < 1.0
            || viewport.height < 1.0
            || viewport.x + viewport.width > surface_width as f32
        {
            return;
        }

        pass.set_viewport(
            viewport.x,
            viewport.y,
            viewport.width,
            viewport.height,
            0.0,
            1.0,
        );
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.uniform_bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.draw(0..self.vertex_count, 0..1);
    }
}
