//! 3D maze renderer.
//!
//! Draws the maze mesh in two indexed draws over the same buffers:
//!
//! 1. **Walls and floor**: [`DrawRanges::wall_floor`], textured by material.
//! 2. **Exit marker**: [`DrawRanges::exit`], painted in the flat exit colour.
//!
//! Each draw binds its own uniform buffer so the two sets of uniforms can be
//! written once per frame before the pass is recorded. Walls are drawn without
//! culling so they are visible from both sides.

use crate::config::Config;
use crate::math::Mat4;
use crate::maze::mesh::{DrawRanges, MazeMesh};
use crate::renderer::pipeline_builder::{
    BindGroupLayoutBuilder, DEPTH_FORMAT, PipelineBuilder, create_init_buffer,
    create_uniform_buffer,
};
use crate::renderer::texture::{TexturePair, create_repeat_sampler, upload_texture};
use crate::renderer::uniform::SceneUniforms;
use crate::renderer::vertex::Vertex;

/// GPU resources for the maze mesh.
///
/// # Fields
/// - `pipeline` - Maze pipeline with depth testing and no culling
/// - `vertex_buffer` / `index_buffer` - The current mesh, replaced by [`upload`](MazeRenderer::upload)
/// - `ranges` - Index split between textured geometry and the exit marker
/// - `scene_*` / `exit_*` - Uniform buffers and bind groups for the two draws
/// - `texture_bind_group` - Wall texture, floor texture and sampler
/// - `depth_texture` - Depth buffer, recreated on resize
pub struct MazeRenderer {
    pub pipeline: wgpu::RenderPipeline,
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub ranges: DrawRanges,
    pub base_uniforms: SceneUniforms,
    pub scene_uniform_buffer: wgpu::Buffer,
    pub scene_bind_group: wgpu::BindGroup,
    pub exit_uniform_buffer: wgpu::Buffer,
    pub exit_bind_group: wgpu::BindGroup,
    pub texture_bind_group: wgpu::BindGroup,
    pub depth_texture: Option<wgpu::Texture>,
}

impl MazeRenderer {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_config: &wgpu::SurfaceConfiguration,
        config: &Config,
        textures: &TexturePair,
        mesh: &MazeMesh,
    ) -> Self {
        let base_uniforms = SceneUniforms::new(
            config.render.exit_color,
            config.render.wall_tiling,
            config.floor_tiling(),
        );

        let uniform_layout = BindGroupLayoutBuilder::new(device)
            .with_label("Maze Uniform Layout")
            .with_uniform_buffer(0, wgpu::ShaderStages::VERTEX_FRAGMENT)
            .build();

        let texture_layout = BindGroupLayoutBuilder::new(device)
            .with_label("Maze Texture Layout")
            .with_texture(0, wgpu::ShaderStages::FRAGMENT)
            .with_texture(1, wgpu::ShaderStages::FRAGMENT)
            .with_sampler(2, wgpu::ShaderStages::FRAGMENT)
            .build();

        let pipeline = PipelineBuilder::new(
            device,
            surface_config.format,
            include_str!("shaders/maze.wgsl"),
        )
        .with_label("Maze Pipeline")
        .with_vertex_buffer(Vertex::desc())
        .with_bind_group_layout(&uniform_layout)
        .with_bind_group_layout(&texture_layout)
        .with_depth_test()
        .build();

        let scene_uniform_buffer =
            create_uniform_buffer(device, &base_uniforms, "Maze Scene Uniform Buffer");
        let exit_uniform_buffer = create_uniform_buffer(
            device,
            &base_uniforms.highlighted(),
            "Maze Exit Uniform Buffer",
        );
        let scene_bind_group =
            Self::uniform_bind_group(device, &uniform_layout, &scene_uniform_buffer, "Scene");
        let exit_bind_group =
            Self::uniform_bind_group(device, &uniform_layout, &exit_uniform_buffer, "Exit");

        let wall_view = upload_texture(device, queue, &textures.wall, "Wall Texture");
        let floor_view = upload_texture(device, queue, &textures.floor, "Floor Texture");
        let sampler = create_repeat_sampler(device);
        let texture_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Maze Texture Bind Group"),
            layout: &texture_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&wall_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&floor_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        let (vertex_buffer, index_buffer) = Self::create_mesh_buffers(device, mesh);

        Self {
            pipeline,
            vertex_buffer,
            index_buffer,
            ranges: mesh.ranges,
            base_uniforms,
            scene_uniform_buffer,
            scene_bind_group,
            exit_uniform_buffer,
            exit_bind_group,
            texture_bind_group,
            depth_texture: None,
        }
    }

    fn uniform_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        buffer: &wgpu::Buffer,
        label: &str,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("Maze {} Bind Group", label)),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        })
    }

    fn create_mesh_buffers(device: &wgpu::Device, mesh: &MazeMesh) -> (wgpu::Buffer, wgpu::Buffer) {
        let vertex_buffer = create_init_buffer(
            device,
            &mesh.vertices,
            wgpu::BufferUsages::VERTEX,
            "Maze Vertex Buffer",
        );
        let index_buffer = create_init_buffer(
            device,
            &mesh.indices,
            wgpu::BufferUsages::INDEX,
            "Maze Index Buffer",
        );
        (vertex_buffer, index_buffer)
    }

    /// Replaces the mesh buffers after the maze is regenerated.
    ///
    /// Buffers are rewritten in place when the new mesh has the same byte
    /// size, which holds for every regeneration at a fixed grid size.
    pub fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, mesh: &MazeMesh) {
        let vertex_bytes: &[u8] = bytemuck::cast_slice(&mesh.vertices);
        let index_bytes: &[u8] = bytemuck::cast_slice(&mesh.indices);

        if self.vertex_buffer.size() == vertex_bytes.len() as u64
            && self.index_buffer.size() == index_bytes.len() as u64
        {
            queue.write_buffer(&self.vertex_buffer, 0, vertex_bytes);
            queue.write_buffer(&self.index_buffer, 0, index_bytes);
        } else {
            let (vertex_buffer, index_buffer) = Self::create_mesh_buffers(device, mesh);
            self.vertex_buffer = vertex_buffer;
            self.index_buffer = index_buffer;
        }
        self.ranges = mesh.ranges;
    }

    /// Returns a view of the depth texture, recreating it if the size changed.
    pub fn update_depth_texture(
        &mut self,
        device: &wgpu::Device,
        width: u32,
        height: u32,
    ) -> wgpu::TextureView {
        let texture = match self.depth_texture.take() {
            Some(texture) if texture.width() == width && texture.height() == height => texture,
            _ => device.create_texture(&wgpu::TextureDescriptor {
                label: Some("Depth Texture"),
                size: wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: DEPTH_FORMAT,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                view_formats: &[],
            }),
        };
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        self.depth_texture = Some(texture);
        view
    }

    /// Writes this frame's camera into both uniform buffers.
    pub fn update_uniforms(&self, queue: &wgpu::Queue, view_proj: Mat4) {
        let scene = SceneUniforms {
            view_proj: view_proj.0,
            ..self.base_uniforms
        };
        queue.write_buffer(&self.scene_uniform_buffer, 0, scene.as_bytes());
        queue.write_buffer(&self.exit_uniform_buffer, 0, scene.highlighted().as_bytes());
    }

    /// Records both maze draws into `pass`.
    pub fn render(&self, pass: &mut wgpu::RenderPass) {
        pass.set_pipeline(&self.pipeline);
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.set_bind_group(1, &self.texture_bind_group, &[]);

        pass.set_bind_group(0, &self.scene_bind_group, &[]);
        pass.draw_indexed(self.ranges.wall_floor(), 0, 0..1);

        pass.set_bind_group(0, &self.exit_bind_group, &[]);
        pass.draw_indexed(self.ranges.exit(), 0, 0..1);
    }
}
