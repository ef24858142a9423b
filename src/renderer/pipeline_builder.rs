//! # Pipeline and Bind Group Builders
//!
//! Fluent builders for the two render pipelines the maze needs (the textured
//! maze mesh and the minimap line list) plus the buffer helpers both share.
//!
//! Every pipeline built here draws both faces of each triangle, since maze
//! walls are single quads seen from either side.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use maze3d::renderer::pipeline_builder::{BindGroupLayoutBuilder, PipelineBuilder, create_vertex_2d_layout};
//! # let device: wgpu::Device = unimplemented!();
//! # let surface_format = wgpu::TextureFormat::Bgra8UnormSrgb;
//! # let shader_source = "";
//!
//! let bind_group_layout = BindGroupLayoutBuilder::new(&device)
//!     .with_label("Minimap Uniform Layout")
//!     .with_uniform_buffer(0, wgpu::ShaderStages::VERTEX_FRAGMENT)
//!     .build();
//!
//! let pipeline = PipelineBuilder::new(&device, surface_format, shader_source)
//!     .with_label("Minimap Pipeline")
//!     .with_vertex_buffer(create_vertex_2d_layout())
//!     .with_bind_group_layout(&bind_group_layout)
//!     .with_topology(wgpu::PrimitiveTopology::LineList)
//!     .build();
//! ```

use wgpu::util::DeviceExt;

/// Depth buffer format shared by the depth texture and the maze pipeline.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24Plus;

/// Builder for a render pipeline from a single WGSL module with `vs_main` and `fs_main`.
///
/// Defaults: triangle list, no blending, no culling, no depth test.
pub struct PipelineBuilder<'a> {
    device: &'a wgpu::Device,
    surface_format: wgpu::TextureFormat,
    shader_source: &'a str,
    label: Option<&'a str>,
    vertex_buffers: Vec<wgpu::VertexBufferLayout<'a>>,
    bind_group_layouts: Vec<&'a wgpu::BindGroupLayout>,
    topology: wgpu::PrimitiveTopology,
    depth_test: bool,
}

impl<'a> PipelineBuilder<'a> {
    pub fn new(
        device: &'a wgpu::Device,
        surface_format: wgpu::TextureFormat,
        shader_source: &'a str,
    ) -> Self {
        Self {
            device,
            surface_format,
            shader_source,
            label: None,
            vertex_buffers: Vec::new(),
            bind_group_layouts: Vec::new(),
            topology: wgpu::PrimitiveTopology::TriangleList,
            depth_test: false,
        }
    }

    /// Labels the shader module, layout and pipeline.
    pub fn with_label(mut self, label: &'a str) -> Self {
        self.label = Some(label);
        self
    }

    /// Buffers bind in the order they are added.
    pub fn with_vertex_buffer(mut self, layout: wgpu::VertexBufferLayout<'a>) -> Self {
        self.vertex_buffers.push(layout);
        self
    }

    /// The first layout added is `@group(0)`.
    pub fn with_bind_group_layout(mut self, layout: &'a wgpu::BindGroupLayout) -> Self {
        self.bind_group_layouts.push(layout);
        self
    }

    pub fn with_topology(mut self, topology: wgpu::PrimitiveTopology) -> Self {
        self.topology = topology;
        self
    }

    /// Tests and writes depth against a [`DEPTH_FORMAT`] attachment.
    pub fn with_depth_test(mut self) -> Self {
        self.depth_test = true;
        self
    }

    fn primitive_state(&self) -> wgpu::PrimitiveState {
        wgpu::PrimitiveState {
            topology: self.topology,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            ..Default::default()
        }
    }

    pub fn build(self) -> wgpu::RenderPipeline {
        let shader = self
            .device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: self.label,
                source: wgpu::ShaderSource::Wgsl(self.shader_source.into()),
            });

        let layout = self
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: self.label,
                bind_group_layouts: &self.bind_group_layouts,
                push_constant_ranges: &[],
            });

        let color_target = wgpu::ColorTargetState {
            format: self.surface_format,
            blend: Some(wgpu::BlendState::REPLACE),
            write_mask: wgpu::ColorWrites::ALL,
        };

        self.device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: self.label,
                layout: Some(&layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &self.vertex_buffers,
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(color_target)],
                    compilation_options: Default::default(),
                }),
                primitive: self.primitive_state(),
                depth_stencil: self.depth_test.then(depth_stencil_state),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            })
    }
}

/// Builder for bind group layouts.
///
/// ```rust,no_run
/// # let device: wgpu::Device = unimplemented!();
/// use maze3d::renderer::pipeline_builder::BindGroupLayoutBuilder;
///
/// let layout = BindGroupLayoutBuilder::new(&device)
///     .with_label("Maze Texture Layout")
///     .with_texture(0, wgpu::ShaderStages::FRAGMENT)
///     .with_texture(1, wgpu::ShaderStages::FRAGMENT)
///     .with_sampler(2, wgpu::ShaderStages::FRAGMENT)
///     .build();
/// ```
pub struct BindGroupLayoutBuilder<'a> {
    device: &'a wgpu::Device,
    label: Option<&'a str>,
    entries: Vec<wgpu::BindGroupLayoutEntry>,
}

impl<'a> BindGroupLayoutBuilder<'a> {
    pub fn new(device: &'a wgpu::Device) -> Self {
        Self {
            device,
            label: None,
            entries: Vec::new(),
        }
    }

    pub fn with_label(mut self, label: &'a str) -> Self {
        self.label = Some(label);
        self
    }

    fn with_entry(
        mut self,
        binding: u32,
        visibility: wgpu::ShaderStages,
        ty: wgpu::BindingType,
    ) -> Self {
        self.entries.push(wgpu::BindGroupLayoutEntry {
            binding,
            visibility,
            ty,
            count: None,
        });
        self
    }

    /// `texture_2d<f32>`, filterable.
    pub fn with_texture(self, binding: u32, visibility: wgpu::ShaderStages) -> Self {
        self.with_entry(
            binding,
            visibility,
            wgpu::BindingType::Texture {
                multisampled: false,
                view_dimension: wgpu::TextureViewDimension::D2,
                sample_type: wgpu::TextureSampleType::Float { filterable: true },
            },
        )
    }

    pub fn with_sampler(self, binding: u32, visibility: wgpu::ShaderStages) -> Self {
        self.with_entry(
            binding,
            visibility,
            wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
        )
    }

    pub fn with_uniform_buffer(self, binding: u32, visibility: wgpu::ShaderStages) -> Self {
        self.with_entry(
            binding,
            visibility,
            wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
        )
    }

    pub fn build(self) -> wgpu::BindGroupLayout {
        self.device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: self.label,
                entries: &self.entries,
            })
    }
}

/// Tightly packed `[f32; 2]` points at shader location 0, as uploaded by the minimap.
pub fn create_vertex_2d_layout() -> wgpu::VertexBufferLayout<'static> {
    const ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &ATTRIBUTES,
    }
}

/// Keeps the nearest fragment and writes depth.
fn depth_stencil_state() -> wgpu::DepthStencilState {
    wgpu::DepthStencilState {
        format: DEPTH_FORMAT,
        depth_write_enabled: true,
        depth_compare: wgpu::CompareFunction::Less,
        stencil: wgpu::StencilState::default(),
        bias: wgpu::DepthBiasState::default(),
    }
}

/// Uniform buffer holding a single `T`, writable each frame.
pub fn create_uniform_buffer<T: bytemuck::Pod>(
    device: &wgpu::Device,
    data: &T,
    label: &str,
) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::bytes_of(data),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    })
}

/// Creates a vertex or index buffer initialised with `data`.
///
/// `COPY_DST` is included so the contents can be replaced in place when the
/// size does not change.
pub fn create_init_buffer<T: bytemuck::Pod>(
    device: &wgpu::Device,
    data: &[T],
    usage: wgpu::BufferUsages,
    label: &str,
) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::cast_slice(data),
        usage: usage | wgpu::BufferUsages::COPY_DST,
    })
}
