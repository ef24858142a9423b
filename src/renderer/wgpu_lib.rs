//! WGPU-based renderer for the maze.
//!
//! This module provides [`WgpuRenderer`], which owns the surface, device and queue and
//! orchestrates the two passes of every frame:
//!
//! 1. **Main pass**: clears colour and depth, then draws the maze (see [`MazeRenderer`]).
//! 2. **Minimap pass**: loads the colour target and draws the overhead map into a
//!    corner viewport without depth testing (see [`MinimapRenderer`]).
//!
//! # Usage
//! Create a [`WgpuRenderer`] via [`WgpuRenderer::new`], call [`WgpuRenderer::upload_maze`]
//! whenever the maze changes, and [`WgpuRenderer::render`] once per frame.

use crate::config::Config;
use crate::error::RendererError;
use crate::game::GameState;
use crate::maze::MazeSession;
use crate::renderer::maze_renderer::MazeRenderer;
use crate::renderer::minimap_renderer::MinimapRenderer;
use crate::renderer::texture::TexturePair;
use log::info;

/// Background colour behind the maze.
const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.1,
    g: 0.1,
    b: 0.1,
    a: 1.0,
};

/// Main WGPU renderer.
pub struct WgpuRenderer {
    /// The WGPU surface for presenting rendered frames.
    pub surface: wgpu::Surface<'static>,
    /// The surface configuration (format, size, etc.).
    pub surface_config: wgpu::SurfaceConfiguration,
    /// The WGPU device for resource creation.
    pub device: wgpu::Device,
    /// The WGPU queue for submitting commands.
    pub queue: wgpu::Queue,
    /// Walls, floor and exit marker.
    pub maze_renderer: MazeRenderer,
    /// Overhead map overlay.
    pub minimap_renderer: MinimapRenderer,
}

impl WgpuRenderer {
    /// Initializes a new [`WgpuRenderer`] and uploads the current maze.
    pub async fn new(
        instance: &wgpu::Instance,
        surface: wgpu::Surface<'static>,
        width: u32,
        height: u32,
        config: &Config,
        textures: &TexturePair,
        session: &MazeSession,
    ) -> Result<Self, RendererError> {
        let adapter = Self::create_adapter(instance, &surface).await?;
        let (device, queue) = Self::create_device(&adapter).await?;
        let surface_config = Self::create_surface_config(&surface, &adapter, width, height)?;

        surface.configure(&device, &surface_config);
        info!(
            "Using adapter {} with surface format {:?}, {} textures",
            adapter.get_info().name,
            surface_config.format,
            if textures.fallback { "checkerboard" } else { "loaded" }
        );

        let maze_renderer = MazeRenderer::new(
            &device,
            &queue,
            &surface_config,
            config,
            textures,
            session.mesh(),
        );
        let minimap_renderer =
            MinimapRenderer::new(&device, &surface_config, session.minimap(), session.size());

        Ok(Self {
            surface,
            surface_config,
            device,
            queue,
            maze_renderer,
            minimap_renderer,
        })
    }

    async fn create_adapter(
        instance: &wgpu::Instance,
        surface: &wgpu::Surface<'static>,
    ) -> Result<wgpu::Adapter, RendererError> {
        instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                force_fallback_adapter: false,
                compatible_surface: Some(surface),
            })
            .await
            .ok_or(RendererError::NoAdapter)
    }

    async fn create_device(
        adapter: &wgpu::Adapter,
    ) -> Result<(wgpu::Device, wgpu::Queue), RendererError> {
        Ok(adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: None,
                    required_features: wgpu::Features::empty(),
                    required_limits: Default::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?)
    }

    fn create_surface_config(
        surface: &wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
    ) -> Result<wgpu::SurfaceConfiguration, RendererError> {
        let capabilities = surface.get_capabilities(adapter);
        let format = capabilities
            .formats
            .iter()
            .find(|&&f| f == wgpu::TextureFormat::Bgra8UnormSrgb)
            .or_else(|| capabilities.formats.iter().find(|f| f.is_srgb()))
            .or_else(|| capabilities.formats.first())
            .copied()
            .ok_or(RendererError::UnsupportedSurface)?;
        let alpha_mode = capabilities
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        Ok(wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            desired_maximum_frame_latency: 2,
            alpha_mode,
            view_formats: vec![],
        })
    }

    /// Reconfigures the surface for a new window size. Zero sizes are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.surface_config.width = width;
        self.surface_config.height = height;
        self.reconfigure();
    }

    /// Reapplies the current surface configuration, e.g. after the surface was lost.
    pub fn reconfigure(&self) {
        self.surface.configure(&self.device, &self.surface_config);
    }

    /// Replaces the GPU copies of the mesh and minimap with the session's current maze.
    pub fn upload_maze(&mut self, session: &MazeSession) {
        self.maze_renderer
            .upload(&self.device, &self.queue, session.mesh());
        self.minimap_renderer
            .upload(&self.device, &self.queue, session.minimap());
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.surface_config.width as f32 / self.surface_config.height.max(1) as f32
    }

    /// Renders and presents one frame.
    pub fn render(&mut self, game_state: &GameState) -> Result<(), wgpu::SurfaceError> {
        let surface_texture = self.surface.get_current_texture()?;
        let surface_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let (width, height) = (self.surface_config.width, self.surface_config.height);
        let depth_view = self
            .maze_renderer
            .update_depth_texture(&self.device, width, height);

        let view_proj = game_state
            .player
            .get_view_proj_matrix(self.aspect_ratio());
        self.maze_renderer.update_uniforms(&self.queue, view_proj);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        {
            let mut main_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            self.maze_renderer.render(&mut main_pass);
        }

        {
            let mut minimap_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Minimap Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            self.minimap_renderer
                .render(&mut minimap_pass, width, height);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
        Ok(())
    }
}
