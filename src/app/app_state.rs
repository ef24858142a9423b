//! AppState module.
//!
//! This module defines the [`AppState`] struct, which holds all state required for a running
//! session: the renderer, the game logic and the input state.

use crate::config::Config;
use crate::error::RendererError;
use crate::game::{GameState, keys::KeyState};
use crate::renderer::texture::load_texture_pair;
use crate::renderer::wgpu_lib::WgpuRenderer;
use log::warn;
use winit::window::{CursorGrabMode, Window};

/// Holds all state required for a running session.
pub struct AppState {
    /// The WGPU renderer for the maze and minimap.
    pub wgpu_renderer: WgpuRenderer,
    /// The main game state (player, maze session, timing).
    pub game_state: GameState,
    /// The current input state (held keys).
    pub key_state: KeyState,
}

impl AppState {
    /// Generates the first maze, loads textures and creates the renderer.
    pub async fn new(
        instance: &wgpu::Instance,
        surface: wgpu::Surface<'static>,
        width: u32,
        height: u32,
        config: &Config,
    ) -> Result<Self, RendererError> {
        let mut game_state = GameState::new(config);
        let textures = load_texture_pair(&config.render.wall_texture, &config.render.floor_texture);

        let wgpu_renderer = WgpuRenderer::new(
            instance,
            surface,
            width,
            height,
            config,
            &textures,
            &game_state.session,
        )
        .await?;
        // The renderer was built from the current maze
        game_state.maze_dirty = false;

        Ok(Self {
            wgpu_renderer,
            game_state,
            key_state: KeyState::default(),
        })
    }

    /// Resizes the WGPU surface and updates the configuration.
    pub fn resize_surface(&mut self, width: u32, height: u32) {
        self.wgpu_renderer.resize(width, height);
    }

    /// Grabs and hides the cursor while mouse capture is on, releases it otherwise.
    ///
    /// Locking is preferred; platforms that cannot lock fall back to confining.
    pub fn triage_mouse(&mut self, window: &Window) {
        if self.game_state.capture_mouse {
            if let Err(e) = window.set_cursor_grab(CursorGrabMode::Locked) {
                if let Err(confine_err) = window.set_cursor_grab(CursorGrabMode::Confined) {
                    warn!("Failed to grab cursor: {} / {}", e, confine_err);
                }
            }
            window.set_cursor_visible(false);
        } else {
            if let Err(e) = window.set_cursor_grab(CursorGrabMode::None) {
                warn!("Failed to release cursor: {}", e);
            }
            window.set_cursor_visible(true);
        }
    }
}
