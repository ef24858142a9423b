//! Winit event routing for the maze demo.
//!
//! [`App`] implements [`ApplicationHandler`]: it creates the window on the first
//! resume, turns keyboard and mouse input into player actions, and drives one
//! frame per redraw request.

use crate::app::app_state::AppState;
use crate::config::Config;
use crate::error::RendererError;
use crate::game::keys::{GameKey, winit_key_to_game_key};
use log::{error, info};
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{DeviceEvent, DeviceId, ElementState, KeyEvent, WindowEvent},
    event_loop::ActiveEventLoop,
    window::{Window, WindowId},
};

/// Owns the window and everything built on top of it.
///
/// `state` and `window` stay `None` until [`ApplicationHandler::resumed`] creates
/// the window; events arriving before that are ignored.
pub struct App {
    pub instance: wgpu::Instance,
    /// Validated configuration, consumed when the window is created.
    pub config: Config,
    pub state: Option<AppState>,
    pub window: Option<Arc<Window>>,
}

impl App {
    pub fn new(config: Config) -> Self {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        Self {
            instance,
            config,
            state: None,
            window: None,
        }
    }

    /// Creates the surface for `window` and initializes all application state.
    pub async fn set_window(&mut self, window: Window) -> Result<(), RendererError> {
        let window = Arc::new(window);
        let size = window.inner_size();
        let (width, height) = if size.width > 0 && size.height > 0 {
            (size.width, size.height)
        } else {
            (self.config.render.width, self.config.render.height)
        };

        let surface = self.instance.create_surface(window.clone())?;
        let mut state =
            AppState::new(&self.instance, surface, width, height, &self.config).await?;
        state.triage_mouse(&window);

        self.window.get_or_insert(window);
        self.state.get_or_insert(state);
        Ok(())
    }

    /// Zero-sized (minimized) windows keep the previous surface.
    pub fn handle_resized(&mut self, width: u32, height: u32) {
        match self.state.as_mut() {
            Some(state) if width > 0 && height > 0 => state.resize_surface(width, height),
            _ => {}
        }
    }

    /// Applies a keyboard event. One-shot actions fire only on a fresh press.
    fn handle_key(&mut self, event_loop: &ActiveEventLoop, event: &KeyEvent) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        let Some(game_key) = winit_key_to_game_key(&event.logical_key) else {
            return;
        };

        match event.state {
            ElementState::Pressed => {
                let fresh = state.key_state.press_key(game_key) && !event.repeat;
                if !fresh || !game_key.is_one_shot() {
                    return;
                }
                match game_key {
                    GameKey::Regenerate => state.game_state.regenerate_maze(),
                    GameKey::Exit => {
                        info!("Escape pressed, exiting");
                        event_loop.exit();
                    }
                    _ => {}
                }
            }
            ElementState::Released => state.key_state.release_key(game_key),
        }
    }
}

impl ApplicationHandler for App {
    /// Creates the window and initializes the renderer on first resume.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title("Maze")
            .with_inner_size(PhysicalSize::new(
                self.config.render.width,
                self.config.render.height,
            ));
        let window = match event_loop.create_window(attributes) {
            Ok(window) => window,
            Err(err) => {
                error!("Failed to create window: {}", err);
                event_loop.exit();
                return;
            }
        };

        if let Err(err) = pollster::block_on(self.set_window(window)) {
            error!("Failed to initialize renderer: {}", err);
            event_loop.exit();
        }
    }

    /// Feeds raw mouse motion into the camera while the cursor is captured.
    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            if let Some(state) = self.state.as_mut() {
                if state.game_state.capture_mouse {
                    state.game_state.player.mouse_movement(delta.0, delta.1);
                }
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, exiting");
                event_loop.exit();
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                self.handle_resized(width, height);
            }
            WindowEvent::KeyboardInput { event, .. } => {
                self.handle_key(event_loop, &event);
            }
            WindowEvent::Focused(focused) => {
                if let (Some(state), Some(window)) = (self.state.as_mut(), self.window.as_ref()) {
                    if !focused {
                        state.key_state.clear();
                    }
                    state.game_state.capture_mouse = focused;
                    state.triage_mouse(window);
                }
            }
            WindowEvent::RedrawRequested => {
                self.handle_redraw(event_loop);
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = self.window.as_ref() {
            window.request_redraw();
        }
    }
}
