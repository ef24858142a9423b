//! Per-frame update logic.
//!
//! Contains the redraw handler for the App struct.

use super::event_handler::App;
use log::{debug, error, warn};
use winit::event_loop::ActiveEventLoop;

impl App {
    /// Advances the game by one frame and renders it.
    ///
    /// # Frame Steps
    /// 1. Measure the time since the previous frame
    /// 2. Move the player from the held keys, gated by collision
    /// 3. Re-upload maze buffers if the maze was regenerated
    /// 4. Render and present
    ///
    /// Lost or outdated surfaces are reconfigured and the frame is skipped.
    /// Running out of GPU memory ends the event loop.
    pub fn handle_redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(state), Some(window)) = (self.state.as_mut(), self.window.as_ref()) else {
            return;
        };
        if window.is_minimized().unwrap_or(false) {
            return;
        }

        state.game_state.update_timing();
        state.key_state.update(&mut state.game_state);

        if state.game_state.maze_dirty {
            state
                .wgpu_renderer
                .upload_maze(&state.game_state.session);
            state.game_state.maze_dirty = false;
            debug!(
                "Uploaded maze #{} to the GPU",
                state.game_state.session.generation()
            );
        }

        match state.wgpu_renderer.render(&state.game_state) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                warn!("Surface lost or outdated, reconfiguring");
                state.wgpu_renderer.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                error!("GPU out of memory, exiting");
                event_loop.exit();
            }
            Err(e) => {
                warn!("Skipping frame: {}", e);
            }
        }
    }
}
