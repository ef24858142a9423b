//! Application module.
//!
//! This module contains the winit application lifecycle for the maze demo: window creation,
//! event routing and the per-frame update.
//!
//! # Module Structure
//!
//! - [`app_state`]: Contains the [`AppState`] struct which holds all application state
//! - [`event_handler`]: Contains the [`App`] struct and event handling logic
//! - [`update`]: Contains the per-frame update and rendering logic
//!
//! # Event Flow
//!
//! 1. **Input Events**: Window and device events are captured by the event handler
//! 2. **State Updates**: Held keys move the player; Space regenerates the maze
//! 3. **Rendering**: The current state is rendered to the screen
//!
//! The application runs on a single thread. Maze regeneration completes inside
//! the event that requested it, before the next frame is drawn.

pub mod app_state;
pub mod event_handler;
pub mod update;

pub use app_state::AppState;
pub use event_handler::App;
