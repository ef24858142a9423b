//! Game state management module.
//!
//! This module defines the [`GameState`] struct, which tracks all mutable state for the game loop:
//! the player, the current maze, timing and the exit flag.

pub mod collision;
pub mod keys;
pub mod player;

use self::collision::CollisionSystem;
use self::player::Player;
use crate::config::Config;
use crate::maze::MazeSession;
use log::info;
use std::time::Instant;

/// Represents the entire mutable state of the game.
///
/// This struct is updated every frame and contains:
/// - The player and their position/orientation.
/// - The maze session holding the grid and its render buffers.
/// - Timing information for frame updates.
/// - Mouse capture and exit state.
pub struct GameState {
    /// The player character.
    pub player: Player,
    /// The current maze and its derived geometry.
    pub session: MazeSession,
    /// Handles collisions between the player and maze walls.
    pub collision_system: CollisionSystem,
    /// Time of the last frame.
    pub last_frame_time: Instant,
    /// Time elapsed since the last frame (seconds).
    pub delta_time: f32,
    /// Number of frames rendered since start.
    pub frame_count: u64,
    /// Whether the mouse is captured for camera movement.
    pub capture_mouse: bool,
    /// Whether the player has reached the exit cell of the current maze.
    pub exit_reached: bool,
    /// Set when the maze changed and GPU buffers must be re-uploaded.
    pub maze_dirty: bool,
}

impl GameState {
    /// Generates the first maze and spawns the player in it.
    pub fn new(config: &Config) -> Self {
        let session = MazeSession::new(&config.maze);
        let mut player = Player::spawn(&config.player, session.size());
        player.fov = config.render.fov_degrees;

        Self {
            player,
            session,
            collision_system: CollisionSystem::new(config.collision.clone()),
            last_frame_time: Instant::now(),
            delta_time: 0.0,
            frame_count: 0,
            capture_mouse: true,
            exit_reached: false,
            maze_dirty: true,
        }
    }

    /// Advances the frame clock.
    pub fn update_timing(&mut self) {
        let now = Instant::now();
        self.delta_time = now.duration_since(self.last_frame_time).as_secs_f32();
        self.last_frame_time = now;
        self.frame_count += 1;
    }

    /// Replaces the maze with a freshly carved one.
    ///
    /// The player keeps their position and orientation unless a new wall now
    /// overlaps them, in which case they are moved to the center of their cell.
    pub fn regenerate_maze(&mut self) {
        self.session.regenerate();
        if self
            .collision_system
            .collides(self.session.grid(), self.player.position)
        {
            self.player.snap_to_cell_center(self.session.size());
            info!(
                "Player blocked by new walls, moved to cell {:?}",
                self.player.current_cell()
            );
        }
        self.exit_reached = false;
        self.maze_dirty = true;
    }

    /// Applies one frame of movement with collision against the current maze.
    pub fn update_movement(&mut self, forward: bool, backward: bool, left: bool, right: bool) -> bool {
        let moved = self.player.move_with_collision(
            self.session.grid(),
            &self.collision_system,
            self.delta_time,
            forward,
            backward,
            left,
            right,
        );
        if moved {
            self.check_exit();
        }
        moved
    }

    /// Flags the exit once the player enters the exit cell.
    pub fn check_exit(&mut self) {
        if self.exit_reached {
            return;
        }
        let (exit_x, exit_z) = self.session.exit_cell();
        if self.player.current_cell() == (exit_x as i32, exit_z as i32) {
            self.exit_reached = true;
            info!(
                "Exit reached in maze #{} after {} frames",
                self.session.generation(),
                self.frame_count
            );
        }
    }
}
