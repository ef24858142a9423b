//! Player state and movement logic.
//!
//! This module defines the [`Player`] struct, which tracks the camera's position and
//! orientation, and provides methods for mouse look, movement and view matrix calculation.
//!
//! # Coordinate System
//!
//! The player uses a right-handed coordinate system:
//! - X-axis: grid column
//! - Y-axis: height, with the floor at `y = 0`
//! - Z-axis: grid row
//!
//! Angles are measured in degrees:
//! - **Yaw**: rotation around the vertical axis, unbounded. Yaw `0` faces `+x`.
//! - **Pitch**: up/down look angle, clamped to the configured limit.
//!
//! # Usage Example
//!
//! ```rust
//! use maze3d::config::PlayerConfig;
//! use maze3d::game::player::Player;
//!
//! let mut player = Player::spawn(&PlayerConfig::default(), 10);
//! player.mouse_movement(10.0, 5.0);
//! let view_proj = player.get_view_proj_matrix(4.0 / 3.0);
//! ```

use crate::config::PlayerConfig;
use crate::math::{Mat4, Vec3, deg_to_rad};

const NEAR_PLANE: f32 = 0.1;
const FAR_PLANE: f32 = 100.0;

/// The first-person camera and the body it moves.
///
/// # Fields
///
/// ## Position and Orientation
/// - `position`: eye position in world space
/// - `yaw`, `pitch`: look angles in degrees
/// - `front`: unit look direction derived from the angles
/// - `fov`: vertical field of view in degrees
///
/// ## Movement Parameters
/// - `speed`: movement speed in units per second
/// - `mouse_sensitivity`: degrees of rotation per unit of pointer motion
/// - `pitch_limit`: maximum absolute pitch in degrees
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Eye position in world space.
    pub position: Vec3,

    /// Horizontal look angle in degrees.
    ///
    /// Grows without wrapping; only its sine and cosine are used.
    pub yaw: f32,

    /// Vertical look angle in degrees.
    ///
    /// Positive values look up. Always within `[-pitch_limit, pitch_limit]`.
    pub pitch: f32,

    /// Unit look direction, recomputed whenever yaw or pitch changes.
    pub front: Vec3,

    /// Vertical field of view in degrees for perspective projection.
    pub fov: f32,

    pub speed: f32,
    pub mouse_sensitivity: f32,
    pub pitch_limit: f32,
}

impl Player {
    /// Places a new player at the center of the spawn cell, at eye height,
    /// facing `+x` and level.
    ///
    /// The spawn cell is clamped into a `grid_size x grid_size` grid.
    pub fn spawn(config: &PlayerConfig, grid_size: usize) -> Self {
        let last = grid_size.saturating_sub(1);
        let cell_x = config.spawn[0].min(last) as f32;
        let cell_z = config.spawn[1].min(last) as f32;

        let mut player = Self {
            position: Vec3::new(cell_x + 0.5, config.eye_height, cell_z + 0.5),
            yaw: 0.0,
            pitch: 0.0,
            front: Vec3::new(1.0, 0.0, 0.0),
            fov: 45.0,
            speed: config.speed,
            mouse_sensitivity: config.mouse_sensitivity,
            pitch_limit: config.pitch_limit,
        };
        player.update_front();
        player
    }

    /// Moves the player to the center of the cell they stand in, clamped into
    /// a `grid_size x grid_size` grid. Height and orientation are kept.
    pub fn snap_to_cell_center(&mut self, grid_size: usize) {
        let last = grid_size.saturating_sub(1) as i32;
        let (cell_x, cell_z) = self.current_cell();
        self.position = Vec3::new(
            cell_x.clamp(0, last) as f32 + 0.5,
            self.position.y(),
            cell_z.clamp(0, last) as f32 + 0.5,
        );
    }

    /// Recomputes `front` from yaw and pitch.
    fn update_front(&mut self) {
        let yaw = deg_to_rad(self.yaw);
        let pitch = deg_to_rad(self.pitch);
        self.front = Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize();
    }

    /// Updates yaw and pitch from a relative pointer delta.
    ///
    /// Moving the pointer right turns right; moving it down looks down.
    pub fn mouse_movement(&mut self, delta_x: f64, delta_y: f64) {
        self.yaw += delta_x as f32 * self.mouse_sensitivity;
        self.pitch = (self.pitch - delta_y as f32 * self.mouse_sensitivity)
            .clamp(-self.pitch_limit, self.pitch_limit);
        self.update_front();
    }

    /// Where the requested input would take the player after `delta_time` seconds.
    ///
    /// Forward and backward follow the look direction projected onto the
    /// floor; strafing follows the camera's right vector. Height never changes.
    pub fn candidate_position(
        &self,
        delta_time: f32,
        forward: bool,
        backward: bool,
        left: bool,
        right: bool,
    ) -> Vec3 {
        let step = self.speed * delta_time;
        let ahead = self.front.flatten().normalize();
        let side = self.front.cross(&Vec3::UP).normalize();

        let mut desired_pos = self.position;
        if forward {
            desired_pos += ahead * step;
        }
        if backward {
            desired_pos -= ahead * step;
        }
        if left {
            desired_pos -= side * step;
        }
        if right {
            desired_pos += side * step;
        }
        desired_pos
    }

    /// Returns the view matrix looking from the eye along `front`.
    pub fn get_view_matrix(&self) -> Mat4 {
        Mat4::look_at(self.position, self.position + self.front, Vec3::UP)
    }

    /// Returns `projection * view` for the given viewport aspect ratio.
    pub fn get_view_proj_matrix(&self, aspect_ratio: f32) -> Mat4 {
        let projection = Mat4::perspective(deg_to_rad(self.fov), aspect_ratio, NEAR_PLANE, FAR_PLANE);
        projection.multiply(&self.get_view_matrix())
    }

    /// The grid cell under the eye, truncating toward zero.
    pub fn current_cell(&self) -> (i32, i32) {
        (self.position.x() as i32, self.position.z() as i32)
    }
}
