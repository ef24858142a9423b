//! Accept/reject collision between the player and maze walls.
//!
//! # Overview
//!
//! The player is approximated by an axis-aligned box around the eye position.
//! Every standing wall flag is a thin slab lying inside its cell, flush with
//! the cell's edge. A move is tested by building the box at the candidate
//! position and checking it against the walls of the 3x3 block of cells around
//! the candidate's cell. Any overlap rejects the whole move; there is no
//! sliding or partial resolution.
//!
//! Because each wall flag produces its own slab, an interior wall between two
//! cells is covered by two slabs, one on each side of the shared edge.
//!
//! # Boundaries
//!
//! Overlap tests are inclusive: boxes that only touch count as colliding.
//! Cells outside the grid contribute nothing, so a position outside the maze
//! is never blocked.

use crate::game::player::Player;
use crate::math::Vec3;
use crate::maze::grid::{Direction, Grid};
use serde::Deserialize;

/// Axis-Aligned Bounding Box (AABB) used for both the player and the wall slabs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl AABB {
    pub fn new(min: [f32; 3], max: [f32; 3]) -> Self {
        Self { min, max }
    }

    /// Checks if this AABB overlaps another on all three axes.
    ///
    /// Touching faces count as an intersection.
    pub fn intersects(&self, other: &AABB) -> bool {
        for i in 0..3 {
            if self.max[i] < other.min[i] || self.min[i] > other.max[i] {
                return false;
            }
        }
        true
    }
}

/// Dimensions of the player box and the wall slabs, in grid units.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Half the player box's width in x and z.
    pub half_extent: f32,
    /// Distance from the eye down to the bottom of the box.
    pub below_eye: f32,
    /// Distance from the eye up to the top of the box.
    pub above_eye: f32,
    pub wall_thickness: f32,
    pub wall_height: f32,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            half_extent: 0.2,
            below_eye: 0.5,
            above_eye: 1.5,
            wall_thickness: 0.01,
            wall_height: 1.0,
        }
    }
}

/// Tests candidate player positions against the walls of a [`Grid`].
#[derive(Debug, Default, Clone)]
pub struct CollisionSystem {
    pub config: CollisionConfig,
}

impl CollisionSystem {
    pub fn new(config: CollisionConfig) -> Self {
        Self { config }
    }

    /// The player's box when the eye is at `position`.
    pub fn player_box(&self, position: Vec3) -> AABB {
        let r = self.config.half_extent;
        AABB::new(
            [
                position.x() - r,
                position.y() - self.config.below_eye,
                position.z() - r,
            ],
            [
                position.x() + r,
                position.y() + self.config.above_eye,
                position.z() + r,
            ],
        )
    }

    /// The slab for the wall on `direction` of cell `(x, y)`. Grid row `y` is world `z`.
    pub fn wall_slab(&self, x: usize, y: usize, direction: Direction) -> AABB {
        let (x, z) = (x as f32, y as f32);
        let t = self.config.wall_thickness;
        let h = self.config.wall_height;

        let ([x0, x1], [z0, z1]) = match direction {
            Direction::Left => ([x, x + t], [z, z + 1.0]),
            Direction::Bottom => ([x, x + 1.0], [z, z + t]),
            Direction::Right => ([x + 1.0 - t, x + 1.0], [z, z + 1.0]),
            Direction::Top => ([x, x + 1.0], [z + 1.0 - t, z + 1.0]),
        };
        AABB::new([x0, 0.0, z0], [x1, h, z1])
    }

    /// Returns `true` if the player box at `position` overlaps any wall slab
    /// in the 3x3 neighborhood of the cell containing `position`.
    pub fn collides(&self, grid: &Grid, position: Vec3) -> bool {
        let player = self.player_box(position);
        // Truncation toward zero, so -0.5 lands in cell 0
        let cell_x = position.x() as i32;
        let cell_z = position.z() as i32;

        for dz in -1..=1 {
            for dx in -1..=1 {
                let (nx, nz) = (cell_x + dx, cell_z + dz);
                if !grid.contains(nx, nz) {
                    continue;
                }
                let (nx, nz) = (nx as usize, nz as usize);
                let hit = Direction::ALL
                    .into_iter()
                    .filter(|&d| grid.has_wall(nx, nz, d))
                    .any(|d| player.intersects(&self.wall_slab(nx, nz, d)));
                if hit {
                    return true;
                }
            }
        }
        false
    }
}

impl Player {
    /// Moves the player by the requested input unless the path would collide.
    ///
    /// The step is tested in increments of at most `half_extent`, so a long
    /// frame cannot carry the box over a wall slab. Any colliding increment
    /// rejects the whole move and the player stays where it was. Returns
    /// `true` if the player moved.
    pub fn move_with_collision(
        &mut self,
        grid: &Grid,
        collision_system: &CollisionSystem,
        delta_time: f32,
        forward: bool,
        backward: bool,
        left: bool,
        right: bool,
    ) -> bool {
        let desired_pos = self.candidate_position(delta_time, forward, backward, left, right);
        if desired_pos == self.position {
            return false;
        }

        let step = desired_pos - self.position;
        let max_step = collision_system.config.half_extent;
        let substeps = (step.length() / max_step).ceil().max(1.0) as u32;
        let blocked = (1..=substeps).any(|i| {
            let point = if i == substeps {
                desired_pos
            } else {
                self.position + step * (i as f32 / substeps as f32)
            };
            collision_system.collides(grid, point)
        });
        if blocked {
            return false;
        }
        self.position = desired_pos;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlayerConfig;

    /// Dimensions that are exact in binary, so boundary tests are precise.
    fn exact_system() -> CollisionSystem {
        CollisionSystem::new(CollisionConfig {
            half_extent: 0.25,
            wall_thickness: 0.125,
            ..CollisionConfig::default()
        })
    }

    #[test]
    fn test_aabb_touching_faces_intersect() {
        let a = AABB::new([0.0; 3], [1.0; 3]);
        let b = AABB::new([1.0, 0.0, 0.0], [2.0, 1.0, 1.0]);
        let c = AABB::new([1.5, 0.0, 0.0], [2.0, 1.0, 1.0]);
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    /// A box exactly touching the left slab collides; moving off by a gap does not.
    #[test]
    fn test_touching_wall_collides() {
        let system = exact_system();
        let grid = Grid::new(1);

        // Box spans x in [0.125, 0.625]; left slab spans [0, 0.125]
        assert!(system.collides(&grid, Vec3::new(0.375, 1.0, 0.5)));
        // Box spans x in [0.25, 0.75]; no slab reaches it
        assert!(!system.collides(&grid, Vec3::new(0.5, 1.0, 0.5)));
    }

    /// Slabs sit inside their own cell, flush with the cell edge.
    #[test]
    fn test_wall_slab_extents() {
        let system = exact_system();
        assert_eq!(
            system.wall_slab(2, 3, Direction::Right),
            AABB::new([2.875, 0.0, 3.0], [3.0, 1.0, 4.0])
        );
        assert_eq!(
            system.wall_slab(2, 3, Direction::Bottom),
            AABB::new([2.0, 0.0, 3.0], [3.0, 1.0, 3.125])
        );
    }

    /// Positions well outside the grid have no neighboring walls.
    #[test]
    fn test_outside_grid_is_free() {
        let system = CollisionSystem::default();
        let grid = Grid::new(3);
        assert!(!system.collides(&grid, Vec3::new(-5.0, 1.0, -5.0)));
        assert!(!system.collides(&grid, Vec3::new(10.5, 1.0, 1.5)));
    }

    /// An opened passage no longer blocks once the grid changes.
    #[test]
    fn test_open_passage_is_passable() {
        let system = exact_system();
        let mut grid = Grid::new(2);
        let on_edge = Vec3::new(1.0, 1.0, 0.5);
        assert!(system.collides(&grid, on_edge));

        grid.remove_wall(0, 0, Direction::Right);
        assert!(!system.collides(&grid, on_edge));
    }

    /// A blocked move leaves the player in place; a free move applies in full.
    #[test]
    fn test_move_rejected_or_applied() {
        let system = exact_system();
        let grid = Grid::new(3);
        let mut player = Player::spawn(&PlayerConfig::default(), 3);
        assert_eq!(player.position, Vec3::new(1.5, 1.0, 1.5));

        // Facing +x; 0.25 units puts the box against the right slab at x >= 1.875
        assert!(!player.move_with_collision(&grid, &system, 0.1, true, false, false, false));
        assert_eq!(player.position, Vec3::new(1.5, 1.0, 1.5));

        // 0.05 units keeps the box's edge at 1.8
        assert!(player.move_with_collision(&grid, &system, 0.02, true, false, false, false));
        assert!((player.position.x() - 1.55).abs() < 1e-5);
        assert_eq!(player.position.z(), 1.5);
    }

    /// A long frame whose end point clears every slab is still stopped by
    /// the wall in between.
    #[test]
    fn test_long_frame_cannot_cross_wall() {
        let system = CollisionSystem::default();
        let grid = Grid::new(3);
        let mut player = Player::spawn(&PlayerConfig::default(), 3);

        // One unit along +x would land at the center of the sealed cell (2, 1)
        let end = player.candidate_position(0.4, true, false, false, false);
        assert!(!system.collides(&grid, end));

        assert!(!player.move_with_collision(&grid, &system, 0.4, true, false, false, false));
        assert_eq!(player.position, Vec3::new(1.5, 1.0, 1.5));
        assert_eq!(player.current_cell(), (1, 1));
    }

    /// A long frame along an open corridor still moves the full distance.
    #[test]
    fn test_long_frame_through_open_corridor() {
        let system = CollisionSystem::default();
        let mut grid = Grid::new(3);
        grid.remove_wall(0, 1, Direction::Right);
        grid.remove_wall(1, 1, Direction::Right);
        let mut player = Player::spawn(&PlayerConfig::default(), 3);
        player.position = Vec3::new(0.5, 1.0, 1.5);

        assert!(player.move_with_collision(&grid, &system, 0.4, true, false, false, false));
        assert!((player.position.x() - 1.5).abs() < 1e-5);
        assert_eq!(player.position.z(), 1.5);
    }
}
