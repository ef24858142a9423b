//! Runtime configuration.
//!
//! Every section has reference defaults, so a config file only needs the keys
//! it changes. Files are TOML:
//!
//! ```toml
//! [maze]
//! size = 15
//! seed = 42
//!
//! [player]
//! speed = 3.0
//! ```

use crate::error::ConfigError;
use crate::game::collision::CollisionConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Maze generation settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MazeConfig {
    /// Cells along each axis.
    pub size: usize,
    /// Cell the carve starts from.
    pub start: [usize; 2],
    /// Fixed seed for reproducible mazes; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            size: 10,
            start: [0, 0],
            seed: None,
        }
    }
}

/// Camera and movement settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Movement speed in grid units per second.
    pub speed: f32,
    /// Degrees of rotation per unit of pointer motion.
    pub mouse_sensitivity: f32,
    /// Pitch is clamped to `[-pitch_limit, pitch_limit]` degrees.
    pub pitch_limit: f32,
    pub eye_height: f32,
    /// Spawn cell; clamped into the grid.
    pub spawn: [usize; 2],
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            speed: 2.5,
            mouse_sensitivity: 0.1,
            pitch_limit: 89.0,
            eye_height: 1.0,
            spawn: [1, 1],
        }
    }
}

/// Window and rendering settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub fov_degrees: f32,
    pub wall_texture: PathBuf,
    pub floor_texture: PathBuf,
    /// Wall texture repeats across one wall quad (u, v).
    pub wall_tiling: [f32; 2],
    /// Floor texture repeats across the floor; `None` uses the grid size.
    pub floor_tiling: Option<f32>,
    /// RGBA colour of the exit marker.
    pub exit_color: [f32; 4],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1600,
            height: 1200,
            fov_degrees: 45.0,
            wall_texture: PathBuf::from("assets/wall.jpg"),
            floor_texture: PathBuf::from("assets/floor.jpg"),
            wall_tiling: [2.0, 1.0],
            floor_tiling: None,
            exit_color: [1.0, 0.0, 0.0, 1.0],
        }
    }
}

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub maze: MazeConfig,
    pub player: PlayerConfig,
    pub collision: CollisionConfig,
    pub render: RenderConfig,
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field,
            reason: format!("must be positive, got {}", value),
        })
    }
}

impl Config {
    /// Parses a TOML document, filling missing keys with defaults.
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Reads and parses a TOML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&source)
    }

    /// Checks every constraint the maze core and camera rely on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let size = self.maze.size;
        if size == 0 {
            return Err(ConfigError::InvalidGridSize(size));
        }
        let [x, y] = self.maze.start;
        if x >= size || y >= size {
            return Err(ConfigError::StartOutOfBounds { x, y, size });
        }

        positive("player.speed", self.player.speed)?;
        positive("player.mouse_sensitivity", self.player.mouse_sensitivity)?;
        if !(self.player.pitch_limit > 0.0 && self.player.pitch_limit < 90.0) {
            return Err(ConfigError::InvalidValue {
                field: "player.pitch_limit",
                reason: format!("must be in (0, 90), got {}", self.player.pitch_limit),
            });
        }

        positive("collision.half_extent", self.collision.half_extent)?;
        positive("collision.wall_thickness", self.collision.wall_thickness)?;
        positive("collision.wall_height", self.collision.wall_height)?;
        let (below, above) = (self.collision.below_eye, self.collision.above_eye);
        if !(below.is_finite() && above.is_finite() && below + above > 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "collision.below_eye/above_eye",
                reason: format!("box height must be positive, got {} + {}", below, above),
            });
        }
        // A cell center must stay clear of the slabs on its edges
        let reach = self.collision.half_extent + self.collision.wall_thickness;
        if reach >= 0.5 {
            return Err(ConfigError::InvalidValue {
                field: "collision.half_extent",
                reason: format!(
                    "half_extent + wall_thickness must be below 0.5, got {}",
                    reach
                ),
            });
        }

        if self.render.width == 0 || self.render.height == 0 {
            return Err(ConfigError::InvalidValue {
                field: "render.width/height",
                reason: "window dimensions must be non-zero".to_string(),
            });
        }
        positive("render.fov_degrees", self.render.fov_degrees)?;
        Ok(())
    }

    /// Floor texture repeats, defaulting to one per cell.
    pub fn floor_tiling(&self) -> f32 {
        self.render.floor_tiling.unwrap_or(self.maze.size as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    /// Reference defaults pass validation.
    #[test]
    fn test_defaults_validate() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.maze.size, 10);
        assert_eq!(config.collision.half_extent, 0.2);
        assert_eq!(config.floor_tiling(), 10.0);
    }

    /// A partial document keeps defaults for everything it omits.
    #[test]
    fn test_partial_toml_fills_defaults() {
        let config = Config::from_toml("[maze]\nsize = 4\nseed = 9\n").unwrap();
        assert_eq!(config.maze.size, 4);
        assert_eq!(config.maze.seed, Some(9));
        assert_eq!(config.maze.start, [0, 0]);
        assert_eq!(config.player, PlayerConfig::default());
    }

    #[test]
    fn test_zero_size_rejected() {
        let mut config = Config::default();
        config.maze.size = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidGridSize(0))
        ));
    }

    #[test]
    fn test_start_outside_grid_rejected() {
        let mut config = Config::default();
        config.maze.size = 3;
        config.maze.start = [3, 0];
        assert!(matches!(
            config.validate(),
            Err(ConfigError::StartOutOfBounds { x: 3, y: 0, size: 3 })
        ));
    }

    #[test]
    fn test_non_positive_extent_rejected() {
        let mut config = Config::default();
        config.collision.half_extent = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue {
                field: "collision.half_extent",
                ..
            })
        ));
    }

    /// An inverted player box would never overlap a wall.
    #[test]
    fn test_inverted_player_box_rejected() {
        let mut config = Config::default();
        config.collision.below_eye = -1.0;
        config.collision.above_eye = 0.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue {
                field: "collision.below_eye/above_eye",
                ..
            })
        ));

        // A box entirely above the eye is still a valid box
        config.collision.below_eye = -0.25;
        assert!(config.validate().is_ok());
    }

    /// A box too wide to fit between the slabs of one cell is rejected.
    #[test]
    fn test_player_box_wider_than_cell_rejected() {
        let mut config = Config::default();
        config.collision.half_extent = 0.49;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue {
                field: "collision.half_extent",
                ..
            })
        ));
    }

    #[test]
    fn test_pitch_limit_bounds() {
        let mut config = Config::default();
        config.player.pitch_limit = 90.0;
        assert!(config.validate().is_err());
    }

    /// Unknown value types surface as parse errors.
    #[test]
    fn test_malformed_toml_is_parse_error() {
        let result = Config::from_toml("[maze]\nsize = \"big\"\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    /// Files load from disk; missing files report their path.
    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[render]\nexit_color = [0.0, 1.0, 0.0, 1.0]").unwrap();
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.render.exit_color, [0.0, 1.0, 0.0, 1.0]);

        let missing = Config::load(Path::new("/nonexistent/maze.toml"));
        assert!(matches!(missing, Err(ConfigError::Read { .. })));
    }
}
