//! Overhead schematic of a maze as 2D line segments in grid units.
//!
//! Each cell emits one segment per standing wall flag from its own flags only.
//! Interior walls are therefore emitted twice at the same place, once from
//! each side, which is harmless for line rendering.

use crate::maze::grid::{Direction, Grid};

/// A line segment from `start` to `end`, in grid units.
///
/// Laid out as `[x1, y1, x2, y2]` so a slice of segments can be uploaded
/// directly as a line list of 2D points.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Segment {
    pub start: [f32; 2],
    pub end: [f32; 2],
}

impl Segment {
    fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            start: [x1, y1],
            end: [x2, y2],
        }
    }
}

/// Minimap line buffer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Minimap {
    pub segments: Vec<Segment>,
}

impl Minimap {
    /// The segments as a flat list of endpoints, two per segment.
    pub fn points(&self) -> &[[f32; 2]] {
        bytemuck::cast_slice(&self.segments)
    }

    /// Number of points to draw as a line list.
    pub fn vertex_count(&self) -> u32 {
        (self.segments.len() * 2) as u32
    }
}

fn wall_segment(x: f32, y: f32, direction: Direction) -> Segment {
    match direction {
        Direction::Left => Segment::new(x, y, x, y + 1.0),
        Direction::Bottom => Segment::new(x, y, x + 1.0, y),
        Direction::Right => Segment::new(x + 1.0, y, x + 1.0, y + 1.0),
        Direction::Top => Segment::new(x, y + 1.0, x + 1.0, y + 1.0),
    }
}

/// Builds the minimap segments for every standing wall flag.
pub fn build_minimap(grid: &Grid) -> Minimap {
    let segments = grid
        .iter()
        .flat_map(|(x, y, cell)| {
            Direction::ALL
                .into_iter()
                .filter(|&d| cell.has_wall(d))
                .map(move |d| wall_segment(x as f32, y as f32, d))
        })
        .collect();

    Minimap { segments }
}
