//! Triangle mesh derived from a maze grid.
//!
//! The mesh is laid out in three consecutive parts:
//!
//! 1. one quad (4 vertices, 6 indices) per standing wall flag, in grid order
//! 2. one floor quad covering the whole grid at `y = 0`
//! 3. a unit cube (8 vertices, 36 indices) on cell `(N-1, N-1)`, the exit marker
//!
//! [`DrawRanges`] reports where the exit geometry starts so renderers never
//! hardcode the cube's index count. Shared edges between adjacent quads are
//! duplicated; nothing is deduplicated.

use crate::maze::grid::{Direction, Grid};
use std::ops::Range;

/// Surface treatment for a mesh vertex, read by the fragment shader.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Material {
    Floor = 0,
    Wall = 1,
    Exit = 2,
}

/// One mesh vertex: world position in grid units, unit-square texture
/// coordinate and a [`Material`] discriminant.
///
/// `#[repr(C)]` and `Pod` so a vertex slice uploads to the GPU as-is.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    /// Tiling is applied in the shader, not here.
    pub tex_coords: [f32; 2],
    pub material: u32,
}

impl Vertex {
    pub fn new(position: [f32; 3], tex_coords: [f32; 2], material: Material) -> Self {
        Self {
            position,
            tex_coords,
            material: material as u32,
        }
    }
}

/// Indices in the exit cube.
pub const EXIT_INDEX_COUNT: u32 = 36;

/// Quad corner texture coordinates, in emission order.
const QUAD_TEX_COORDS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

/// Two triangles per quad, sharing the 0-2 diagonal.
const QUAD_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

/// Unit cube corners as offsets from its minimum corner.
const CUBE_CORNERS: [[f32; 3]; 8] = [
    [0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [1.0, 1.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
    [1.0, 0.0, 1.0],
    [1.0, 1.0, 1.0],
    [0.0, 1.0, 1.0],
];

const CUBE_INDICES: [u32; EXIT_INDEX_COUNT as usize] = [
    0, 1, 2, 0, 2, 3, // -z
    1, 5, 6, 1, 6, 2, // +x
    5, 4, 7, 5, 7, 6, // +z
    4, 0, 3, 4, 3, 7, // -x
    3, 2, 6, 3, 6, 7, // +y
    4, 5, 1, 4, 1, 0, // -y
];

/// Split of the index buffer between the textured geometry and the exit marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawRanges {
    /// Indices belonging to walls and floor, starting at 0.
    pub wall_floor_index_count: u32,
    /// Indices belonging to the exit cube, directly after the walls and floor.
    pub exit_index_count: u32,
}

impl DrawRanges {
    pub fn wall_floor(&self) -> Range<u32> {
        0..self.wall_floor_index_count
    }

    pub fn exit(&self) -> Range<u32> {
        self.wall_floor_index_count..self.wall_floor_index_count + self.exit_index_count
    }
}

/// Vertex and index buffers for one maze, plus the draw split.
#[derive(Debug, Clone, PartialEq)]
pub struct MazeMesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub ranges: DrawRanges,
}

impl MazeMesh {
    /// Number of wall quads, excluding the floor.
    pub fn wall_quad_count(&self) -> usize {
        (self.ranges.wall_floor_index_count as usize / QUAD_INDICES.len()).saturating_sub(1)
    }

    /// The exit cube's slice of the index buffer.
    pub fn exit_indices(&self) -> &[u32] {
        let range = self.ranges.exit();
        &self.indices[range.start as usize..range.end as usize]
    }
}

/// Accumulates quads while tracking the running vertex offset.
#[derive(Default)]
struct MeshWriter {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
}

impl MeshWriter {
    fn quad(&mut self, corners: [[f32; 3]; 4], material: Material) {
        let base = self.vertices.len() as u32;
        self.vertices.extend(
            corners
                .iter()
                .zip(QUAD_TEX_COORDS)
                .map(|(&p, uv)| Vertex::new(p, uv, material)),
        );
        self.indices.extend(QUAD_INDICES.iter().map(|i| base + i));
    }

    fn cube(&mut self, origin: [f32; 3], material: Material) {
        let base = self.vertices.len() as u32;
        self.vertices.extend(CUBE_CORNERS.iter().map(|c| {
            Vertex::new(
                [origin[0] + c[0], origin[1] + c[1], origin[2] + c[2]],
                [c[0], c[1]],
                material,
            )
        }));
        self.indices.extend(CUBE_INDICES.iter().map(|i| base + i));
    }
}

/// Corners of the wall quad on `direction` of the cell whose minimum corner is `(x, 0, z)`.
///
/// Left and right walls span z at fixed x; bottom and top walls span x at fixed z.
fn wall_corners(x: f32, z: f32, direction: Direction) -> [[f32; 3]; 4] {
    match direction {
        Direction::Left => [
            [x, 0.0, z],
            [x, 1.0, z],
            [x, 1.0, z + 1.0],
            [x, 0.0, z + 1.0],
        ],
        Direction::Bottom => [
            [x, 0.0, z],
            [x + 1.0, 0.0, z],
            [x + 1.0, 1.0, z],
            [x, 1.0, z],
        ],
        Direction::Right => [
            [x + 1.0, 0.0, z + 1.0],
            [x + 1.0, 1.0, z + 1.0],
            [x + 1.0, 1.0, z],
            [x + 1.0, 0.0, z],
        ],
        Direction::Top => [
            [x, 0.0, z + 1.0],
            [x, 1.0, z + 1.0],
            [x + 1.0, 1.0, z + 1.0],
            [x + 1.0, 0.0, z + 1.0],
        ],
    }
}

/// Builds the full maze mesh. Grid row `y` maps to world `z`.
pub fn build_mesh(grid: &Grid) -> MazeMesh {
    let mut writer = MeshWriter::default();

    for (x, y, cell) in grid.iter() {
        for direction in Direction::ALL {
            if cell.has_wall(direction) {
                writer.quad(wall_corners(x as f32, y as f32, direction), Material::Wall);
            }
        }
    }

    let n = grid.size() as f32;
    writer.quad(
        [[0.0, 0.0, 0.0], [n, 0.0, 0.0], [n, 0.0, n], [0.0, 0.0, n]],
        Material::Floor,
    );

    let wall_floor_index_count = writer.indices.len() as u32;

    let exit = (n - 1.0).max(0.0);
    writer.cube([exit, 0.0, exit], Material::Exit);

    MazeMesh {
        vertices: writer.vertices,
        indices: writer.indices,
        ranges: DrawRanges {
            wall_floor_index_count,
            exit_index_count: EXIT_INDEX_COUNT,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::generator::MazeGenerator;
    use std::collections::BTreeSet;

    /// One quad per standing wall flag, plus floor and cube.
    #[test]
    fn test_wall_quad_count_matches_wall_flags() {
        let grid = MazeGenerator::from_seed(11).generate(10, (0, 0));
        let mesh = build_mesh(&grid);

        assert_eq!(mesh.wall_quad_count(), grid.wall_count());
        assert_eq!(mesh.vertices.len(), (grid.wall_count() + 1) * 4 + 8);
        assert_eq!(
            mesh.indices.len(),
            (grid.wall_count() + 1) * 6 + EXIT_INDEX_COUNT as usize
        );
    }

    /// Ranges are contiguous and cover the whole index buffer.
    #[test]
    fn test_draw_ranges_cover_indices() {
        let mesh = build_mesh(&MazeGenerator::from_seed(4).generate(5, (0, 0)));
        assert_eq!(mesh.ranges.wall_floor().start, 0);
        assert_eq!(mesh.ranges.wall_floor().end, mesh.ranges.exit().start);
        assert_eq!(mesh.ranges.exit().end as usize, mesh.indices.len());
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertices.len()));
    }

    /// The trailing 36 indices reference exactly the 8 corners of the exit cell's unit cube.
    #[test]
    fn test_exit_cube_is_last_and_anchored() {
        let size = 7;
        let grid = MazeGenerator::from_seed(8).generate(size, (0, 0));
        let mesh = build_mesh(&grid);

        let exit = mesh.exit_indices();
        assert_eq!(exit.len(), 36);
        assert_eq!(exit, &mesh.indices[mesh.indices.len() - 36..]);

        let unique: BTreeSet<u32> = exit.iter().copied().collect();
        assert_eq!(unique.len(), 8);

        let anchor = (size - 1) as f32;
        let corners: BTreeSet<[u32; 3]> = unique
            .iter()
            .map(|&i| {
                let v = mesh.vertices[i as usize];
                assert_eq!(v.material, Material::Exit as u32);
                [
                    (v.position[0] - anchor) as u32,
                    v.position[1] as u32,
                    (v.position[2] - anchor) as u32,
                ]
            })
            .collect();
        let expected: BTreeSet<[u32; 3]> = CUBE_CORNERS
            .iter()
            .map(|c| [c[0] as u32, c[1] as u32, c[2] as u32])
            .collect();
        assert_eq!(corners, expected);
    }

    /// The floor is the last quad before the exit, spanning the grid at height 0.
    #[test]
    fn test_floor_quad_spans_grid() {
        let mesh = build_mesh(&Grid::new(3));
        let floor_start = mesh.ranges.wall_floor_index_count as usize - 6;
        let floor: Vec<Vertex> = mesh.indices[floor_start..floor_start + 4]
            .iter()
            .map(|&i| mesh.vertices[i as usize])
            .collect();

        assert!(floor.iter().all(|v| v.position[1] == 0.0));
        assert!(floor.iter().all(|v| v.material == Material::Floor as u32));
        assert_eq!(floor[2].position, [3.0, 0.0, 3.0]);
    }

    /// A fully walled single cell yields four wall quads at the cell's boundary.
    #[test]
    fn test_single_cell_wall_positions() {
        let mesh = build_mesh(&Grid::new(1));
        assert_eq!(mesh.wall_quad_count(), 4);

        let walls = &mesh.vertices[..16];
        assert!(walls.iter().all(|v| v.material == Material::Wall as u32));
        // Left wall at x = 0, right wall at x = 1
        assert!(walls[0..4].iter().all(|v| v.position[0] == 0.0));
        assert!(walls[8..12].iter().all(|v| v.position[0] == 1.0));
        // Bottom wall at z = 0, top wall at z = 1
        assert!(walls[4..8].iter().all(|v| v.position[2] == 0.0));
        assert!(walls[12..16].iter().all(|v| v.position[2] == 1.0));
        // Unit height
        assert!(walls.iter().all(|v| v.position[1] == 0.0 || v.position[1] == 1.0));
    }

    /// Every wall quad carries the unit-square texture coordinates.
    #[test]
    fn test_wall_tex_coords_unit_square() {
        let mesh = build_mesh(&Grid::new(2));
        for quad in mesh.vertices[..mesh.wall_quad_count() * 4].chunks(4) {
            let uvs: Vec<[f32; 2]> = quad.iter().map(|v| v.tex_coords).collect();
            assert_eq!(uvs, QUAD_TEX_COORDS.to_vec());
        }
    }
}
