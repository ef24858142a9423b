//! The current maze and its derived buffers.

use crate::config::MazeConfig;
use crate::maze::generator::MazeGenerator;
use crate::maze::grid::Grid;
use crate::maze::mesh::{MazeMesh, build_mesh};
use crate::maze::minimap::{Minimap, build_minimap};
use log::info;

/// Owns the generator and the maze it most recently produced.
///
/// The grid, mesh and minimap are always rebuilt together, so callers never
/// see a mesh that disagrees with the collision grid.
pub struct MazeSession {
    generator: MazeGenerator,
    size: usize,
    start: (usize, usize),
    grid: Grid,
    mesh: MazeMesh,
    minimap: Minimap,
    generation: u64,
}

impl MazeSession {
    pub fn new(config: &MazeConfig) -> Self {
        let generator = match config.seed {
            Some(seed) => MazeGenerator::from_seed(seed),
            None => MazeGenerator::from_entropy(),
        };
        Self::with_generator(generator, config.size, (config.start[0], config.start[1]))
    }

    pub fn with_generator(
        mut generator: MazeGenerator,
        size: usize,
        start: (usize, usize),
    ) -> Self {
        let grid = generator.generate(size, start);
        let session = Self {
            generator,
            size,
            start,
            mesh: build_mesh(&grid),
            minimap: build_minimap(&grid),
            grid,
            generation: 1,
        };
        session.log_generated();
        session
    }

    /// Discards the current maze and carves a fresh one of the same size.
    pub fn regenerate(&mut self) {
        self.grid = self.generator.generate(self.size, self.start);
        self.mesh = build_mesh(&self.grid);
        self.minimap = build_minimap(&self.grid);
        self.generation += 1;
        self.log_generated();
    }

    fn log_generated(&self) {
        info!(
            "Maze #{}: {}x{}, {} wall flags, {} passages, {} indices",
            self.generation,
            self.size,
            self.size,
            self.grid.wall_count(),
            self.grid.passage_count(),
            self.mesh.indices.len()
        );
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn mesh(&self) -> &MazeMesh {
        &self.mesh
    }

    pub fn minimap(&self) -> &Minimap {
        &self.minimap
    }

    /// Number of mazes generated so far, starting at 1.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Grid coordinates of the exit cell.
    pub fn exit_cell(&self) -> (usize, usize) {
        let last = self.size.saturating_sub(1);
        (last, last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(size: usize, seed: u64) -> MazeSession {
        MazeSession::new(&MazeConfig {
            size,
            start: [0, 0],
            seed: Some(seed),
        })
    }

    /// A new session already holds a complete maze.
    #[test]
    fn test_new_session_is_generated() {
        let session = seeded(6, 1);
        assert_eq!(session.generation(), 1);
        assert!(session.grid().is_perfect());
        assert_eq!(session.minimap().segments.len(), session.grid().wall_count());
        assert_eq!(session.exit_cell(), (5, 5));
    }

    /// Regeneration replaces grid, mesh and minimap together.
    #[test]
    fn test_regenerate_rebuilds_all_buffers() {
        let mut session = seeded(8, 3);
        let before = session.grid().clone();
        session.regenerate();

        assert_eq!(session.generation(), 2);
        assert_ne!(session.grid(), &before);
        assert!(session.grid().is_perfect());
        assert_eq!(*session.mesh(), build_mesh(session.grid()));
        assert_eq!(*session.minimap(), build_minimap(session.grid()));
    }

    /// Wall totals are fixed for a given size, whatever maze is carved.
    #[test]
    fn test_wall_count_constant_across_regenerations() {
        let mut session = seeded(5, 12);
        let walls = session.grid().wall_count();
        for _ in 0..5 {
            session.regenerate();
            assert_eq!(session.grid().wall_count(), walls);
            assert_eq!(session.mesh().indices.len(), (walls + 1) * 6 + 36);
        }
    }
}
