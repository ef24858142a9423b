//! Perfect-maze generation using a randomized iterative depth-first backtracker.
//!
//! Carving starts from a chosen cell and keeps an explicit stack of cells. On
//! each step the top of the stack picks a random unvisited neighbor, the wall
//! between them is removed on both sides, and the neighbor is pushed. When no
//! unvisited neighbor remains the stack is popped. Every cell is visited exactly
//! once, so the open passages form a spanning tree.
//!
//! # Examples
//!
//! ```rust
//! use maze3d::maze::generator::MazeGenerator;
//!
//! let mut generator = MazeGenerator::from_seed(7);
//! let grid = generator.generate(10, (0, 0));
//! assert!(grid.is_perfect());
//! ```

use crate::maze::grid::{Direction, Grid};
use log::{debug, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Maze generator owning its random source.
///
/// Each call to [`generate`](MazeGenerator::generate) advances the random
/// stream, so repeated regeneration yields different mazes. Two generators
/// built with the same seed yield identical sequences of mazes.
pub struct MazeGenerator {
    rng: StdRng,
}

impl Default for MazeGenerator {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl MazeGenerator {
    /// Seeds from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic generator for reproducible mazes.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Builds a new `size x size` perfect maze, carving from `start`.
    ///
    /// A start outside the grid is clamped to the nearest cell.
    pub fn generate(&mut self, size: usize, start: (usize, usize)) -> Grid {
        let mut grid = Grid::new(size);
        if size == 0 {
            return grid;
        }

        let clamped = (start.0.min(size - 1), start.1.min(size - 1));
        if clamped != start {
            warn!(
                "carve start {:?} outside {}x{} grid, using {:?}",
                start, size, size, clamped
            );
        }

        let rng = &mut self.rng;
        let carved = carve(&mut grid, clamped, |choices| {
            // `choices` is never empty here
            *choices.choose(&mut *rng).unwrap_or(&choices[0])
        });
        debug!("carved {} passages in {}x{} grid", carved, size, size);
        grid
    }
}

/// Runs the backtracker over `grid`, asking `pick` to choose among the open
/// directions at each step. Returns the number of walls removed.
///
/// `pick` always receives a non-empty slice and must return one of its
/// elements. The grid's `visited` flags are reset before returning.
pub fn carve<F>(grid: &mut Grid, start: (usize, usize), mut pick: F) -> usize
where
    F: FnMut(&[Direction]) -> Direction,
{
    let Some(cell) = grid.cell_mut(start.0, start.1) else {
        return 0;
    };
    cell.visited = true;

    let mut stack = vec![start];
    let mut choices = Vec::with_capacity(4);
    let mut carved = 0;

    while let Some(&(x, y)) = stack.last() {
        choices.clear();
        choices.extend(Direction::ALL.into_iter().filter(|&d| {
            grid.neighbor(x, y, d)
                .and_then(|(nx, ny)| grid.cell(nx, ny))
                .is_some_and(|n| !n.visited)
        }));

        if choices.is_empty() {
            stack.pop();
            continue;
        }

        let direction = pick(&choices);
        if let Some((nx, ny)) = grid.remove_wall(x, y, direction) {
            if let Some(next) = grid.cell_mut(nx, ny) {
                next.visited = true;
            }
            stack.push((nx, ny));
            carved += 1;
        }
    }

    grid.clear_visited();
    carved
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every generated maze is a spanning tree, across a range of sizes.
    #[test]
    fn test_generated_mazes_are_perfect() {
        let mut generator = MazeGenerator::from_seed(1234);
        for size in 1..=12 {
            let grid = generator.generate(size, (0, 0));
            assert!(grid.is_symmetric(), "asymmetric walls at size {}", size);
            assert_eq!(grid.passage_count(), size * size - 1);
            assert_eq!(grid.reachable_from(size - 1, size - 1), size * size);
        }
    }

    /// Carving from an interior start still reaches every cell.
    #[test]
    fn test_interior_start_is_perfect() {
        let grid = MazeGenerator::from_seed(5).generate(9, (4, 7));
        assert!(grid.is_perfect());
    }

    /// A single cell has no neighbors: the maze is one fully walled cell.
    #[test]
    fn test_single_cell_maze() {
        let grid = MazeGenerator::from_seed(0).generate(1, (0, 0));
        assert_eq!(grid.size(), 1);
        assert_eq!(grid.wall_count(), 4);
        assert!(grid.is_perfect());
    }

    /// Two generators sharing a seed produce identical walls.
    #[test]
    fn test_fixed_seed_is_deterministic() {
        let a = MazeGenerator::from_seed(99).generate(10, (0, 0));
        let b = MazeGenerator::from_seed(99).generate(10, (0, 0));
        assert_eq!(a, b);
    }

    /// Successive generations from one generator differ.
    #[test]
    fn test_regeneration_changes_layout() {
        let mut generator = MazeGenerator::from_seed(99);
        let first = generator.generate(10, (0, 0));
        let second = generator.generate(10, (0, 0));
        assert_ne!(first, second);
    }

    /// Different seeds produce different layouts.
    #[test]
    fn test_different_seeds_differ() {
        let a = MazeGenerator::from_seed(1).generate(10, (0, 0));
        let b = MazeGenerator::from_seed(2).generate(10, (0, 0));
        assert_ne!(a, b);
    }

    /// No visited flag survives generation.
    #[test]
    fn test_visited_flags_cleared() {
        let grid = MazeGenerator::from_seed(3).generate(6, (2, 2));
        assert!(grid.iter().all(|(_, _, c)| !c.visited));
    }

    /// Out-of-range start cells are clamped instead of rejected.
    #[test]
    fn test_start_is_clamped() {
        let grid = MazeGenerator::from_seed(3).generate(4, (10, 10));
        assert!(grid.is_perfect());
    }

    /// Scripted carve order over a 3x3 grid:
    /// (0,0)→(1,0)→(2,0)→(2,1)→(2,2)→(1,2)→(0,2)→(0,1)→(1,1).
    #[test]
    fn test_scripted_carve_order() {
        use Direction::*;
        let script = [Right, Right, Top, Top, Left, Left, Bottom, Right];
        let mut steps = script.iter();
        let mut grid = Grid::new(3);

        let carved = carve(&mut grid, (0, 0), |choices| {
            let next = *steps.next().expect("carve asked for more steps than scripted");
            assert!(choices.contains(&next), "{:?} not in {:?}", next, choices);
            next
        });

        assert_eq!(carved, 8);
        assert_eq!(grid.passage_count(), 8);
        assert!(grid.is_perfect());
        assert!(grid.has_wall(0, 0, Left));
        assert!(grid.has_wall(0, 0, Bottom));
        assert!(!grid.has_wall(0, 0, Right));
        assert!(grid.has_wall(0, 0, Top));
        // (1,1) was reached from (0,1) only
        assert!(!grid.has_wall(1, 1, Left));
        assert!(grid.has_wall(1, 1, Bottom));
        assert!(grid.has_wall(1, 1, Right));
        assert!(grid.has_wall(1, 1, Top));
    }
}
