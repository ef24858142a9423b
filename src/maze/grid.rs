//! Grid model shared by the generator, mesh builder, minimap builder and collision system.
//!
//! A [`Grid`] is an `N x N` array of [`Cell`]s addressed by `(x, y)` with the
//! origin in the bottom-left corner. Each cell stores four wall flags indexed
//! by [`Direction`]. Walls are shared boundaries: the only mutator that opens a
//! wall, [`Grid::remove_wall`], clears the flag on both sides.

use std::collections::VecDeque;

/// One of the four sides of a cell.
///
/// The discriminant is the index into [`Cell::walls`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward `-x`.
    Left = 0,
    /// Toward `-y`.
    Bottom = 1,
    /// Toward `+x`.
    Right = 2,
    /// Toward `+y`.
    Top = 3,
}

/// Lookup entry for a direction: grid offset and the side that faces back.
struct DirectionInfo {
    dx: i32,
    dy: i32,
    opposite: Direction,
}

const DIRECTION_TABLE: [DirectionInfo; 4] = [
    DirectionInfo {
        dx: -1,
        dy: 0,
        opposite: Direction::Right,
    },
    DirectionInfo {
        dx: 0,
        dy: -1,
        opposite: Direction::Top,
    },
    DirectionInfo {
        dx: 1,
        dy: 0,
        opposite: Direction::Left,
    },
    DirectionInfo {
        dx: 0,
        dy: 1,
        opposite: Direction::Bottom,
    },
];

impl Direction {
    /// All directions in wall-index order.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Bottom,
        Direction::Right,
        Direction::Top,
    ];

    /// Index into [`Cell::walls`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Grid offset `(dx, dy)` of the neighbor on this side.
    pub fn delta(self) -> (i32, i32) {
        let info = &DIRECTION_TABLE[self.index()];
        (info.dx, info.dy)
    }

    /// The side of the neighbor that shares this wall.
    pub fn opposite(self) -> Direction {
        DIRECTION_TABLE[self.index()].opposite
    }
}

/// A single maze cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// Wall flags indexed by [`Direction::index`]; `true` blocks passage.
    pub walls: [bool; 4],
    /// Generation scratch flag. Meaningless once a maze is complete.
    pub visited: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            walls: [true; 4],
            visited: false,
        }
    }
}

impl Cell {
    pub fn has_wall(&self, direction: Direction) -> bool {
        self.walls[direction.index()]
    }
}

/// Square grid of cells, fully walled on creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a `size x size` grid with every wall standing.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![Cell::default(); size * size],
        }
    }

    /// Number of cells along each axis.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.size && (y as usize) < self.size
    }

    fn idx(&self, x: usize, y: usize) -> usize {
        y * self.size + x
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<&Cell> {
        if x < self.size && y < self.size {
            self.cells.get(self.idx(x, y))
        } else {
            None
        }
    }

    pub(crate) fn cell_mut(&mut self, x: usize, y: usize) -> Option<&mut Cell> {
        if x < self.size && y < self.size {
            let idx = self.idx(x, y);
            self.cells.get_mut(idx)
        } else {
            None
        }
    }

    /// Iterates `(x, y, cell)` in row-major order, bottom row first.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (i % self.size, i / self.size, cell))
    }

    /// Whether the wall on `direction` of cell `(x, y)` is standing.
    /// Cells outside the grid report no wall.
    pub fn has_wall(&self, x: usize, y: usize, direction: Direction) -> bool {
        self.cell(x, y).is_some_and(|c| c.has_wall(direction))
    }

    /// The in-bounds neighbor of `(x, y)` on `direction`.
    pub fn neighbor(&self, x: usize, y: usize, direction: Direction) -> Option<(usize, usize)> {
        let (dx, dy) = direction.delta();
        let nx = x as i32 + dx;
        let ny = y as i32 + dy;
        self.contains(nx, ny).then(|| (nx as usize, ny as usize))
    }

    /// Opens the wall between `(x, y)` and its neighbor on `direction`, on both sides.
    ///
    /// Returns the neighbor's coordinates, or `None` (leaving the grid untouched)
    /// when the neighbor would be outside the grid. Perimeter walls can never be opened.
    pub fn remove_wall(
        &mut self,
        x: usize,
        y: usize,
        direction: Direction,
    ) -> Option<(usize, usize)> {
        let (nx, ny) = self.neighbor(x, y, direction)?;
        self.cell_mut(x, y)?.walls[direction.index()] = false;
        self.cell_mut(nx, ny)?.walls[direction.opposite().index()] = false;
        Some((nx, ny))
    }

    /// Number of standing wall flags across all cells. Shared walls count once per side.
    pub fn wall_count(&self) -> usize {
        self.cells
            .iter()
            .map(|c| c.walls.iter().filter(|&&w| w).count())
            .sum()
    }

    /// Number of open boundaries between adjacent cells.
    pub fn passage_count(&self) -> usize {
        self.iter()
            .map(|(x, y, cell)| {
                [Direction::Right, Direction::Top]
                    .into_iter()
                    .filter(|&d| !cell.has_wall(d) && self.neighbor(x, y, d).is_some())
                    .count()
            })
            .sum()
    }

    /// Every interior boundary reports the same flag from both sides.
    pub fn is_symmetric(&self) -> bool {
        self.iter().all(|(x, y, cell)| {
            Direction::ALL.into_iter().all(|d| match self.neighbor(x, y, d) {
                Some((nx, ny)) => self.has_wall(nx, ny, d.opposite()) == cell.has_wall(d),
                None => true,
            })
        })
    }

    /// Number of cells reachable from `(x, y)` through open passages.
    pub fn reachable_from(&self, x: usize, y: usize) -> usize {
        if self.cell(x, y).is_none() {
            return 0;
        }
        let mut seen = vec![false; self.cells.len()];
        let mut queue = VecDeque::from([(x, y)]);
        seen[self.idx(x, y)] = true;
        let mut count = 0;

        while let Some((cx, cy)) = queue.pop_front() {
            count += 1;
            for d in Direction::ALL {
                if self.has_wall(cx, cy, d) {
                    continue;
                }
                if let Some((nx, ny)) = self.neighbor(cx, cy, d) {
                    let idx = self.idx(nx, ny);
                    if !seen[idx] {
                        seen[idx] = true;
                        queue.push_back((nx, ny));
                    }
                }
            }
        }
        count
    }

    /// The open passages form a spanning tree: connected, with exactly `N² - 1` edges.
    pub fn is_perfect(&self) -> bool {
        let cells = self.cells.len();
        if cells == 0 {
            return true;
        }
        self.is_symmetric()
            && self.passage_count() == cells - 1
            && self.reachable_from(0, 0) == cells
    }

    pub(crate) fn clear_visited(&mut self) {
        for cell in &mut self.cells {
            cell.visited = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Each direction's opposite points back along the negated offset.
    #[test]
    fn test_direction_table_is_consistent() {
        for d in Direction::ALL {
            let (dx, dy) = d.delta();
            let (ox, oy) = d.opposite().delta();
            assert_eq!((dx + ox, dy + oy), (0, 0), "{:?}", d);
            assert_eq!(d.opposite().opposite(), d);
            assert_eq!(Direction::ALL[d.index()], d);
        }
    }

    /// A fresh grid is fully walled with no passages.
    #[test]
    fn test_new_grid_fully_walled() {
        let grid = Grid::new(4);
        assert_eq!(grid.wall_count(), 4 * 4 * 4);
        assert_eq!(grid.passage_count(), 0);
        assert_eq!(grid.reachable_from(0, 0), 1);
        assert!(grid.is_symmetric());
    }

    /// Removing a wall clears both sides of the shared boundary.
    #[test]
    fn test_remove_wall_is_two_sided() {
        let mut grid = Grid::new(3);
        assert_eq!(grid.remove_wall(1, 1, Direction::Top), Some((1, 2)));
        assert!(!grid.has_wall(1, 1, Direction::Top));
        assert!(!grid.has_wall(1, 2, Direction::Bottom));
        assert!(grid.is_symmetric());
        assert_eq!(grid.passage_count(), 1);
    }

    /// Perimeter walls have no neighbor and stay standing.
    #[test]
    fn test_remove_perimeter_wall_is_rejected() {
        let mut grid = Grid::new(2);
        assert_eq!(grid.remove_wall(0, 0, Direction::Left), None);
        assert_eq!(grid.remove_wall(1, 1, Direction::Top), None);
        assert_eq!(grid, Grid::new(2));
    }

    /// Iteration runs x fastest, matching the (x, y) addressing.
    #[test]
    fn test_iter_coordinates() {
        let grid = Grid::new(2);
        let coords: Vec<_> = grid.iter().map(|(x, y, _)| (x, y)).collect();
        assert_eq!(coords, vec![(0, 0), (1, 0), (0, 1), (1, 1)]);
    }

    /// A cycle makes the grid imperfect even though it is connected.
    #[test]
    fn test_cycle_is_not_perfect() {
        let mut grid = Grid::new(2);
        grid.remove_wall(0, 0, Direction::Right);
        grid.remove_wall(1, 0, Direction::Top);
        grid.remove_wall(1, 1, Direction::Left);
        assert!(grid.is_perfect());
        grid.remove_wall(0, 1, Direction::Bottom);
        assert!(!grid.is_perfect());
    }

    #[test]
    fn test_out_of_range_queries() {
        let grid = Grid::new(2);
        assert!(grid.cell(2, 0).is_none());
        assert!(!grid.has_wall(5, 5, Direction::Left));
        assert!(!grid.contains(-1, 0));
        assert_eq!(grid.neighbor(0, 0, Direction::Bottom), None);
    }
}
