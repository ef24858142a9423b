//! Maze grid, generation, and the geometry derived from it.
//!
//! The [`grid`] holds wall flags per cell, the [`generator`] carves a perfect
//! maze into it, and [`mesh`] and [`minimap`] turn the result into render
//! buffers. [`session`] ties the four together for the running game.

pub mod generator;
pub mod grid;
pub mod mesh;
pub mod minimap;
pub mod session;

pub use generator::MazeGenerator;
pub use grid::{Cell, Direction, Grid};
pub use mesh::{DrawRanges, Material, MazeMesh, Vertex, build_mesh};
pub use minimap::{Minimap, build_minimap};
pub use session::MazeSession;
