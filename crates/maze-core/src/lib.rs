//! **maze-core** — grid primitives for maze solving.
//!
//! This crate provides the state holder used by the solver in `maze-paths`:
//! row/column coordinates, the four orthogonal directions, and a [`Grid`]
//! that owns per-cell wall flags, distance labels and visit counters behind
//! bounds-checked accessors.

pub mod error;
pub mod geom;
pub mod grid;

pub use error::MazeError;
pub use geom::{Coord, Direction};
pub use grid::{Grid, GridIter, SolveState, UNREACHED};
