//! The [`MazeError`] type shared by every maze crate.

use std::fmt;

use crate::geom::Coord;
use crate::grid::SolveState;

/// Usage errors raised by grid accessors and the solver.
///
/// "No path" is never an error; it is reported as `Ok(None)` / `Ok(false)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    /// A coordinate fell outside `[0, rows) x [0, cols)`.
    OutOfBounds { coord: Coord, rows: i32, cols: i32 },
    /// A wall buffer did not match the declared extent.
    Shape { expected: usize, found: usize },
    /// The grid already carries labels from an earlier solve.
    AlreadySolved { state: SolveState },
    /// A solver setting cannot be used.
    InvalidConfig(&'static str),
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { coord, rows, cols } => {
                write!(f, "coordinate {coord} is outside the {rows}x{cols} grid")
            }
            Self::Shape { expected, found } => {
                write!(f, "grid expects {expected} cells, got {found}")
            }
            Self::AlreadySolved { state } => {
                write!(f, "grid was already solved (state: {state:?}); reset it first")
            }
            Self::InvalidConfig(msg) => write!(f, "invalid solver configuration: {msg}"),
        }
    }
}

impl std::error::Error for MazeError {}
