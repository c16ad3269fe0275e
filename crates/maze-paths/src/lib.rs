//! Maze solving over a [`maze_core::Grid`].
//!
//! A solve runs in two phases:
//!
//! - **Distance fill** ([`Solver::fill_distances`]): a work-list traversal
//!   from the entry that relaxes every passable neighbour's distance label
//!   and advances into a neighbour only while its visit count is below the
//!   configured cap. The cap is what makes the fill terminate on mazes whose
//!   free space contains loops.
//! - **Reconstruction** ([`reconstruct_path`]): a greedy walk from the exit
//!   to the strictly smallest neighbouring label, reversed into an
//!   entry-to-exit [`Path`].
//!
//! [`Solver::solve`] runs both and drives the grid's
//! [`SolveState`](maze_core::SolveState) machine. [`Maze`] bundles a grid
//! with its entry and exit for callers that only want to search once and
//! read the result back.
//!
//! # Fill orders
//!
//! | [`FillOrder`] | Work list | Labels |
//! |---|---|---|
//! | `BreadthFirst` (default) | FIFO queue | exact shortest distances |
//! | `DepthFirst` | stack of `(cell, next direction)` frames, then a relaxation pass | exact shortest distances |

mod fill;
mod maze;
mod observer;
mod path;
mod reconstruct;
mod solver;

pub use maze::Maze;
pub use observer::{FillEvent, FillObserver, LogObserver};
pub use path::Path;
pub use reconstruct::reconstruct_path;
pub use solver::{DEFAULT_VISIT_CAP, FillOrder, FillStats, Solver, SolverConfig};
