//! Text I/O for mazes: the `0`/`1` file format and ASCII rendering.

pub mod format;
pub mod render;

pub use format::{MazeFile, ParseError, parse, to_text};
pub use render::{render, render_distances};
