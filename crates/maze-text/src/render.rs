//! ASCII views of a maze: the layout with its path, and the distance labels.

use std::collections::HashSet;

use maze_core::{Coord, UNREACHED};
use maze_paths::Maze;

const WALL: char = '#';
const FREE: char = '.';
const ENTRY: char = 'S';
const EXIT: char = 'E';
const PATH: char = '*';

/// Draw `maze` one character per cell: `#` wall, `.` free, `S` entry,
/// `E` exit, `*` path. Every row ends with a newline.
pub fn render(maze: &Maze) -> String {
    let on_path: HashSet<Coord> = maze.path().iter().copied().collect();
    let grid = maze.grid();
    let mut out = String::with_capacity(grid.len() + grid.rows() as usize);
    for (c, wall) in grid.iter() {
        let ch = if c == maze.entry_loc() {
            ENTRY
        } else if c == maze.exit_loc() {
            EXIT
        } else if wall {
            WALL
        } else if on_path.contains(&c) {
            PATH
        } else {
            FREE
        };
        out.push(ch);
        if c.col == grid.cols() - 1 {
            out.push('\n');
        }
    }
    out
}

/// Table of distance labels, right-aligned. Walls show as `#`, cells the
/// fill never reached as `-`.
pub fn render_distances(maze: &Maze) -> String {
    let grid = maze.grid();
    let width = grid
        .distances()
        .iter()
        .filter(|&&d| d != UNREACHED)
        .map(|d| d.to_string().len())
        .max()
        .unwrap_or(1);

    let mut out = String::new();
    for (i, (c, wall)) in grid.iter().enumerate() {
        let d = grid.distances()[i];
        let cell = if wall {
            WALL.to_string()
        } else if d == UNREACHED {
            "-".to_string()
        } else {
            d.to_string()
        };
        out.push_str(&format!("{cell:>width$}"));
        out.push(if c.col == grid.cols() - 1 { '\n' } else { ' ' });
    }
    out
}
