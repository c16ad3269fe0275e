//! The maze file format.
//!
//! ```text
//! 3 3
//! 000
//! 010
//! 000
//! 0 0
//! 2 2
//! ```
//!
//! The first line holds the row and column counts. Each of the next `rows`
//! lines holds exactly `cols` characters, `0` for a free cell and `1` for a
//! wall. The last two lines are the entry and exit as `row col`. Blank lines
//! around the whole text and trailing whitespace on a line are ignored.

use std::fmt;
use std::str::FromStr;

use maze_core::{Coord, Grid, MazeError};
use maze_paths::Maze;

const FREE_CHAR: char = '0';
const WALL_CHAR: char = '1';

/// A parsed maze file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeFile {
    pub grid: Grid,
    pub entry: Coord,
    pub exit: Coord,
}

impl MazeFile {
    /// Bundle into a [`Maze`] ready to search.
    pub fn into_maze(self) -> Result<Maze, MazeError> {
        Maze::new(self.grid, self.entry, self.exit)
    }
}

impl FromStr for MazeFile {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, ParseError> {
        parse(s)
    }
}

/// Parse the maze file format. Entry and exit must lie inside the grid.
pub fn parse(s: &str) -> Result<MazeFile, ParseError> {
    let mut lines = s.trim().lines().enumerate().map(|(i, l)| (i + 1, l.trim_end()));

    let (line, header) = lines.next().ok_or(ParseError::MissingLine("header"))?;
    let (rows, cols) = parse_pair(line, header)?;
    if rows < 0 || cols < 0 {
        return Err(ParseError::BadNumber {
            line,
            text: header.to_string(),
        });
    }

    // Each cell takes at least one byte of input.
    let cells = (rows as usize).saturating_mul(cols as usize);
    let mut walls = Vec::with_capacity(cells.min(s.len()));
    for row in 0..rows {
        let (_, text) = lines.next().ok_or(ParseError::MissingLine("grid row"))?;
        let found = text.chars().count();
        if found != cols as usize {
            return Err(ParseError::RowWidth {
                row,
                expected: cols as usize,
                found,
            });
        }
        for (col, ch) in text.chars().enumerate() {
            match ch {
                FREE_CHAR => walls.push(false),
                WALL_CHAR => walls.push(true),
                _ => {
                    return Err(ParseError::InvalidChar {
                        ch,
                        row,
                        col: col as i32,
                    });
                }
            }
        }
    }

    let (line, text) = lines.next().ok_or(ParseError::MissingLine("entry"))?;
    let entry = Coord::from(parse_pair(line, text)?);
    let (line, text) = lines.next().ok_or(ParseError::MissingLine("exit"))?;
    let exit = Coord::from(parse_pair(line, text)?);

    let grid = Grid::from_walls(rows, cols, walls)?;
    for c in [entry, exit] {
        if !grid.in_bounds(c) {
            return Err(MazeError::OutOfBounds { coord: c, rows, cols }.into());
        }
    }
    log::debug!("parsed {rows}x{cols} maze, entry {entry}, exit {exit}");
    Ok(MazeFile { grid, entry, exit })
}

/// Two whitespace-separated integers.
fn parse_pair(line: usize, text: &str) -> Result<(i32, i32), ParseError> {
    let bad = || ParseError::BadNumber {
        line,
        text: text.to_string(),
    };
    let mut it = text.split_whitespace().map(str::parse::<i32>);
    match (it.next(), it.next(), it.next()) {
        (Some(Ok(a)), Some(Ok(b)), None) => Ok((a, b)),
        _ => Err(bad()),
    }
}

/// Write `maze` back out in the file format.
pub fn to_text(maze: &Maze) -> String {
    let grid = maze.grid();
    let mut out = format!("{} {}\n", grid.rows(), grid.cols());
    for (c, wall) in grid.iter() {
        out.push(if wall { WALL_CHAR } else { FREE_CHAR });
        if c.col == grid.cols() - 1 {
            out.push('\n');
        }
    }
    let (entry, exit) = (maze.entry_loc(), maze.exit_loc());
    out.push_str(&format!("{} {}\n{} {}\n", entry.row, entry.col, exit.row, exit.col));
    out
}

// ---------------------------------------------------------------------------
// ParseError
// ---------------------------------------------------------------------------

/// Errors that can occur when reading a maze file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The text ended before the named line.
    MissingLine(&'static str),
    /// A header or coordinate line is not two integers.
    BadNumber { line: usize, text: String },
    /// A grid row has the wrong number of characters.
    RowWidth {
        row: i32,
        expected: usize,
        found: usize,
    },
    /// A grid row contains something other than `0` or `1`.
    InvalidChar { ch: char, row: i32, col: i32 },
    /// The parsed data does not form a valid maze.
    Maze(MazeError),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingLine(what) => write!(f, "maze file ends before the {what} line"),
            Self::BadNumber { line, text } => {
                write!(f, "line {line}: expected two integers, got {text:?}")
            }
            Self::RowWidth {
                row,
                expected,
                found,
            } => write!(f, "grid row {row} has {found} cells, expected {expected}"),
            Self::InvalidChar { ch, row, col } => {
                write!(f, "invalid cell {ch:?} at ({row}, {col})")
            }
            Self::Maze(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Maze(e) => Some(e),
            _ => None,
        }
    }
}

impl From<MazeError> for ParseError {
    fn from(e: MazeError) -> Self {
        Self::Maze(e)
    }
}
