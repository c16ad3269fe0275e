use maze_core::{Coord, Grid, MazeError, SolveState};

use crate::observer::FillObserver;
use crate::path::Path;
use crate::solver::Solver;

/// A grid together with its fixed entry and exit, plus the last path found.
///
/// This is the surface a loader builds and a renderer reads: extent, wall
/// predicate, endpoints, distance labels and the path.
#[derive(Debug, Clone)]
pub struct Maze {
    grid: Grid,
    entry: Coord,
    exit: Coord,
    path: Path,
}

impl Maze {
    /// Bundle `grid` with its endpoints. Both must lie inside the grid.
    pub fn new(grid: Grid, entry: Coord, exit: Coord) -> Result<Self, MazeError> {
        for c in [entry, exit] {
            if !grid.in_bounds(c) {
                return Err(MazeError::OutOfBounds {
                    coord: c,
                    rows: grid.rows(),
                    cols: grid.cols(),
                });
            }
        }
        Ok(Self {
            grid,
            entry,
            exit,
            path: Path::default(),
        })
    }

    pub fn rows(&self) -> i32 {
        self.grid.rows()
    }

    pub fn cols(&self) -> i32 {
        self.grid.cols()
    }

    pub fn is_wall(&self, c: Coord) -> Result<bool, MazeError> {
        self.grid.is_wall(c)
    }

    pub fn entry_loc(&self) -> Coord {
        self.entry
    }

    pub fn exit_loc(&self) -> Coord {
        self.exit
    }

    /// The path found by the last successful search; empty otherwise.
    pub fn path(&self) -> &[Coord] {
        &self.path
    }

    /// Distance label at `c` after a search.
    pub fn distance(&self, c: Coord) -> Result<i32, MazeError> {
        self.grid.distance(c)
    }

    pub fn state(&self) -> SolveState {
        self.grid.state()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Search with a default [`Solver`].
    pub fn search(&mut self) -> Result<bool, MazeError> {
        self.search_with(&mut Solver::default())
    }

    /// Search once with `solver`. Returns whether a path exists; on success
    /// it is available from [`path`](Self::path).
    pub fn search_with(&mut self, solver: &mut Solver) -> Result<bool, MazeError> {
        self.search_observed(solver, &mut ())
    }

    /// Like [`search_with`](Self::search_with), reporting each fill step to
    /// `observer`.
    pub fn search_observed<O: FillObserver + ?Sized>(
        &mut self,
        solver: &mut Solver,
        observer: &mut O,
    ) -> Result<bool, MazeError> {
        match solver.solve_observed(&mut self.grid, self.entry, self.exit, observer)? {
            Some(p) => {
                self.path = p;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Forget labels and the path so the maze can be searched again.
    pub fn reset(&mut self) {
        self.grid.reset();
        self.path = Path::default();
    }

    /// Split into the grid and the path.
    pub fn into_parts(self) -> (Grid, Path) {
        (self.grid, self.path)
    }
}
