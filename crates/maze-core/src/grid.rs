//! The [`Grid`] type: a fixed-extent cell space with per-cell solve state.
//!
//! Each cell carries an immutable wall flag, a mutable distance label and a
//! mutable visit counter. Storage is flat and row-major. Every accessor that
//! takes a [`Coord`] validates it before touching the backing vectors.

use crate::error::MazeError;
use crate::geom::Coord;

/// Distance label of a cell that no relaxation has reached yet.
pub const UNREACHED: i32 = i32::MAX;

// ---------------------------------------------------------------------------
// SolveState
// ---------------------------------------------------------------------------

/// Lifecycle of one solve over a grid.
///
/// ```text
/// Unstarted -> Filling -> { Reachable, Unreachable }
/// Reachable -> Reconstructing -> Done
/// ```
///
/// `Unstarted` may also jump straight to `Unreachable` (a wall endpoint) or
/// `Done` (entry equals exit). There is no way back except [`Grid::reset`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolveState {
    #[default]
    Unstarted,
    Filling,
    Reachable,
    Unreachable,
    Reconstructing,
    Done,
}

impl SolveState {
    fn allows(self, next: SolveState) -> bool {
        use SolveState::*;
        matches!(
            (self, next),
            (Unstarted, Filling | Unreachable | Done)
                | (Filling, Reachable | Unreachable)
                | (Reachable, Reconstructing)
                | (Reconstructing, Done | Unreachable)
        )
    }
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// A `rows x cols` maze grid.
///
/// The extent is fixed at construction. Walls may only be edited while the
/// grid is [`SolveState::Unstarted`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: i32,
    cols: i32,
    walls: Vec<bool>,
    distance: Vec<i32>,
    visits: Vec<u32>,
    state: SolveState,
}

impl Grid {
    /// Create a grid with every cell free. Negative extents are clamped to
    /// zero.
    pub fn new(rows: i32, cols: i32) -> Self {
        let rows = rows.max(0);
        let cols = cols.max(0);
        let len = (rows as usize) * (cols as usize);
        Self {
            rows,
            cols,
            walls: vec![false; len],
            distance: vec![UNREACHED; len],
            visits: vec![0; len],
            state: SolveState::Unstarted,
        }
    }

    /// Create a grid from a row-major wall buffer.
    pub fn from_walls(rows: i32, cols: i32, walls: Vec<bool>) -> Result<Self, MazeError> {
        let expected = (rows.max(0) as usize).saturating_mul(cols.max(0) as usize);
        if walls.len() != expected {
            return Err(MazeError::Shape {
                expected,
                found: walls.len(),
            });
        }
        let mut g = Self::new(rows, cols);
        g.walls = walls;
        Ok(g)
    }

    /// Create a grid whose wall flags are given by `is_wall`.
    pub fn from_fn(rows: i32, cols: i32, mut is_wall: impl FnMut(Coord) -> bool) -> Self {
        let mut g = Self::new(rows, cols);
        for i in 0..g.walls.len() {
            let c = g.coord(i);
            g.walls[i] = is_wall(c);
        }
        g
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> i32 {
        self.cols
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.walls.len()
    }

    /// Whether the grid has no cells at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.walls.is_empty()
    }

    /// Whether `c` lies inside `[0, rows) x [0, cols)`.
    #[inline]
    pub fn in_bounds(&self, c: Coord) -> bool {
        c.row >= 0 && c.col >= 0 && c.row < self.rows && c.col < self.cols
    }

    /// Flat index of `c`, or `OutOfBounds`.
    #[inline]
    fn index(&self, c: Coord) -> Result<usize, MazeError> {
        if !self.in_bounds(c) {
            return Err(MazeError::OutOfBounds {
                coord: c,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok((c.row as usize) * (self.cols as usize) + (c.col as usize))
    }

    /// Convert a flat index back to a coordinate.
    #[inline]
    fn coord(&self, idx: usize) -> Coord {
        let cols = self.cols.max(1) as usize;
        Coord::new((idx / cols) as i32, (idx % cols) as i32)
    }

    /// Whether the cell at `c` is a wall.
    pub fn is_wall(&self, c: Coord) -> Result<bool, MazeError> {
        Ok(self.walls[self.index(c)?])
    }

    /// In bounds and not a wall. Never fails; this is the traversal
    /// predicate.
    #[inline]
    pub fn is_passable(&self, c: Coord) -> bool {
        self.index(c).is_ok_and(|i| !self.walls[i])
    }

    /// Change the wall flag of a cell. Only allowed before any solve.
    pub fn set_wall(&mut self, c: Coord, wall: bool) -> Result<(), MazeError> {
        let i = self.index(c)?;
        if self.state != SolveState::Unstarted {
            return Err(MazeError::AlreadySolved { state: self.state });
        }
        self.walls[i] = wall;
        Ok(())
    }

    /// The distance label at `c` ([`UNREACHED`] if never relaxed). Not
    /// meaningful for walls.
    pub fn distance(&self, c: Coord) -> Result<i32, MazeError> {
        Ok(self.distance[self.index(c)?])
    }

    /// Overwrite the distance label at `c`. No wall check.
    pub fn set_distance(&mut self, c: Coord, value: i32) -> Result<(), MazeError> {
        let i = self.index(c)?;
        self.distance[i] = value;
        Ok(())
    }

    /// How many times the fill has advanced into `c`.
    pub fn visit_count(&self, c: Coord) -> Result<u32, MazeError> {
        Ok(self.visits[self.index(c)?])
    }

    /// Bump the visit counter at `c`, returning the new count.
    pub fn increment_visit(&mut self, c: Coord) -> Result<u32, MazeError> {
        let i = self.index(c)?;
        self.visits[i] = self.visits[i].saturating_add(1);
        Ok(self.visits[i])
    }

    /// Current lifecycle state.
    #[inline]
    pub fn state(&self) -> SolveState {
        self.state
    }

    /// Move to `next` along the solve state machine.
    ///
    /// Starting a solve on a grid that has left `Unstarted` fails with
    /// [`MazeError::AlreadySolved`].
    pub fn transition(&mut self, next: SolveState) -> Result<(), MazeError> {
        if !self.state.allows(next) {
            return Err(MazeError::AlreadySolved { state: self.state });
        }
        self.state = next;
        Ok(())
    }

    /// Enter `Filling`. Only an `Unstarted` grid can begin a fill.
    pub fn begin_fill(&mut self) -> Result<(), MazeError> {
        self.transition(SolveState::Filling)
    }

    /// Clear every distance label and visit counter and return to
    /// `Unstarted`. Walls are kept.
    pub fn reset(&mut self) {
        self.distance.fill(UNREACHED);
        self.visits.fill(0);
        self.state = SolveState::Unstarted;
    }

    /// Row-major distance labels.
    pub fn distances(&self) -> &[i32] {
        &self.distance
    }

    /// Row-major visit counters.
    pub fn visit_counts(&self) -> &[u32] {
        &self.visits
    }

    /// Number of free cells carrying a label.
    pub fn reached_count(&self) -> usize {
        self.walls
            .iter()
            .zip(&self.distance)
            .filter(|&(&wall, &d)| !wall && d != UNREACHED)
            .count()
    }

    /// Row-major iterator over `(Coord, is_wall)` pairs.
    pub fn iter(&self) -> GridIter<'_> {
        GridIter { grid: self, pos: 0 }
    }
}

// ---------------------------------------------------------------------------
// GridIter
// ---------------------------------------------------------------------------

/// Iterator over `(Coord, is_wall)` pairs of a [`Grid`].
pub struct GridIter<'a> {
    grid: &'a Grid,
    pos: usize,
}

impl Iterator for GridIter<'_> {
    type Item = (Coord, bool);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let wall = *self.grid.walls.get(self.pos)?;
        let c = self.grid.coord(self.pos);
        self.pos += 1;
        Some((c, wall))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.grid.walls.len() - self.pos;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for GridIter<'_> {}

impl<'a> IntoIterator for &'a Grid {
    type Item = (Coord, bool);
    type IntoIter = GridIter<'a>;

    fn into_iter(self) -> GridIter<'a> {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oob(g: &Grid, c: Coord) -> MazeError {
        MazeError::OutOfBounds {
            coord: c,
            rows: g.rows(),
            cols: g.cols(),
        }
    }

    #[test]
    fn new_is_free_and_unreached() {
        let g = Grid::new(3, 4);
        assert_eq!(g.rows(), 3);
        assert_eq!(g.cols(), 4);
        assert_eq!(g.len(), 12);
        for (c, wall) in g.iter() {
            assert!(!wall);
            assert_eq!(g.distance(c), Ok(UNREACHED));
            assert_eq!(g.visit_count(c), Ok(0));
        }
        assert_eq!(g.state(), SolveState::Unstarted);
    }

    #[test]
    fn from_walls_checks_shape() {
        let err = Grid::from_walls(2, 2, vec![false; 3]).unwrap_err();
        assert_eq!(
            err,
            MazeError::Shape {
                expected: 4,
                found: 3
            }
        );
        assert_eq!(
            Grid::from_walls(i32::MAX, i32::MAX, vec![false]).unwrap_err(),
            MazeError::Shape {
                expected: (i32::MAX as usize).saturating_mul(i32::MAX as usize),
                found: 1
            }
        );
        let g = Grid::from_walls(2, 2, vec![false, true, false, false]).unwrap();
        assert_eq!(g.is_wall(Coord::new(0, 1)), Ok(true));
        assert_eq!(g.is_wall(Coord::new(1, 0)), Ok(false));
    }

    #[test]
    fn from_fn_is_row_major() {
        let g = Grid::from_fn(2, 3, |c| c.col == 2);
        let walls: Vec<_> = g.iter().filter(|&(_, w)| w).map(|(c, _)| c).collect();
        assert_eq!(walls, vec![Coord::new(0, 2), Coord::new(1, 2)]);
    }

    #[test]
    fn every_accessor_rejects_out_of_bounds() {
        let mut g = Grid::new(2, 3);
        for c in [
            Coord::new(-1, 0),
            Coord::new(0, -1),
            Coord::new(2, 0),
            Coord::new(0, 3),
            Coord::new(i32::MIN, i32::MAX),
        ] {
            assert!(!g.in_bounds(c));
            assert!(!g.is_passable(c));
            assert_eq!(g.is_wall(c), Err(oob(&g, c)));
            assert_eq!(g.distance(c), Err(oob(&g, c)));
            assert_eq!(g.set_distance(c, 1), Err(oob(&g, c)));
            assert_eq!(g.visit_count(c), Err(oob(&g, c)));
            assert_eq!(g.increment_visit(c), Err(oob(&g, c)));
            assert_eq!(g.set_wall(c, true), Err(oob(&g, c)));
        }
    }

    #[test]
    fn empty_grid_has_no_cells() {
        let g = Grid::new(0, 5);
        assert!(g.is_empty());
        assert!(!g.in_bounds(Coord::ZERO));
        assert_eq!(g.iter().count(), 0);
        let g = Grid::new(-3, 2);
        assert_eq!(g.rows(), 0);
    }

    #[test]
    fn distance_and_visits_mutate() {
        let mut g = Grid::new(2, 2);
        let c = Coord::new(1, 1);
        g.set_distance(c, 7).unwrap();
        assert_eq!(g.distance(c), Ok(7));
        assert_eq!(g.increment_visit(c), Ok(1));
        assert_eq!(g.increment_visit(c), Ok(2));
        assert_eq!(g.visit_count(c), Ok(2));
        assert_eq!(g.reached_count(), 1);
    }

    #[test]
    fn reached_count_ignores_walls() {
        let mut g = Grid::from_fn(1, 3, |c| c.col == 1);
        for col in 0..3 {
            g.set_distance(Coord::new(0, col), 0).unwrap();
        }
        assert_eq!(g.reached_count(), 2);
    }

    #[test]
    fn state_machine_transitions() {
        let mut g = Grid::new(1, 1);
        g.transition(SolveState::Filling).unwrap();
        g.transition(SolveState::Reachable).unwrap();
        g.transition(SolveState::Reconstructing).unwrap();
        g.transition(SolveState::Done).unwrap();
        assert_eq!(
            g.transition(SolveState::Filling),
            Err(MazeError::AlreadySolved {
                state: SolveState::Done
            })
        );
    }

    #[test]
    fn no_skipping_the_fill() {
        let mut g = Grid::new(1, 1);
        assert!(g.transition(SolveState::Reachable).is_err());
        assert!(g.transition(SolveState::Reconstructing).is_err());
        assert_eq!(g.state(), SolveState::Unstarted);
    }

    #[test]
    fn walls_frozen_after_solve_starts() {
        let mut g = Grid::new(2, 2);
        g.set_wall(Coord::new(0, 1), true).unwrap();
        g.transition(SolveState::Filling).unwrap();
        assert_eq!(
            g.set_wall(Coord::new(0, 1), false),
            Err(MazeError::AlreadySolved {
                state: SolveState::Filling
            })
        );
        assert_eq!(g.is_wall(Coord::new(0, 1)), Ok(true));
    }

    #[test]
    fn reset_clears_labels_keeps_walls() {
        let mut g = Grid::from_fn(2, 2, |c| c == Coord::new(1, 0));
        g.begin_fill().unwrap();
        g.set_distance(Coord::ZERO, 0).unwrap();
        g.increment_visit(Coord::ZERO).unwrap();
        g.transition(SolveState::Unreachable).unwrap();

        g.reset();
        assert_eq!(g.state(), SolveState::Unstarted);
        assert!(g.distances().iter().all(|&d| d == UNREACHED));
        assert!(g.visit_counts().iter().all(|&v| v == 0));
        assert_eq!(g.is_wall(Coord::new(1, 0)), Ok(true));
    }
}
