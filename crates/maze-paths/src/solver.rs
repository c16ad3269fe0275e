use std::collections::VecDeque;

use maze_core::{Coord, Grid, MazeError, SolveState, UNREACHED};

use crate::observer::FillObserver;
use crate::path::Path;
use crate::reconstruct::reconstruct_path;

/// Default number of times the fill may advance into a single cell.
pub const DEFAULT_VISIT_CAP: u32 = 4;

/// Work-list discipline used by the distance fill.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum FillOrder {
    /// FIFO queue. Labels come out as exact shortest distances.
    #[default]
    BreadthFirst,
    /// Explicit stack walking the four directions depth-first from each
    /// cell, followed by a relaxation pass that lowers any label the walk
    /// left stale. Labels come out exact as well.
    DepthFirst,
}

/// Tunable solver settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SolverConfig {
    /// A cell is advanced into only while its visit count is below this.
    /// Must be at least 1.
    pub visit_cap: u32,
    pub order: FillOrder,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            visit_cap: DEFAULT_VISIT_CAP,
            order: FillOrder::default(),
        }
    }
}

/// Counters collected during one fill.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FillStats {
    /// Times the fill moved into a cell.
    pub advances: usize,
    /// Times a label was lowered.
    pub relaxations: usize,
    /// Free cells carrying a label afterwards.
    pub reached: usize,
    /// Largest work-list length observed.
    pub peak_frontier: usize,
}

/// A depth-first frame: the cell and the index of the next direction to try.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Frame {
    pub(crate) cell: Coord,
    pub(crate) next: usize,
}

// ---------------------------------------------------------------------------
// Solver
// ---------------------------------------------------------------------------

/// Runs the distance fill and path reconstruction.
///
/// `Solver` owns its work lists so that solving many mazes in a row reuses
/// the same allocations.
#[derive(Debug, Default)]
pub struct Solver {
    pub(crate) config: SolverConfig,
    pub(crate) queue: VecDeque<Coord>,
    pub(crate) stack: Vec<Frame>,
}

impl Solver {
    /// Create a solver with the given settings.
    pub fn new(config: SolverConfig) -> Self {
        Self {
            config,
            queue: VecDeque::new(),
            stack: Vec::new(),
        }
    }

    /// The settings in use.
    #[inline]
    pub fn config(&self) -> SolverConfig {
        self.config
    }

    /// Replace the settings. Buffers are kept.
    pub fn set_config(&mut self, config: SolverConfig) {
        self.config = config;
    }

    /// Find a path from `entry` to `exit`.
    ///
    /// Returns `Ok(None)` when either endpoint is a wall or the fill never
    /// labels the exit. Fails with [`MazeError::OutOfBounds`] for endpoints
    /// outside the grid and [`MazeError::AlreadySolved`] if `grid` has been
    /// solved before without a [`Grid::reset`].
    ///
    /// On return every cell the fill reached carries its distance label.
    pub fn solve(
        &mut self,
        grid: &mut Grid,
        entry: Coord,
        exit: Coord,
    ) -> Result<Option<Path>, MazeError> {
        self.solve_observed(grid, entry, exit, &mut ())
    }

    /// Like [`solve`](Self::solve), reporting each fill step to `observer`.
    pub fn solve_observed<O: FillObserver + ?Sized>(
        &mut self,
        grid: &mut Grid,
        entry: Coord,
        exit: Coord,
        observer: &mut O,
    ) -> Result<Option<Path>, MazeError> {
        let entry_wall = grid.is_wall(entry)?;
        let exit_wall = grid.is_wall(exit)?;

        if entry_wall || exit_wall {
            grid.transition(SolveState::Unreachable)?;
            log::debug!("no path: entry {entry} or exit {exit} is a wall");
            return Ok(None);
        }

        if entry == exit {
            grid.transition(SolveState::Done)?;
            grid.set_distance(entry, 0)?;
            return Ok(Some(Path::from(vec![entry])));
        }

        let stats = self.fill_distances(grid, entry, observer)?;
        log::debug!(
            "fill from {entry}: {} advances, {} relaxations, {} cells reached",
            stats.advances,
            stats.relaxations,
            stats.reached
        );

        if grid.distance(exit)? == UNREACHED {
            grid.transition(SolveState::Unreachable)?;
            log::debug!("no path: exit {exit} was never reached");
            return Ok(None);
        }

        grid.transition(SolveState::Reachable)?;
        grid.transition(SolveState::Reconstructing)?;
        match reconstruct_path(grid, exit, entry)? {
            Some(path) => {
                grid.transition(SolveState::Done)?;
                log::debug!("path {entry} -> {exit}: {} steps", path.steps());
                Ok(Some(path))
            }
            None => {
                grid.transition(SolveState::Unreachable)?;
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::FillEvent;

    fn grid_from(rows: &[&str]) -> Grid {
        let cols = rows.first().map_or(0, |r| r.len()) as i32;
        Grid::from_fn(rows.len() as i32, cols, |c| {
            rows[c.row as usize].as_bytes()[c.col as usize] == b'1'
        })
    }

    fn both_orders() -> [Solver; 2] {
        [
            Solver::default(),
            Solver::new(SolverConfig {
                order: FillOrder::DepthFirst,
                ..SolverConfig::default()
            }),
        ]
    }

    #[test]
    fn default_config() {
        let cfg = SolverConfig::default();
        assert_eq!(cfg.visit_cap, 4);
        assert_eq!(cfg.order, FillOrder::BreadthFirst);
    }

    #[test]
    fn three_by_three_with_center_wall() {
        for mut solver in both_orders() {
            let mut g = grid_from(&["000", "010", "000"]);
            let path = solver
                .solve(&mut g, Coord::new(0, 0), Coord::new(2, 2))
                .unwrap()
                .expect("path exists");
            assert_eq!(path.len(), 5);
            assert!(path.is_contiguous());
            assert_eq!(g.distance(Coord::new(2, 2)), Ok(4));
            assert_eq!(g.state(), SolveState::Done);
        }
    }

    #[test]
    fn single_cell_maze() {
        for mut solver in both_orders() {
            let mut g = Grid::new(1, 1);
            let path = solver.solve(&mut g, Coord::ZERO, Coord::ZERO).unwrap();
            assert_eq!(path.map(Path::into_vec), Some(vec![Coord::ZERO]));
            assert_eq!(g.distance(Coord::ZERO), Ok(0));
            assert_eq!(g.state(), SolveState::Done);
        }
    }

    #[test]
    fn wall_endpoints_yield_no_path_and_untouched_labels() {
        for (entry, exit) in [
            (Coord::new(0, 0), Coord::new(1, 1)),
            (Coord::new(1, 1), Coord::new(0, 0)),
            (Coord::new(0, 0), Coord::new(0, 0)),
        ] {
            for mut solver in both_orders() {
                let mut g = grid_from(&["100", "010", "000"]);
                if entry == exit {
                    // (0, 0) is a wall here too.
                    assert_eq!(g.is_wall(entry), Ok(true));
                }
                assert_eq!(solver.solve(&mut g, entry, exit), Ok(None));
                assert_eq!(g.distance(entry), Ok(UNREACHED));
                assert_eq!(g.distance(exit), Ok(UNREACHED));
                assert_eq!(g.state(), SolveState::Unreachable);
            }
        }
    }

    #[test]
    fn out_of_bounds_endpoint_is_an_error() {
        let mut solver = Solver::default();
        let mut g = Grid::new(2, 2);
        let bad = Coord::new(2, 0);
        assert_eq!(
            solver.solve(&mut g, Coord::ZERO, bad),
            Err(MazeError::OutOfBounds {
                coord: bad,
                rows: 2,
                cols: 2
            })
        );
        let neg = Coord::new(0, -1);
        assert!(matches!(
            solver.solve(&mut g, neg, Coord::ZERO),
            Err(MazeError::OutOfBounds { .. })
        ));
        // Nothing started.
        assert_eq!(g.state(), SolveState::Unstarted);
    }

    #[test]
    fn separated_regions_with_a_loop_terminate() {
        // The left region contains a loop around the (1, 1) pillar; the
        // wall in column 3 cuts it off from the exit.
        for mut solver in both_orders() {
            let mut g = grid_from(&["00010", "01010", "00010", "00010"]);
            let result = solver.solve(&mut g, Coord::new(0, 0), Coord::new(3, 4));
            assert_eq!(result, Ok(None));
            assert_eq!(g.state(), SolveState::Unreachable);
            assert_eq!(g.distance(Coord::new(3, 4)), Ok(UNREACHED));
            // The whole left region was still labelled.
            assert_eq!(g.distance(Coord::new(3, 2)).map(|d| d < UNREACHED), Ok(true));
        }
    }

    #[test]
    fn open_grid_is_manhattan_optimal() {
        for n in [2, 5, 9] {
            let mut solver = Solver::default();
            let mut g = Grid::new(n, n);
            let exit = Coord::new(n - 1, n - 1);
            let path = solver.solve(&mut g, Coord::ZERO, exit).unwrap().unwrap();
            assert_eq!(path.len(), (2 * (n - 1) + 1) as usize);
            assert!(path.is_contiguous());
            assert_eq!(path.first(), Some(&Coord::ZERO));
            assert_eq!(path.last(), Some(&exit));
            assert_eq!(g.distance(exit), Ok(path.steps() as i32));
        }
    }

    #[test]
    fn depth_first_open_grid_path_is_shortest() {
        let mut solver = Solver::new(SolverConfig {
            order: FillOrder::DepthFirst,
            ..SolverConfig::default()
        });
        let mut g = Grid::new(6, 6);
        let exit = Coord::new(5, 5);
        let path = solver.solve(&mut g, Coord::ZERO, exit).unwrap().unwrap();
        assert!(path.is_contiguous());
        assert_eq!(path.first(), Some(&Coord::ZERO));
        assert_eq!(path.last(), Some(&exit));
        assert_eq!(path.steps(), 10);
        assert_eq!(g.distance(exit), Ok(path.steps() as i32));
    }

    #[test]
    fn second_solve_needs_reset() {
        let mut solver = Solver::default();
        let mut g = Grid::new(3, 3);
        let exit = Coord::new(2, 2);
        let first = solver.solve(&mut g, Coord::ZERO, exit).unwrap();
        assert_eq!(
            solver.solve(&mut g, Coord::ZERO, exit),
            Err(MazeError::AlreadySolved {
                state: SolveState::Done
            })
        );
        g.reset();
        assert_eq!(solver.solve(&mut g, Coord::ZERO, exit).unwrap(), first);
    }

    #[test]
    fn unreachable_grid_also_needs_reset() {
        let mut solver = Solver::default();
        let mut g = grid_from(&["010"]);
        let exit = Coord::new(0, 2);
        assert_eq!(solver.solve(&mut g, Coord::ZERO, exit), Ok(None));
        assert!(matches!(
            solver.solve(&mut g, Coord::ZERO, exit),
            Err(MazeError::AlreadySolved { .. })
        ));
    }

    #[test]
    fn zero_cap_is_rejected() {
        let mut solver = Solver::new(SolverConfig {
            visit_cap: 0,
            ..SolverConfig::default()
        });
        let mut g = Grid::new(2, 2);
        assert!(matches!(
            solver.solve(&mut g, Coord::ZERO, Coord::new(1, 1)),
            Err(MazeError::InvalidConfig(_))
        ));
        // The trivial maze needs no fill, so the cap does not matter.
        let mut g = Grid::new(1, 1);
        assert!(solver.solve(&mut g, Coord::ZERO, Coord::ZERO).unwrap().is_some());
    }

    #[test]
    fn observer_sees_the_fill() {
        let mut solver = Solver::default();
        let mut g = Grid::new(1, 3);
        let mut events = Vec::new();
        solver
            .solve_observed(&mut g, Coord::ZERO, Coord::new(0, 2), &mut events)
            .unwrap()
            .unwrap();
        assert_eq!(
            events.first(),
            Some(&FillEvent::Relax {
                from: Coord::new(0, 0),
                to: Coord::new(0, 1),
                old: UNREACHED,
                new: 1
            })
        );
        assert!(events.iter().any(|e| matches!(
            e,
            FillEvent::Relax { to, new: 2, .. } if *to == Coord::new(0, 2)
        )));
        assert!(events.iter().any(|e| matches!(e, FillEvent::Advance { .. })));
    }

    #[test]
    fn solver_is_reusable_across_grids() {
        let mut solver = Solver::default();
        for n in 1..6 {
            let mut g = Grid::new(n, n);
            let path = solver
                .solve(&mut g, Coord::ZERO, Coord::new(n - 1, n - 1))
                .unwrap()
                .unwrap();
            assert_eq!(path.steps() as i32, 2 * (n - 1));
        }
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn config_defaults_fill_missing_fields() {
        let cfg: SolverConfig = serde_json::from_str(r#"{"order":"depth-first"}"#).unwrap();
        assert_eq!(cfg.order, FillOrder::DepthFirst);
        assert_eq!(cfg.visit_cap, DEFAULT_VISIT_CAP);
    }

    #[test]
    fn config_round_trip() {
        let cfg = SolverConfig {
            visit_cap: 6,
            order: FillOrder::BreadthFirst,
        };
        let json = serde_json::to_string(&cfg).unwrap();
        assert_eq!(json, r#"{"visit_cap":6,"order":"breadth-first"}"#);
        let back: SolverConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }
}
