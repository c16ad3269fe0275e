//! Bounded-revisit distance fill.

use maze_core::{Coord, Direction, Grid, MazeError, UNREACHED};

use crate::observer::FillObserver;
use crate::solver::{FillOrder, FillStats, Frame, Solver};

impl Solver {
    /// Label every cell reachable from `entry` with its distance.
    ///
    /// Sets `distance(entry) = 0` and moves `grid` into
    /// [`SolveState::Filling`](maze_core::SolveState::Filling). At each
    /// processed cell every passable neighbour is relaxed to
    /// `distance(cell) + 1`; a neighbour is advanced into only while its
    /// visit count is below the configured cap, and its count is bumped
    /// before it is queued. The total number of advances is therefore at
    /// most `visit_cap * rows * cols`.
    ///
    /// Fails with [`MazeError::AlreadySolved`] unless the grid is
    /// `Unstarted`, and with [`MazeError::InvalidConfig`] for a zero cap.
    /// A wall entry leaves every label untouched.
    pub fn fill_distances<O: FillObserver + ?Sized>(
        &mut self,
        grid: &mut Grid,
        entry: Coord,
        observer: &mut O,
    ) -> Result<FillStats, MazeError> {
        if self.config.visit_cap == 0 {
            return Err(MazeError::InvalidConfig("visit cap must be at least 1"));
        }
        let entry_wall = grid.is_wall(entry)?;
        grid.begin_fill()?;

        let mut stats = FillStats::default();
        if entry_wall {
            return Ok(stats);
        }
        grid.set_distance(entry, 0)?;

        match self.config.order {
            FillOrder::BreadthFirst => self.fill_breadth_first(grid, entry, observer, &mut stats)?,
            FillOrder::DepthFirst => self.fill_depth_first(grid, entry, observer, &mut stats)?,
        }

        stats.reached = grid.reached_count();
        Ok(stats)
    }

    fn fill_breadth_first<O: FillObserver + ?Sized>(
        &mut self,
        grid: &mut Grid,
        entry: Coord,
        observer: &mut O,
        stats: &mut FillStats,
    ) -> Result<(), MazeError> {
        let cap = self.config.visit_cap;
        self.queue.clear();
        self.queue.push_back(entry);
        stats.peak_frontier = 1;

        while let Some(cur) = self.queue.pop_front() {
            for dir in Direction::ALL {
                let n = cur.neighbor(dir);
                if !grid.is_passable(n) {
                    continue;
                }
                relax(grid, cur, n, observer, stats)?;
                if grid.visit_count(n)? < cap {
                    let visits = grid.increment_visit(n)?;
                    observer.on_advance(cur, n, visits);
                    stats.advances += 1;
                    self.queue.push_back(n);
                }
            }
            stats.peak_frontier = stats.peak_frontier.max(self.queue.len());
        }
        Ok(())
    }

    /// Walks the maze depth-first with an explicit frame stack. Entering a
    /// cell relaxes it against all its neighbours in both directions before
    /// the frame starts trying directions in order. The walk can leave a
    /// label stale when a cell that later improved has used up its advances,
    /// so it finishes with [`tighten`](Self::tighten).
    fn fill_depth_first<O: FillObserver + ?Sized>(
        &mut self,
        grid: &mut Grid,
        entry: Coord,
        observer: &mut O,
        stats: &mut FillStats,
    ) -> Result<(), MazeError> {
        let cap = self.config.visit_cap;
        self.stack.clear();
        relax_around(grid, entry, observer, stats)?;
        self.stack.push(Frame {
            cell: entry,
            next: 0,
        });
        stats.peak_frontier = 1;

        while let Some(top) = self.stack.last_mut() {
            let Some(&dir) = Direction::ALL.get(top.next) else {
                self.stack.pop();
                continue;
            };
            top.next += 1;
            let cur = top.cell;

            let n = cur.neighbor(dir);
            if !grid.is_passable(n) || grid.visit_count(n)? >= cap {
                continue;
            }
            let visits = grid.increment_visit(n)?;
            observer.on_advance(cur, n, visits);
            stats.advances += 1;

            relax(grid, cur, n, observer, stats)?;
            relax_around(grid, n, observer, stats)?;
            self.stack.push(Frame { cell: n, next: 0 });
            stats.peak_frontier = stats.peak_frontier.max(self.stack.len());
        }
        self.tighten(grid, observer, stats)
    }

    /// Re-relax from every labelled cell until no label drops. Afterwards
    /// each labelled cell other than the entry sits exactly one above its
    /// smallest passable neighbour. Visit counts are left alone.
    fn tighten<O: FillObserver + ?Sized>(
        &mut self,
        grid: &mut Grid,
        observer: &mut O,
        stats: &mut FillStats,
    ) -> Result<(), MazeError> {
        self.queue.clear();
        for (c, wall) in grid.iter() {
            if !wall && grid.distance(c)? != UNREACHED {
                self.queue.push_back(c);
            }
        }

        while let Some(cur) = self.queue.pop_front() {
            for n in cur.neighbors_4() {
                if grid.is_passable(n) && relax(grid, cur, n, observer, stats)? {
                    self.queue.push_back(n);
                }
            }
        }
        Ok(())
    }
}

/// Lower `to`'s label to `distance(from) + 1` if that improves it.
fn relax<O: FillObserver + ?Sized>(
    grid: &mut Grid,
    from: Coord,
    to: Coord,
    observer: &mut O,
    stats: &mut FillStats,
) -> Result<bool, MazeError> {
    let base = grid.distance(from)?;
    if base == UNREACHED {
        return Ok(false);
    }
    let old = grid.distance(to)?;
    let new = base + 1;
    if new >= old {
        return Ok(false);
    }
    grid.set_distance(to, new)?;
    observer.on_relax(from, to, old, new);
    stats.relaxations += 1;
    Ok(true)
}

/// Push `c`'s label out to its passable neighbours, then pull it back down
/// from them.
fn relax_around<O: FillObserver + ?Sized>(
    grid: &mut Grid,
    c: Coord,
    observer: &mut O,
    stats: &mut FillStats,
) -> Result<(), MazeError> {
    for n in c.neighbors_4() {
        if grid.is_passable(n) {
            relax(grid, c, n, observer, stats)?;
        }
    }
    for n in c.neighbors_4() {
        if grid.is_passable(n) {
            relax(grid, n, c, observer, stats)?;
        }
    }
    Ok(())
}
