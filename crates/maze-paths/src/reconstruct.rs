//! Backward walk from the exit along decreasing distance labels.

use maze_core::{Coord, Direction, Grid, MazeError, UNREACHED};

use crate::path::Path;

/// Rebuild an entry-to-exit path from the labels left by a fill.
///
/// Starting at `exit`, repeatedly step to the passable neighbour with the
/// strictly smallest label until `entry` is reached. Ties go to the first
/// neighbour in [`Direction::ALL`] order, so the same labels always give the
/// same path. Read-only: the grid is not modified.
///
/// Returns `Ok(None)` if `exit` is a wall or unlabelled, or if the walk
/// reaches a cell with no smaller neighbour before arriving at `entry`
/// (labels that did not come from a fill seeded at `entry`).
pub fn reconstruct_path(grid: &Grid, exit: Coord, entry: Coord) -> Result<Option<Path>, MazeError> {
    grid.is_wall(entry)?;
    if grid.is_wall(exit)? || grid.distance(exit)? == UNREACHED {
        return Ok(None);
    }

    let mut cells = vec![exit];
    let mut cur = exit;
    while cur != entry {
        let Some(next) = steepest_descent(grid, cur)? else {
            log::warn!("distance labels stop descending at {cur} before reaching {entry}");
            return Ok(None);
        };
        cells.push(next);
        cur = next;
    }

    cells.reverse();
    Ok(Some(Path::from(cells)))
}

/// The first passable neighbour of `c` holding the smallest label that is
/// strictly below `c`'s own.
fn steepest_descent(grid: &Grid, c: Coord) -> Result<Option<Coord>, MazeError> {
    let mut best = None;
    let mut best_dist = grid.distance(c)?;
    for dir in Direction::ALL {
        let n = c.neighbor(dir);
        if !grid.is_passable(n) {
            continue;
        }
        let d = grid.distance(n)?;
        if d < best_dist {
            best_dist = d;
            best = Some(n);
        }
    }
    Ok(best)
}
