use maze_core::Coord;

/// One step of a distance fill, as reported to a [`FillObserver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FillEvent {
    /// `to`'s label dropped from `old` to `new` via `from`.
    Relax {
        from: Coord,
        to: Coord,
        old: i32,
        new: i32,
    },
    /// The fill moved from `from` into `to`; `visits` is `to`'s count after
    /// the increment.
    Advance { from: Coord, to: Coord, visits: u32 },
}

/// Hook invoked at every relax / advance step of a fill.
///
/// Both methods default to doing nothing. `()` is the silent observer.
pub trait FillObserver {
    fn on_relax(&mut self, _from: Coord, _to: Coord, _old: i32, _new: i32) {}

    fn on_advance(&mut self, _from: Coord, _to: Coord, _visits: u32) {}
}

impl FillObserver for () {}

/// Records every event in order.
impl FillObserver for Vec<FillEvent> {
    fn on_relax(&mut self, from: Coord, to: Coord, old: i32, new: i32) {
        self.push(FillEvent::Relax { from, to, old, new });
    }

    fn on_advance(&mut self, from: Coord, to: Coord, visits: u32) {
        self.push(FillEvent::Advance { from, to, visits });
    }
}

impl<O: FillObserver + ?Sized> FillObserver for &mut O {
    fn on_relax(&mut self, from: Coord, to: Coord, old: i32, new: i32) {
        (**self).on_relax(from, to, old, new);
    }

    fn on_advance(&mut self, from: Coord, to: Coord, visits: u32) {
        (**self).on_advance(from, to, visits);
    }
}

/// Forwards every event to `log::trace!` under the `maze_paths::fill`
/// target.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl FillObserver for LogObserver {
    fn on_relax(&mut self, from: Coord, to: Coord, old: i32, new: i32) {
        if old == maze_core::UNREACHED {
            log::trace!(target: "maze_paths::fill", "relax {to} via {from}: unreached -> {new}");
        } else {
            log::trace!(target: "maze_paths::fill", "relax {to} via {from}: {old} -> {new}");
        }
    }

    fn on_advance(&mut self, from: Coord, to: Coord, visits: u32) {
        log::trace!(target: "maze_paths::fill", "advance {from} -> {to} (visit {visits})");
    }
}
