use std::ops::Deref;

use maze_core::Coord;

/// An ordered entry-to-exit sequence of cells.
///
/// Produced fresh by each successful solve and owned by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Path(Vec<Coord>);

impl Path {
    /// The cells in order.
    #[inline]
    pub fn as_slice(&self) -> &[Coord] {
        &self.0
    }

    /// Number of orthogonal moves, i.e. `len() - 1` (0 for an empty path).
    #[inline]
    pub fn steps(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    /// Whether every consecutive pair is exactly one orthogonal step apart.
    pub fn is_contiguous(&self) -> bool {
        self.0.windows(2).all(|w| w[0].is_adjacent(w[1]))
    }

    /// Consume the path, returning the underlying cells.
    pub fn into_vec(self) -> Vec<Coord> {
        self.0
    }
}

impl Deref for Path {
    type Target = [Coord];

    #[inline]
    fn deref(&self) -> &[Coord] {
        &self.0
    }
}

impl From<Vec<Coord>> for Path {
    fn from(v: Vec<Coord>) -> Self {
        Self(v)
    }
}

impl From<Path> for Vec<Coord> {
    fn from(p: Path) -> Self {
        p.0
    }
}

impl IntoIterator for Path {
    type Item = Coord;
    type IntoIter = std::vec::IntoIter<Coord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Coord;
    type IntoIter = std::slice::Iter<'a, Coord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
