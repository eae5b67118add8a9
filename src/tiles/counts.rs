//! Tile multisets.
//!
//! Hands, proposals and the table are compared as multisets: two copies of
//! every tile exist, so set semantics would lose information and ordering
//! is irrelevant for conservation checks.

use rustc_hash::FxHashMap;

use super::tile::Tile;

/// Count of each tile, keyed by tile code.
///
/// Zero counts are never stored, so equality is multiset equality.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TileCounts {
    counts: FxHashMap<u8, u32>,
    total: usize,
}

impl TileCounts {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one tile.
    pub fn add(&mut self, tile: Tile) {
        *self.counts.entry(tile.code()).or_insert(0) += 1;
        self.total += 1;
    }

    /// Remove one tile.
    ///
    /// Returns false if the tile was not present.
    pub fn remove(&mut self, tile: Tile) -> bool {
        let code = tile.code();
        match self.counts.get_mut(&code) {
            Some(count) if *count > 1 => *count -= 1,
            Some(_) => {
                self.counts.remove(&code);
            }
            None => return false,
        }
        self.total -= 1;
        true
    }

    /// Number of copies of `tile`.
    #[must_use]
    pub fn count(&self, tile: Tile) -> u32 {
        self.counts.get(&tile.code()).copied().unwrap_or(0)
    }

    /// Total number of tiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Check that every tile in `other` is present here at least as often.
    #[must_use]
    pub fn contains_all(&self, other: &TileCounts) -> bool {
        other
            .counts
            .iter()
            .all(|(code, &n)| self.counts.get(code).copied().unwrap_or(0) >= n)
    }

    /// Multiset difference `self - other`.
    ///
    /// Returns `None` when `other` is not contained in `self`.
    #[must_use]
    pub fn difference(&self, other: &TileCounts) -> Option<TileCounts> {
        if !self.contains_all(other) {
            return None;
        }
        let mut result = self.clone();
        for (&code, &n) in &other.counts {
            let remaining = result.counts[&code] - n;
            if remaining == 0 {
                result.counts.remove(&code);
            } else {
                result.counts.insert(code, remaining);
            }
            result.total -= n as usize;
        }
        Some(result)
    }

    /// Multiset sum `self + other`.
    #[must_use]
    pub fn union(&self, other: &TileCounts) -> TileCounts {
        let mut result = self.clone();
        for (&code, &n) in &other.counts {
            *result.counts.entry(code).or_insert(0) += n;
            result.total += n as usize;
        }
        result
    }

    /// Add every tile of every set.
    pub fn extend_sets<'a>(&mut self, sets: impl IntoIterator<Item = &'a Vec<Tile>>) {
        for set in sets {
            self.extend(set.iter().copied());
        }
    }
}

impl Extend<Tile> for TileCounts {
    fn extend<I: IntoIterator<Item = Tile>>(&mut self, iter: I) {
        for tile in iter {
            self.add(tile);
        }
    }
}

impl FromIterator<Tile> for TileCounts {
    fn from_iter<I: IntoIterator<Item = Tile>>(iter: I) -> Self {
        let mut counts = TileCounts::new();
        counts.extend(iter);
        counts
    }
}

impl<'a> FromIterator<&'a Tile> for TileCounts {
    fn from_iter<I: IntoIterator<Item = &'a Tile>>(iter: I) -> Self {
        iter.into_iter().copied().collect()
    }
}
