//! Group and run validation.
//!
//! A set on the table is one of:
//! - **Group**: 3-4 tiles of one rank, each numbered tile a distinct color.
//! - **Run**: 3-13 tiles of one color with consecutive ascending ranks.
//!
//! Jokers substitute for any missing tile. A run is read positionally: the
//! tile at index `i` stands for rank `start + i`, so a joker occupies
//! exactly the slot it sits in. A set needs at least one numbered tile.

use smallvec::SmallVec;

use super::tile::{Tile, TileColor, MAX_RANK, MIN_RANK};

/// Smallest legal set.
pub const MIN_SET_SIZE: usize = 3;

/// Largest legal group (one tile per color).
pub const MAX_GROUP_SIZE: usize = 4;

/// Largest legal run (ranks 1 through 13).
pub const MAX_RUN_SIZE: usize = 13;

/// The shape of a valid set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SetKind {
    /// Same rank, distinct colors.
    Group { rank: u8 },
    /// Same color, consecutive ranks beginning at `start`.
    Run { color: TileColor, start: u8 },
}

/// Classify a set, or `None` if it is neither a group nor a run.
///
/// A set that reads as both (e.g. a numbered tile flanked by jokers) is
/// reported as a group.
#[must_use]
pub fn classify(set: &[Tile]) -> Option<SetKind> {
    if let Some(rank) = group_rank(set) {
        return Some(SetKind::Group { rank });
    }
    run_start(set).map(|(color, start)| SetKind::Run { color, start })
}

/// Check whether `set` is a valid group or run.
#[must_use]
pub fn is_valid_set(set: &[Tile]) -> bool {
    classify(set).is_some()
}

fn group_rank(set: &[Tile]) -> Option<u8> {
    if !(MIN_SET_SIZE..=MAX_GROUP_SIZE).contains(&set.len()) {
        return None;
    }
    let mut rank = None;
    let mut seen: SmallVec<[TileColor; 4]> = SmallVec::new();
    for tile in set {
        if let Tile::Number { rank: r, color } = *tile {
            match rank {
                None => rank = Some(r),
                Some(existing) if existing != r => return None,
                Some(_) => {}
            }
            if seen.contains(&color) {
                return None;
            }
            seen.push(color);
        }
    }
    rank
}

fn run_start(set: &[Tile]) -> Option<(TileColor, u8)> {
    if !(MIN_SET_SIZE..=MAX_RUN_SIZE).contains(&set.len()) {
        return None;
    }
    let mut anchor: Option<(TileColor, i16)> = None;
    for (i, tile) in set.iter().enumerate() {
        if let Tile::Number { rank, color } = *tile {
            let start = i16::from(rank) - i as i16;
            match anchor {
                None => anchor = Some((color, start)),
                Some((c, s)) if c != color || s != start => return None,
                Some(_) => {}
            }
        }
    }
    let (color, start) = anchor?;
    let end = start + set.len() as i16 - 1;
    if start < i16::from(MIN_RANK) || end > i16::from(MAX_RANK) {
        return None;
    }
    Some((color, start as u8))
}

/// Rank each tile of a valid set stands for, jokers included.
///
/// Returns `None` for invalid sets.
#[must_use]
pub fn represented_ranks(set: &[Tile]) -> Option<SmallVec<[u8; 13]>> {
    let ranks = match classify(set)? {
        SetKind::Group { rank } => set.iter().map(|_| rank).collect(),
        SetKind::Run { start, .. } => (0..set.len()).map(|i| start + i as u8).collect(),
    };
    Some(ranks)
}

/// Meld value of a valid set: the sum of represented ranks.
///
/// Jokers count as the rank they stand for. Returns `None` for invalid sets.
#[must_use]
pub fn set_value(set: &[Tile]) -> Option<u32> {
    represented_ranks(set).map(|ranks| ranks.iter().map(|&r| u32::from(r)).sum())
}
