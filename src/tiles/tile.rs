//! Tile identity and compact integer encoding.
//!
//! A tile is either a numbered tile (rank 1-13 in one of four colors) or a
//! joker. Jokers carry neither rank nor color.
//!
//! ## Encoding
//!
//! Every tile maps to a single integer in `0..=52`:
//! - Numbered tiles: `13 * color_index + (rank - 1)`
//! - Joker: `52`
//!
//! ```
//! use tile_rummy::tiles::{Tile, TileColor};
//!
//! let tile = Tile::number(10, TileColor::Red);
//! assert_eq!(tile.code(), 13 * 2 + 9);
//! assert_eq!(Tile::from_code(35).unwrap(), tile);
//! assert_eq!(Tile::Joker.code(), 52);
//! ```
//!
//! ## Wire Format
//!
//! Tiles serialize as `{"rank":10,"color":"RED"}` or `{"isJoker":true}`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lowest rank on a numbered tile.
pub const MIN_RANK: u8 = 1;

/// Highest rank on a numbered tile.
pub const MAX_RANK: u8 = 13;

/// Integer code reserved for the joker.
pub const JOKER_CODE: u8 = 52;

/// Tile colors, in encoding order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TileColor {
    Black,
    Blue,
    Red,
    Yellow,
}

impl TileColor {
    /// All colors in encoding order.
    pub const ALL: [TileColor; 4] = [
        TileColor::Black,
        TileColor::Blue,
        TileColor::Red,
        TileColor::Yellow,
    ];

    /// Index used by the integer encoding (0-3).
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Color for an encoding index.
    #[must_use]
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(TileColor::Black),
            1 => Some(TileColor::Blue),
            2 => Some(TileColor::Red),
            3 => Some(TileColor::Yellow),
            _ => None,
        }
    }
}

impl std::fmt::Display for TileColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TileColor::Black => "BLACK",
            TileColor::Blue => "BLUE",
            TileColor::Red => "RED",
            TileColor::Yellow => "YELLOW",
        };
        f.write_str(name)
    }
}

/// Errors from constructing or decoding tiles.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TileError {
    #[error("rank {0} is outside 1-13")]
    RankOutOfRange(u8),

    #[error("tile code {0} is outside 0-52")]
    InvalidCode(u8),

    #[error("a joker cannot carry a rank or color")]
    JokerWithRank,

    #[error("a numbered tile needs both a rank and a color")]
    MissingRankOrColor,
}

/// A single rummy tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "TileWire", into = "TileWire")]
pub enum Tile {
    /// A numbered tile.
    Number { rank: u8, color: TileColor },
    /// A wildcard.
    Joker,
}

impl Tile {
    /// Create a numbered tile.
    ///
    /// Panics if `rank` is outside 1-13. Use [`Tile::try_number`] for
    /// untrusted input.
    #[must_use]
    pub fn number(rank: u8, color: TileColor) -> Self {
        assert!(
            (MIN_RANK..=MAX_RANK).contains(&rank),
            "Tile rank must be 1-13"
        );
        Tile::Number { rank, color }
    }

    /// Create a numbered tile, rejecting out-of-range ranks.
    pub fn try_number(rank: u8, color: TileColor) -> Result<Self, TileError> {
        if (MIN_RANK..=MAX_RANK).contains(&rank) {
            Ok(Tile::Number { rank, color })
        } else {
            Err(TileError::RankOutOfRange(rank))
        }
    }

    /// Rank of a numbered tile, `None` for jokers.
    #[must_use]
    pub const fn rank(self) -> Option<u8> {
        match self {
            Tile::Number { rank, .. } => Some(rank),
            Tile::Joker => None,
        }
    }

    /// Color of a numbered tile, `None` for jokers.
    #[must_use]
    pub const fn color(self) -> Option<TileColor> {
        match self {
            Tile::Number { color, .. } => Some(color),
            Tile::Joker => None,
        }
    }

    #[must_use]
    pub const fn is_joker(self) -> bool {
        matches!(self, Tile::Joker)
    }

    /// Compact integer code in `0..=52`.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Tile::Number { rank, color } => 13 * color.index() + (rank - 1),
            Tile::Joker => JOKER_CODE,
        }
    }

    /// Decode a tile from its integer code.
    pub fn from_code(code: u8) -> Result<Self, TileError> {
        if code == JOKER_CODE {
            return Ok(Tile::Joker);
        }
        let color = TileColor::from_index(code / 13).ok_or(TileError::InvalidCode(code))?;
        Ok(Tile::Number {
            rank: code % 13 + 1,
            color,
        })
    }

    /// Point value of this tile left in a hand at the end of a round.
    ///
    /// Numbered tiles are worth their rank; a joker is worth `joker_penalty`.
    #[must_use]
    pub fn value(self, joker_penalty: i64) -> i64 {
        match self {
            Tile::Number { rank, .. } => i64::from(rank),
            Tile::Joker => joker_penalty,
        }
    }
}

impl std::fmt::Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tile::Number { rank, color } => write!(f, "{} {}", rank, color),
            Tile::Joker => f.write_str("JOKER"),
        }
    }
}

/// JSON shape of a tile.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TileWire {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rank: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    color: Option<TileColor>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    is_joker: bool,
}

impl TryFrom<TileWire> for Tile {
    type Error = TileError;

    fn try_from(wire: TileWire) -> Result<Self, Self::Error> {
        match (wire.is_joker, wire.rank, wire.color) {
            (true, None, None) => Ok(Tile::Joker),
            (true, _, _) => Err(TileError::JokerWithRank),
            (false, Some(rank), Some(color)) => Tile::try_number(rank, color),
            (false, _, _) => Err(TileError::MissingRankOrColor),
        }
    }
}

impl From<Tile> for TileWire {
    fn from(tile: Tile) -> Self {
        TileWire {
            rank: tile.rank(),
            color: tile.color(),
            is_joker: tile.is_joker(),
        }
    }
}
