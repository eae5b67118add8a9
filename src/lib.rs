//! # tile-rummy
//!
//! Turn-based rule engine for digital tile-rummy matches.
//!
//! ## Design Principles
//!
//! 1. **Validate, then mutate**: every operation checks its preconditions
//!    before touching state, and the service commits a working copy only
//!    when the whole operation succeeds.
//!
//! 2. **Two-phase turns**: the player holding the turn may stage table
//!    arrangements repeatedly. The engine records whether the latest one is
//!    legal without forcing a commit.
//!
//! 3. **Conservation**: the table, every hand and the pool always add up to
//!    exactly one box of 106 tiles.
//!
//! ## Modules
//!
//! - `tiles`: Tiles, encoding, multisets, set validation, the draw pool
//! - `core`: Ids, players, options, actions, game state, builder, views
//! - `rules`: Validator, scoring and the turn engine
//! - `service`: Client operations over a per-game store and publisher
//! - `error`: `NotFound` and `Validation` errors

pub mod core;
pub mod error;
pub mod rules;
pub mod service;
pub mod tiles;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionOutcome, ActionRecord, ActionRequest, Deal, Game, GameBuilder, GameId,
    GameOptions, GameRng, GameRngState, GameState, GameView, PlayerState, PlayerView, RoundScore,
    StagedProposal, UpdateSets, UserId,
};

pub use crate::error::{EngineError, NotFoundError, Result, ValidationError};

pub use crate::rules::{GameResult, RulesEngine, RummyEngine};

pub use crate::service::{
    BroadcastPublisher, GameRecord, GameService, GameStore, GameUpdate, InMemoryGameStore,
    NoopPublisher, UpdatePublisher,
};

pub use crate::tiles::{is_valid_set, SetKind, Tile, TileColor, TileCounts, TilePool};
