//! Core match types: identifiers, players, options, actions, RNG, state,
//! construction and per-viewer views.
//!
//! These types hold data and enforce structural invariants only. Game
//! rules live in [`crate::rules`].

pub mod action;
pub mod builder;
pub mod config;
pub mod ids;
pub mod player;
pub mod rng;
pub mod state;
pub mod view;

pub use action::{Action, ActionOutcome, ActionRecord, ActionRequest};
pub use builder::{Deal, GameBuilder};
pub use config::{GameOptions, MAX_PLAYERS, MIN_PLAYERS};
pub use ids::{GameId, UserId};
pub use player::PlayerState;
pub use rng::{GameRng, GameRngState};
pub use state::{Game, GameState, RoundScore, StagedProposal, UpdateSets};
pub use view::{GameView, PlayerView};
