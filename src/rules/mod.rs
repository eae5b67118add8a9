//! Tile-rummy rules.
//!
//! - `validator`: pure legality checks, one per operation
//! - `scoring`: zero-sum round scores and cumulative totals
//! - `engine`: the `RulesEngine` trait and `RummyEngine`, which apply
//!   validated actions and run the round lifecycle
//!
//! The core types hold state; only this module interprets it.

pub mod engine;
pub mod scoring;
pub mod validator;

pub use engine::{GameResult, RulesEngine, RummyEngine};
