//! Error types surfaced by engine operations.
//!
//! Callers see two kinds of failure:
//! - `NotFound`: the game id is unknown
//! - `Validation`: the request broke a rule; carries one or more messages
//!
//! A validation failure never changes game state.

use smallvec::SmallVec;
use thiserror::Error;

use crate::core::ids::GameId;

/// The requested game does not exist.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("Game does not exist with id: {game_id}")]
pub struct NotFoundError {
    pub game_id: GameId,
}

/// One or more rule violations.
///
/// Displays as `Validation errors: "first", "second"`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("Validation errors: {}", quote_all(.messages))]
pub struct ValidationError {
    messages: SmallVec<[String; 2]>,
}

fn quote_all(messages: &[String]) -> String {
    messages
        .iter()
        .map(|m| format!("\"{}\"", m))
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationError {
    /// A single violation.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        let mut messages = SmallVec::new();
        messages.push(message.into());
        Self { messages }
    }

    /// Collect violations, returning `None` if there are none.
    #[must_use]
    pub fn from_messages<I, M>(messages: I) -> Option<Self>
    where
        I: IntoIterator<Item = M>,
        M: Into<String>,
    {
        let messages: SmallVec<[String; 2]> = messages.into_iter().map(Into::into).collect();
        if messages.is_empty() {
            None
        } else {
            Some(Self { messages })
        }
    }

    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}

/// Errors from engine and service operations.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("game store lock was poisoned")]
    LockPoisoned,

    #[error("game already exists with id: {0}")]
    GameAlreadyExists(GameId),

    #[error("record codec error: {0}")]
    Codec(String),
}

impl EngineError {
    /// Shorthand for a single-message validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        EngineError::Validation(ValidationError::new(message))
    }

    #[must_use]
    pub fn not_found(game_id: GameId) -> Self {
        EngineError::NotFound(NotFoundError { game_id })
    }

    /// Validation messages, if this is a validation error.
    #[must_use]
    pub fn validation_messages(&self) -> Option<&[String]> {
        match self {
            EngineError::Validation(e) => Some(e.messages()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
