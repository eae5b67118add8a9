//! Delivery of committed game snapshots to subscribers.
//!
//! The service publishes after every successful commit, before the game's
//! write lock is released, so updates of one game arrive in commit order.
//! Delivery is best-effort: a publish with no subscribers is not an error,
//! and a slow subscriber that lags behind loses the oldest snapshots.

use std::sync::Arc;

use tokio::sync::broadcast;

use crate::core::{Game, GameId};

/// A committed change to one game.
#[derive(Clone, Debug)]
pub struct GameUpdate {
    pub game_id: GameId,
    pub snapshot: Arc<Game>,
}

/// Sink for committed snapshots.
pub trait UpdatePublisher: Send + Sync {
    fn publish(&self, update: GameUpdate);
}

/// Discards every update.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopPublisher;

impl UpdatePublisher for NoopPublisher {
    fn publish(&self, _update: GameUpdate) {}
}

/// Fans updates out over a tokio broadcast channel.
///
/// Subscribers filter by `game_id` and redact with
/// [`Game::view_for`](crate::core::Game::view_for) before delivery.
pub struct BroadcastPublisher {
    sender: broadcast::Sender<GameUpdate>,
}

impl BroadcastPublisher {
    /// Creates a publisher with a default buffer of 100 updates.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a publisher buffering up to `capacity` updates per subscriber.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Receive every update published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<GameUpdate> {
        self.sender.subscribe()
    }
}

impl Default for BroadcastPublisher {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdatePublisher for BroadcastPublisher {
    fn publish(&self, update: GameUpdate) {
        let game_id = update.game_id;
        if self.sender.send(update).is_err() {
            tracing::trace!(game_id = %game_id, "no subscribers for game update");
        }
    }
}
