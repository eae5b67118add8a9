//! Game service: the operations clients call.
//!
//! Each operation takes the caller's identity, loads the game, validates,
//! applies the change to a working copy under the game's write lock,
//! commits it and publishes the new snapshot. Reads return a view redacted
//! for the caller.
//!
//! ```
//! use tile_rummy::core::{ActionRequest, GameOptions, UserId};
//! use tile_rummy::service::GameService;
//!
//! let service = GameService::in_memory();
//! let ann = UserId::new(1);
//! let bo = UserId::new(2);
//!
//! let view = service
//!     .create_game(ann, vec![(ann, "Ann".into()), (bo, "Bo".into())], GameOptions::default(), 7)
//!     .unwrap();
//! let view = service
//!     .play_request(ann, view.game_id, ActionRequest::pick_up_tile_or_pass())
//!     .unwrap();
//! assert_eq!(view.action_to_user_id, bo);
//! ```

pub mod publisher;
pub mod record;
pub mod store;

pub use publisher::{BroadcastPublisher, GameUpdate, NoopPublisher, UpdatePublisher};
pub use record::GameRecord;
pub use store::{GameStore, InMemoryGameStore};

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::core::{
    Action, ActionRequest, Game, GameBuilder, GameId, GameOptions, GameView, UpdateSets, UserId,
};
use crate::error::{EngineError, Result};
use crate::rules::{RulesEngine, RummyEngine};
use crate::tiles::Tile;

/// Entry point for all match operations.
pub struct GameService<S = InMemoryGameStore, P = NoopPublisher> {
    store: S,
    publisher: P,
    engine: RummyEngine,
}

impl GameService {
    /// Service over a fresh in-memory store that publishes nowhere.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(InMemoryGameStore::new(), NoopPublisher)
    }
}

impl<S: GameStore, P: UpdatePublisher> GameService<S, P> {
    /// Service over `store` that publishes commits to `publisher`.
    #[must_use]
    pub fn new(store: S, publisher: P) -> Self {
        Self {
            store,
            publisher,
            engine: RummyEngine::new(),
        }
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The sink receiving committed snapshots.
    #[must_use]
    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    /// Seat players, deal the first round and store the game.
    #[instrument(skip_all, fields(user_id = %host_user_id, seed = seed))]
    pub fn create_game(
        &self,
        host_user_id: UserId,
        players: Vec<(UserId, String)>,
        options: GameOptions,
        seed: u64,
    ) -> Result<GameView> {
        let game_id = self.store.next_game_id();
        let builder = players.into_iter().fold(
            GameBuilder::new(game_id, host_user_id).options(options).seed(seed),
            |builder, (user, name)| builder.player(user, name),
        );
        let game = builder.build().map_err(|e| {
            warn!(error = %e, "rejected game creation");
            EngineError::from(e)
        })?;
        self.insert_game(game, host_user_id)
    }

    /// Store a game built elsewhere, e.g. restored from a [`GameRecord`].
    #[instrument(skip_all, fields(game_id = %game.game_id()))]
    pub fn insert_game(&self, game: Game, viewer: UserId) -> Result<GameView> {
        let snapshot = self.store.insert(game)?;
        info!(players = snapshot.player_count(), "game created");
        self.publish(&snapshot);
        Ok(snapshot.view_for(viewer))
    }

    /// The game as seen by `user`.
    #[instrument(skip_all, fields(game_id = %game_id, user_id = %user))]
    pub fn get(&self, user: UserId, game_id: GameId) -> Result<GameView> {
        let snapshot = self.store.load(game_id)?;
        debug!(state = ?snapshot.state(), "loaded game");
        Ok(snapshot.view_for(user))
    }

    /// Compact record of the committed game, for persistence.
    pub fn record(&self, game_id: GameId) -> Result<GameRecord> {
        let snapshot = self.store.load(game_id)?;
        Ok(GameRecord::from(snapshot.as_ref()))
    }

    /// Stage a candidate table arrangement for the player holding the turn.
    #[instrument(skip_all, fields(game_id = %game_id, user_id = %user))]
    pub fn save_latest_update_sets(
        &self,
        user: UserId,
        game_id: GameId,
        proposal: UpdateSets,
    ) -> Result<GameView> {
        self.mutate(user, game_id, "saved update sets", |engine, game| {
            Ok(engine.save_latest_update_sets(game, user, proposal)?)
        })
    }

    /// End the caller's turn with `action`.
    #[instrument(skip_all, fields(game_id = %game_id, user_id = %user, ?action))]
    pub fn play(&self, user: UserId, game_id: GameId, action: Action) -> Result<GameView> {
        self.mutate(user, game_id, "applied action", |engine, game| {
            engine.apply_action(game, user, action)?;
            Ok(())
        })
    }

    /// [`play`](Self::play) from the wire payload.
    pub fn play_request(
        &self,
        user: UserId,
        game_id: GameId,
        request: ActionRequest,
    ) -> Result<GameView> {
        let action = Action::try_from(request)?;
        self.play(user, game_id, action)
    }

    /// Reorder the caller's hand.
    #[instrument(skip_all, fields(game_id = %game_id, user_id = %user))]
    pub fn rearrange_tiles(
        &self,
        user: UserId,
        game_id: GameId,
        tiles: Vec<Tile>,
    ) -> Result<GameView> {
        self.mutate(user, game_id, "rearranged tiles", |engine, game| {
            Ok(engine.rearrange_tiles(game, user, tiles)?)
        })
    }

    /// Deal the next round after a scored round.
    #[instrument(skip_all, fields(game_id = %game_id, user_id = %user))]
    pub fn start_next_round(&self, user: UserId, game_id: GameId) -> Result<GameView> {
        self.mutate(user, game_id, "started next round", |engine, game| {
            Ok(engine.start_next_round(game, user)?)
        })
    }

    fn mutate<F>(&self, user: UserId, game_id: GameId, what: &'static str, f: F) -> Result<GameView>
    where
        F: FnOnce(&RummyEngine, &mut Game) -> Result<()>,
    {
        let engine = &self.engine;
        // publishing under the write lock keeps updates in commit order
        let committed = self.store.update_then(
            game_id,
            |game| f(engine, game),
            |snapshot| self.publish(snapshot),
        );
        match committed {
            Ok((snapshot, ())) => {
                info!(
                    state = ?snapshot.state(),
                    action_to = %snapshot.action_to_user_id(),
                    "{}", what
                );
                if let Some(result) = engine.is_terminal(&snapshot) {
                    info!(?result, "game complete");
                }
                Ok(snapshot.view_for(user))
            }
            Err(e) => {
                warn!(error = %e, "rejected request");
                Err(e)
            }
        }
    }

    fn publish(&self, snapshot: &Arc<Game>) {
        self.publisher.publish(GameUpdate {
            game_id: snapshot.game_id(),
            snapshot: Arc::clone(snapshot),
        });
    }
}
