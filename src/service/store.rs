//! Per-game serialized storage.
//!
//! Every game is an independent resource. Mutations of one game are
//! serialized by that game's write mutex and run against a clone of the
//! committed snapshot; the clone replaces the snapshot only if the whole
//! mutation succeeds. Readers take the committed `Arc<Game>` without
//! waiting for writers. A commit hook runs before the write mutex is
//! released, so it observes one game's commits in order.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use rustc_hash::FxHashMap;

use crate::core::{Game, GameId};
use crate::error::{EngineError, Result};

/// Atomic per-game load and update.
pub trait GameStore: Send + Sync {
    /// Allocate an unused game id.
    fn next_game_id(&self) -> GameId;

    /// Store a new game. Fails if the id is taken.
    fn insert(&self, game: Game) -> Result<Arc<Game>>;

    /// Latest committed snapshot.
    fn load(&self, game_id: GameId) -> Result<Arc<Game>>;

    /// Run `f` on a working copy under the game's write lock.
    ///
    /// On `Ok` the working copy is committed and returned with `f`'s
    /// value. On `Err` the committed snapshot is left as it was.
    fn update<T, F>(&self, game_id: GameId, f: F) -> Result<(Arc<Game>, T)>
    where
        F: FnOnce(&mut Game) -> Result<T>,
    {
        self.update_then(game_id, f, |_| {})
    }

    /// [`update`](Self::update), then `on_commit` with the new snapshot
    /// before the write lock is released.
    ///
    /// Commits of one game reach `on_commit` in commit order.
    fn update_then<T, F, C>(&self, game_id: GameId, f: F, on_commit: C) -> Result<(Arc<Game>, T)>
    where
        F: FnOnce(&mut Game) -> Result<T>,
        C: FnOnce(&Arc<Game>);
}

/// One stored game.
struct GameSlot {
    writer: Mutex<()>,
    committed: RwLock<Arc<Game>>,
}

impl GameSlot {
    fn new(game: Game) -> Self {
        Self {
            writer: Mutex::new(()),
            committed: RwLock::new(Arc::new(game)),
        }
    }

    fn snapshot(&self) -> Result<Arc<Game>> {
        let committed = self
            .committed
            .read()
            .map_err(|_| EngineError::LockPoisoned)?;
        Ok(Arc::clone(&committed))
    }
}

/// In-memory [`GameStore`] for tests and single-process servers.
pub struct InMemoryGameStore {
    slots: RwLock<FxHashMap<GameId, Arc<GameSlot>>>,
    next_id: AtomicU64,
}

impl InMemoryGameStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: RwLock::new(FxHashMap::default()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Number of stored games.
    pub fn len(&self) -> Result<usize> {
        let slots = self.slots.read().map_err(|_| EngineError::LockPoisoned)?;
        Ok(slots.len())
    }

    fn slot(&self, game_id: GameId) -> Result<Arc<GameSlot>> {
        let slots = self.slots.read().map_err(|_| EngineError::LockPoisoned)?;
        slots
            .get(&game_id)
            .cloned()
            .ok_or_else(|| EngineError::not_found(game_id))
    }
}

impl Default for InMemoryGameStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStore for InMemoryGameStore {
    fn next_game_id(&self) -> GameId {
        GameId(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    fn insert(&self, game: Game) -> Result<Arc<Game>> {
        let game_id = game.game_id();
        let mut slots = self.slots.write().map_err(|_| EngineError::LockPoisoned)?;
        if slots.contains_key(&game_id) {
            return Err(EngineError::GameAlreadyExists(game_id));
        }
        let slot = Arc::new(GameSlot::new(game));
        let snapshot = slot.snapshot()?;
        slots.insert(game_id, slot);
        // ids handed out later must not collide with externally built games
        self.next_id.fetch_max(game_id.0 + 1, Ordering::Relaxed);
        Ok(snapshot)
    }

    fn load(&self, game_id: GameId) -> Result<Arc<Game>> {
        self.slot(game_id)?.snapshot()
    }

    fn update_then<T, F, C>(&self, game_id: GameId, f: F, on_commit: C) -> Result<(Arc<Game>, T)>
    where
        F: FnOnce(&mut Game) -> Result<T>,
        C: FnOnce(&Arc<Game>),
    {
        let slot = self.slot(game_id)?;
        let _writer = slot.writer.lock().map_err(|_| EngineError::LockPoisoned)?;

        let current = slot.snapshot()?;
        let mut working = Game::clone(&current);
        let value = f(&mut working)?;

        let next = Arc::new(working);
        {
            let mut committed = slot
                .committed
                .write()
                .map_err(|_| EngineError::LockPoisoned)?;
            *committed = Arc::clone(&next);
        }
        on_commit(&next);
        Ok((next, value))
    }
}
