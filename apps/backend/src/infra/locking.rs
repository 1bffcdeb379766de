//! Per-game mutual exclusion.
//!
//! Each game id is an independent unit of mutual exclusion: at most one
//! in-flight mutating operation per id. Move application is check-then-act
//! against shared position state and must not interleave, so every
//! mutating service operation acquires the game's lock for the duration of
//! load → orchestrate → save. Read-only snapshot queries take no lock and
//! observe the last committed record.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

/// Keyed async mutexes, one per game id.
///
/// Entries are created on first use and kept for the process lifetime;
/// a game id is 16 bytes and the set of live games is bounded by the
/// store.
#[derive(Default)]
pub struct GameLocks {
    locks: DashMap<Uuid, Arc<Mutex<()>>>,
}

impl GameLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock for `id`, waiting behind any in-flight mutation.
    pub async fn acquire(&self, id: Uuid) -> OwnedMutexGuard<()> {
        let lock = self
            .locks
            .entry(id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        lock.lock_owned().await
    }
}
