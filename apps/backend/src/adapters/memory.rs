//! In-memory implementation of the persistence gateway.
//!
//! The reference store for tests and in-process embedding. Each map entry
//! is replaced wholesale on save, which gives readers the required
//! snapshot isolation: a load observes either the pre-move or the
//! post-move committed record, never a mix.

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use crate::domain::GameRecord;
use crate::errors::GameError;
use crate::repos::GameStore;

#[derive(Default)]
pub struct MemoryGameStore {
    games: DashMap<Uuid, GameRecord>,
}

impl MemoryGameStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

#[async_trait]
impl GameStore for MemoryGameStore {
    async fn load(&self, id: Uuid) -> Result<Option<GameRecord>, GameError> {
        Ok(self.games.get(&id).map(|entry| entry.clone()))
    }

    async fn save(&self, record: GameRecord) -> Result<(), GameError> {
        self.games.insert(record.id, record);
        Ok(())
    }
}
