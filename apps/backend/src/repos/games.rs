//! Persistence gateway for game records.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::GameRecord;
use crate::errors::GameError;

/// Load/save contract for persisted games.
///
/// `save` replaces all mutable fields of the record atomically as one
/// unit; implementations must never expose a record with only some fields
/// of an accepted move applied.
#[async_trait]
pub trait GameStore: Send + Sync {
    async fn load(&self, id: Uuid) -> Result<Option<GameRecord>, GameError>;

    async fn save(&self, record: GameRecord) -> Result<(), GameError>;
}

/// Load a game or return a `NotFound` error.
///
/// Convenience helper that eliminates the repetitive `ok_or_else` when a
/// game must exist.
pub async fn require_game(store: &dyn GameStore, id: Uuid) -> Result<GameRecord, GameError> {
    store
        .load(id)
        .await?
        .ok_or_else(|| GameError::game_not_found(id))
}
