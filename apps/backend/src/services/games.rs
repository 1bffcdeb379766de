//! Transport-facing game operations.
//!
//! Every mutating operation serializes on the per-game lock for the whole
//! load → reconstruct → orchestrate → save span. Snapshot reads take no
//! lock: the store only ever holds fully committed records.

use tracing::info;
use uuid::Uuid;

use crate::ai::StrategyInfo;
use crate::domain::{GameRecord, SeatAssignment, Session};
use crate::errors::GameError;
use crate::protocol::{
    CreateGameRequest, MoveRequest, MoveResponse, NewGameResponse, SnapshotResponse,
};
use crate::repos;
use crate::services::game_flow::{AutoOutcome, GameFlowService};
use crate::state::AppState;

pub struct GameService {
    state: AppState,
    flow: GameFlowService,
}

impl GameService {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            flow: GameFlowService,
        }
    }

    /// Create a game at the standard start, optionally assigning a
    /// registered strategy to either side. Unknown strategy names are
    /// rejected here and only here.
    pub async fn create_game(
        &self,
        request: CreateGameRequest,
    ) -> Result<NewGameResponse, GameError> {
        for name in [&request.white_strategy, &request.black_strategy]
            .into_iter()
            .flatten()
        {
            if !self.state.registry.contains(name) {
                return Err(GameError::strategy_not_found(name));
            }
        }

        let record = GameRecord::new(
            SeatAssignment::from_option(request.white_strategy),
            SeatAssignment::from_option(request.black_strategy),
        );
        let game_id = record.id;
        let session = Session::new();
        self.state.store.save(record).await?;

        info!(%game_id, "game created");
        Ok(NewGameResponse {
            game_id,
            snapshot: session.snapshot(),
        })
    }

    /// Submit a human move; the response may include a cascaded automated
    /// reply or a warning annotation explaining its absence.
    pub async fn submit_move(
        &self,
        game_id: Uuid,
        request: MoveRequest,
    ) -> Result<MoveResponse, GameError> {
        let _guard = self.state.locks.acquire(game_id).await;

        let mut record = repos::require_game(self.state.store.as_ref(), game_id).await?;
        let mut session = Session::reconstruct(&record.fen, &record.pgn)?;

        let outcome = self
            .flow
            .submit_move(
                &mut session,
                &record,
                self.state.registry.as_ref(),
                &self.state.config,
                &request.uci_move,
            )
            .await?;

        session.write_back(&mut record);
        self.state.store.save(record).await?;

        Ok(MoveResponse {
            snapshot: session.snapshot(),
            message: outcome.message,
            state: outcome.state,
            automated: outcome.automated,
        })
    }

    /// Explicit single automated step. Not an automated player's turn is a
    /// success with an informational message, never an error.
    pub async fn advance_automated(&self, game_id: Uuid) -> Result<MoveResponse, GameError> {
        let _guard = self.state.locks.acquire(game_id).await;

        let mut record = repos::require_game(self.state.store.as_ref(), game_id).await?;
        let mut session = Session::reconstruct(&record.fen, &record.pgn)?;

        let outcome = self
            .flow
            .advance_automated(
                &mut session,
                &record,
                self.state.registry.as_ref(),
                &self.state.config,
            )
            .await;

        // Persist only when a move was actually played; the informational
        // no-op leaves the record untouched.
        if matches!(outcome.automated, AutoOutcome::Played(_)) {
            session.write_back(&mut record);
            self.state.store.save(record).await?;
        }

        Ok(MoveResponse {
            snapshot: session.snapshot(),
            message: outcome.message,
            state: outcome.state,
            automated: outcome.automated,
        })
    }

    /// Current snapshot by id.
    pub async fn get_snapshot(&self, game_id: Uuid) -> Result<SnapshotResponse, GameError> {
        let record = repos::require_game(self.state.store.as_ref(), game_id).await?;
        let session = Session::reconstruct(&record.fen, &record.pgn)?;
        Ok(SnapshotResponse {
            game_id,
            snapshot: session.snapshot(),
        })
    }

    /// Available strategies, in registration order.
    pub fn list_strategies(&self) -> Vec<StrategyInfo> {
        self.state.registry.list()
    }
}
