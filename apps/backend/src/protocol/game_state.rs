//! Wire shapes for the transport-facing operations. The transport itself
//! lives outside this crate; these types define the contract it maps onto.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::GameSnapshot;
use crate::services::game_flow::{AutoOutcome, TurnState};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateGameRequest {
    #[serde(default)]
    pub white_strategy: Option<String>,
    #[serde(default)]
    pub black_strategy: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewGameResponse {
    pub game_id: Uuid,
    pub snapshot: GameSnapshot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveRequest {
    pub uci_move: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveResponse {
    pub snapshot: GameSnapshot,
    pub message: String,
    pub state: TurnState,
    pub automated: AutoOutcome,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotResponse {
    pub game_id: Uuid,
    pub snapshot: GameSnapshot,
}
