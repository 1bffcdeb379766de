//! Game flow orchestration service - the turn state machine.
//!
//! Combines a session with the strategy registry to resolve one
//! orchestrated turn: a human move plus an optional, bounded cascade of
//! automated replies, or one explicit automated step.

mod dispatch;
mod orchestration;

/// Turn orchestration service.
#[derive(Default)]
pub struct GameFlowService;

pub use orchestration::{AutoOutcome, AutoReply, TurnOutcome, TurnState};
