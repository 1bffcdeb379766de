use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::dispatch;
use super::GameFlowService;
use crate::ai::{StrategyError, StrategyRegistry};
use crate::config::OrchestratorConfig;
use crate::domain::{GameRecord, SeatAssignment, Session};
use crate::errors::GameError;

/// States of one orchestrated turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnState {
    /// Waiting for a human move submission.
    AwaitingHumanMove,
    /// An assigned strategy is being consulted.
    ResolvingAutomatedMove,
    /// The game has ended; no further moves are orchestrated.
    Terminal,
}

/// A cascaded automated move that was validated and applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoReply {
    pub strategy: String,
    pub uci: String,
    pub notation: String,
}

/// Outcome of the automated portion of a turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum AutoOutcome {
    /// No automated step applied to this turn (nothing assigned, game
    /// over, or cascading disabled). Informational, not a failure.
    Idle { reason: String },
    /// The assigned strategy's move was applied.
    Played(AutoReply),
    /// The strategy was consulted but produced nothing usable; any
    /// committed human move stands. Warning, not a failure.
    Skipped { strategy: String, reason: String },
}

/// Result of one orchestrated request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnOutcome {
    pub state: TurnState,
    pub message: String,
    pub automated: AutoOutcome,
}

impl GameFlowService {
    /// Resolve one orchestrated turn: apply the submitted human move, then
    /// cascade at most `max_auto_replies` automated replies.
    ///
    /// A rejected human move returns the error with no state change. A
    /// failing automated step never rolls the human move back; it is
    /// reported as a warning annotation on the successful outcome.
    pub async fn submit_move(
        &self,
        session: &mut Session,
        record: &GameRecord,
        registry: &StrategyRegistry,
        config: &OrchestratorConfig,
        notation: &str,
    ) -> Result<TurnOutcome, GameError> {
        let applied = session.apply_move(notation)?;
        info!(
            game_id = %record.id,
            uci = %applied.uci,
            mover = %applied.mover,
            "move accepted"
        );
        let mut message = format!("Move {} accepted.", applied.notation);

        let automated = if config.max_auto_replies == 0 {
            AutoOutcome::Idle {
                reason: "automated replies are disabled".to_string(),
            }
        } else if session.flags().is_terminal() {
            AutoOutcome::Idle {
                reason: "game is over".to_string(),
            }
        } else {
            let mut outcome = AutoOutcome::Idle {
                reason: "no automated step attempted".to_string(),
            };
            for _ in 0..config.max_auto_replies {
                let step = self
                    .resolve_automated_step(session, record, registry, config)
                    .await;
                let played = matches!(step, AutoOutcome::Played(_));
                outcome = step;
                if !played || session.flags().is_terminal() {
                    break;
                }
            }
            outcome
        };

        match &automated {
            AutoOutcome::Played(reply) => {
                message.push_str(&format!(
                    " Strategy '{}' replied {}.",
                    reply.strategy, reply.notation
                ));
            }
            AutoOutcome::Skipped { strategy, reason } => {
                message.push_str(&format!(" No automated reply from '{strategy}': {reason}."));
            }
            AutoOutcome::Idle { .. } => {}
        }

        let state = if session.flags().is_terminal() {
            message.push_str(" Game over.");
            TurnState::Terminal
        } else {
            TurnState::AwaitingHumanMove
        };

        Ok(TurnOutcome {
            state,
            message,
            automated,
        })
    }

    /// Explicit single-step automated move: performs the resolving logic
    /// exactly once. Invoking this when it is not an automated player's
    /// turn is not an error; the session is left unchanged and the
    /// outcome carries an informational message.
    pub async fn advance_automated(
        &self,
        session: &mut Session,
        record: &GameRecord,
        registry: &StrategyRegistry,
        config: &OrchestratorConfig,
    ) -> TurnOutcome {
        let automated = self
            .resolve_automated_step(session, record, registry, config)
            .await;

        let message = match &automated {
            AutoOutcome::Played(reply) => {
                format!("Strategy '{}' played {}.", reply.strategy, reply.notation)
            }
            AutoOutcome::Idle { reason } => format!("No automated move: {reason}."),
            AutoOutcome::Skipped { strategy, reason } => {
                format!("Strategy '{strategy}' produced no usable move: {reason}.")
            }
        };

        let state = if session.flags().is_terminal() {
            TurnState::Terminal
        } else {
            TurnState::AwaitingHumanMove
        };

        TurnOutcome {
            state,
            message,
            automated,
        }
    }

    /// One pass of the `ResolvingAutomatedMove` state. Mutates the session
    /// only when a validated move is applied.
    async fn resolve_automated_step(
        &self,
        session: &mut Session,
        record: &GameRecord,
        registry: &StrategyRegistry,
        config: &OrchestratorConfig,
    ) -> AutoOutcome {
        if session.flags().is_terminal() {
            return AutoOutcome::Idle {
                reason: "game is over".to_string(),
            };
        }

        let side = session.turn();
        let name = match record.strategy_for(side) {
            SeatAssignment::Assigned(name) => name.clone(),
            SeatAssignment::Unassigned => {
                return AutoOutcome::Idle {
                    reason: format!("no strategy assigned for {side}"),
                };
            }
        };

        debug!(
            game_id = %record.id,
            side = %side,
            strategy = %name,
            state = ?TurnState::ResolvingAutomatedMove,
            "resolving automated move"
        );

        // Assignments are validated only at creation; a name missing from
        // the registry now degrades to a skipped step.
        let Some(strategy) = registry.get(&name) else {
            warn!(
                game_id = %record.id,
                strategy = %name,
                "assigned strategy is not registered; skipping automated step"
            );
            return AutoOutcome::Skipped {
                strategy: name,
                reason: "strategy is not registered".to_string(),
            };
        };

        let position = session.position().clone();
        match dispatch::invoke_with_timeout(strategy, position, record.id, config.strategy_timeout)
            .await
        {
            Err(err) => {
                warn!(
                    game_id = %record.id,
                    strategy = %name,
                    error = %err,
                    "strategy failed; committed moves stand"
                );
                AutoOutcome::Skipped {
                    strategy: name,
                    reason: err.to_string(),
                }
            }
            Ok(None) => {
                info!(game_id = %record.id, strategy = %name, "strategy produced no move");
                AutoOutcome::Skipped {
                    strategy: name,
                    reason: "no move produced".to_string(),
                }
            }
            Ok(Some(uci)) => match session.apply_move(&uci) {
                Ok(applied) => {
                    info!(
                        game_id = %record.id,
                        strategy = %name,
                        uci = %applied.uci,
                        "automated move applied"
                    );
                    AutoOutcome::Played(AutoReply {
                        strategy: name,
                        uci: applied.uci,
                        notation: applied.notation,
                    })
                }
                Err(err) if err.is_rejection() => {
                    let err = StrategyError::IllegalSuggestion(uci);
                    warn!(
                        game_id = %record.id,
                        strategy = %name,
                        error = %err,
                        "strategy suggestion rejected"
                    );
                    AutoOutcome::Skipped {
                        strategy: name,
                        reason: err.to_string(),
                    }
                }
                Err(err) => {
                    warn!(
                        game_id = %record.id,
                        strategy = %name,
                        error = %err,
                        "automated step aborted"
                    );
                    AutoOutcome::Skipped {
                        strategy: name,
                        reason: err.to_string(),
                    }
                }
            },
        }
    }
}
