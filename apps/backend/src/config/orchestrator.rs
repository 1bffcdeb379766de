//! Orchestrator configuration from environment variables.

use std::env;
use std::time::Duration;

use crate::errors::GameError;

const STRATEGY_TIMEOUT_MS: &str = "STRATEGY_TIMEOUT_MS";
const MAX_AUTO_REPLIES: &str = "MAX_AUTO_REPLIES";

const DEFAULT_STRATEGY_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_MAX_AUTO_REPLIES: u32 = 1;

/// Tunables for one orchestrated turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrchestratorConfig {
    /// Upper bound on one strategy invocation. A stalled strategy counts
    /// as "no move produced", a retryable condition.
    pub strategy_timeout: Duration,
    /// Cascaded automated replies resolved within one orchestrated
    /// request. Bounds request latency; a chain of two automated players
    /// needs repeated client-triggered calls.
    pub max_auto_replies: u32,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            strategy_timeout: DEFAULT_STRATEGY_TIMEOUT,
            max_auto_replies: DEFAULT_MAX_AUTO_REPLIES,
        }
    }
}

impl OrchestratorConfig {
    /// Read configuration from `STRATEGY_TIMEOUT_MS` and
    /// `MAX_AUTO_REPLIES`, defaulting where unset.
    pub fn from_env() -> Result<Self, GameError> {
        let strategy_timeout = match env::var(STRATEGY_TIMEOUT_MS) {
            Ok(raw) => Duration::from_millis(parse_var(STRATEGY_TIMEOUT_MS, &raw)?),
            Err(_) => DEFAULT_STRATEGY_TIMEOUT,
        };
        let max_auto_replies = match env::var(MAX_AUTO_REPLIES) {
            Ok(raw) => parse_var(MAX_AUTO_REPLIES, &raw)?,
            Err(_) => DEFAULT_MAX_AUTO_REPLIES,
        };
        Ok(Self {
            strategy_timeout,
            max_auto_replies,
        })
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T, GameError> {
    raw.parse()
        .map_err(|_| GameError::config(format!("{name} must be a non-negative integer, got '{raw}'")))
}
