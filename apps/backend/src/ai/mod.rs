//! Automated strategy module - handles automated move computation.
//!
//! This module provides:
//! - The [`Strategy`] capability trait implemented by automated players
//! - [`StrategyRegistry`]: the process-wide name lookup, built once at
//!   startup and immutable afterwards
//! - Built-in strategies: [`RandomStrategy`] and [`GreedyStrategy`]

mod greedy;
mod random;
mod registry;
mod trait_def;

pub use greedy::GreedyStrategy;
pub use random::RandomStrategy;
pub use registry::{StrategyInfo, StrategyRegistry, StrategyRegistryBuilder};
pub use trait_def::{Strategy, StrategyError};
