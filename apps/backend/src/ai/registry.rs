//! How to register your strategy
//!
//! 1) Implement `Strategy` for your type in its module.
//! 2) Add it to the built-in table in [`StrategyRegistry::discover`], or
//!    register it on a [`StrategyRegistryBuilder`] before `build()`.
//! 3) Names must be stable; duplicate names are allowed and the last
//!    registration wins (logged as a warning, never an error).
//! 4) After `build()` the registry is immutable for the process lifetime.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::greedy::GreedyStrategy;
use super::random::RandomStrategy;
use super::trait_def::Strategy;

/// Name and description of a registered strategy, for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyInfo {
    pub name: String,
    pub description: String,
}

/// Process-wide strategy lookup. Read-mostly: built once at startup,
/// immutable afterwards, safe to share without locking.
pub struct StrategyRegistry {
    by_name: HashMap<String, Arc<dyn Strategy>>,
    order: Vec<String>,
}

impl StrategyRegistry {
    /// Build the registry from the built-in strategy table.
    pub fn discover() -> Self {
        Self::builder()
            .register(RandomStrategy::new(None))
            .register(GreedyStrategy::new(None))
            .build()
    }

    pub fn builder() -> StrategyRegistryBuilder {
        StrategyRegistryBuilder {
            entries: Vec::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Strategy>> {
        self.by_name.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Registered strategies in registration order (a re-registered name
    /// takes the position of its winning registration).
    pub fn list(&self) -> Vec<StrategyInfo> {
        self.order
            .iter()
            .filter_map(|name| self.by_name.get(name))
            .map(|strategy| StrategyInfo {
                name: strategy.name().to_string(),
                description: strategy.description().to_string(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// Accumulates registrations until the registry is frozen with `build()`.
pub struct StrategyRegistryBuilder {
    entries: Vec<Arc<dyn Strategy>>,
}

impl StrategyRegistryBuilder {
    pub fn register(mut self, strategy: impl Strategy + 'static) -> Self {
        self.entries.push(Arc::new(strategy));
        self
    }

    pub fn register_arc(mut self, strategy: Arc<dyn Strategy>) -> Self {
        self.entries.push(strategy);
        self
    }

    pub fn build(self) -> StrategyRegistry {
        let mut by_name: HashMap<String, Arc<dyn Strategy>> = HashMap::new();
        let mut order: Vec<String> = Vec::new();

        for strategy in self.entries {
            let name = strategy.name().to_string();
            if by_name.insert(name.clone(), strategy).is_some() {
                warn!(name = %name, "duplicate strategy name; last registration wins");
                order.retain(|existing| *existing != name);
            }
            order.push(name);
        }

        StrategyRegistry { by_name, order }
    }
}

#[cfg(test)]
mod registry_smoke {
    use super::*;
    use crate::rules::BoardPosition;
    use uuid::Uuid;

    struct Named(&'static str, &'static str);

    impl Strategy for Named {
        fn name(&self) -> &str {
            self.0
        }

        fn description(&self) -> &str {
            self.1
        }

        fn choose_move(
            &self,
            _position: &BoardPosition,
            _game_id: Option<Uuid>,
        ) -> Result<Option<String>, crate::ai::StrategyError> {
            Ok(None)
        }
    }

    #[test]
    fn discover_includes_builtin_strategies() {
        let registry = StrategyRegistry::discover();
        assert!(registry.contains(RandomStrategy::NAME));
        assert!(registry.contains(GreedyStrategy::NAME));
        assert!(!registry.is_empty());
    }

    #[test]
    fn lookup_behaves() {
        let registry = StrategyRegistry::discover();
        assert!(registry.get(RandomStrategy::NAME).is_some());
        assert!(registry.get("NotARealStrategy").is_none());
    }

    #[test]
    fn duplicate_names_last_registration_wins() {
        let registry = StrategyRegistry::builder()
            .register(Named("twin", "first"))
            .register(Named("solo", "only"))
            .register(Named("twin", "second"))
            .build();

        assert_eq!(registry.len(), 2);
        let twin = registry.get("twin").unwrap();
        assert_eq!(twin.description(), "second");

        // The winner took the re-registration's position in the listing.
        let names: Vec<String> = registry.list().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["solo".to_string(), "twin".to_string()]);
    }

    #[test]
    fn list_reports_names_and_descriptions() {
        let registry = StrategyRegistry::discover();
        let listed = registry.list();
        assert!(listed
            .iter()
            .any(|s| s.name == RandomStrategy::NAME && !s.description.is_empty()));
    }
}
