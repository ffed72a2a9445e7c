//! Card registry - lookup from card IDs to definitions.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::definition::{CardDefinition, CardId};

/// Registry of card definitions for an encounter.
///
/// Populated by the run layer before battle start; the core only reads it.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CardRegistry {
    cards: FxHashMap<CardId, CardDefinition>,
}

impl CardRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a card definition.
    ///
    /// Re-registering an ID replaces the previous definition.
    pub fn register(&mut self, definition: CardDefinition) {
        self.cards.insert(definition.id, definition);
    }

    /// Get a card definition by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardDefinition> {
        self.cards.get(&id)
    }

    /// Check if a card is registered.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    /// Number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all registered definitions.
    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.cards.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::definition::{CardEffect, CardType};

    #[test]
    fn test_register_and_get() {
        let mut registry = CardRegistry::new();
        assert!(registry.is_empty());

        let card = CardDefinition::new(CardId::new(1), "Strike", 1, CardType::Attack)
            .with_effect(CardEffect::damage(6));
        registry.register(card);

        assert_eq!(registry.len(), 1);
        assert!(registry.contains(CardId::new(1)));
        assert_eq!(registry.get(CardId::new(1)).unwrap().name, "Strike");
        assert!(registry.get(CardId::new(99)).is_none());
    }

    #[test]
    fn test_reregister_replaces() {
        let mut registry = CardRegistry::new();

        registry.register(CardDefinition::new(
            CardId::new(1),
            "Strike",
            1,
            CardType::Attack,
        ));
        registry.register(CardDefinition::new(
            CardId::new(1),
            "Strike+",
            1,
            CardType::Attack,
        ));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(CardId::new(1)).unwrap().name, "Strike+");
    }
}
