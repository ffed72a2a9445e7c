//! Stock encounter content: a starter card set and basic enemies.
//!
//! Enough material to run a real battle out of the box; run layers with
//! their own card databases build registries and rosters directly.

use crate::cards::{CardDefinition, CardEffect, CardId, CardRegistry, CardType, EffectTarget};
use crate::combatants::{Enemy, Intent, ScriptedBrain};
use crate::status::{id, StatusEffect, PERMANENT};

/// Starter card ids.
pub mod card {
    use crate::cards::CardId;

    pub const STRIKE: CardId = CardId::new(1);
    pub const DEFEND: CardId = CardId::new(2);
    pub const BASH: CardId = CardId::new(3);
    pub const CLEAVE: CardId = CardId::new(4);
    pub const QUICK_THINKING: CardId = CardId::new(5);
    pub const FLEX: CardId = CardId::new(6);
    pub const LAND: CardId = CardId::new(7);
    pub const MEND: CardId = CardId::new(8);
}

/// Build a registry with the starter card set.
#[must_use]
pub fn starter_registry() -> CardRegistry {
    let mut registry = CardRegistry::new();

    registry.register(
        CardDefinition::new(card::STRIKE, "Strike", 1, CardType::Attack)
            .with_effect(CardEffect::damage(6)),
    );
    registry.register(
        CardDefinition::new(card::DEFEND, "Defend", 1, CardType::Skill)
            .with_effect(CardEffect::block(5)),
    );
    registry.register(
        CardDefinition::new(card::BASH, "Bash", 2, CardType::Attack)
            .with_effect(CardEffect::damage(8))
            .with_effect(CardEffect::debuff(id::VULNERABLE, "Vulnerable", 1, 2)),
    );
    registry.register(
        CardDefinition::new(card::CLEAVE, "Cleave", 1, CardType::Attack)
            .with_effect(CardEffect::damage(4).with_target(EffectTarget::AllEnemies)),
    );
    registry.register(
        CardDefinition::new(card::QUICK_THINKING, "Quick Thinking", 0, CardType::Skill)
            .with_effect(CardEffect::draw(2)),
    );
    registry.register(
        CardDefinition::new(card::FLEX, "Flex", 1, CardType::Power)
            .with_effect(CardEffect::buff(id::STRENGTH, "Strength", 2, PERMANENT)),
    );
    registry.register(CardDefinition::new(card::LAND, "Ley Stone", 0, CardType::Land));
    registry.register(
        CardDefinition::new(card::MEND, "Mend", 1, CardType::Skill)
            .with_effect(CardEffect::heal(6)),
    );

    registry
}

/// The classic ten-card starter deck: five strikes, four defends, a land.
#[must_use]
pub fn starter_deck() -> Vec<CardId> {
    let mut deck = Vec::with_capacity(10);
    deck.extend(std::iter::repeat(card::STRIKE).take(5));
    deck.extend(std::iter::repeat(card::DEFEND).take(4));
    deck.push(card::LAND);
    deck
}

/// A basic melee enemy alternating attack and defend.
#[must_use]
pub fn bruiser(max_hp: i64) -> Enemy {
    Enemy::new(
        "Bruiser",
        max_hp,
        Box::new(ScriptedBrain::new(vec![
            Intent::Attack { damage: 8 },
            Intent::Defend { block: 6 },
        ])),
    )
}

/// A support enemy that buffs itself, then pokes.
#[must_use]
pub fn acolyte(max_hp: i64) -> Enemy {
    Enemy::new(
        "Acolyte",
        max_hp,
        Box::new(ScriptedBrain::new(vec![
            Intent::BuffSelf(StatusEffect::permanent(id::STRENGTH, "Ritual", 2)),
            Intent::Attack { damage: 4 },
        ])),
    )
}
