//! Card definitions - immutable card value data.
//!
//! The authoritative card collection lives outside the core (the run
//! layer's card database); the core treats every `CardDefinition` as an
//! immutable value. Definitions carry an ordered effect list that the
//! resolver executes strictly in sequence.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Card identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Card categories.
///
/// `Land` is special-cased by the turn machine: once per turn, raises max
/// energy instead of being cast for its effect list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    Attack,
    Skill,
    Power,
    Land,
}

/// Who an effect applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectTarget {
    /// The caster (the player, for card plays).
    Caster,
    /// The currently selected enemy.
    EnemySingle,
    /// Every living enemy, in roster order.
    AllEnemies,
}

/// Named status payload for buff/debuff effects.
///
/// The applied amount comes from the owning effect's `value`; this
/// payload carries the id, display name, and duration (`-1` = permanent).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSpec {
    pub id: String,
    pub name: String,
    pub duration: i64,
}

impl StatusSpec {
    /// Create a status spec.
    pub fn new(id: impl Into<String>, name: impl Into<String>, duration: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            duration,
        }
    }
}

/// What an effect does.
///
/// `Other` keeps the data format open: card data authored against a newer
/// effect vocabulary still deserializes, and the resolver reports it as a
/// failed outcome instead of aborting the card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectKind {
    /// Deal `value` (+ caster strength) damage to the target.
    Damage,
    /// Gain `value` (+ caster dexterity) block.
    Block,
    /// Draw `value` cards (executed by the turn machine, not the resolver).
    Draw,
    /// Gain `value` energy.
    Energy,
    /// Heal `value` HP.
    Heal,
    /// Apply a status to the caster.
    Buff(StatusSpec),
    /// Apply a status to the targeted enemy table.
    Debuff(StatusSpec),
    /// Unrecognized effect kind, preserved verbatim.
    Other(String),
}

/// A single step in a card's effect list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardEffect {
    pub kind: EffectKind,
    pub value: i64,
    pub target: EffectTarget,
}

impl CardEffect {
    /// Damage effect targeting the selected enemy.
    #[must_use]
    pub fn damage(value: i64) -> Self {
        Self {
            kind: EffectKind::Damage,
            value,
            target: EffectTarget::EnemySingle,
        }
    }

    /// Block effect for the caster.
    #[must_use]
    pub fn block(value: i64) -> Self {
        Self {
            kind: EffectKind::Block,
            value,
            target: EffectTarget::Caster,
        }
    }

    /// Draw effect for the caster.
    #[must_use]
    pub fn draw(count: i64) -> Self {
        Self {
            kind: EffectKind::Draw,
            value: count,
            target: EffectTarget::Caster,
        }
    }

    /// Energy gain for the caster.
    #[must_use]
    pub fn energy(value: i64) -> Self {
        Self {
            kind: EffectKind::Energy,
            value,
            target: EffectTarget::Caster,
        }
    }

    /// Heal for the caster.
    #[must_use]
    pub fn heal(value: i64) -> Self {
        Self {
            kind: EffectKind::Heal,
            value,
            target: EffectTarget::Caster,
        }
    }

    /// Buff applied to the caster.
    pub fn buff(
        id: impl Into<String>,
        name: impl Into<String>,
        amount: i64,
        duration: i64,
    ) -> Self {
        Self {
            kind: EffectKind::Buff(StatusSpec::new(id, name, duration)),
            value: amount,
            target: EffectTarget::Caster,
        }
    }

    /// Debuff applied to the selected enemy.
    pub fn debuff(
        id: impl Into<String>,
        name: impl Into<String>,
        amount: i64,
        duration: i64,
    ) -> Self {
        Self {
            kind: EffectKind::Debuff(StatusSpec::new(id, name, duration)),
            value: amount,
            target: EffectTarget::EnemySingle,
        }
    }

    /// Override the effect target (builder pattern).
    #[must_use]
    pub fn with_target(mut self, target: EffectTarget) -> Self {
        self.target = target;
        self
    }
}

/// An immutable card definition.
///
/// ## Effect Ordering
///
/// `effects` is an ordered sequence and order is semantically significant:
/// a strength buff placed before a damage effect in the same card boosts
/// that card's own damage, because the resolver reads caster stats live
/// per effect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    pub id: CardId,
    pub name: String,
    pub cost: i64,
    pub card_type: CardType,
    /// SmallVec optimizes for the common 1-3 effect card without heap allocation.
    pub effects: SmallVec<[CardEffect; 4]>,
}

impl CardDefinition {
    /// Create a card definition with no effects.
    pub fn new(id: CardId, name: impl Into<String>, cost: i64, card_type: CardType) -> Self {
        Self {
            id,
            name: name.into(),
            cost,
            card_type,
            effects: SmallVec::new(),
        }
    }

    /// Append an effect (builder pattern).
    #[must_use]
    pub fn with_effect(mut self, effect: CardEffect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Check if this is a land card.
    #[must_use]
    pub fn is_land(&self) -> bool {
        self.card_type == CardType::Land
    }
}
