//! Battle events for external observers.
//!
//! The core never calls into rendering code. Everything the presentation
//! layer needs to animate — phase changes, card plays, damage numbers,
//! hand overflow — is emitted as a typed [`BattleEvent`] into a queue the
//! caller drains between discrete triggers. Observers only read; they
//! never mutate core state.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::combatants::{Intent, StatusTick};
use crate::effects::EffectOutcome;

use super::{BattleResult, Phase};

/// Which combatant an event refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatantRef {
    Player,
    /// Enemy by roster index.
    Enemy(usize),
}

/// A notification emitted by the battle core.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleEvent {
    /// The battle entered a new phase.
    PhaseChanged { phase: Phase, turn: u32 },

    /// A card was played and its effects resolved.
    CardPlayed {
        card: CardId,
        target: Option<usize>,
        outcomes: Vec<EffectOutcome>,
    },

    /// A land was played; `other_lands` are the remaining lands in hand,
    /// for cosmetic tap state.
    LandPlayed {
        card: CardId,
        new_max_energy: i64,
        other_lands: Vec<CardId>,
    },

    /// Cards moved from the draw pile to the hand.
    CardsDrawn { requested: usize, drawn: usize },

    /// The hand exceeded its limit; the selection collaborator must
    /// discard `excess` cards via `Battle::resolve_overflow_discard`.
    HandOverflow { excess: usize, hand: Vec<CardId> },

    /// A card was discarded (overflow selection or end-of-turn cleanup).
    CardDiscarded { card: CardId },

    /// An enemy executed its telegraphed intent.
    EnemyActed { index: usize, intent: Intent },

    /// Damage landed on a combatant (enemy intents hitting the player;
    /// card damage is reported inside `CardPlayed` outcomes).
    DamageDealt {
        target: CombatantRef,
        amount: i64,
        hp_loss: i64,
    },

    /// A turn-boundary status fired (poison tick, regeneration, ...).
    StatusTicked { target: CombatantRef, tick: StatusTick },

    /// A status ran out its duration.
    StatusExpired { target: CombatantRef, id: String },

    /// Terminal: the battle is over.
    BattleEnded { result: BattleResult },
}

/// Accumulates events until the caller drains them.
#[derive(Clone, Debug, Default)]
pub struct EventQueue {
    queue: Vec<BattleEvent>,
}

impl EventQueue {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event.
    pub fn emit(&mut self, event: BattleEvent) {
        self.queue.push(event);
    }

    /// Take all pending events, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<BattleEvent> {
        std::mem::take(&mut self.queue)
    }

    /// Check if any events are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// A player-visible action recorded in the battle history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleAction {
    PlayCard { card: CardId, target: Option<usize> },
    EndTurn,
    EnemyAction { index: usize, intent: Intent },
}

/// One history entry: what happened on which turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub turn: u32,
    pub action: BattleAction,
}
