//! # deckbattle
//!
//! Combat resolution core for a turn-based deck-building roguelike:
//! the turn state machine, card-play pipeline, pile lifecycle, and
//! status-effect model — and nothing else. Rendering, input, and run
//! persistence are external collaborators that observe typed events
//! and feed in requests.
//!
//! ## Design Principles
//!
//! 1. **Failures are data**: invalid requests come back as rejected
//!    outcomes with the state untouched; the state machine can never
//!    get stuck on a bad card or a missing target.
//!
//! 2. **Deterministic**: one seeded RNG drives every shuffle, so a
//!    battle replays bit-for-bit from its seed and action history.
//!
//! 3. **Stepwise enemy phase**: the enemy turn advances one action per
//!    call, with battle-end re-checked in between, so presentation
//!    layers can interleave timed animation without owning any rules.
//!
//! ## Modules
//!
//! - `core`: deterministic RNG, battle configuration, run-state handoff
//! - `cards`: immutable card definitions, effect lists, registry
//! - `status`: buff/debuff table with stacking and duration decay
//! - `combatants`: shared combatant capability; Player and Enemy variants
//! - `piles`: draw/hand/discard lifecycle with reshuffle-on-exhaustion
//! - `effects`: ordered card-effect resolution
//! - `battle`: the turn state machine, events, and save/resume
//! - `content`: stock starter cards and enemies

pub mod battle;
pub mod cards;
pub mod combatants;
pub mod content;
pub mod core;
pub mod effects;
pub mod piles;
pub mod status;

// Re-export commonly used types
pub use crate::core::{BattleConfig, BattleRng, BattleRngState, RunState};

pub use crate::cards::{
    CardDefinition, CardEffect, CardId, CardRegistry, CardType, EffectKind, EffectTarget,
    StatusSpec,
};

pub use crate::status::{StatusEffect, StatusTable, PERMANENT};

pub use crate::combatants::{
    scale_attack, Combatant, CombatantState, Enemy, EnemyBrain, Intent, Player, RandomBrain,
    ScriptedBrain, StatusTick,
};

pub use crate::piles::CardPiles;

pub use crate::effects::{EffectOutcome, EffectResolver, ResolverContext};

pub use crate::battle::{
    ActionRecord, Battle, BattleAction, BattleEvent, BattleReport, BattleResult, BattleSave,
    CombatantRef, EnemyStep, Phase, PlayOutcome, RejectReason, SaveError,
};
