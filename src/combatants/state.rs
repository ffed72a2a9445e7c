//! Shared combatant capability: HP, block, stats, statuses.
//!
//! `CombatantState` is the record both the player and every enemy embed.
//! It owns the status table and keeps the strength/dexterity accumulators
//! consistent with the `strength`/`dexterity` status records across add,
//! remove, and expiry.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::status::{id, StatusEffect, StatusTable};

/// A turn-boundary status side effect that fired (for observer events).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusTick {
    /// Id of the status that fired.
    pub id: String,
    /// Magnitude of the side effect (damage dealt, HP healed, energy moved).
    pub amount: i64,
}

/// Mutable combat-relevant state shared by player and enemies.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatantState {
    pub max_hp: i64,
    pub hp: i64,
    /// Damage-absorption pool, spent before HP. Never negative.
    pub block: i64,
    /// Added to outgoing damage; mirrored from the `strength` status.
    pub strength: i64,
    /// Added to gained block; mirrored from the `dexterity` status.
    pub dexterity: i64,
    statuses: StatusTable,
}

impl CombatantState {
    /// Create a combatant at full HP.
    #[must_use]
    pub fn new(max_hp: i64) -> Self {
        Self::with_hp(max_hp, max_hp)
    }

    /// Create a combatant with current HP (clamped to `[0, max_hp]`).
    #[must_use]
    pub fn with_hp(hp: i64, max_hp: i64) -> Self {
        Self {
            max_hp,
            hp: hp.clamp(0, max_hp),
            block: 0,
            strength: 0,
            dexterity: 0,
            statuses: StatusTable::new(),
        }
    }

    /// Apply incoming damage: block absorbs first, remainder hits HP
    /// (clamped at 0).
    ///
    /// Returns `amount - block_after_absorption`, the accounting the rest
    /// of the battle pipeline is calibrated against. When block only
    /// partially absorbs, this exceeds the HP actually lost; when block
    /// over-covers, it goes negative. Callers wanting the real HP delta
    /// read `hp` before and after.
    pub fn take_damage(&mut self, amount: i64) -> i64 {
        let amount = amount.max(0);
        let absorbed = amount.min(self.block);
        self.block -= absorbed;

        let hp_loss = (amount - absorbed).min(self.hp);
        self.hp -= hp_loss;

        amount - self.block
    }

    /// Gain block, boosted by dexterity.
    pub fn gain_block(&mut self, amount: i64) {
        self.block += (amount + self.dexterity).max(0);
    }

    /// Heal HP, clamped to max. Returns the HP actually gained.
    pub fn heal(&mut self, amount: i64) -> i64 {
        let gained = amount.max(0).min(self.max_hp - self.hp);
        self.hp += gained;
        gained
    }

    /// Check for death.
    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }

    // === Status Effects ===

    /// Read-only view of the status table.
    #[must_use]
    pub fn statuses(&self) -> &StatusTable {
        &self.statuses
    }

    /// Convenience query: stacked amount for an id (0 if absent).
    #[must_use]
    pub fn status_amount(&self, status_id: &str) -> i64 {
        self.statuses.amount_of(status_id)
    }

    /// Convenience query: is an effect active?
    #[must_use]
    pub fn has_status(&self, status_id: &str) -> bool {
        self.statuses.has(status_id)
    }

    /// Apply a status effect, keeping the stat mirrors consistent.
    pub fn add_status(&mut self, effect: StatusEffect) {
        if effect.duration != 0 {
            self.mirror_stats(&effect.id, effect.amount);
        }
        self.statuses.add(effect);
    }

    /// Remove a status by id, reversing its stat mirror.
    ///
    /// No-op if absent.
    pub fn remove_status(&mut self, status_id: &str) -> Option<StatusEffect> {
        let removed = self.statuses.remove(status_id)?;
        self.mirror_stats(&removed.id, -removed.amount);
        Some(removed)
    }

    /// Decay all finite-duration statuses, reversing stat mirrors for any
    /// that expire. Returns the expired records.
    pub fn decay_statuses(&mut self) -> Vec<StatusEffect> {
        let expired = self.statuses.decay_all();
        for record in &expired {
            self.mirror_stats(&record.id, -record.amount);
        }
        expired
    }

    fn mirror_stats(&mut self, status_id: &str, delta: i64) {
        match status_id {
            id::STRENGTH => self.strength += delta,
            id::DEXTERITY => self.dexterity += delta,
            _ => {}
        }
    }

    // === Turn Boundary Triggers ===

    /// Run turn-start status behavior (regeneration). Unknown ids are inert.
    pub fn trigger_turn_start(&mut self) -> SmallVec<[StatusTick; 2]> {
        let mut ticks = SmallVec::new();

        let regen = self.status_amount(id::REGENERATION);
        if regen > 0 {
            let healed = self.heal(regen);
            ticks.push(StatusTick {
                id: id::REGENERATION.to_string(),
                amount: healed,
            });
        }

        ticks
    }

    /// Run turn-end status behavior (poison). Unknown ids are inert.
    pub fn trigger_turn_end(&mut self) -> SmallVec<[StatusTick; 2]> {
        let mut ticks = SmallVec::new();

        let poison = self.status_amount(id::POISON);
        if poison > 0 {
            let before = self.hp;
            self.take_damage(poison);
            ticks.push(StatusTick {
                id: id::POISON.to_string(),
                amount: before - self.hp,
            });
        }

        ticks
    }

    /// Shared end-of-turn bookkeeping: clear block (unless retained) and
    /// run turn-end triggers. Decay is a separate step so callers control
    /// its ordering relative to variant-specific behavior.
    pub fn end_of_turn(&mut self) -> SmallVec<[StatusTick; 2]> {
        if !self.has_status(id::RETAIN_BLOCK) {
            self.block = 0;
        }
        self.trigger_turn_end()
    }
}

/// Scale an attack for the attacker's `weak` and the defender's
/// `vulnerable`: -25% and +25% respectively, integer-floored, applied in
/// that order.
#[must_use]
pub fn scale_attack(amount: i64, attacker: &CombatantState, defender: &CombatantState) -> i64 {
    let mut scaled = amount.max(0);
    if attacker.has_status(id::WEAK) {
        scaled = scaled * 75 / 100;
    }
    if defender.has_status(id::VULNERABLE) {
        scaled = scaled * 125 / 100;
    }
    scaled
}

/// Shared capability interface over the player and enemy variants.
///
/// Damage, block, heal, and status handling all flow through the embedded
/// [`CombatantState`]; variants only add their own fields (energy and the
/// land gate for the player, intents for enemies).
pub trait Combatant {
    /// The combatant's shared state.
    fn state(&self) -> &CombatantState;

    /// Mutable access to the shared state.
    fn state_mut(&mut self) -> &mut CombatantState;

    /// Display name for observers.
    fn name(&self) -> &str;

    /// Check for death.
    fn is_dead(&self) -> bool {
        self.state().is_dead()
    }
}
