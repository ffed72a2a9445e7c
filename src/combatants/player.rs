//! The player combatant: energy pool and the per-turn land gate.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::status::{id, StatusEffect};

use super::state::{Combatant, CombatantState, StatusTick};

/// The player side of a battle.
///
/// Adds an energy pool and the once-per-turn land gate on top of the
/// shared combatant capability.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    state: CombatantState,
    pub max_energy: i64,
    pub energy: i64,
    /// Set when a land is played; cleared at turn start.
    pub land_played: bool,
}

impl Player {
    /// Create a player from persisted run HP.
    #[must_use]
    pub fn new(hp: i64, max_hp: i64, starting_energy: i64) -> Self {
        Self {
            state: CombatantState::with_hp(hp, max_hp),
            max_energy: starting_energy,
            energy: starting_energy,
            land_played: false,
        }
    }

    /// Gain energy, clamped to max. Returns the energy actually gained.
    pub fn gain_energy(&mut self, amount: i64) -> i64 {
        let gained = amount.max(0).min(self.max_energy - self.energy);
        self.energy += gained;
        gained
    }

    /// Spend energy. Fails without side effect if insufficient.
    pub fn use_energy(&mut self, amount: i64) -> bool {
        if amount > self.energy {
            return false;
        }
        self.energy -= amount;
        true
    }

    /// Drain energy (clamped at 0). Returns the energy actually lost.
    pub fn lose_energy(&mut self, amount: i64) -> i64 {
        let lost = amount.max(0).min(self.energy);
        self.energy -= lost;
        lost
    }

    /// Turn-start reset: energy to max, land gate open, then status
    /// triggers (regeneration, energy regen).
    pub fn on_turn_start(&mut self) -> SmallVec<[StatusTick; 2]> {
        self.energy = self.max_energy;
        self.land_played = false;

        let mut ticks = self.state.trigger_turn_start();

        let regen = self.state.status_amount(id::ENERGY_REGEN);
        if regen > 0 {
            let gained = self.gain_energy(regen);
            ticks.push(StatusTick {
                id: id::ENERGY_REGEN.to_string(),
                amount: gained,
            });
        }

        ticks
    }

    /// Turn-end sequence: block clear (unless retained), turn-end
    /// triggers (poison, energy loss), then duration decay.
    ///
    /// Returns the ticks that fired and the statuses that expired.
    pub fn on_turn_end(&mut self) -> (SmallVec<[StatusTick; 2]>, Vec<StatusEffect>) {
        let mut ticks = self.state.end_of_turn();

        let loss = self.state.status_amount(id::ENERGY_LOSS);
        if loss > 0 {
            let lost = self.lose_energy(loss);
            ticks.push(StatusTick {
                id: id::ENERGY_LOSS.to_string(),
                amount: lost,
            });
        }

        let expired = self.state.decay_statuses();
        (ticks, expired)
    }
}

impl Combatant for Player {
    fn state(&self) -> &CombatantState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut CombatantState {
        &mut self.state
    }

    fn name(&self) -> &str {
        "Player"
    }
}
