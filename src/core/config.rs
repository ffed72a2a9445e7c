//! Battle configuration and run-state handoff.
//!
//! The core never reads ambient global state. Everything a battle needs
//! from the surrounding run — deck contents, persisted HP — arrives in a
//! `RunState` passed to the battle constructor, and all tunables live in
//! `BattleConfig`.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;

/// Tunable parameters for a battle.
///
/// Defaults match the standard encounter rules: a five-card opening hand,
/// one card drawn per subsequent turn, a ten-card hand ceiling, and lands
/// raising max energy by one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleConfig {
    /// Cards drawn up to at the start of turn 1.
    pub starting_hand_size: usize,

    /// Hand size above which the overflow-discard flow triggers.
    pub max_hand_size: usize,

    /// Cards drawn at the start of each turn after the first.
    pub draws_per_turn: usize,

    /// Player energy at battle start (also the initial max).
    pub starting_energy: i64,

    /// How much a land raises max energy when played.
    pub land_energy_increment: i64,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            starting_hand_size: 5,
            max_hand_size: 10,
            draws_per_turn: 1,
            starting_energy: 3,
            land_energy_increment: 1,
        }
    }
}

impl BattleConfig {
    /// Create a config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the starting hand size.
    #[must_use]
    pub fn starting_hand_size(mut self, size: usize) -> Self {
        self.starting_hand_size = size;
        self
    }

    /// Set the maximum hand size.
    #[must_use]
    pub fn max_hand_size(mut self, size: usize) -> Self {
        self.max_hand_size = size;
        self
    }

    /// Set the number of cards drawn per turn after the first.
    #[must_use]
    pub fn draws_per_turn(mut self, count: usize) -> Self {
        self.draws_per_turn = count;
        self
    }

    /// Set the starting (and initial max) energy.
    #[must_use]
    pub fn starting_energy(mut self, energy: i64) -> Self {
        self.starting_energy = energy;
        self
    }
}

/// What the run layer hands the battle at construction time.
///
/// The deck is the authoritative card list for the encounter; HP values
/// are the persisted run HP read back into the battle. After the battle,
/// the run layer reads the surviving HP out of `Battle::report`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunState {
    /// The player's current deck, in run order (shuffled at battle start).
    pub deck: Vec<CardId>,

    /// Persisted current HP.
    pub player_hp: i64,

    /// Persisted max HP.
    pub player_max_hp: i64,
}

impl RunState {
    /// Create a run state with full HP.
    #[must_use]
    pub fn new(deck: Vec<CardId>, max_hp: i64) -> Self {
        Self {
            deck,
            player_hp: max_hp,
            player_max_hp: max_hp,
        }
    }

    /// Create a run state with partially spent HP.
    #[must_use]
    pub fn with_hp(deck: Vec<CardId>, hp: i64, max_hp: i64) -> Self {
        Self {
            deck,
            player_hp: hp.clamp(0, max_hp),
            player_max_hp: max_hp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BattleConfig::default();

        assert_eq!(config.starting_hand_size, 5);
        assert_eq!(config.max_hand_size, 10);
        assert_eq!(config.draws_per_turn, 1);
        assert_eq!(config.starting_energy, 3);
        assert_eq!(config.land_energy_increment, 1);
    }

    #[test]
    fn test_builder_setters() {
        let config = BattleConfig::new()
            .starting_hand_size(7)
            .max_hand_size(12)
            .draws_per_turn(2)
            .starting_energy(4);

        assert_eq!(config.starting_hand_size, 7);
        assert_eq!(config.max_hand_size, 12);
        assert_eq!(config.draws_per_turn, 2);
        assert_eq!(config.starting_energy, 4);
    }

    #[test]
    fn test_run_state_clamps_hp() {
        let run = RunState::with_hp(vec![], 120, 80);
        assert_eq!(run.player_hp, 80);

        let run = RunState::with_hp(vec![], -5, 80);
        assert_eq!(run.player_hp, 0);
    }

    #[test]
    fn test_config_serde() {
        let config = BattleConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: BattleConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
