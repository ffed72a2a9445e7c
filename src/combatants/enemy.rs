//! Enemy combatants: telegraphed intents and the selection hook.
//!
//! Intent *selection* is external to the core: each enemy carries a
//! boxed [`EnemyBrain`] that picks its next [`Intent`] at the end of the
//! enemy phase. Intent *execution* stays inside the turn machine so that
//! ordering, damage scaling, and battle-end interleaving are enforced in
//! one place.

use serde::{Deserialize, Serialize};

use crate::core::BattleRng;
use crate::status::StatusEffect;

use super::state::{Combatant, CombatantState};

/// An enemy's pre-committed next action.
///
/// Chosen at the end of the prior enemy turn, executed at the start of
/// the next, and exposed to observers so the UI can telegraph it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    /// Attack the player for `damage` (+ strength, scaled by weak/vulnerable).
    Attack { damage: i64 },
    /// Attack the player `times` times for `damage` each.
    AttackTimes { damage: i64, times: u32 },
    /// Gain block (+ dexterity).
    Defend { block: i64 },
    /// Apply a status to itself.
    BuffSelf(StatusEffect),
    /// Apply a status to the player.
    DebuffPlayer(StatusEffect),
    /// Do nothing this turn.
    Wait,
}

/// External intent-selection hook, implemented per enemy variant.
pub trait EnemyBrain: std::fmt::Debug {
    /// Choose the enemy's next telegraphed action.
    fn select_intent(
        &mut self,
        me: &CombatantState,
        player: &CombatantState,
        rng: &mut BattleRng,
    ) -> Intent;
}

/// Cycles through a fixed intent script.
///
/// The workhorse brain for encounter content and deterministic tests.
#[derive(Clone, Debug)]
pub struct ScriptedBrain {
    script: Vec<Intent>,
    cursor: usize,
}

impl ScriptedBrain {
    /// Create a brain that loops over `script` forever.
    #[must_use]
    pub fn new(script: Vec<Intent>) -> Self {
        assert!(!script.is_empty(), "Intent script must not be empty");
        Self { script, cursor: 0 }
    }
}

impl EnemyBrain for ScriptedBrain {
    fn select_intent(
        &mut self,
        _me: &CombatantState,
        _player: &CombatantState,
        _rng: &mut BattleRng,
    ) -> Intent {
        let intent = self.script[self.cursor % self.script.len()].clone();
        self.cursor += 1;
        intent
    }
}

/// Picks uniformly at random from a pool of intents.
#[derive(Clone, Debug)]
pub struct RandomBrain {
    pool: Vec<Intent>,
}

impl RandomBrain {
    /// Create a brain choosing uniformly from `pool`.
    #[must_use]
    pub fn new(pool: Vec<Intent>) -> Self {
        assert!(!pool.is_empty(), "Intent pool must not be empty");
        Self { pool }
    }
}

impl EnemyBrain for RandomBrain {
    fn select_intent(
        &mut self,
        _me: &CombatantState,
        _player: &CombatantState,
        rng: &mut BattleRng,
    ) -> Intent {
        let idx = rng.gen_range_usize(0..self.pool.len());
        self.pool[idx].clone()
    }
}

/// An enemy in the battle roster.
#[derive(Debug)]
pub struct Enemy {
    state: CombatantState,
    name: String,
    intent: Intent,
    brain: Box<dyn EnemyBrain>,
}

impl Enemy {
    /// Create an enemy at full HP. Its opening intent is selected by the
    /// battle before turn 1.
    pub fn new(name: impl Into<String>, max_hp: i64, brain: Box<dyn EnemyBrain>) -> Self {
        Self {
            state: CombatantState::new(max_hp),
            name: name.into(),
            intent: Intent::Wait,
            brain,
        }
    }

    /// The currently telegraphed intent.
    #[must_use]
    pub fn intent(&self) -> &Intent {
        &self.intent
    }

    /// Ask the brain for the next intent.
    pub fn select_next_intent(&mut self, player: &CombatantState, rng: &mut BattleRng) {
        self.intent = self.brain.select_intent(&self.state, player, rng);
    }
}

impl Combatant for Enemy {
    fn state(&self) -> &CombatantState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut CombatantState {
        &mut self.state
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_brain_cycles() {
        let mut brain = ScriptedBrain::new(vec![
            Intent::Attack { damage: 6 },
            Intent::Defend { block: 5 },
        ]);
        let me = CombatantState::new(40);
        let player = CombatantState::new(80);
        let mut rng = BattleRng::new(42);

        assert_eq!(
            brain.select_intent(&me, &player, &mut rng),
            Intent::Attack { damage: 6 }
        );
        assert_eq!(
            brain.select_intent(&me, &player, &mut rng),
            Intent::Defend { block: 5 }
        );
        assert_eq!(
            brain.select_intent(&me, &player, &mut rng),
            Intent::Attack { damage: 6 }
        );
    }

    #[test]
    fn test_random_brain_picks_from_pool() {
        let pool = vec![Intent::Attack { damage: 6 }, Intent::Wait];
        let mut brain = RandomBrain::new(pool.clone());
        let me = CombatantState::new(40);
        let player = CombatantState::new(80);
        let mut rng = BattleRng::new(42);

        for _ in 0..20 {
            let intent = brain.select_intent(&me, &player, &mut rng);
            assert!(pool.contains(&intent));
        }
    }

    #[test]
    fn test_enemy_select_next_intent() {
        let mut enemy = Enemy::new(
            "Cultist",
            48,
            Box::new(ScriptedBrain::new(vec![Intent::Attack { damage: 6 }])),
        );
        assert_eq!(enemy.intent(), &Intent::Wait);

        let player = CombatantState::new(80);
        let mut rng = BattleRng::new(42);
        enemy.select_next_intent(&player, &mut rng);

        assert_eq!(enemy.intent(), &Intent::Attack { damage: 6 });
        assert_eq!(enemy.name(), "Cultist");
    }
}
