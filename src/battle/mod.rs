//! The turn state machine.
//!
//! A battle advances through `PlayerTurn -> EnemyTurn -> PlayerTurn ...`
//! until a death condition flips it into the terminal `Ended` phase.
//! Everything is driven by discrete external triggers: card-play
//! requests, the end-turn request, and single enemy-step advances (so a
//! presentation layer can insert timed animation between enemy actions
//! without the core knowing about timing).
//!
//! ## Failure Semantics
//!
//! Invalid requests (wrong phase, missing energy, card not in hand) are
//! rejected as data — the state is untouched and the caller may retry.
//! A failing effect inside a card records a failed outcome but never
//! blocks the card's discard or the remaining effects. Pile, HP, and
//! energy invariants hold unconditionally.

pub mod events;
pub mod save;

use im::Vector;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace};

use crate::cards::{CardId, CardRegistry};
use crate::combatants::{scale_attack, Combatant, Enemy, Intent, Player};
use crate::core::{BattleConfig, BattleRng, RunState};
use crate::effects::{EffectOutcome, EffectResolver, ResolverContext};
use crate::piles::CardPiles;

pub use events::{ActionRecord, BattleAction, BattleEvent, CombatantRef, EventQueue};
pub use save::{BattleReport, BattleSave, SaveError};

/// Battle phases.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    PlayerTurn,
    EnemyTurn,
    /// Terminal; no further transitions or card plays are accepted.
    Ended,
}

/// Battle outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleResult {
    InProgress,
    Victory,
    Defeat,
}

/// Why a card-play request was rejected. State is unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RejectReason {
    #[error("battle is already over")]
    BattleOver,
    #[error("not the player's turn")]
    WrongPhase,
    #[error("hand overflow discards are pending")]
    DiscardPending,
    #[error("card is not registered")]
    UnknownCard,
    #[error("card is not in hand")]
    NotInHand,
    #[error("a land was already played this turn")]
    LandAlreadyPlayed,
    #[error("insufficient energy: cost {cost}, available {available}")]
    InsufficientEnergy { cost: i64, available: i64 },
}

/// Result of a card-play request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlayOutcome {
    /// The card resolved; per-effect outcomes in list order.
    Played { outcomes: Vec<EffectOutcome> },
    /// The request was rejected without state change.
    Rejected(RejectReason),
}

impl PlayOutcome {
    /// Check if the play was accepted.
    #[must_use]
    pub fn is_played(&self) -> bool {
        matches!(self, PlayOutcome::Played { .. })
    }
}

/// Result of advancing the enemy phase by one step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EnemyStep {
    /// One enemy executed its intent; more may remain.
    Acted { index: usize },
    /// The enemy phase completed; the battle re-entered the player turn.
    TurnEnded,
    /// A death condition ended the battle.
    BattleOver,
    /// The battle is not in the enemy phase.
    NotEnemyPhase,
}

/// A battle in progress.
///
/// Constructed from run state (deck + persisted HP) and an enemy roster;
/// driven by [`Battle::play_card`], [`Battle::end_player_turn`], and
/// [`Battle::advance_enemy`]; observed via [`Battle::drain_events`].
pub struct Battle {
    config: BattleConfig,
    registry: CardRegistry,
    player: Player,
    enemies: Vec<Enemy>,
    piles: CardPiles,
    phase: Phase,
    result: BattleResult,
    /// Starts at 1; increments once per full round, at the player-turn
    /// re-entry following the enemy phase.
    turn_number: u32,
    /// Next enemy to act during the enemy phase.
    enemy_cursor: usize,
    /// Overflow discards the selection collaborator still owes.
    pending_discards: usize,
    rng: BattleRng,
    events: EventQueue,
    history: Vector<ActionRecord>,
}

impl Battle {
    /// Start a battle: shuffle the deck, pick opening enemy intents, and
    /// enter turn 1 (drawing up to the starting hand size).
    #[must_use]
    pub fn new(
        config: BattleConfig,
        registry: CardRegistry,
        run: &RunState,
        enemies: Vec<Enemy>,
        seed: u64,
    ) -> Self {
        assert!(!enemies.is_empty(), "Battle needs at least one enemy");

        let player = Player::new(run.player_hp, run.player_max_hp, config.starting_energy);
        let mut battle = Self {
            config,
            registry,
            player,
            enemies,
            piles: CardPiles::new(run.deck.clone()),
            phase: Phase::PlayerTurn,
            result: BattleResult::InProgress,
            turn_number: 1,
            enemy_cursor: 0,
            pending_discards: 0,
            rng: BattleRng::new(seed),
            events: EventQueue::new(),
            history: Vector::new(),
        };

        battle.piles.shuffle(&mut battle.rng);

        for enemy in battle.enemies.iter_mut() {
            enemy.select_next_intent(battle.player.state(), &mut battle.rng);
        }

        battle.begin_player_turn();
        battle
    }

    // === Queries ===

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current outcome.
    #[must_use]
    pub fn result(&self) -> BattleResult {
        self.result
    }

    /// Current turn number (starts at 1).
    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    /// The player combatant.
    #[must_use]
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// The enemy roster, in action order.
    #[must_use]
    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    /// The card piles.
    #[must_use]
    pub fn piles(&self) -> &CardPiles {
        &self.piles
    }

    /// Overflow discards still owed by the selection collaborator.
    #[must_use]
    pub fn pending_discards(&self) -> usize {
        self.pending_discards
    }

    /// Append-only record of every accepted action.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    /// Take all pending observer events.
    pub fn drain_events(&mut self) -> Vec<BattleEvent> {
        self.events.drain()
    }

    // === Card Play ===

    /// Handle a card-play request from the input layer.
    ///
    /// `target` is the currently selected enemy index, supplied by the
    /// target-selection collaborator; effects that need one fail with a
    /// "no target" outcome when it is absent or dead.
    pub fn play_card(&mut self, card: CardId, target: Option<usize>) -> PlayOutcome {
        let def = match self.validate_play(card) {
            Ok(def) => def,
            Err(reason) => {
                debug!(?card, %reason, "card play rejected");
                return PlayOutcome::Rejected(reason);
            }
        };

        if def.is_land() {
            self.player.land_played = true;
            self.player.max_energy += self.config.land_energy_increment;
        } else if !self.player.use_energy(def.cost) {
            // Checked in validate_play; kept as the authoritative gate.
            return PlayOutcome::Rejected(RejectReason::InsufficientEnergy {
                cost: def.cost,
                available: self.player.energy,
            });
        }

        // Hand -> discard before resolution, so effects observe the
        // post-play pile state.
        let moved = self.piles.play_card(card);
        debug_assert!(moved, "validated card must be in hand");

        if def.is_land() {
            let other_lands = self.lands_in_hand();
            self.events.emit(BattleEvent::LandPlayed {
                card,
                new_max_energy: self.player.max_energy,
                other_lands,
            });
        }

        let outcomes = {
            let mut context = ResolverContext {
                player: &mut self.player,
                enemies: &mut self.enemies,
                target,
            };
            EffectResolver::resolve(&def.effects, &mut context)
        };
        trace!(?card, ?outcomes, "card resolved");

        let requested: usize = outcomes
            .iter()
            .map(|outcome| match outcome {
                EffectOutcome::Draw { cards } => *cards,
                _ => 0,
            })
            .sum();
        if requested > 0 {
            let drawn = self.piles.draw(requested, &mut self.rng);
            self.events.emit(BattleEvent::CardsDrawn { requested, drawn });
        }

        let outcomes: Vec<EffectOutcome> = outcomes.into_vec();
        self.events.emit(BattleEvent::CardPlayed {
            card,
            target,
            outcomes: outcomes.clone(),
        });
        self.history.push_back(ActionRecord {
            turn: self.turn_number,
            action: BattleAction::PlayCard { card, target },
        });

        self.check_hand_overflow();
        self.check_battle_end();

        PlayOutcome::Played { outcomes }
    }

    /// Validate a play request, returning the card's definition.
    ///
    /// The definition is cloned out so the registry borrow ends here;
    /// effect lists are small.
    fn validate_play(&self, card: CardId) -> Result<crate::cards::CardDefinition, RejectReason> {
        if self.result != BattleResult::InProgress {
            return Err(RejectReason::BattleOver);
        }
        if self.phase != Phase::PlayerTurn {
            return Err(RejectReason::WrongPhase);
        }
        if self.pending_discards > 0 {
            return Err(RejectReason::DiscardPending);
        }

        let Some(def) = self.registry.get(card) else {
            return Err(RejectReason::UnknownCard);
        };
        if !self.piles.hand_contains(card) {
            return Err(RejectReason::NotInHand);
        }

        if def.is_land() {
            if self.player.land_played {
                return Err(RejectReason::LandAlreadyPlayed);
            }
        } else if def.cost > self.player.energy {
            return Err(RejectReason::InsufficientEnergy {
                cost: def.cost,
                available: self.player.energy,
            });
        }

        Ok(def.clone())
    }

    fn lands_in_hand(&self) -> Vec<CardId> {
        self.piles
            .hand()
            .iter()
            .copied()
            .filter(|&id| self.registry.get(id).is_some_and(|d| d.is_land()))
            .collect()
    }

    // === Hand Overflow ===

    fn check_hand_overflow(&mut self) {
        let excess = self
            .piles
            .hand()
            .len()
            .saturating_sub(self.config.max_hand_size);
        if excess > self.pending_discards {
            self.events.emit(BattleEvent::HandOverflow {
                excess,
                hand: self.piles.hand().to_vec(),
            });
        }
        self.pending_discards = excess;
    }

    /// Discard one card chosen by the overflow-selection collaborator.
    ///
    /// Returns `false` if no discards are pending or the card is not in
    /// hand.
    pub fn resolve_overflow_discard(&mut self, card: CardId) -> bool {
        if self.pending_discards == 0 || !self.piles.discard_card(card) {
            return false;
        }
        self.pending_discards -= 1;
        self.events.emit(BattleEvent::CardDiscarded { card });
        true
    }

    // === Turn Transitions ===

    /// Handle the end-turn request: run the player's turn-end sequence
    /// and hand control to the enemies.
    ///
    /// Returns `false` (no state change) outside the player turn.
    pub fn end_player_turn(&mut self) -> bool {
        if self.result != BattleResult::InProgress || self.phase != Phase::PlayerTurn {
            return false;
        }

        self.history.push_back(ActionRecord {
            turn: self.turn_number,
            action: BattleAction::EndTurn,
        });

        let (ticks, expired) = self.player.on_turn_end();
        for tick in ticks {
            self.events.emit(BattleEvent::StatusTicked {
                target: CombatantRef::Player,
                tick,
            });
        }
        for record in expired {
            self.events.emit(BattleEvent::StatusExpired {
                target: CombatantRef::Player,
                id: record.id,
            });
        }

        // Poison can finish the player here; enemies never act against a
        // decided battle.
        if self.check_battle_end() {
            return true;
        }

        self.phase = Phase::EnemyTurn;
        self.enemy_cursor = 0;
        debug!(turn = self.turn_number, "enemy phase begins");
        self.events.emit(BattleEvent::PhaseChanged {
            phase: Phase::EnemyTurn,
            turn: self.turn_number,
        });
        true
    }

    /// Advance the enemy phase by exactly one enemy action.
    ///
    /// Battle end is re-checked after each individual action: a death
    /// mid-sequence halts the remaining enemies. Once the roster is
    /// exhausted, enemy turn-end bookkeeping runs, intents are reselected,
    /// the turn counter increments, and the player turn begins.
    pub fn advance_enemy(&mut self) -> EnemyStep {
        if self.result != BattleResult::InProgress {
            return EnemyStep::BattleOver;
        }
        if self.phase != Phase::EnemyTurn {
            return EnemyStep::NotEnemyPhase;
        }

        while self.enemy_cursor < self.enemies.len() && self.enemies[self.enemy_cursor].is_dead() {
            self.enemy_cursor += 1;
        }

        if self.enemy_cursor < self.enemies.len() {
            let index = self.enemy_cursor;
            self.enemy_cursor += 1;

            self.execute_intent(index);
            self.history.push_back(ActionRecord {
                turn: self.turn_number,
                action: BattleAction::EnemyAction {
                    index,
                    intent: self.enemies[index].intent().clone(),
                },
            });

            if self.check_battle_end() {
                return EnemyStep::BattleOver;
            }
            return EnemyStep::Acted { index };
        }

        self.finish_enemy_turn();
        if self.result != BattleResult::InProgress {
            EnemyStep::BattleOver
        } else {
            EnemyStep::TurnEnded
        }
    }

    /// Run the whole enemy phase synchronously (headless callers).
    pub fn run_enemy_turn(&mut self) -> EnemyStep {
        loop {
            match self.advance_enemy() {
                EnemyStep::Acted { .. } => continue,
                step => return step,
            }
        }
    }

    fn execute_intent(&mut self, index: usize) {
        let intent = self.enemies[index].intent().clone();
        debug!(index, ?intent, "enemy acts");
        self.events.emit(BattleEvent::EnemyActed {
            index,
            intent: intent.clone(),
        });

        match intent {
            Intent::Attack { damage } => self.enemy_attack(index, damage, 1),
            Intent::AttackTimes { damage, times } => self.enemy_attack(index, damage, times),
            Intent::Defend { block } => {
                self.enemies[index].state_mut().gain_block(block);
            }
            Intent::BuffSelf(effect) => {
                self.enemies[index].state_mut().add_status(effect);
            }
            Intent::DebuffPlayer(effect) => {
                self.player.state_mut().add_status(effect);
            }
            Intent::Wait => {}
        }
    }

    fn enemy_attack(&mut self, index: usize, damage: i64, times: u32) {
        for _ in 0..times {
            if self.player.is_dead() {
                break;
            }
            let base = damage + self.enemies[index].state().strength;
            let scaled = scale_attack(base, self.enemies[index].state(), self.player.state());

            let before = self.player.state().hp;
            self.player.state_mut().take_damage(scaled);
            let hp_loss = before - self.player.state().hp;

            self.events.emit(BattleEvent::DamageDealt {
                target: CombatantRef::Player,
                amount: scaled,
                hp_loss,
            });
        }
    }

    fn finish_enemy_turn(&mut self) {
        for index in 0..self.enemies.len() {
            if self.enemies[index].is_dead() {
                continue;
            }

            let ticks = self.enemies[index].state_mut().end_of_turn();
            for tick in ticks {
                self.events.emit(BattleEvent::StatusTicked {
                    target: CombatantRef::Enemy(index),
                    tick,
                });
            }

            let expired = self.enemies[index].state_mut().decay_statuses();
            for record in expired {
                self.events.emit(BattleEvent::StatusExpired {
                    target: CombatantRef::Enemy(index),
                    id: record.id,
                });
            }
        }

        // Poison ticks may have finished off the roster.
        if self.check_battle_end() {
            return;
        }

        for enemy in self.enemies.iter_mut() {
            if !enemy.is_dead() {
                enemy.select_next_intent(self.player.state(), &mut self.rng);
            }
        }

        self.turn_number += 1;
        self.phase = Phase::PlayerTurn;
        self.begin_player_turn();
    }

    fn begin_player_turn(&mut self) {
        debug!(turn = self.turn_number, "player turn begins");
        self.events.emit(BattleEvent::PhaseChanged {
            phase: Phase::PlayerTurn,
            turn: self.turn_number,
        });

        let ticks = self.player.on_turn_start();
        for tick in ticks {
            self.events.emit(BattleEvent::StatusTicked {
                target: CombatantRef::Player,
                tick,
            });
        }

        // Turn 1 tops the hand off to the starting size; later turns draw
        // a fixed count.
        let requested = if self.turn_number == 1 {
            self.config
                .starting_hand_size
                .saturating_sub(self.piles.hand().len())
        } else {
            self.config.draws_per_turn
        };

        let drawn = self.piles.draw(requested, &mut self.rng);
        self.events.emit(BattleEvent::CardsDrawn { requested, drawn });

        self.check_hand_overflow();
    }

    // === Battle End ===

    /// Evaluate death conditions. Defeat is checked before victory, so a
    /// simultaneous wipe resolves as defeat.
    fn check_battle_end(&mut self) -> bool {
        if self.result != BattleResult::InProgress {
            return true;
        }

        if self.player.is_dead() {
            self.result = BattleResult::Defeat;
        } else if self.enemies.iter().all(|enemy| enemy.is_dead()) {
            self.result = BattleResult::Victory;
        } else {
            return false;
        }

        self.phase = Phase::Ended;
        debug!(result = ?self.result, "battle ended");
        self.events.emit(BattleEvent::BattleEnded {
            result: self.result,
        });
        true
    }

    // === Persistence ===

    /// Capture the resumable battle state (HP and energy only).
    #[must_use]
    pub fn save(&self) -> BattleSave {
        BattleSave {
            player_hp: self.player.state().hp,
            player_max_hp: self.player.state().max_hp,
            energy: self.player.energy,
            max_energy: self.player.max_energy,
        }
    }

    /// Restore HP and energy from a save captured by [`Battle::save`].
    pub fn apply_save(&mut self, save: &BattleSave) {
        self.player.state_mut().max_hp = save.player_max_hp;
        self.player.state_mut().hp = save.player_hp.clamp(0, save.player_max_hp);
        self.player.max_energy = save.max_energy;
        self.player.energy = save.energy.clamp(0, save.max_energy);
    }

    /// The post-battle handoff for the run-state collaborator.
    #[must_use]
    pub fn report(&self) -> BattleReport {
        BattleReport {
            result: self.result,
            player_hp: self.player.state().hp,
        }
    }
}
