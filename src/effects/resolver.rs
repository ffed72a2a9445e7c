//! Effect resolution - executing a card's effect list.
//!
//! The resolver walks a card's effects strictly in list order and applies
//! them to the combatants in its context. Caster stats are read live per
//! effect, so a strength buff earlier in the same card boosts a later
//! damage effect. One failed effect (missing target, unknown kind) is
//! reported as a failed outcome and never aborts the remaining effects.
//!
//! Draw effects are the one exception to "resolver mutates": they only
//! report a count, and the turn machine performs the pile mutation. The
//! resolver stays free of pile-ownership concerns.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{CardEffect, EffectKind, EffectTarget, StatusSpec};
use crate::combatants::{scale_attack, Combatant, Enemy, Player};
use crate::status::StatusEffect;

/// Resolution context: the combatants an effect list applies to.
pub struct ResolverContext<'a> {
    pub player: &'a mut Player,
    pub enemies: &'a mut [Enemy],
    /// Index of the currently selected enemy, from the target-selection
    /// collaborator. `None` when nothing is targeted.
    pub target: Option<usize>,
}

/// Result of resolving one effect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectOutcome {
    /// Damage was applied. `target` is the enemy index for single-target
    /// hits, `None` for all-enemies sweeps; `dealt` sums over all hits.
    Damage { target: Option<usize>, dealt: i64 },
    /// Block was gained (dexterity included).
    Block { gained: i64 },
    /// HP was healed (clamped to max).
    Heal { healed: i64 },
    /// Energy was gained (clamped to max).
    Energy { gained: i64 },
    /// The card requests a draw; the turn machine performs it.
    Draw { cards: usize },
    /// A status was applied.
    StatusApplied {
        target: Option<usize>,
        id: String,
        debuff: bool,
    },
    /// The effect could not resolve; processing continued.
    Failed { message: String },
}

impl EffectOutcome {
    /// Check if this outcome represents a failure.
    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self, EffectOutcome::Failed { .. })
    }
}

/// Resolves card effect lists against combatants.
pub struct EffectResolver;

impl EffectResolver {
    /// Resolve an ordered effect list, producing one outcome per effect.
    pub fn resolve(
        effects: &[CardEffect],
        context: &mut ResolverContext,
    ) -> SmallVec<[EffectOutcome; 4]> {
        effects
            .iter()
            .map(|effect| Self::resolve_single(effect, context))
            .collect()
    }

    /// Resolve one effect.
    pub fn resolve_single(effect: &CardEffect, context: &mut ResolverContext) -> EffectOutcome {
        match &effect.kind {
            EffectKind::Damage => Self::resolve_damage(effect.value, effect.target, context),

            EffectKind::Block => {
                let before = context.player.state().block;
                context.player.state_mut().gain_block(effect.value);
                EffectOutcome::Block {
                    gained: context.player.state().block - before,
                }
            }

            EffectKind::Heal => {
                let healed = context.player.state_mut().heal(effect.value);
                EffectOutcome::Heal { healed }
            }

            EffectKind::Energy => {
                let gained = context.player.gain_energy(effect.value);
                EffectOutcome::Energy { gained }
            }

            EffectKind::Draw => EffectOutcome::Draw {
                cards: effect.value.max(0) as usize,
            },

            EffectKind::Buff(spec) => {
                context
                    .player
                    .state_mut()
                    .add_status(status_from_spec(spec, effect.value));
                EffectOutcome::StatusApplied {
                    target: None,
                    id: spec.id.clone(),
                    debuff: false,
                }
            }

            EffectKind::Debuff(spec) => Self::resolve_debuff(spec, effect.value, effect.target, context),

            EffectKind::Other(kind) => EffectOutcome::Failed {
                message: format!("unknown effect type: {kind}"),
            },
        }
    }

    fn resolve_damage(
        value: i64,
        target: EffectTarget,
        context: &mut ResolverContext,
    ) -> EffectOutcome {
        // Strength is read here, per effect, so earlier buffs in the same
        // card are already visible.
        let base = value + context.player.state().strength;

        match target {
            EffectTarget::EnemySingle => {
                let Some(idx) = living_target(context) else {
                    return EffectOutcome::Failed {
                        message: "no target".to_string(),
                    };
                };
                let scaled =
                    scale_attack(base, context.player.state(), context.enemies[idx].state());
                let dealt = context.enemies[idx].state_mut().take_damage(scaled);
                EffectOutcome::Damage {
                    target: Some(idx),
                    dealt,
                }
            }

            EffectTarget::AllEnemies => {
                let mut dealt = 0;
                for enemy in context.enemies.iter_mut().filter(|e| !e.is_dead()) {
                    let scaled = scale_attack(base, context.player.state(), enemy.state());
                    dealt += enemy.state_mut().take_damage(scaled);
                }
                EffectOutcome::Damage {
                    target: None,
                    dealt,
                }
            }

            EffectTarget::Caster => {
                let player = context.player.state_mut();
                let dealt = player.take_damage(base);
                EffectOutcome::Damage {
                    target: None,
                    dealt,
                }
            }
        }
    }

    fn resolve_debuff(
        spec: &StatusSpec,
        amount: i64,
        target: EffectTarget,
        context: &mut ResolverContext,
    ) -> EffectOutcome {
        match target {
            EffectTarget::AllEnemies => {
                for enemy in context.enemies.iter_mut().filter(|e| !e.is_dead()) {
                    enemy.state_mut().add_status(status_from_spec(spec, amount));
                }
                EffectOutcome::StatusApplied {
                    target: None,
                    id: spec.id.clone(),
                    debuff: true,
                }
            }

            // Debuffs land on enemies by convention; a caster-targeted
            // debuff is treated as single-target.
            EffectTarget::EnemySingle | EffectTarget::Caster => {
                let Some(idx) = living_target(context) else {
                    return EffectOutcome::Failed {
                        message: "no target".to_string(),
                    };
                };
                context.enemies[idx]
                    .state_mut()
                    .add_status(status_from_spec(spec, amount));
                EffectOutcome::StatusApplied {
                    target: Some(idx),
                    id: spec.id.clone(),
                    debuff: true,
                }
            }
        }
    }
}

fn status_from_spec(spec: &StatusSpec, amount: i64) -> StatusEffect {
    StatusEffect::new(spec.id.clone(), spec.name.clone(), amount, spec.duration)
}

fn living_target(context: &ResolverContext) -> Option<usize> {
    let idx = context.target?;
    let enemy = context.enemies.get(idx)?;
    if enemy.is_dead() {
        None
    } else {
        Some(idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combatants::{Intent, ScriptedBrain};
    use crate::status::id;

    fn enemy(hp: i64) -> Enemy {
        Enemy::new(
            "Test Enemy",
            hp,
            Box::new(ScriptedBrain::new(vec![Intent::Wait])),
        )
    }

    fn context_parts() -> (Player, Vec<Enemy>) {
        (Player::new(80, 80, 3), vec![enemy(40), enemy(30)])
    }

    #[test]
    fn test_damage_single_target() {
        let (mut player, mut enemies) = context_parts();
        let mut ctx = ResolverContext {
            player: &mut player,
            enemies: &mut enemies,
            target: Some(0),
        };

        let outcomes = EffectResolver::resolve(&[CardEffect::damage(6)], &mut ctx);

        assert_eq!(
            outcomes[0],
            EffectOutcome::Damage {
                target: Some(0),
                dealt: 6
            }
        );
        assert_eq!(enemies[0].state().hp, 34);
        assert_eq!(enemies[1].state().hp, 30);
    }

    #[test]
    fn test_damage_adds_strength() {
        let (mut player, mut enemies) = context_parts();
        player
            .state_mut()
            .add_status(StatusEffect::new(id::STRENGTH, "Strength", 2, 3));

        let mut ctx = ResolverContext {
            player: &mut player,
            enemies: &mut enemies,
            target: Some(0),
        };
        EffectResolver::resolve(&[CardEffect::damage(6)], &mut ctx);

        assert_eq!(enemies[0].state().hp, 32); // 6 + 2 strength
    }

    #[test]
    fn test_buff_before_damage_in_same_card() {
        let (mut player, mut enemies) = context_parts();
        let mut ctx = ResolverContext {
            player: &mut player,
            enemies: &mut enemies,
            target: Some(0),
        };

        // Strength is live state, so the buff boosts the damage that follows
        let effects = [
            CardEffect::buff(id::STRENGTH, "Strength", 3, crate::status::PERMANENT),
            CardEffect::damage(6),
        ];
        let outcomes = EffectResolver::resolve(&effects, &mut ctx);

        assert!(!outcomes[0].is_failed());
        assert_eq!(enemies[0].state().hp, 31); // 6 + 3
    }

    #[test]
    fn test_damage_no_target_fails_and_continues() {
        let (mut player, mut enemies) = context_parts();
        let mut ctx = ResolverContext {
            player: &mut player,
            enemies: &mut enemies,
            target: None,
        };

        let effects = [CardEffect::damage(6), CardEffect::block(5)];
        let outcomes = EffectResolver::resolve(&effects, &mut ctx);

        assert_eq!(
            outcomes[0],
            EffectOutcome::Failed {
                message: "no target".to_string()
            }
        );
        // The block effect still resolved
        assert_eq!(outcomes[1], EffectOutcome::Block { gained: 5 });
        assert_eq!(player.state().block, 5);
    }

    #[test]
    fn test_damage_dead_target_fails() {
        let (mut player, mut enemies) = context_parts();
        enemies[0].state_mut().hp = 0;

        let mut ctx = ResolverContext {
            player: &mut player,
            enemies: &mut enemies,
            target: Some(0),
        };
        let outcomes = EffectResolver::resolve(&[CardEffect::damage(6)], &mut ctx);

        assert!(outcomes[0].is_failed());
    }

    #[test]
    fn test_damage_all_enemies_sums_in_order() {
        let (mut player, mut enemies) = context_parts();
        let mut ctx = ResolverContext {
            player: &mut player,
            enemies: &mut enemies,
            target: None,
        };

        let effects = [CardEffect::damage(8).with_target(EffectTarget::AllEnemies)];
        let outcomes = EffectResolver::resolve(&effects, &mut ctx);

        assert_eq!(
            outcomes[0],
            EffectOutcome::Damage {
                target: None,
                dealt: 16
            }
        );
        assert_eq!(enemies[0].state().hp, 32);
        assert_eq!(enemies[1].state().hp, 22);
    }

    #[test]
    fn test_all_enemies_skips_dead() {
        let (mut player, mut enemies) = context_parts();
        enemies[0].state_mut().hp = 0;

        let mut ctx = ResolverContext {
            player: &mut player,
            enemies: &mut enemies,
            target: None,
        };
        let effects = [CardEffect::damage(8).with_target(EffectTarget::AllEnemies)];
        EffectResolver::resolve(&effects, &mut ctx);

        assert_eq!(enemies[0].state().hp, 0); // Untouched
        assert_eq!(enemies[1].state().hp, 22);
    }

    #[test]
    fn test_block_includes_dexterity() {
        let (mut player, mut enemies) = context_parts();
        player
            .state_mut()
            .add_status(StatusEffect::new(id::DEXTERITY, "Dexterity", 2, 3));

        let mut ctx = ResolverContext {
            player: &mut player,
            enemies: &mut enemies,
            target: None,
        };
        let outcomes = EffectResolver::resolve(&[CardEffect::block(5)], &mut ctx);

        assert_eq!(outcomes[0], EffectOutcome::Block { gained: 7 });
        assert_eq!(player.state().block, 7);
    }

    #[test]
    fn test_heal_and_energy() {
        let (mut player, mut enemies) = context_parts();
        player.state_mut().hp = 70;
        player.use_energy(2);

        let mut ctx = ResolverContext {
            player: &mut player,
            enemies: &mut enemies,
            target: None,
        };
        let effects = [CardEffect::heal(6), CardEffect::energy(1)];
        let outcomes = EffectResolver::resolve(&effects, &mut ctx);

        assert_eq!(outcomes[0], EffectOutcome::Heal { healed: 6 });
        assert_eq!(outcomes[1], EffectOutcome::Energy { gained: 1 });
        assert_eq!(player.state().hp, 76);
        assert_eq!(player.energy, 2);
    }

    #[test]
    fn test_draw_reports_without_mutating() {
        let (mut player, mut enemies) = context_parts();
        let mut ctx = ResolverContext {
            player: &mut player,
            enemies: &mut enemies,
            target: None,
        };

        let outcomes = EffectResolver::resolve(&[CardEffect::draw(2)], &mut ctx);

        assert_eq!(outcomes[0], EffectOutcome::Draw { cards: 2 });
    }

    #[test]
    fn test_debuff_targets_selected_enemy() {
        let (mut player, mut enemies) = context_parts();
        let mut ctx = ResolverContext {
            player: &mut player,
            enemies: &mut enemies,
            target: Some(1),
        };

        let effects = [CardEffect::debuff(id::VULNERABLE, "Vulnerable", 1, 2)];
        let outcomes = EffectResolver::resolve(&effects, &mut ctx);

        assert_eq!(
            outcomes[0],
            EffectOutcome::StatusApplied {
                target: Some(1),
                id: id::VULNERABLE.to_string(),
                debuff: true
            }
        );
        assert!(enemies[1].state().has_status(id::VULNERABLE));
        assert!(!enemies[0].state().has_status(id::VULNERABLE));
    }

    #[test]
    fn test_unknown_effect_kind_fails_without_aborting() {
        let (mut player, mut enemies) = context_parts();
        let mut ctx = ResolverContext {
            player: &mut player,
            enemies: &mut enemies,
            target: Some(0),
        };

        let effects = [
            CardEffect {
                kind: EffectKind::Other("transmute".to_string()),
                value: 1,
                target: EffectTarget::Caster,
            },
            CardEffect::damage(6),
        ];
        let outcomes = EffectResolver::resolve(&effects, &mut ctx);

        assert!(outcomes[0].is_failed());
        assert_eq!(enemies[0].state().hp, 34); // Later effect still ran
    }
}
