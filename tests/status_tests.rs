//! Status-effect stacking, decay, and stat-mirror properties.

use proptest::prelude::*;

use deckbattle::status::id;
use deckbattle::{CombatantState, StatusEffect, PERMANENT};

#[test]
fn stacking_sums_amounts_and_keeps_greater_duration() {
    let mut state = CombatantState::new(80);

    state.add_status(StatusEffect::new(id::STRENGTH, "Strength", 2, 3));
    state.add_status(StatusEffect::new(id::STRENGTH, "Strength", 3, 1));

    assert_eq!(state.strength, 5);
    assert_eq!(state.status_amount(id::STRENGTH), 5);

    let record = state
        .statuses()
        .iter()
        .find(|r| r.id == id::STRENGTH)
        .unwrap();
    assert_eq!(record.duration, 3);
}

#[test]
fn permanent_side_wins_the_merge() {
    let mut state = CombatantState::new(80);

    state.add_status(StatusEffect::new(id::DEXTERITY, "Dexterity", 1, 2));
    state.add_status(StatusEffect::permanent(id::DEXTERITY, "Dexterity", 2));

    let record = state
        .statuses()
        .iter()
        .find(|r| r.id == id::DEXTERITY)
        .unwrap();
    assert_eq!(record.duration, PERMANENT);
    assert_eq!(state.dexterity, 3);
}

#[test]
fn decay_reverses_mirror_exactly_once() {
    let mut state = CombatantState::new(80);

    state.add_status(StatusEffect::new(id::STRENGTH, "Strength", 2, 2));
    state.add_status(StatusEffect::new(id::STRENGTH, "Strength", 3, 1));
    assert_eq!(state.strength, 5);

    // Merged record: amount 5, duration 2. One decay keeps it.
    let expired = state.decay_statuses();
    assert!(expired.is_empty());
    assert_eq!(state.strength, 5);

    // Second decay expires it and reverses the full merged amount.
    let expired = state.decay_statuses();
    assert_eq!(expired.len(), 1);
    assert_eq!(state.strength, 0);
}

proptest! {
    /// The strength accumulator always equals the stored status amount,
    /// no matter how adds, removes, and decays interleave.
    #[test]
    fn strength_mirror_stays_consistent(
        ops in proptest::collection::vec((0u8..3, 1i64..6, -1i64..5), 0..50),
    ) {
        let mut state = CombatantState::new(100);

        for (op, amount, duration) in ops {
            match op {
                0 => state.add_status(StatusEffect::new(
                    id::STRENGTH,
                    "Strength",
                    amount,
                    duration,
                )),
                1 => {
                    state.remove_status(id::STRENGTH);
                }
                _ => {
                    state.decay_statuses();
                }
            }

            prop_assert_eq!(state.strength, state.status_amount(id::STRENGTH));
        }
    }

    /// Decay never leaves a zero-duration record behind.
    #[test]
    fn no_zero_duration_records_survive(
        durations in proptest::collection::vec(-1i64..6, 1..20),
    ) {
        let mut state = CombatantState::new(100);

        for (i, duration) in durations.iter().enumerate() {
            state.add_status(StatusEffect::new(
                format!("status_{i}"),
                "Test",
                1,
                *duration,
            ));
        }

        for _ in 0..8 {
            state.decay_statuses();
            for record in state.statuses().iter() {
                prop_assert!(record.duration == PERMANENT || record.duration > 0);
            }
        }

        // After enough decays only permanents remain
        let survivors: Vec<_> = state.statuses().iter().collect();
        prop_assert!(survivors.iter().all(|r| r.duration == PERMANENT));
    }
}
