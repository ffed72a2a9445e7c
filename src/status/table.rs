//! Status effect storage: stacking, duration decay, queries.
//!
//! A `StatusTable` holds at most one record per effect id. Re-adding an
//! existing id merges: amounts sum, and the stored duration becomes
//! permanent if either side is permanent, otherwise the greater of the
//! two. Records whose duration reaches zero are removed, never stored.
//!
//! The table itself is pure bookkeeping; id-specific behavior (strength
//! mirroring, poison ticks, energy regen) lives on the combatant that
//! owns the table.

use serde::{Deserialize, Serialize};

/// Duration value meaning "never decays".
pub const PERMANENT: i64 = -1;

/// A single status record attached to a combatant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEffect {
    /// Effect id (see [`crate::status::id`] for the well-known set).
    pub id: String,
    /// Display name forwarded to observers.
    pub name: String,
    /// Stacked magnitude.
    pub amount: i64,
    /// Remaining turns; [`PERMANENT`] never decays.
    pub duration: i64,
}

impl StatusEffect {
    /// Create a status effect record.
    pub fn new(id: impl Into<String>, name: impl Into<String>, amount: i64, duration: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            amount,
            duration,
        }
    }

    /// Create a permanent status effect record.
    pub fn permanent(id: impl Into<String>, name: impl Into<String>, amount: i64) -> Self {
        Self::new(id, name, amount, PERMANENT)
    }

    /// Check if this record never decays.
    #[must_use]
    pub fn is_permanent(&self) -> bool {
        self.duration == PERMANENT
    }
}

/// Per-combatant status effect table.
///
/// Backed by a `Vec` kept in first-application order, so iteration and
/// decay are deterministic. Removal rebuilds by filter rather than
/// splicing mid-iteration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusTable {
    records: Vec<StatusEffect>,
}

impl StatusTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge-or-insert a status effect.
    ///
    /// Existing id: amounts sum; duration becomes permanent if either side
    /// is permanent, otherwise the max. New id: inserted as given. A
    /// zero-duration record is dropped immediately (never stored).
    pub fn add(&mut self, effect: StatusEffect) {
        if effect.duration == 0 {
            return;
        }

        if let Some(existing) = self.records.iter_mut().find(|r| r.id == effect.id) {
            existing.amount += effect.amount;
            existing.duration = if existing.is_permanent() || effect.is_permanent() {
                PERMANENT
            } else {
                existing.duration.max(effect.duration)
            };
        } else {
            self.records.push(effect);
        }
    }

    /// Remove a record by id.
    ///
    /// Returns the removed record so the caller can reverse any stat
    /// mirror. No-op (`None`) if absent.
    pub fn remove(&mut self, id: &str) -> Option<StatusEffect> {
        let pos = self.records.iter().position(|r| r.id == id)?;
        Some(self.records.remove(pos))
    }

    /// Check if an effect is present.
    #[must_use]
    pub fn has(&self, id: &str) -> bool {
        self.records.iter().any(|r| r.id == id)
    }

    /// Get the stacked amount for an id (0 if absent).
    #[must_use]
    pub fn amount_of(&self, id: &str) -> i64 {
        self.records
            .iter()
            .find(|r| r.id == id)
            .map_or(0, |r| r.amount)
    }

    /// Decrement every finite duration by one, removing records that
    /// reach zero.
    ///
    /// Returns the expired records so the caller can reverse stat mirrors
    /// and notify observers.
    pub fn decay_all(&mut self) -> Vec<StatusEffect> {
        for record in &mut self.records {
            if !record.is_permanent() {
                record.duration -= 1;
            }
        }

        let (expired, kept): (Vec<_>, Vec<_>) = self
            .records
            .drain(..)
            .partition(|r| !r.is_permanent() && r.duration <= 0);
        self.records = kept;
        expired
    }

    /// Iterate over active records in application order.
    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.records.iter()
    }

    /// Number of active records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if no effects are active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
