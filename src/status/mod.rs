//! Status effects: buffs and debuffs with stacking and duration decay.
//!
//! The id space is open by design: any string id can be stored, decays
//! normally, and is forwarded to observers. Only the ids in [`id`] carry
//! engine behavior (stat mirroring, turn-boundary ticks, damage scaling);
//! everything else is inert, so future content can ship new ids without
//! touching the core.

pub mod table;

pub use table::{StatusEffect, StatusTable, PERMANENT};

/// Well-known status ids with engine behavior.
pub mod id {
    /// Mirrored into the combatant's strength accumulator (outgoing damage).
    pub const STRENGTH: &str = "strength";
    /// Mirrored into the combatant's dexterity accumulator (gained block).
    pub const DEXTERITY: &str = "dexterity";
    /// Damages the owner at its turn end.
    pub const POISON: &str = "poison";
    /// Heals the owner at its turn start.
    pub const REGENERATION: &str = "regeneration";
    /// Grants the player energy at turn start.
    pub const ENERGY_REGEN: &str = "energy_regen";
    /// Drains player energy at turn end.
    pub const ENERGY_LOSS: &str = "energy_loss";
    /// Keeps block from clearing at turn end.
    pub const RETAIN_BLOCK: &str = "retain_block";
    /// Owner's attacks deal 25% less damage.
    pub const WEAK: &str = "weak";
    /// Owner takes 25% more attack damage.
    pub const VULNERABLE: &str = "vulnerable";
}
