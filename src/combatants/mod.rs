//! Combatants: the shared capability interface and its two variants.
//!
//! Player and Enemy are independent record types sharing one capability
//! surface ([`Combatant`] over [`CombatantState`]) rather than an
//! inheritance tree. The player adds energy and the land gate; enemies
//! add telegraphed intents.

pub mod enemy;
pub mod player;
pub mod state;

pub use enemy::{Enemy, EnemyBrain, Intent, RandomBrain, ScriptedBrain};
pub use player::Player;
pub use state::{scale_attack, Combatant, CombatantState, StatusTick};
