//! Card value data: definitions, effect lists, and the registry.

pub mod definition;
pub mod registry;

pub use definition::{CardDefinition, CardEffect, CardId, CardType, EffectKind, EffectTarget, StatusSpec};
pub use registry::CardRegistry;
