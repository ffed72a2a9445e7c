//! Effect resolution: ordered execution of card effect lists.

pub mod resolver;

pub use resolver::{EffectOutcome, EffectResolver, ResolverContext};
