//! Core primitives: deterministic RNG and battle configuration.

pub mod config;
pub mod rng;

pub use config::{BattleConfig, RunState};
pub use rng::{BattleRng, BattleRngState};
