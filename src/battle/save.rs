//! Battle checkpointing and the post-battle handoff.
//!
//! Deliberately minimal: the persisted format carries current HP and
//! energy only. Deck composition, statuses, and pile contents are
//! reconstructed from run state when the battle is recreated.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::BattleResult;

/// Errors from decoding a battle save.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("failed to decode battle save: {0}")]
    Decode(#[from] Box<bincode::ErrorKind>),
}

/// Resumable battle state: HP and energy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleSave {
    pub player_hp: i64,
    pub player_max_hp: i64,
    pub energy: i64,
    pub max_energy: i64,
}

impl BattleSave {
    /// Encode to a compact byte buffer.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SaveError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode from bytes produced by [`BattleSave::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SaveError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

/// What the run layer reads back when a battle ends.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleReport {
    /// Final outcome (may still be `InProgress` if queried early).
    pub result: BattleResult,
    /// Player HP to persist into the run.
    pub player_hp: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_roundtrip() {
        let save = BattleSave {
            player_hp: 42,
            player_max_hp: 80,
            energy: 2,
            max_energy: 4,
        };

        let bytes = save.to_bytes().unwrap();
        let decoded = BattleSave::from_bytes(&bytes).unwrap();

        assert_eq!(save, decoded);
    }

    #[test]
    fn test_save_decode_garbage_fails() {
        let result = BattleSave::from_bytes(&[0xff]);
        assert!(result.is_err());
    }

    #[test]
    fn test_save_json_roundtrip() {
        let save = BattleSave {
            player_hp: 42,
            player_max_hp: 80,
            energy: 2,
            max_energy: 4,
        };

        let json = serde_json::to_string(&save).unwrap();
        let decoded: BattleSave = serde_json::from_str(&json).unwrap();
        assert_eq!(save, decoded);
    }
}
