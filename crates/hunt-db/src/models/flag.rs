//! Unlock flag rows.

use hunt_core::{FlagKind, UnlockFlag};
use native_db::*;
use native_model::{native_model, Model};
use serde::{Deserialize, Serialize};

/// One flag that has been set. Absent rows read as `false`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 1, version = 1)]
#[native_db]
pub struct StoredFlag {
    /// Primary key - legacy key such as `HasUnlocked_GAME_FLAG`.
    #[primary_key]
    pub key: String,
    /// Flag family, for listing unlocked games or areas.
    #[secondary_key]
    pub kind: String,
}

impl StoredFlag {
    pub fn from_flag(flag: &UnlockFlag) -> Self {
        Self {
            key: flag.key(),
            kind: flag.kind().as_str().to_string(),
        }
    }

    /// Rebuild the flag from its kind and key. `None` for a row this version
    /// does not understand.
    pub fn to_flag(&self) -> Option<UnlockFlag> {
        let kind = FlagKind::from_name(&self.kind)?;
        UnlockFlag::parse_as(kind, &self.key).ok()
    }
}
