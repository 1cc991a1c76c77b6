//! Flag listings for the game menu and museum views.

use crate::error::{Error, Result};
use crate::models::*;
use crate::store::Store;
use hunt_core::{AreaPrefix, FlagKind, GameId, ItemId, UnlockFlag};

impl Store {
    fn flags_of_kind(&self, kind: FlagKind) -> Result<Vec<UnlockFlag>> {
        let r = self.db.r_transaction()?;
        let scan = r.scan().secondary::<StoredFlag>(StoredFlagKey::kind)?;
        let iter = scan.start_with(kind.as_str())?;
        let stored: std::result::Result<Vec<StoredFlag>, _> = iter.collect();
        let stored = stored.map_err(|e| Error::Database(e.to_string()))?;
        Ok(stored.iter().filter_map(StoredFlag::to_flag).collect())
    }

    /// Minigames whose menu entry is unlocked.
    pub fn unlocked_games(&self) -> Result<Vec<GameId>> {
        Ok(self
            .flags_of_kind(FlagKind::Game)?
            .into_iter()
            .filter_map(|f| match f {
                UnlockFlag::Game(game) => Some(game),
                _ => None,
            })
            .collect())
    }

    /// Areas opened by a minigame trigger.
    pub fn unlocked_areas(&self) -> Result<Vec<AreaPrefix>> {
        Ok(self
            .flags_of_kind(FlagKind::Area)?
            .into_iter()
            .filter_map(|f| match f {
                UnlockFlag::Area(area) => Some(area),
                _ => None,
            })
            .collect())
    }

    /// Items granted by minigame score rewards.
    pub fn granted_rewards(&self) -> Result<Vec<ItemId>> {
        Ok(self
            .flags_of_kind(FlagKind::Reward)?
            .into_iter()
            .filter_map(|f| match f {
                UnlockFlag::Reward(item) => Some(item),
                _ => None,
            })
            .collect())
    }
}
