//! Minigame trigger schema

use hunt_core::{GameId, ItemId};
use serde::{Deserialize, Serialize};

/// Scanning `item` unlocks `game` and the item's area
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerDef {
    pub item: ItemId,
    pub game: GameId,
}
