//! Typed unlock flag keys

use crate::error::{Error, Result};
use crate::game::GameId;
use crate::identity::{AreaPrefix, ItemId};
use serde::{Deserialize, Serialize};
use std::fmt;

const KEY_PREFIX: &str = "HasUnlocked_";

/// Which family a flag belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlagKind {
    Game,
    Area,
    Reward,
}

impl FlagKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            FlagKind::Game => "game",
            FlagKind::Area => "area",
            FlagKind::Reward => "reward",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "game" => Some(FlagKind::Game),
            "area" => Some(FlagKind::Area),
            "reward" => Some(FlagKind::Reward),
            _ => None,
        }
    }
}

/// A persisted "this has been made available" fact
///
/// Renders to the legacy `HasUnlocked_<id>` key so existing saves stay readable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnlockFlag {
    /// A minigame is playable from the game menu
    Game(GameId),
    /// A site has been visited and unlocked
    Area(AreaPrefix),
    /// A minigame reward item has been granted
    Reward(ItemId),
}

impl UnlockFlag {
    /// The storage key, e.g. `HasUnlocked_GAME_FLAG`
    pub fn key(&self) -> String {
        match self {
            UnlockFlag::Game(game) => format!("{KEY_PREFIX}{}", game.key()),
            UnlockFlag::Area(area) => format!("{KEY_PREFIX}{area}"),
            UnlockFlag::Reward(item) => format!("{KEY_PREFIX}{item}"),
        }
    }

    pub fn kind(&self) -> FlagKind {
        match self {
            UnlockFlag::Game(_) => FlagKind::Game,
            UnlockFlag::Area(_) => FlagKind::Area,
            UnlockFlag::Reward(_) => FlagKind::Reward,
        }
    }

    /// Parse a storage key back into a flag, guessing the kind from its shape
    ///
    /// `GAME_*` suffixes are games, suffixes containing `_` are reward items,
    /// everything else is an area prefix. Prefer [`UnlockFlag::parse_as`]
    /// whenever the kind was stored alongside the key.
    pub fn parse(key: &str) -> Result<Self> {
        let rest = suffix(key)?;
        let kind = if rest.starts_with("GAME_") {
            FlagKind::Game
        } else if rest.contains('_') {
            FlagKind::Reward
        } else {
            FlagKind::Area
        };
        Self::parse_as(kind, key)
    }

    /// Parse a storage key whose kind is known
    pub fn parse_as(kind: FlagKind, key: &str) -> Result<Self> {
        let rest = suffix(key)?;
        Ok(match kind {
            FlagKind::Game => UnlockFlag::Game(rest.parse()?),
            FlagKind::Area => UnlockFlag::Area(AreaPrefix::new(rest)),
            FlagKind::Reward => UnlockFlag::Reward(ItemId::new(rest)),
        })
    }
}

fn suffix(key: &str) -> Result<&str> {
    key.strip_prefix(KEY_PREFIX)
        .filter(|rest| !rest.is_empty())
        .ok_or_else(|| Error::InvalidFlag(key.to_string()))
}

impl fmt::Display for UnlockFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys() {
        assert_eq!(UnlockFlag::Game(GameId::Flag).key(), "HasUnlocked_GAME_FLAG");
        assert_eq!(UnlockFlag::Area("MAR".into()).key(), "HasUnlocked_MAR");
        assert_eq!(
            UnlockFlag::Reward("MKT_Empanadas".into()).key(),
            "HasUnlocked_MKT_Empanadas"
        );
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            UnlockFlag::parse("HasUnlocked_GAME_RESTORE").unwrap(),
            UnlockFlag::Game(GameId::Restore)
        );
        assert_eq!(
            UnlockFlag::parse("HasUnlocked_BAS").unwrap(),
            UnlockFlag::Area("BAS".into())
        );
        assert_eq!(
            UnlockFlag::parse("HasUnlocked_MKT_Longganisa").unwrap(),
            UnlockFlag::Reward("MKT_Longganisa".into())
        );
    }

    #[test]
    fn test_parse_as_keeps_kind() {
        let reward = UnlockFlag::Reward("Lighthouse".into());
        assert_eq!(UnlockFlag::parse(&reward.key()).unwrap(), UnlockFlag::Area("Lighthouse".into()));
        assert_eq!(UnlockFlag::parse_as(reward.kind(), &reward.key()).unwrap(), reward);

        for kind in [FlagKind::Game, FlagKind::Area, FlagKind::Reward] {
            assert_eq!(FlagKind::from_name(kind.as_str()), Some(kind));
        }
        assert!(UnlockFlag::parse_as(FlagKind::Game, "HasUnlocked_MAR").is_err());
    }

    #[test]
    fn test_parse_rejects_foreign_keys() {
        assert!(UnlockFlag::parse("user_id").is_err());
        assert!(UnlockFlag::parse("HasUnlocked_").is_err());
        assert!(UnlockFlag::parse("HasUnlocked_GAME_UNKNOWN").is_err());
    }
}
