//! Minigame identifiers

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the five unlockable minigames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GameId {
    /// Sew the Flag (Agoncillo)
    #[serde(rename = "GAME_FLAG")]
    Flag,
    /// Taal Trivia Quest (Basilica)
    #[serde(rename = "GAME_TRIVIA")]
    Trivia,
    /// Apacible's Adventure endless runner
    #[serde(rename = "GAME_ADVENTURE")]
    Adventure,
    /// Restore the Heritage sliding puzzle (Casa Real)
    #[serde(rename = "GAME_RESTORE")]
    Restore,
    /// Memory of Flavors matching cards (Market)
    #[serde(rename = "GAME_FLAVORS")]
    Flavors,
}

impl GameId {
    pub const ALL: [GameId; 5] = [
        GameId::Flag,
        GameId::Trivia,
        GameId::Adventure,
        GameId::Restore,
        GameId::Flavors,
    ];

    /// Key used by the unlock flags and the game menu
    pub fn key(&self) -> &'static str {
        match self {
            GameId::Flag => "GAME_FLAG",
            GameId::Trivia => "GAME_TRIVIA",
            GameId::Adventure => "GAME_ADVENTURE",
            GameId::Restore => "GAME_RESTORE",
            GameId::Flavors => "GAME_FLAVORS",
        }
    }

    /// The `game_id` the leaderboard expects in a score submission
    pub fn leaderboard_id(&self) -> &'static str {
        match self {
            GameId::Flag => "sewing_game",
            GameId::Trivia => "trivia_quest",
            GameId::Adventure => "endless_run",
            GameId::Restore => "sliding_puzzle",
            GameId::Flavors => "matching_cards",
        }
    }

    /// Display title on the game menu
    pub fn title(&self) -> &'static str {
        match self {
            GameId::Flag => "Sew The Flag",
            GameId::Trivia => "Taal Trivia Quest",
            GameId::Adventure => "Apacible's Adventure",
            GameId::Restore => "Restore the Heritage",
            GameId::Flavors => "Memory of Flavors",
        }
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for GameId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        GameId::ALL
            .into_iter()
            .find(|g| g.key() == s)
            .ok_or_else(|| Error::UnknownGame(s.to_string()))
    }
}
