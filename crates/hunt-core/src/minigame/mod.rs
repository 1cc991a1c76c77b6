//! Minigame rules, free of any rendering
//!
//! Each game keeps its own bookkeeping and ends in a [`MinigameResult`] that
//! the session turns into a score submission and, for wins, rewards.

pub mod cards;
pub mod puzzle;
pub mod runner;
pub mod sewing;
pub mod trivia;

use crate::game::GameId;
use serde::{Deserialize, Serialize};

/// Outcome of one finished minigame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinigameResult {
    pub game: GameId,
    pub score: u32,
    pub won: bool,
}

impl MinigameResult {
    pub fn new(game: GameId, score: u32, won: bool) -> Self {
        Self { game, score, won }
    }
}
