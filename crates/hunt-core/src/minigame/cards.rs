//! Memory of Flavors: matching card game
//!
//! Two batches of five shuffled pairs. Matching a pair scores 100, a miss
//! costs 10 (never below zero), clearing a batch adds 500. Clearing the
//! second batch wins; running out of time loses.

use super::MinigameResult;
use crate::error::{Error, Result};
use crate::game::GameId;
use crate::rng::ShuffleRng;

pub const PAIRS_PER_BATCH: u8 = 5;
pub const BATCHES: u8 = 2;
pub const TIME_LIMIT_SECS: f32 = 180.0;
pub const MATCH_POINTS: u32 = 100;
pub const MISS_PENALTY: u32 = 10;
pub const BATCH_BONUS: u32 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Card {
    pub pair: u8,
    pub matched: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Playing,
    /// First batch cleared, waiting for `next_batch`
    BatchCleared,
    Won,
    Lost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flip {
    /// First card of a pair turned over
    Opened,
    Matched { pair: u8 },
    /// Both cards turn back face down
    Missed,
}

#[derive(Debug, Clone)]
pub struct MatchingCards {
    batch: u8,
    cards: Vec<Card>,
    open: Option<usize>,
    matches: u8,
    score: u32,
    phase: Phase,
}

impl MatchingCards {
    pub fn new(rng: &mut ShuffleRng) -> Self {
        let mut game = Self {
            batch: 1,
            cards: Vec::new(),
            open: None,
            matches: 0,
            score: 0,
            phase: Phase::Playing,
        };
        game.deal(rng);
        game
    }

    fn deal(&mut self, rng: &mut ShuffleRng) {
        let mut pairs: Vec<u8> = (0..PAIRS_PER_BATCH).flat_map(|p| [p, p]).collect();
        rng.shuffle(&mut pairs);
        self.cards = pairs
            .into_iter()
            .map(|pair| Card {
                pair,
                matched: false,
            })
            .collect();
        self.open = None;
        self.matches = 0;
        self.phase = Phase::Playing;
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn batch(&self) -> u8 {
        self.batch
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Turn over the card at `index`
    pub fn flip(&mut self, index: usize) -> Result<Flip> {
        if self.phase != Phase::Playing {
            return Err(Error::InvalidMove("no batch in play".to_string()));
        }
        let card = self
            .cards
            .get(index)
            .ok_or_else(|| Error::InvalidMove(format!("no card at {index}")))?;
        if card.matched || self.open == Some(index) {
            return Err(Error::InvalidMove(format!("card {index} is already face up")));
        }

        let Some(first) = self.open.take() else {
            self.open = Some(index);
            return Ok(Flip::Opened);
        };

        let pair = self.cards[first].pair;
        if pair != self.cards[index].pair {
            self.score = self.score.saturating_sub(MISS_PENALTY);
            return Ok(Flip::Missed);
        }

        self.cards[first].matched = true;
        self.cards[index].matched = true;
        self.matches += 1;
        self.score += MATCH_POINTS;
        if self.matches >= PAIRS_PER_BATCH {
            self.score += BATCH_BONUS;
            self.phase = if self.batch >= BATCHES {
                Phase::Won
            } else {
                Phase::BatchCleared
            };
        }
        Ok(Flip::Matched { pair })
    }

    /// Deal the next batch after one was cleared
    pub fn next_batch(&mut self, rng: &mut ShuffleRng) -> Result<()> {
        if self.phase != Phase::BatchCleared {
            return Err(Error::InvalidMove("current batch is not cleared".to_string()));
        }
        self.batch += 1;
        self.deal(rng);
        Ok(())
    }

    /// The clock ran out
    pub fn time_up(&mut self) {
        if matches!(self.phase, Phase::Playing | Phase::BatchCleared) {
            self.phase = Phase::Lost;
        }
    }

    /// Result once the game is over
    pub fn finish(&self) -> Option<MinigameResult> {
        match self.phase {
            Phase::Won => Some(MinigameResult::new(GameId::Flavors, self.score, true)),
            Phase::Lost => Some(MinigameResult::new(GameId::Flavors, self.score, false)),
            _ => None,
        }
    }
}
