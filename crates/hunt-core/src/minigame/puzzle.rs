//! Restore the Heritage: 3x3 sliding tile puzzle

use super::MinigameResult;
use crate::error::{Error, Result};
use crate::game::GameId;
use crate::rng::ShuffleRng;

pub const SIZE: usize = 3;
/// Tile id of the blank square
pub const BLANK: u8 = (SIZE * SIZE - 1) as u8;
pub const BASE_SCORE: u32 = 10_000;
const SHUFFLE_MOVES: usize = 200;

/// Grid position, `x` is the column and `y` the row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pos {
    pub x: usize,
    pub y: usize,
}

impl Pos {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    fn index(&self) -> usize {
        self.y * SIZE + self.x
    }

    fn is_adjacent(&self, other: Pos) -> bool {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y) == 1
    }
}

/// Board state. Solved when tile `i` sits at index `i`.
#[derive(Debug, Clone)]
pub struct SlidingPuzzle {
    tiles: [u8; SIZE * SIZE],
    blank: Pos,
    moves: u32,
}

impl SlidingPuzzle {
    /// A solved board
    pub fn new() -> Self {
        let mut tiles = [0u8; SIZE * SIZE];
        for (i, t) in tiles.iter_mut().enumerate() {
            *t = i as u8;
        }
        Self {
            tiles,
            blank: Pos::new(SIZE - 1, SIZE - 1),
            moves: 0,
        }
    }

    /// Reset and scramble with random legal moves, so the result is always
    /// solvable.
    pub fn shuffle(&mut self, rng: &mut ShuffleRng) {
        *self = Self::new();
        for _ in 0..SHUFFLE_MOVES {
            let options = self.movable();
            if let Some(&pos) = rng.choose(&options) {
                self.swap_with_blank(pos);
            }
        }
    }

    pub fn tile(&self, pos: Pos) -> u8 {
        self.tiles[pos.index()]
    }

    pub fn blank(&self) -> Pos {
        self.blank
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Positions that can slide into the blank
    pub fn movable(&self) -> Vec<Pos> {
        let Pos { x, y } = self.blank;
        let mut out = Vec::with_capacity(4);
        if y > 0 {
            out.push(Pos::new(x, y - 1));
        }
        if y + 1 < SIZE {
            out.push(Pos::new(x, y + 1));
        }
        if x > 0 {
            out.push(Pos::new(x - 1, y));
        }
        if x + 1 < SIZE {
            out.push(Pos::new(x + 1, y));
        }
        out
    }

    /// Slide the tile at `pos` into the blank. Counts as one move.
    pub fn slide(&mut self, pos: Pos) -> Result<()> {
        if pos.x >= SIZE || pos.y >= SIZE {
            return Err(Error::InvalidMove(format!("({}, {}) is off the board", pos.x, pos.y)));
        }
        if !pos.is_adjacent(self.blank) {
            return Err(Error::InvalidMove(format!(
                "({}, {}) is not next to the blank",
                pos.x, pos.y
            )));
        }
        self.swap_with_blank(pos);
        self.moves += 1;
        Ok(())
    }

    fn swap_with_blank(&mut self, pos: Pos) {
        self.tiles.swap(pos.index(), self.blank.index());
        self.blank = pos;
    }

    pub fn is_solved(&self) -> bool {
        self.tiles.iter().enumerate().all(|(i, &t)| t as usize == i)
    }

    /// `10000 - 10 per whole second - 5 per move`, never below zero
    pub fn score(&self, elapsed_secs: f32) -> u32 {
        let penalty = (elapsed_secs.max(0.0).floor() as u32)
            .saturating_mul(10)
            .saturating_add(self.moves.saturating_mul(5));
        BASE_SCORE.saturating_sub(penalty)
    }

    /// Result once solved; `None` while tiles are still out of place
    pub fn finish(&self, elapsed_secs: f32) -> Option<MinigameResult> {
        self.is_solved()
            .then(|| MinigameResult::new(GameId::Restore, self.score(elapsed_secs), true))
    }
}

impl Default for SlidingPuzzle {
    fn default() -> Self {
        Self::new()
    }
}
