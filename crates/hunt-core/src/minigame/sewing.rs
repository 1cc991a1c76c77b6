//! Sew the Flag
//!
//! Tap gold needles to finish flags, red needles cost a life. The run ends
//! when the timer runs out, the lives are gone, or every flag is sewn.

use super::MinigameResult;
use crate::game::GameId;

pub const POINTS_PER_FLAG: u32 = 50;
pub const FLAG_COUNT: u32 = 10;
pub const STARTING_LIVES: u32 = 3;
pub const GAME_SECONDS: f32 = 120.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    TimeUp,
    OutOfLives,
    AllFlagsComplete,
}

impl EndReason {
    pub fn message(&self) -> &'static str {
        match self {
            EndReason::TimeUp => "Time's Up!",
            EndReason::OutOfLives => "Out of Lives!",
            EndReason::AllFlagsComplete => "All Flags Complete!",
        }
    }
}

#[derive(Debug, Clone)]
pub struct SewingRun {
    score: u32,
    flags_done: u32,
    lives: u32,
    time_left: f32,
    paused: bool,
    ended: Option<EndReason>,
}

impl SewingRun {
    pub fn new() -> Self {
        Self {
            score: 0,
            flags_done: 0,
            lives: STARTING_LIVES,
            time_left: GAME_SECONDS,
            paused: false,
            ended: None,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn flags_done(&self) -> u32 {
        self.flags_done
    }

    pub fn time_left(&self) -> f32 {
        self.time_left
    }

    pub fn ended(&self) -> Option<EndReason> {
        self.ended
    }

    pub fn is_active(&self) -> bool {
        self.ended.is_none()
    }

    /// The timer stops while a finished flag animates away
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Advance the clock by `dt` seconds
    pub fn tick(&mut self, dt: f32) {
        if !self.is_active() || self.paused {
            return;
        }
        self.time_left -= dt;
        if self.time_left <= 0.0 {
            self.time_left = 0.0;
            self.ended = Some(EndReason::TimeUp);
        }
    }

    pub fn flag_completed(&mut self) {
        if !self.is_active() {
            return;
        }
        self.score += POINTS_PER_FLAG;
        self.flags_done += 1;
        if self.flags_done >= FLAG_COUNT {
            self.ended = Some(EndReason::AllFlagsComplete);
        }
    }

    /// A red needle was hit
    pub fn lose_life(&mut self) {
        if !self.is_active() {
            return;
        }
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            self.ended = Some(EndReason::OutOfLives);
        }
    }

    pub fn finish(&self) -> Option<MinigameResult> {
        self.ended.map(|reason| {
            MinigameResult::new(
                GameId::Flag,
                self.score,
                reason == EndReason::AllFlagsComplete,
            )
        })
    }
}

impl Default for SewingRun {
    fn default() -> Self {
        Self::new()
    }
}
