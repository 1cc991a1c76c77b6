//! Apacible's Adventure endless runner
//!
//! Score grows with distance survived; three obstacle hits end the run.

use super::MinigameResult;
use crate::game::GameId;

pub const MAX_LIVES: u32 = 3;
pub const SCORE_PER_SECOND: f32 = 10.0;
pub const START_SPEED: f32 = 6.0;
pub const SPEED_RAMP: f32 = 0.5;

#[derive(Debug, Clone)]
pub struct RunnerRun {
    elapsed: f32,
    speed: f32,
    lives: u32,
}

impl RunnerRun {
    pub fn new() -> Self {
        Self {
            elapsed: 0.0,
            speed: START_SPEED,
            lives: MAX_LIVES,
        }
    }

    pub fn is_over(&self) -> bool {
        self.lives == 0
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn tick(&mut self, dt: f32) {
        if self.is_over() {
            return;
        }
        self.elapsed += dt;
        self.speed += SPEED_RAMP * dt;
    }

    pub fn hit_obstacle(&mut self) {
        self.lives = self.lives.saturating_sub(1);
    }

    pub fn score(&self) -> u32 {
        (self.elapsed * SCORE_PER_SECOND).floor() as u32
    }

    /// A run always ends in a crash; the score is what counts
    pub fn finish(&self) -> Option<MinigameResult> {
        self.is_over()
            .then(|| MinigameResult::new(GameId::Adventure, self.score(), true))
    }
}

impl Default for RunnerRun {
    fn default() -> Self {
        Self::new()
    }
}
