//! Taal Trivia Quest

use super::MinigameResult;
use crate::error::{Error, Result};
use crate::game::GameId;
use crate::rng::ShuffleRng;
use serde::{Deserialize, Serialize};

pub const QUESTIONS_PER_GAME: usize = 10;
pub const BASE_POINTS: u32 = 100;
pub const SECONDS_PER_QUESTION: f32 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Answer {
    A,
    B,
    C,
}

/// One multiple-choice question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
    pub a: String,
    pub b: String,
    pub c: String,
    pub correct: Answer,
    #[serde(default)]
    pub explanation: String,
}

impl Question {
    pub fn option(&self, answer: Answer) -> &str {
        match answer {
            Answer::A => &self.a,
            Answer::B => &self.b,
            Answer::C => &self.c,
        }
    }
}

/// Feedback for one answered question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graded {
    pub correct: bool,
    pub correct_answer: Answer,
    pub points: u32,
    pub explanation: String,
}

/// A round of questions drawn from the pool
#[derive(Debug, Clone)]
pub struct TriviaQuiz {
    questions: Vec<Question>,
    index: usize,
    score: u32,
}

impl TriviaQuiz {
    /// Draw up to `count` distinct questions in random order
    pub fn new(pool: &[Question], count: usize, rng: &mut ShuffleRng) -> Self {
        Self {
            questions: rng.sample(pool, count),
            index: 0,
            score: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Zero-based number of the question on screen
    pub fn position(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&Question> {
        self.questions.get(self.index)
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_over(&self) -> bool {
        self.index >= self.questions.len()
    }

    /// Answer the current question. `None` is a timeout. A correct answer
    /// earns the base points plus 10 per whole second left on the clock.
    pub fn answer(&mut self, choice: Option<Answer>, seconds_left: f32) -> Result<Graded> {
        let question = self
            .questions
            .get(self.index)
            .ok_or_else(|| Error::InvalidMove("quiz is over".to_string()))?;

        let correct = choice == Some(question.correct);
        let points = if correct {
            let bonus = seconds_left.clamp(0.0, SECONDS_PER_QUESTION).floor() as u32 * 10;
            BASE_POINTS + bonus
        } else {
            0
        };
        let graded = Graded {
            correct,
            correct_answer: question.correct,
            points,
            explanation: question.explanation.clone(),
        };

        self.score += points;
        self.index += 1;
        Ok(graded)
    }

    /// Title shown on the result screen
    pub fn rank(&self) -> &'static str {
        rank_for(self.score)
    }

    pub fn finish(&self) -> Option<MinigameResult> {
        self.is_over()
            .then(|| MinigameResult::new(GameId::Trivia, self.score, true))
    }
}

pub fn rank_for(score: u32) -> &'static str {
    if score >= 2000 {
        "Trivia Master!"
    } else if score >= 1000 {
        "Great Knowledge!"
    } else {
        "Keep Learning!"
    }
}
