//! Scripted minigame runs, standing in for the real game screens

use hunt_core::minigame::cards::{MatchingCards, Phase};
use hunt_core::minigame::puzzle::{Pos, SlidingPuzzle};
use hunt_core::minigame::runner::{RunnerRun, MAX_LIVES};
use hunt_core::minigame::sewing::{SewingRun, FLAG_COUNT};
use hunt_core::minigame::trivia::{TriviaQuiz, QUESTIONS_PER_GAME};
use hunt_core::{Catalog, GameId, MinigameResult, Result, ShuffleRng};

/// Play `game` to the end with a perfect player
pub fn autoplay(game: GameId, catalog: &Catalog, rng: &mut ShuffleRng) -> Result<MinigameResult> {
    let result = match game {
        GameId::Flag => {
            let mut run = SewingRun::new();
            for _ in 0..FLAG_COUNT {
                run.tick(4.0);
                run.flag_completed();
            }
            run.finish()
        }
        GameId::Trivia => {
            let mut quiz = TriviaQuiz::new(&catalog.questions, QUESTIONS_PER_GAME, rng);
            while let Some(question) = quiz.current() {
                let answer = question.correct;
                let graded = quiz.answer(Some(answer), 9.5)?;
                println!("  +{} {}", graded.points, graded.explanation);
            }
            println!("  {}", quiz.rank());
            quiz.finish()
        }
        GameId::Adventure => {
            let mut run = RunnerRun::new();
            for _ in 0..MAX_LIVES {
                run.tick(20.0);
                run.hit_obstacle();
            }
            run.finish()
        }
        GameId::Restore => {
            let mut puzzle = SlidingPuzzle::new();
            puzzle.slide(Pos::new(1, 2))?;
            puzzle.slide(Pos::new(2, 2))?;
            puzzle.finish(42.0)
        }
        GameId::Flavors => {
            let mut cards = MatchingCards::new(rng);
            loop {
                while let Some(first) = cards.cards().iter().position(|c| !c.matched) {
                    let pair = cards.cards()[first].pair;
                    let second = cards
                        .cards()
                        .iter()
                        .enumerate()
                        .position(|(i, c)| i != first && c.pair == pair && !c.matched);
                    cards.flip(first)?;
                    if let Some(second) = second {
                        cards.flip(second)?;
                    }
                }
                if cards.phase() != Phase::BatchCleared {
                    break;
                }
                cards.next_batch(rng)?;
            }
            cards.finish()
        }
    };
    // Every scripted run above reaches its end state
    Ok(result.unwrap_or(MinigameResult::new(game, 0, false)))
}
