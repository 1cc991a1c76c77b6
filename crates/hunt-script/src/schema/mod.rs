//! Schema definitions for RON content files

pub mod trigger;

pub use trigger::TriggerDef;

use hunt_core::minigame::trivia::Question;
use hunt_core::{Area, Chapter, MarkerMapping, ScoreReward, ServerIdMapping};
use serde::{Deserialize, Serialize};

/// One content file. Every section is optional so content can be split
/// across files, e.g. one file per site.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentFile {
    #[serde(default)]
    pub markers: Vec<MarkerMapping>,
    #[serde(default)]
    pub server_ids: Vec<ServerIdMapping>,
    #[serde(default)]
    pub chapters: Vec<Chapter>,
    #[serde(default)]
    pub triggers: Vec<TriggerDef>,
    #[serde(default)]
    pub score_rewards: Vec<ScoreReward>,
    #[serde(default)]
    pub areas: Vec<Area>,
    #[serde(default)]
    pub questions: Vec<Question>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sections_default_to_empty() {
        let file: ContentFile = ron::from_str("(markers: [(tag: \"t\", item: \"BAS_Stoup\")])").unwrap();
        assert_eq!(file.markers.len(), 1);
        assert!(file.chapters.is_empty());
        assert!(file.questions.is_empty());
    }
}
