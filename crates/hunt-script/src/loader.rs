//! RON content loader

use crate::error::{Error, Result};
use crate::schema::ContentFile;
use hunt_core::Catalog;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::debug;

const BUILTIN_TAAL: &str = include_str!("../content/taal.ron");

/// Load the content that ships with the game
pub fn builtin() -> Result<Catalog> {
    let mut loader = Loader::new();
    loader.load_str(BUILTIN_TAAL)?;
    loader.finish()
}

/// Loader for RON content files
pub struct Loader {
    catalog: Catalog,
    chapter_ids: HashSet<u32>,
    questions: HashSet<String>,
}

impl Loader {
    /// Create a new loader
    pub fn new() -> Self {
        Self {
            catalog: Catalog::new(),
            chapter_ids: HashSet::new(),
            questions: HashSet::new(),
        }
    }

    /// Load a single RON file
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        debug!(path = %path.display(), "loading content file");
        self.load_str(&content)
    }

    /// Load content from a RON string and merge it into the catalog
    pub fn load_str(&mut self, content: &str) -> Result<()> {
        let file: ContentFile = ron::from_str(content)?;
        self.merge(file)
    }

    fn merge(&mut self, file: ContentFile) -> Result<()> {
        for marker in file.markers {
            if self.catalog.markers.contains_key(&marker.tag) {
                return Err(Error::DuplicateDefinition(format!("marker {}", marker.tag)));
            }
            self.catalog.add_marker(marker.tag, marker.item);
        }

        for mapping in file.server_ids {
            if self.catalog.server_ids.contains_key(&mapping.item) {
                return Err(Error::DuplicateDefinition(format!("server id of {}", mapping.item)));
            }
            self.catalog.server_ids.insert(mapping.item, mapping.id);
        }

        for chapter in file.chapters {
            if !self.chapter_ids.insert(chapter.id) {
                return Err(Error::DuplicateDefinition(format!("chapter {}", chapter.id)));
            }
            self.catalog.chapters.push(chapter);
        }

        for trigger in file.triggers {
            if self.catalog.triggers.triggers.contains_key(&trigger.item) {
                return Err(Error::DuplicateDefinition(format!("trigger {}", trigger.item)));
            }
            self.catalog.triggers.add_trigger(trigger.item, trigger.game);
        }

        for reward in file.score_rewards {
            if self.catalog.triggers.score_rewards.contains(&reward) {
                return Err(Error::DuplicateDefinition(format!(
                    "score reward {} for {}",
                    reward.item, reward.game
                )));
            }
            self.catalog.triggers.add_reward(reward);
        }

        for area in file.areas {
            if self.catalog.area(&area.prefix).is_some() {
                return Err(Error::DuplicateDefinition(format!("area {}", area.prefix)));
            }
            self.catalog.areas.push(area);
        }

        for question in file.questions {
            if !self.questions.insert(question.text.clone()) {
                return Err(Error::DuplicateDefinition(format!("question '{}'", question.text)));
            }
            self.catalog.questions.push(question);
        }

        Ok(())
    }

    /// Load all RON files from a directory, in file name order
    pub fn load_directory(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if !path.is_dir() {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Not a directory: {:?}", path),
            )));
        }

        let mut entries = fs::read_dir(path)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<std::io::Result<Vec<_>>>()?;
        entries.sort();

        for file_path in entries {
            if file_path.extension().map(|e| e == "ron").unwrap_or(false) {
                self.load_file(&file_path)?;
            } else if file_path.is_dir() {
                self.load_directory(&file_path)?;
            }
        }

        Ok(())
    }

    /// Finish loading. Chapters are put in play order and the catalog is
    /// validated.
    pub fn finish(mut self) -> Result<Catalog> {
        self.catalog.chapters.sort_by_key(|c| c.id);
        self.catalog.validate()?;
        debug!(
            markers = self.catalog.markers.len(),
            chapters = self.catalog.chapters.len(),
            triggers = self.catalog.triggers.triggers.len(),
            questions = self.catalog.questions.len(),
            "content loaded"
        );
        Ok(self.catalog)
    }

    /// Get the catalog loaded so far (for inspection during loading)
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}
