//! Static content tables

use crate::chapter::Chapter;
use crate::error::{Error, Result};
use crate::identity::{AreaPrefix, ItemId};
use crate::minigame::trivia::Question;
use crate::store::UnlockStore;
use crate::trigger::{Resolution, TriggerTable};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// One row of the normalization table: raw scanner tag -> canonical item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerMapping {
    pub tag: String,
    pub item: ItemId,
}

/// An item whose backend id is not the one derived from its name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerIdMapping {
    pub item: ItemId,
    pub id: String,
}

/// A physical site and every item that can be collected there
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    pub prefix: AreaPrefix,
    pub name: String,
    #[serde(default)]
    pub items: Vec<ItemId>,
}

/// Everything defined at build time: markers, chapters, triggers, areas and
/// trivia questions
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Raw scanner tag -> canonical id
    pub markers: IndexMap<String, ItemId>,
    /// Backend id overrides, see [`Catalog::server_id`]
    pub server_ids: IndexMap<ItemId, String>,
    /// Story chapters in play order
    pub chapters: Vec<Chapter>,
    /// Minigame triggers and score rewards
    pub triggers: TriggerTable,
    /// Sites shown on the progress screen, in display order
    pub areas: Vec<Area>,
    /// Trivia question pool
    pub questions: Vec<Question>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map a raw scanner tag to its canonical id.
    ///
    /// Unmapped tags pass through unchanged so new targets still work before
    /// the table learns about them.
    pub fn normalize(&self, raw_tag: &str) -> ItemId {
        self.markers
            .get(raw_tag)
            .cloned()
            .unwrap_or_else(|| ItemId::new(raw_tag))
    }

    pub fn add_marker(&mut self, tag: impl Into<String>, item: impl Into<ItemId>) {
        self.markers.insert(tag.into(), item.into());
    }

    /// The id the backend records for `item`: an explicit override, else
    /// [`ItemId::database_id`]
    pub fn server_id(&self, item: &ItemId) -> String {
        self.server_ids
            .get(item)
            .cloned()
            .unwrap_or_else(|| item.database_id())
    }

    /// Apply trigger unlocks for items a server snapshot shows as owned
    pub fn reconcile<S, O>(&self, owned: &[O], store: &mut S) -> Result<Vec<Resolution>>
    where
        S: UnlockStore + ?Sized,
        O: AsRef<str>,
    {
        self.triggers
            .reconcile(owned, |item| self.server_id(item), store)
    }

    /// Every item mentioned anywhere in the tables
    pub fn items(&self) -> IndexSet<&ItemId> {
        let mut items: IndexSet<&ItemId> = self.markers.values().collect();
        items.extend(self.chapters.iter().flat_map(|c| c.fragments.iter().map(|f| &f.item)));
        items.extend(self.areas.iter().flat_map(|a| a.items.iter()));
        items.extend(self.triggers.triggers.keys());
        items.extend(self.triggers.score_rewards.iter().map(|r| &r.item));
        items
    }

    pub fn area(&self, prefix: &AreaPrefix) -> Option<&Area> {
        self.areas.iter().find(|a| &a.prefix == prefix)
    }

    pub fn area_by_name(&self, name: &str) -> Option<&Area> {
        self.areas.iter().find(|a| a.name == name)
    }

    /// Check the tables are usable. An empty chapter table is a startup
    /// configuration error rather than something each scan reports.
    pub fn validate(&self) -> Result<()> {
        if self.chapters.is_empty() {
            return Err(Error::Config("chapter table is empty".to_string()));
        }
        for chapter in &self.chapters {
            if chapter.fragments.is_empty() {
                return Err(Error::Config(format!(
                    "chapter '{}' has no required items",
                    chapter.title
                )));
            }
        }

        // Trigger and reward ids become flag keys next to area and game keys
        let flagged = self
            .triggers
            .triggers
            .keys()
            .chain(self.triggers.score_rewards.iter().map(|r| &r.item));
        for item in flagged {
            let prefix = item.area_prefix();
            if prefix.as_str() == item.as_str()
                || item.core_name().is_empty()
                || prefix.as_str() == "GAME"
            {
                return Err(Error::Config(format!(
                    "'{item}' must be written as <AREA>_<Name>"
                )));
            }
        }

        // A trigger is recognised in server snapshots by its id alone
        let items = self.items();
        for trigger in self.triggers.triggers.keys() {
            let id = self.server_id(trigger).to_lowercase();
            if let Some(other) = items
                .iter()
                .find(|other| *other != &trigger && self.server_id(other).to_lowercase() == id)
            {
                return Err(Error::Config(format!(
                    "trigger '{trigger}' shares server id '{id}' with '{other}'"
                )));
            }
        }
        Ok(())
    }
}
