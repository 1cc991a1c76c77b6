//! Story chapters and the scan gate
//!
//! Chapters are played in order. Each one requires a set of items; the first
//! chapter whose items are not all owned is the active one, everything before
//! it is complete and everything after it is locked. Scanning an item that
//! belongs to a locked chapter is refused.

use crate::error::{Error, Result};
use crate::identity::ItemId;
use crate::progress::owns_loosely;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A piece of lore unlocked by owning one item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoreFragment {
    /// The item that reveals this fragment
    pub item: ItemId,
    /// Lore text
    #[serde(default)]
    pub text: String,
}

impl LoreFragment {
    pub fn new(item: impl Into<ItemId>, text: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            text: text.into(),
        }
    }
}

/// An ordered narrative unit tied to one site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    /// Sequence number
    pub id: u32,
    pub title: String,
    /// Name of the site, matches `Area::name`
    pub location: String,
    /// Required items, one fragment each
    pub fragments: Vec<LoreFragment>,
}

impl Chapter {
    pub fn new(
        id: u32,
        title: impl Into<String>,
        location: impl Into<String>,
        fragments: Vec<LoreFragment>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            location: location.into(),
            fragments,
        }
    }

    /// Whether every required item shows up in `owned`
    pub fn is_complete<S: AsRef<str>>(&self, owned: &[S]) -> bool {
        self.fragments
            .iter()
            .all(|f| owns_loosely(owned, f.item.core_name()))
    }

    /// Whether any fragment matches `id` (either contains the other)
    fn mentions(&self, id: &str) -> bool {
        self.fragments
            .iter()
            .any(|f| id.contains(f.item.as_str()) || f.item.as_str().contains(id))
    }
}

/// Where a chapter stands relative to the player's progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChapterState {
    Complete,
    Active,
    Locked,
}

/// Answer to "may this item be scanned now?"
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanDecision {
    Allowed,
    Locked {
        /// Index of the chapter the item belongs to
        chapter: usize,
        /// Human-readable explanation for the player
        message: String,
    },
}

impl ScanDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, ScanDecision::Allowed)
    }

    /// Empty when allowed
    pub fn reason(&self) -> &str {
        match self {
            ScanDecision::Allowed => "",
            ScanDecision::Locked { message, .. } => message,
        }
    }
}

/// Chapter progression state machine
#[derive(Debug, Clone)]
pub struct ChapterGate {
    chapters: Vec<Chapter>,
    /// Index of the active chapter; `chapters.len()` once all are complete
    current: usize,
}

impl ChapterGate {
    /// Create a gate with the first chapter active.
    pub fn new(chapters: Vec<Chapter>) -> Result<Self> {
        if chapters.is_empty() {
            return Err(Error::Config("chapter table is empty".to_string()));
        }
        Ok(Self {
            chapters,
            current: 0,
        })
    }

    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    /// Index of the active chapter, equal to the chapter count when the
    /// story is finished
    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn active_chapter(&self) -> Option<&Chapter> {
        self.chapters.get(self.current)
    }

    pub fn is_finished(&self) -> bool {
        self.current >= self.chapters.len()
    }

    pub fn state(&self, index: usize) -> Option<ChapterState> {
        if index >= self.chapters.len() {
            return None;
        }
        Some(match index.cmp(&self.current) {
            std::cmp::Ordering::Less => ChapterState::Complete,
            std::cmp::Ordering::Equal => ChapterState::Active,
            std::cmp::Ordering::Greater => ChapterState::Locked,
        })
    }

    pub fn is_unlocked(&self, index: usize) -> bool {
        matches!(
            self.state(index),
            Some(ChapterState::Complete | ChapterState::Active)
        )
    }

    /// Recompute progress from a fresh list of owned ids.
    ///
    /// Walks from the first chapter and stops at the first incomplete one, so
    /// a snapshot showing less progress than before moves the gate back.
    pub fn refresh<S: AsRef<str>>(&mut self, owned: &[S]) {
        let previous = self.current;
        self.current = self
            .chapters
            .iter()
            .position(|c| !c.is_complete(owned))
            .unwrap_or(self.chapters.len());
        if previous != self.current {
            debug!(from = previous, to = self.current, "chapter progress changed");
        }
    }

    /// Index of the first chapter with a fragment matching `id`
    pub fn chapter_of(&self, id: &str) -> Option<usize> {
        self.chapters.iter().position(|c| c.mentions(id))
    }

    pub fn chapter_for_location(&self, location: &str) -> Option<&Chapter> {
        self.chapters.iter().find(|c| c.location == location)
    }

    /// Items outside every chapter are never gated.
    pub fn is_scan_allowed(&self, id: &str) -> ScanDecision {
        let Some(target) = self.chapter_of(id) else {
            return ScanDecision::Allowed;
        };
        if target <= self.current {
            return ScanDecision::Allowed;
        }
        // target > current implies current is a valid index
        let blocking = &self.chapters[self.current];
        ScanDecision::Locked {
            chapter: target,
            message: format!("Locked! Complete '{}' first.", blocking.title),
        }
    }

    /// Fragments of a chapter paired with whether the player can read them
    pub fn fragment_status<'a, S: AsRef<str>>(
        &'a self,
        index: usize,
        owned: &[S],
    ) -> Vec<(&'a LoreFragment, bool)> {
        self.chapters
            .get(index)
            .map(|c| {
                c.fragments
                    .iter()
                    .map(|f| (f, owns_loosely(owned, f.item.core_name())))
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn chapter(id: u32, title: &str, items: &[&str]) -> Chapter {
        Chapter::new(
            id,
            title,
            format!("{title} Site"),
            items.iter().map(|i| LoreFragment::new(*i, "")).collect(),
        )
    }

    fn gate() -> ChapterGate {
        ChapterGate::new(vec![
            chapter(1, "Sentinel", &["BAS_Basilica", "BAS_Jesus", "BAS_Stoup"]),
            chapter(2, "Revolution", &["MAR_Sewing", "MAR_Drawer", "MAR_Vase"]),
            chapter(3, "Weaver", &["APA_Sumbrero", "APA_Leon"]),
            chapter(4, "Elder", &["MKT_Empanadas", "MKT_Longganisa"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_initial_state() {
        let gate = gate();
        assert_eq!(gate.current_index(), 0);
        assert_eq!(gate.state(0), Some(ChapterState::Active));
        assert_eq!(gate.state(1), Some(ChapterState::Locked));
        assert_eq!(gate.state(9), None);
    }

    #[test]
    fn test_empty_table_is_config_error() {
        assert!(matches!(ChapterGate::new(vec![]), Err(Error::Config(_))));
    }

    #[test]
    fn test_gate_opens_chapter_by_chapter() {
        let mut gate = gate();
        let chapters = gate.chapters().to_vec();

        for k in 0..=chapters.len() {
            let owned: Vec<String> = chapters[..k]
                .iter()
                .flat_map(|c| c.fragments.iter().map(|f| f.item.to_string()))
                .collect();
            gate.refresh(&owned);
            assert_eq!(gate.current_index(), k);

            for (i, c) in chapters.iter().enumerate() {
                for f in &c.fragments {
                    let decision = gate.is_scan_allowed(f.item.as_str());
                    assert_eq!(decision.is_allowed(), i <= k, "chapter {i} with k={k}");
                }
            }
        }
        assert!(gate.is_finished());
        assert_eq!(gate.state(3), Some(ChapterState::Complete));
    }

    #[test]
    fn test_matching_is_case_insensitive_on_server_ids() {
        let mut gate = gate();
        gate.refresh(&["basilica", "basilicajesus", "STOUP"]);
        assert_eq!(gate.current_index(), 1);
    }

    #[test]
    fn test_regression_relocks_later_chapters() {
        let mut gate = gate();
        gate.refresh(&[
            "BAS_Basilica", "BAS_Jesus", "BAS_Stoup", "MAR_Sewing", "MAR_Drawer", "MAR_Vase",
        ]);
        assert_eq!(gate.current_index(), 2);

        gate.refresh(&["BAS_Basilica"]);
        assert_eq!(gate.current_index(), 0);
        assert_eq!(gate.state(2), Some(ChapterState::Locked));
        assert!(!gate.is_unlocked(1));
    }

    #[test]
    fn test_locked_message_names_active_chapter() {
        let gate = gate();
        let decision = gate.is_scan_allowed("APA_Leon");
        assert_eq!(
            decision,
            ScanDecision::Locked {
                chapter: 2,
                message: "Locked! Complete 'Sentinel' first.".to_string(),
            }
        );
        assert_eq!(decision.reason(), "Locked! Complete 'Sentinel' first.");
    }

    #[test]
    fn test_unknown_items_are_not_gated() {
        let gate = gate();
        let decision = gate.is_scan_allowed("LORE_Lighthouse");
        assert!(decision.is_allowed());
        assert_eq!(decision.reason(), "");
    }

    #[test]
    fn test_fragment_status() {
        let gate = gate();
        let status = gate.fragment_status(0, &["jesus"]);
        let readable: Vec<bool> = status.iter().map(|(_, r)| *r).collect();
        assert_eq!(readable, vec![false, true, false]);
        assert!(gate.fragment_status::<&str>(7, &[]).is_empty());
    }
}
