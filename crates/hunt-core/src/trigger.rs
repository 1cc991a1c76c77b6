//! Minigame triggers and reward rules
//!
//! Scanning a trigger item unlocks one minigame and the item's area, exactly
//! once. The unlock flags double as the dedup record: a second scan of the
//! same item finds the game flag already set and resolves to nothing, so no
//! popup or unlock request fires twice.

use crate::error::Result;
use crate::flags::UnlockFlag;
use crate::game::GameId;
use crate::identity::{AreaPrefix, ItemId};
use crate::store::UnlockStore;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::info;

/// What a scan newly unlocked
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    pub minigame: Option<GameId>,
    pub area: Option<AreaPrefix>,
}

impl Resolution {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_none(&self) -> bool {
        self.minigame.is_none() && self.area.is_none()
    }
}

/// An item granted when a minigame is won, optionally above a score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreReward {
    pub game: GameId,
    pub item: ItemId,
    /// Minimum final score; `None` means any win
    #[serde(default)]
    pub min_score: Option<u32>,
}

impl ScoreReward {
    pub fn applies(&self, game: GameId, score: u32) -> bool {
        self.game == game && self.min_score.map_or(true, |min| score >= min)
    }
}

/// Trigger item -> minigame map plus score reward rules
#[derive(Debug, Clone, Default)]
pub struct TriggerTable {
    pub triggers: IndexMap<ItemId, GameId>,
    pub score_rewards: Vec<ScoreReward>,
}

impl TriggerTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_trigger(&mut self, item: impl Into<ItemId>, game: GameId) {
        self.triggers.insert(item.into(), game);
    }

    pub fn add_reward(&mut self, reward: ScoreReward) {
        self.score_rewards.push(reward);
    }

    pub fn game_for(&self, item: &ItemId) -> Option<GameId> {
        self.triggers.get(item).copied()
    }

    /// The item that unlocks `game`
    pub fn trigger_for(&self, game: GameId) -> Option<&ItemId> {
        self.triggers
            .iter()
            .find_map(|(item, g)| (*g == game).then_some(item))
    }

    /// Unlock the minigame and area behind `item`, once.
    pub fn resolve<S: UnlockStore + ?Sized>(
        &self,
        item: &ItemId,
        store: &mut S,
    ) -> Result<Resolution> {
        let Some(game) = self.game_for(item) else {
            return Ok(Resolution::none());
        };
        unlock_game(game, item.area_prefix(), store)
    }

    /// Grant the rewards for a won minigame. Each reward is handed out at most
    /// once no matter how often the game is won.
    pub fn award<S: UnlockStore + ?Sized>(
        &self,
        game: GameId,
        score: u32,
        store: &mut S,
    ) -> Result<Vec<ItemId>> {
        let mut granted = Vec::new();
        for reward in self.score_rewards.iter().filter(|r| r.applies(game, score)) {
            let flag = UnlockFlag::Reward(reward.item.clone());
            if store.is_unlocked(&flag)? {
                continue;
            }
            store.mark_unlocked(&[flag])?;
            info!(%game, score, item = %reward.item, "reward granted");
            granted.push(reward.item.clone());
        }
        Ok(granted)
    }

    /// Apply unlocks the server knows about but this device missed, e.g. a
    /// trigger scanned on another phone.
    ///
    /// A trigger counts as owned only when a whole server id equals its
    /// canonical id or `server_id(item)`, ignoring case. Another item whose
    /// name merely contains the trigger's never unlocks its game.
    pub fn reconcile<S, O, F>(
        &self,
        owned: &[O],
        server_id: F,
        store: &mut S,
    ) -> Result<Vec<Resolution>>
    where
        S: UnlockStore + ?Sized,
        O: AsRef<str>,
        F: Fn(&ItemId) -> String,
    {
        let mut applied = Vec::new();
        for (item, game) in &self.triggers {
            let server = server_id(item);
            let owns = owned.iter().map(AsRef::as_ref).any(|id| {
                id.eq_ignore_ascii_case(item.as_str()) || id.eq_ignore_ascii_case(&server)
            });
            if !owns {
                continue;
            }
            let resolution = unlock_game(*game, item.area_prefix(), store)?;
            if !resolution.is_none() {
                applied.push(resolution);
            }
        }
        Ok(applied)
    }
}

fn unlock_game<S: UnlockStore + ?Sized>(
    game: GameId,
    area: AreaPrefix,
    store: &mut S,
) -> Result<Resolution> {
    let game_flag = UnlockFlag::Game(game);
    if store.is_unlocked(&game_flag)? {
        return Ok(Resolution::none());
    }
    store.mark_unlocked(&[game_flag, UnlockFlag::Area(area.clone())])?;
    info!(%game, %area, "minigame unlocked");
    Ok(Resolution {
        minigame: Some(game),
        area: Some(area),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use pretty_assertions::assert_eq;

    fn table() -> TriggerTable {
        let mut table = TriggerTable::new();
        table.add_trigger("MAR_Sewing", GameId::Flag);
        table.add_trigger("BAS_Basilica", GameId::Trivia);
        table.add_reward(ScoreReward {
            game: GameId::Flavors,
            item: "MKT_Empanadas".into(),
            min_score: None,
        });
        table.add_reward(ScoreReward {
            game: GameId::Flavors,
            item: "MKT_Longganisa".into(),
            min_score: Some(1500),
        });
        table
    }

    #[test]
    fn test_resolve_unlocks_game_and_area_once() {
        let table = table();
        let mut store = MemoryStore::new();
        let item = ItemId::new("MAR_Sewing");

        let first = table.resolve(&item, &mut store).unwrap();
        assert_eq!(
            first,
            Resolution {
                minigame: Some(GameId::Flag),
                area: Some("MAR".into()),
            }
        );
        assert!(store.is_unlocked(&UnlockFlag::Game(GameId::Flag)).unwrap());
        assert!(store.is_unlocked(&UnlockFlag::Area("MAR".into())).unwrap());

        let flags_before = store.unlocked_flags().unwrap();
        let second = table.resolve(&item, &mut store).unwrap();
        assert!(second.is_none());
        assert_eq!(store.unlocked_flags().unwrap(), flags_before);
    }

    #[test]
    fn test_resolve_non_trigger_item() {
        let table = table();
        let mut store = MemoryStore::new();
        let res = table.resolve(&ItemId::new("MAR_Vase"), &mut store).unwrap();
        assert!(res.is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_award_below_threshold() {
        let table = table();
        let mut store = MemoryStore::new();
        let granted = table.award(GameId::Flavors, 1499, &mut store).unwrap();
        assert_eq!(granted, vec![ItemId::new("MKT_Empanadas")]);
    }

    #[test]
    fn test_award_at_threshold_once_each() {
        let table = table();
        let mut store = MemoryStore::new();
        let granted = table.award(GameId::Flavors, 1500, &mut store).unwrap();
        assert_eq!(
            granted,
            vec![ItemId::new("MKT_Empanadas"), ItemId::new("MKT_Longganisa")]
        );

        assert!(table.award(GameId::Flavors, 1500, &mut store).unwrap().is_empty());
        assert!(table.award(GameId::Flavors, 9000, &mut store).unwrap().is_empty());
    }

    #[test]
    fn test_award_other_game_grants_nothing() {
        let table = table();
        let mut store = MemoryStore::new();
        assert!(table.award(GameId::Trivia, 5000, &mut store).unwrap().is_empty());
    }

    #[test]
    fn test_reconcile_from_server_ids() {
        let table = table();
        let mut store = MemoryStore::new();

        let applied = table
            .reconcile(&["basilica", "stoup"], ItemId::database_id, &mut store)
            .unwrap();
        assert_eq!(applied.len(), 1);
        assert_eq!(applied[0].minigame, Some(GameId::Trivia));
        assert!(store.is_unlocked(&UnlockFlag::Area("BAS".into())).unwrap());

        assert!(table
            .reconcile(&["BASILICA"], ItemId::database_id, &mut store)
            .unwrap()
            .is_empty());

        let applied = table
            .reconcile(&["MAR_Sewing"], ItemId::database_id, &mut store)
            .unwrap();
        assert_eq!(applied[0].minigame, Some(GameId::Flag));
    }

    #[test]
    fn test_reconcile_ignores_partial_matches() {
        let mut table = TriggerTable::new();
        table.add_trigger("APA_House", GameId::Adventure);
        let mut store = MemoryStore::new();

        for owned in [["house"], ["marcelahouse"], ["apacible"]] {
            let applied = table
                .reconcile(&owned, |_| "apaciblehouse".to_string(), &mut store)
                .unwrap();
            assert!(applied.is_empty(), "{owned:?}");
        }
        assert!(store.is_empty());

        let applied = table
            .reconcile(&["ApacibleHouse"], |_| "apaciblehouse".to_string(), &mut store)
            .unwrap();
        assert_eq!(applied[0].area, Some("APA".into()));
    }

    #[test]
    fn test_trigger_for() {
        let table = table();
        assert_eq!(table.trigger_for(GameId::Flag), Some(&ItemId::new("MAR_Sewing")));
        assert_eq!(table.trigger_for(GameId::Restore), None);
    }
}
