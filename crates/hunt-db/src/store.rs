//! Database store wrapper.

use crate::error::{Error, Result};
use crate::models::*;
use hunt_core::{Profile, ProgressSnapshot, UnlockFlag, UnlockStore, UserId};
use native_db::*;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, warn};

// Static models for the database
static MODELS: LazyLock<Models> = LazyLock::new(|| {
    let mut models = Models::new();
    models.define::<StoredFlag>().unwrap();
    models.define::<StoredProfile>().unwrap();
    models.define::<StoredIntroSeen>().unwrap();
    models.define::<StoredSnapshot>().unwrap();
    models
});

/// On-device store for unlock flags, profile and cached progress.
pub struct Store {
    pub(crate) db: Database<'static>,
}

impl Store {
    /// Open or create a database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = Builder::new()
            .create(&MODELS, path.as_ref())
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(Self { db })
    }

    /// Create an in-memory database.
    pub fn in_memory() -> Result<Self> {
        let db = Builder::new()
            .create_in_memory(&MODELS)
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(Self { db })
    }

    /// Whether a flag row exists.
    pub fn has_flag(&self, flag: &UnlockFlag) -> Result<bool> {
        let r = self.db.r_transaction()?;
        let stored: Option<StoredFlag> = r.get().primary(flag.key())?;
        Ok(stored.is_some())
    }

    /// Write a batch of flags in a single transaction.
    pub fn set_flags(&self, flags: &[UnlockFlag]) -> Result<()> {
        if flags.is_empty() {
            return Ok(());
        }
        let rw = self.db.rw_transaction()?;
        for flag in flags {
            rw.upsert(StoredFlag::from_flag(flag))?;
        }
        rw.commit()?;
        debug!(count = flags.len(), "stored unlock flags");
        Ok(())
    }

    /// Load every flag row.
    pub fn all_flags(&self) -> Result<Vec<UnlockFlag>> {
        let r = self.db.r_transaction()?;
        let scan = r.scan().primary::<StoredFlag>()?;
        let iter = scan.all()?;
        let stored: std::result::Result<Vec<StoredFlag>, _> = iter.collect();
        let stored = stored.map_err(|e| Error::Database(e.to_string()))?;
        Ok(stored
            .iter()
            .filter_map(|s| {
                let flag = s.to_flag();
                if flag.is_none() {
                    warn!(key = %s.key, "skipping unreadable flag row");
                }
                flag
            })
            .collect())
    }

    /// Delete every flag row.
    pub fn clear_flag_rows(&self) -> Result<()> {
        let keys: Vec<String> = {
            let r = self.db.r_transaction()?;
            let scan = r.scan().primary::<StoredFlag>()?;
            let iter = scan.all()?;
            let stored: std::result::Result<Vec<StoredFlag>, _> = iter.collect();
            let stored = stored.map_err(|e| Error::Database(e.to_string()))?;
            stored.into_iter().map(|s| s.key).collect()
        };

        let rw = self.db.rw_transaction()?;
        for key in keys {
            if let Some(flag) = rw.get().primary::<StoredFlag>(key)? {
                rw.remove(flag)?;
            }
        }
        rw.commit()?;
        Ok(())
    }

    /// Save the logged-in profile.
    pub fn save_profile(&self, profile: &Profile) -> Result<()> {
        let rw = self.db.rw_transaction()?;
        rw.upsert(StoredProfile::from_profile(profile))?;
        rw.commit()?;
        Ok(())
    }

    /// Load the logged-in profile, `None` when logged out.
    pub fn load_profile(&self) -> Result<Option<Profile>> {
        let r = self.db.r_transaction()?;
        let stored: Option<StoredProfile> = r.get().primary(PROFILE_ROW.to_string())?;
        Ok(stored.map(|s| s.to_profile()))
    }

    /// Remember that this user has been shown the intro.
    pub fn mark_intro_seen(&self, user: UserId) -> Result<()> {
        let rw = self.db.rw_transaction()?;
        rw.upsert(StoredIntroSeen::for_user(user))?;
        rw.commit()?;
        Ok(())
    }

    pub fn has_seen_intro(&self, user: UserId) -> Result<bool> {
        let r = self.db.r_transaction()?;
        let stored: Option<StoredIntroSeen> = r.get().primary(user.intro_key())?;
        Ok(stored.is_some())
    }

    /// Cache the last snapshot pulled from the server.
    pub fn save_snapshot(&self, snapshot: &ProgressSnapshot) -> Result<()> {
        let stored = StoredSnapshot::from_snapshot(snapshot)?;
        let rw = self.db.rw_transaction()?;
        rw.upsert(stored)?;
        rw.commit()?;
        Ok(())
    }

    /// Load the cached snapshot.
    pub fn load_snapshot(&self) -> Result<Option<ProgressSnapshot>> {
        let r = self.db.r_transaction()?;
        let stored: Option<StoredSnapshot> = r.get().primary(SNAPSHOT_ROW.to_string())?;
        match stored {
            Some(s) => Ok(Some(s.to_snapshot()?)),
            None => Ok(None),
        }
    }

    /// Clear all data. Used on logout.
    pub fn clear(&self) -> Result<()> {
        self.clear_flag_rows()?;

        let intro_keys: Vec<String> = {
            let r = self.db.r_transaction()?;
            let scan = r.scan().primary::<StoredIntroSeen>()?;
            let iter = scan.all()?;
            let stored: std::result::Result<Vec<StoredIntroSeen>, _> = iter.collect();
            let stored = stored.map_err(|e| Error::Database(e.to_string()))?;
            stored.into_iter().map(|s| s.key).collect()
        };

        let rw = self.db.rw_transaction()?;

        for key in intro_keys {
            if let Some(intro) = rw.get().primary::<StoredIntroSeen>(key)? {
                rw.remove(intro)?;
            }
        }

        if let Some(profile) = rw.get().primary::<StoredProfile>(PROFILE_ROW.to_string())? {
            rw.remove(profile)?;
        }

        if let Some(snapshot) = rw.get().primary::<StoredSnapshot>(SNAPSHOT_ROW.to_string())? {
            rw.remove(snapshot)?;
        }

        rw.commit()?;
        debug!("local store cleared");
        Ok(())
    }
}

impl UnlockStore for Store {
    fn is_unlocked(&self, flag: &UnlockFlag) -> hunt_core::Result<bool> {
        Ok(self.has_flag(flag)?)
    }

    fn mark_unlocked(&mut self, flags: &[UnlockFlag]) -> hunt_core::Result<()> {
        Ok(self.set_flags(flags)?)
    }

    fn unlocked_flags(&self) -> hunt_core::Result<Vec<UnlockFlag>> {
        Ok(self.all_flags()?)
    }

    fn clear_flags(&mut self) -> hunt_core::Result<()> {
        Ok(self.clear_flag_rows()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hunt_core::{AreaPrefix, GameId, ItemId};
    use pretty_assertions::assert_eq;

    fn game_flags() -> Vec<UnlockFlag> {
        vec![
            UnlockFlag::Game(GameId::Flag),
            UnlockFlag::Area(AreaPrefix::new("MAR")),
        ]
    }

    #[test]
    fn test_unset_flag_reads_false() {
        let store = Store::in_memory().unwrap();
        assert!(!store.is_unlocked(&UnlockFlag::Game(GameId::Trivia)).unwrap());
        assert!(store.unlocked_flags().unwrap().is_empty());
    }

    #[test]
    fn test_batch_write_and_read_back() {
        let mut store = Store::in_memory().unwrap();
        store.mark_unlocked(&game_flags()).unwrap();

        assert!(store.is_unlocked(&UnlockFlag::Game(GameId::Flag)).unwrap());
        assert!(store
            .is_unlocked(&UnlockFlag::Area(AreaPrefix::new("MAR")))
            .unwrap());

        let mut keys: Vec<String> = store
            .unlocked_flags()
            .unwrap()
            .iter()
            .map(|f| f.key())
            .collect();
        keys.sort();
        assert_eq!(keys, vec!["HasUnlocked_GAME_FLAG", "HasUnlocked_MAR"]);
    }

    #[test]
    fn test_setting_twice_keeps_one_row() {
        let mut store = Store::in_memory().unwrap();
        store.mark_unlocked(&game_flags()).unwrap();
        store.mark_unlocked(&game_flags()).unwrap();
        assert_eq!(store.unlocked_flags().unwrap().len(), 2);
    }

    #[test]
    fn test_profile_and_intro() {
        let store = Store::in_memory().unwrap();
        assert!(store.load_profile().unwrap().is_none());

        let profile = Profile::new(UserId::new(42), "juan@example.com", "Juan");
        store.save_profile(&profile).unwrap();
        assert_eq!(store.load_profile().unwrap(), Some(profile));

        assert!(!store.has_seen_intro(UserId::new(42)).unwrap());
        store.mark_intro_seen(UserId::new(42)).unwrap();
        assert!(store.has_seen_intro(UserId::new(42)).unwrap());
        assert!(!store.has_seen_intro(UserId::new(7)).unwrap());
    }

    #[test]
    fn test_snapshot_round_trip() {
        let store = Store::in_memory().unwrap();
        assert!(store.load_snapshot().unwrap().is_none());

        let snapshot = ProgressSnapshot {
            unlocked_ids: vec!["sewing".into(), "basilica".into()],
            progress_value: 0.25,
        };
        store.save_snapshot(&snapshot).unwrap();
        assert_eq!(store.load_snapshot().unwrap(), Some(snapshot));
    }

    #[test]
    fn test_clear_wipes_everything() {
        let mut store = Store::in_memory().unwrap();
        store.mark_unlocked(&game_flags()).unwrap();
        store
            .mark_unlocked(&[UnlockFlag::Reward(ItemId::new("MKT_Empanadas"))])
            .unwrap();
        store
            .save_profile(&Profile::new(UserId::new(1), "a@b.c", "A"))
            .unwrap();
        store.mark_intro_seen(UserId::new(1)).unwrap();
        store
            .save_snapshot(&ProgressSnapshot::new(vec!["sewing".into()]))
            .unwrap();

        store.clear().unwrap();

        assert!(store.unlocked_flags().unwrap().is_empty());
        assert!(store.load_profile().unwrap().is_none());
        assert!(!store.has_seen_intro(UserId::new(1)).unwrap());
        assert!(store.load_snapshot().unwrap().is_none());
    }

    #[test]
    fn test_flags_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hunt.db");
        {
            let mut store = Store::open(&path).unwrap();
            store.mark_unlocked(&game_flags()).unwrap();
        }
        let store = Store::open(&path).unwrap();
        assert!(store.is_unlocked(&UnlockFlag::Game(GameId::Flag)).unwrap());
    }
}
