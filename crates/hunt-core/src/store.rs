//! Unlock flag storage

use crate::error::Result;
use crate::flags::UnlockFlag;
use indexmap::IndexSet;

/// Persistent set of unlock flags
///
/// A flag that was never written reads as `false`. Once set it stays set
/// until the whole store is cleared on logout.
pub trait UnlockStore {
    /// Whether the flag has been set
    fn is_unlocked(&self, flag: &UnlockFlag) -> Result<bool>;

    /// Set a batch of flags. Implementations write the batch together where
    /// the backend allows it.
    fn mark_unlocked(&mut self, flags: &[UnlockFlag]) -> Result<()>;

    /// All flags currently set
    fn unlocked_flags(&self) -> Result<Vec<UnlockFlag>>;

    /// Forget every flag
    fn clear_flags(&mut self) -> Result<()>;
}

/// In-memory flag store, lost when dropped
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    flags: IndexSet<UnlockFlag>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

impl UnlockStore for MemoryStore {
    fn is_unlocked(&self, flag: &UnlockFlag) -> Result<bool> {
        Ok(self.flags.contains(flag))
    }

    fn mark_unlocked(&mut self, flags: &[UnlockFlag]) -> Result<()> {
        self.flags.extend(flags.iter().cloned());
        Ok(())
    }

    fn unlocked_flags(&self) -> Result<Vec<UnlockFlag>> {
        Ok(self.flags.iter().cloned().collect())
    }

    fn clear_flags(&mut self) -> Result<()> {
        self.flags.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameId;

    #[test]
    fn test_flag_round_trip_and_logout() {
        let mut store = MemoryStore::new();
        let flag = UnlockFlag::Game(GameId::Flag);

        assert!(!store.is_unlocked(&flag).unwrap());
        store.mark_unlocked(&[flag.clone()]).unwrap();
        assert!(store.is_unlocked(&flag).unwrap());

        store.clear_flags().unwrap();
        assert!(!store.is_unlocked(&flag).unwrap());
    }

    #[test]
    fn test_marking_twice_keeps_one_entry() {
        let mut store = MemoryStore::new();
        let flag = UnlockFlag::Area("BAS".into());
        store.mark_unlocked(&[flag.clone()]).unwrap();
        store.mark_unlocked(&[flag.clone()]).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.unlocked_flags().unwrap(), vec![flag]);
    }
}
