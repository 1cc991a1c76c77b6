//! Hunt Core - unlock and progress state machine
//!
//! This crate holds the engine-free logic of The Hunt: Taal:
//! - Item, area and game identifiers (`ItemId`, `AreaPrefix`, `GameId`)
//! - The content catalog and raw scan tag normalization
//! - The chapter gate that decides whether a scan is allowed
//! - The trigger resolver that unlocks minigames and areas exactly once
//! - Area progress computed from a server snapshot
//! - Minigame scoring rules
//!
//! ## Storage
//!
//! Unlock flags go through the [`UnlockStore`] trait. [`MemoryStore`] is the
//! in-process implementation; `hunt-db` provides the persistent one.

mod catalog;
pub mod chapter;
mod error;
mod flags;
mod game;
mod identity;
pub mod minigame;
mod profile;
pub mod progress;
mod rng;
mod store;
pub mod trigger;

pub use catalog::{Area, Catalog, MarkerMapping, ServerIdMapping};
pub use chapter::{Chapter, ChapterGate, ChapterState, LoreFragment, ScanDecision};
pub use error::{Error, Result};
pub use flags::{FlagKind, UnlockFlag};
pub use game::GameId;
pub use identity::{derive_area_prefix, AreaPrefix, ItemId, UserId};
pub use minigame::MinigameResult;
pub use profile::Profile;
pub use progress::{AreaProgress, ProgressSnapshot};
pub use rng::ShuffleRng;
pub use store::{MemoryStore, UnlockStore};
pub use trigger::{Resolution, ScoreReward, TriggerTable};
