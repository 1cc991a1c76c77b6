//! Profile, intro and snapshot rows.

use hunt_core::{Profile, ProgressSnapshot, UserId};
use native_db::*;
use native_model::{native_model, Model};
use serde::{Deserialize, Serialize};

pub const PROFILE_ROW: &str = "profile";
pub const SNAPSHOT_ROW: &str = "snapshot";

/// Logged-in player. Single row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 2, version = 1)]
#[native_db]
pub struct StoredProfile {
    /// Always "profile".
    #[primary_key]
    pub id: String,
    pub user_id: u32,
    pub email: String,
    pub player_name: String,
}

impl StoredProfile {
    pub fn from_profile(profile: &Profile) -> Self {
        Self {
            id: PROFILE_ROW.to_string(),
            user_id: profile.user_id.raw(),
            email: profile.email.clone(),
            player_name: profile.player_name.clone(),
        }
    }

    pub fn to_profile(&self) -> Profile {
        Profile::new(
            UserId::new(self.user_id),
            self.email.clone(),
            self.player_name.clone(),
        )
    }
}

/// Marks that a user has already been shown the intro story.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 3, version = 1)]
#[native_db]
pub struct StoredIntroSeen {
    /// `HasSeenIntro_<user id>`
    #[primary_key]
    pub key: String,
}

impl StoredIntroSeen {
    pub fn for_user(user: UserId) -> Self {
        Self {
            key: user.intro_key(),
        }
    }
}

/// Last progress snapshot pulled from the server. Single row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 4, version = 1)]
#[native_db]
pub struct StoredSnapshot {
    /// Always "snapshot".
    #[primary_key]
    pub id: String,
    /// bincode-encoded `ProgressSnapshot`.
    pub data: Vec<u8>,
}

impl StoredSnapshot {
    pub fn from_snapshot(snapshot: &ProgressSnapshot) -> bincode::Result<Self> {
        Ok(Self {
            id: SNAPSHOT_ROW.to_string(),
            data: bincode::serialize(snapshot)?,
        })
    }

    pub fn to_snapshot(&self) -> bincode::Result<ProgressSnapshot> {
        bincode::deserialize(&self.data)
    }
}
