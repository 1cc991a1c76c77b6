//! JSON bodies exchanged with the backend

use hunt_core::{Profile, UserId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user: Option<UserData>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserData {
    pub id: u32,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub username: String,
}

impl UserData {
    pub fn into_profile(self) -> Profile {
        Profile::new(UserId::new(self.id), self.email, self.username)
    }
}

/// Body of `/api/mobile-unlock`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnlockRequest {
    pub user_id: u32,
    pub marker_id: String,
}

/// Body of `/api/mobile-score`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreSubmission {
    pub user_id: u32,
    pub game_id: String,
    pub score: u32,
}

/// Body of `/api/mobile-get-progress`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProgressRequest {
    pub user_id: u32,
}

/// Error bodies carry at least a message
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
