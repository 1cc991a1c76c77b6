//! Logged-in player profile

use crate::identity::UserId;
use serde::{Deserialize, Serialize};

/// Profile fields seeded from a successful login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: UserId,
    pub email: String,
    pub player_name: String,
}

impl Profile {
    pub fn new(user_id: UserId, email: impl Into<String>, player_name: impl Into<String>) -> Self {
        Self {
            user_id,
            email: email.into(),
            player_name: player_name.into(),
        }
    }

    pub fn intro_key(&self) -> String {
        self.user_id.intro_key()
    }
}
