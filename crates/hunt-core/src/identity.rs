//! Identity types for items, areas and users

use serde::{Deserialize, Serialize};
use std::fmt;

/// Derive the area prefix of a canonical id: everything before the first `_`.
///
/// Ids without an underscore are their own prefix.
pub fn derive_area_prefix(id: &str) -> &str {
    match id.split_once('_') {
        Some((prefix, _)) => prefix,
        None => id,
    }
}

/// Canonical identifier of a discoverable artifact, `"<AreaPrefix>_<Name>"`
///
/// Independent of the tag the recognition SDK reports for the marker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    /// Create a new item ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The area this item belongs to
    pub fn area_prefix(&self) -> AreaPrefix {
        AreaPrefix::new(derive_area_prefix(&self.0))
    }

    /// The id with its area prefix stripped (`"MAR_Sewing"` -> `"Sewing"`)
    pub fn core_name(&self) -> &str {
        match self.0.split_once('_') {
            Some((_, rest)) => rest,
            None => &self.0,
        }
    }

    /// The id the web backend stores for this item (`"MAR_Sewing"` -> `"sewing"`)
    pub fn database_id(&self) -> String {
        self.core_name().to_lowercase()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Short code of a physical site (`"BAS"`, `"MAR"`, ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AreaPrefix(pub String);

impl AreaPrefix {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self(prefix.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AreaPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AreaPrefix {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Backend user id. Zero is never a valid logged-in user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u32);

impl UserId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn raw(&self) -> u32 {
        self.0
    }

    /// Key of the "intro already shown" flag for this user
    pub fn intro_key(&self) -> String {
        format!("HasSeenIntro_{}", self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
