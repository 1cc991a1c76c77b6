//! Hunt Script - RON content loader
//!
//! Loads the hunt's static tables from RON files:
//! - Scanner tag normalization
//! - Story chapters and their lore
//! - Minigame triggers and score rewards
//! - Areas shown on the progress screen
//! - Trivia questions
//!
//! The built-in Taal content ships inside the crate, see [`builtin`].

mod error;
mod loader;
mod schema;

pub use error::{Error, Result};
pub use loader::{builtin, Loader};
pub use schema::{ContentFile, TriggerDef};
