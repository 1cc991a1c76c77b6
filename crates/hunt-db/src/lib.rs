//! Hunt DB - local store using native_db
//!
//! Persists what the client keeps on the device between launches:
//! - Unlock flags (`HasUnlocked_*`)
//! - The logged-in profile and per-user intro flags
//! - The last progress snapshot pulled from the server

mod error;
mod models;
mod queries;
mod store;

pub use error::{Error, Result};
pub use store::Store;
