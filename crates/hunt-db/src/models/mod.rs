//! Database models for persistent storage.

mod flag;
mod profile;

pub use flag::*;
pub use profile::*;
