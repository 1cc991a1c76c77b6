//! Hunt Sync - client for The Hunt backend
//!
//! Every call is a single JSON POST. There is no retry and no offline queue:
//! a failed call is reported to the caller, who decides whether to log and
//! move on. The local store stays authoritative for unlock flags.

mod client;
mod config;
mod dispatch;
mod error;
pub mod login;
pub mod wire;

pub use client::{ApiClient, endpoints};
pub use config::ApiConfig;
pub use dispatch::Dispatcher;
pub use error::{Error, Result};
pub use login::login_failure_message;
pub use tokio_util::sync::CancellationToken;
