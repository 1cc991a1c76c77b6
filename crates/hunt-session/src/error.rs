//! Session error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] hunt_core::Error),

    #[error(transparent)]
    Storage(#[from] hunt_db::Error),

    /// Login failed; the message is meant for the player
    #[error("{0}")]
    Login(String),
}

pub type Result<T> = std::result::Result<T, Error>;
