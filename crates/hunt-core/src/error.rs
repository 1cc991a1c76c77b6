//! Error types for hunt-core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown game id: {0}")]
    UnknownGame(String),

    #[error("Invalid unlock flag key: {0}")]
    InvalidFlag(String),

    #[error("Invalid move: {0}")]
    InvalidMove(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
