//! Error types for hunt-script

use thiserror::Error;

/// Content loading error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("RON parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),

    #[error("Duplicate definition: {0}")]
    DuplicateDefinition(String),

    #[error("Invalid content: {0}")]
    Invalid(#[from] hunt_core::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
