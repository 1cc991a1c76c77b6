//! Error types for sync calls

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The request never got a response (DNS, TLS, refused, timeout)
    #[error("Connection failed: {0}")]
    Connection(String),

    /// The server answered with a non-2xx status
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// 2xx response whose body did not match the expected shape
    #[error("Could not decode response: {0}")]
    Decode(String),

    /// The server answered 2xx but refused the login
    #[error("Login rejected: {0}")]
    Rejected(String),

    /// The session was closed before the request finished
    #[error("Request cancelled")]
    Cancelled,

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Error::Decode(err.to_string())
        } else {
            Error::Connection(err.to_string())
        }
    }
}
