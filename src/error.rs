//! Error types for mailmind-client

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// No HTTP response was received (connect failure, timeout, or
    /// aborted connection) and the retry budget is exhausted.
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered with an error status. Never retried.
    #[error("request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    /// The server answered with a success status but the payload is
    /// missing an expected field or cannot be decoded.
    #[error("invalid response payload: {0}")]
    Payload(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Whether this error is eligible for automatic retry.
    ///
    /// Only failures where no response was received qualify; an error
    /// status or a bad payload came from the server and is final.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
