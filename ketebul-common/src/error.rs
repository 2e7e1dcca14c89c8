//! Common error types for Ketebul

use thiserror::Error;

/// Common result type for Ketebul operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the site crates
#[derive(Error, Debug)]
pub enum Error {
    /// Transport-level failure talking to the content store (wraps reqwest::Error)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Content store answered with a non-success status
    #[error("Content store returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body or a record in it could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// True for the failures a page should present as "failed to load"
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, Error::Http(_) | Error::Status { .. } | Error::Parse(_))
    }
}
