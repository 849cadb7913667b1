//! Forwarder error types.

use thiserror::Error;

pub type ForwarderResult<T> = Result<T, ForwarderError>;

#[derive(Debug, Error)]
pub enum ForwarderError {
    #[error("HTTP client build failed: {0}")]
    Client(#[from] reqwest::Error),

    #[error("invalid forwarder config: {0}")]
    InvalidConfig(String),
}
