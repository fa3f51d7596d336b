//! Error types shared across the evaluation harness
//!
//! The transcript-analysis core itself is total (it returns defaults or
//! `Option` for degenerate inputs, never errors); these variants cover the
//! fallible edges around it - scenario loading, report output, the judge
//! transport.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Scenario error: {0}")]
    Scenario(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Judge error: {0}")]
    Judge(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
