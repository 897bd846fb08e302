//! Errors at the binary boundary.

use thiserror::Error;

/// Application-level failures that abort startup or a CLI command.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    #[error("failed to initialise logging: {0}")]
    Logging(String),

    #[error("could not open {url}: {message}")]
    Navigation { url: String, message: String },
}

/// Result alias for [`AppError`].
pub type AppResult<T> = Result<T, AppError>;
