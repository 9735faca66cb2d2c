//! Error taxonomy for the gator CLI.
//!
//! `AppError` separates caller mistakes (usage, unknown command) from environment
//! failures (config file, database) and from lookups that came back empty. Sources
//! from `std::io`, `serde_json` and `sqlx` are held in `Arc` so the whole enum is `Clone`.

use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// The primary error enumeration for all application-specific errors.
#[derive(Error, Debug, Clone)]
pub enum AppError {
    /// Wrong argument count or shape for a command.
    #[error("usage: {0}")]
    Usage(String),

    /// The configuration file could not be located, read, decoded or written.
    #[error("config unavailable: {0}")]
    ConfigUnavailable(#[from] ConfigError),

    /// No handler is registered under the requested command name.
    #[error("command not found: {0}")]
    CommandNotFound(String),

    /// Error originating from the persistence backend (`sqlx`).
    #[error("{context}: {source}")]
    Persistence {
        context: String,
        source: Arc<sqlx::Error>,
    },

    /// The user named by `login` does not exist.
    #[error("couldn't find user: {0}")]
    UserNotFound(String),

    /// The backend step succeeded but the current user could not be recorded locally.
    #[error("couldn't set current user: {0}")]
    CurrentUser(Box<AppError>),
}

/// Failures of the configuration store.
#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    #[error("failed to get user home directory")]
    HomeDirUnavailable,

    #[error("failed to read config file from {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: Arc<std::io::Error>,
    },

    #[error("failed to decode config file {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        source: Arc<serde_json::Error>,
    },

    #[error("failed to encode config: {0}")]
    Encode(Arc<serde_json::Error>),

    #[error("failed to write config file to {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: Arc<std::io::Error>,
    },
}

impl AppError {
    /// Wraps a backend error with a short description of the failed operation.
    pub fn persistence(context: impl Into<String>, err: sqlx::Error) -> Self {
        AppError::Persistence {
            context: context.into(),
            source: Arc::new(err),
        }
    }
}

/// A specialized `Result` type using the application's `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
