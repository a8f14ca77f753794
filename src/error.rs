// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AlertError {
    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("could not locate the nr_nrql_alerts block in {path}")]
    BlockNotFound { path: PathBuf },

    #[error("could not parse nr_nrql_alerts contents in {path}")]
    ParseFailed { path: PathBuf },

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("git error: {0}")]
    Git(String),
}

pub type Result<T> = std::result::Result<T, AlertError>;

impl AlertError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AlertError::Io {
            source,
            path: path.into(),
        }
    }
}

// Allow `?` on std::io::Error by converting to AlertError::Io with unknown path.
impl From<std::io::Error> for AlertError {
    fn from(source: std::io::Error) -> Self {
        AlertError::Io {
            source,
            path: PathBuf::from("<unknown>"),
        }
    }
}
