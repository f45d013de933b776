use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("corrupt record in {} at line {line}: {reason}", path.display())]
    Corrupt { path: PathBuf, line: u64, reason: String },
    #[error("encoding error: {0}")]
    Encode(String),
    #[error("id space exhausted after {last}")]
    IdOverflow { last: i64 },
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    /// Whether the caller sent something unacceptable, as opposed to a server-side failure.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Model(_))
    }
}
