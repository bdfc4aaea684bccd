use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the quiz controller
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuizError {
    #[error("cannot start a quiz without any shortcuts")]
    EmptySet,
}

/// Errors raised while looking up shortcut sets
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("unknown shortcut set '{0}'")]
    UnknownSet(String),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid shortcut set {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
}
