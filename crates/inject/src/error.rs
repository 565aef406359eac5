use std::{io, path::PathBuf};

/// Failures while rewriting a target file.
#[derive(Debug, thiserror::Error)]
pub enum InjectError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Only raised under [`MissingPolicy::Error`](crate::MissingPolicy::Error).
    #[error("environment variable {name} is not set (needed by {})", .path.display())]
    MissingVariable { name: String, path: PathBuf },
}

pub type Result<T> = std::result::Result<T, InjectError>;
