use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building a resource tree.
///
/// Reads from an existing tree report `std::io::Error` instead, so callers
/// can attach their own context to the failure.
#[derive(Debug, Error)]
pub enum VfsError {
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("invalid bundle path: {0:?}")]
    InvalidPath(String),

    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
