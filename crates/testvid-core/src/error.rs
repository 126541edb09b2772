//! Error type for a single fetch attempt.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Why one download failed. Callers of [`crate::fetch::fetch`] only ever see
/// this through the reporter; the batch never stops on it.
#[derive(Debug, Error)]
pub enum FetchError {
    /// libcurl reported a transport or addressing failure (bad URL, DNS,
    /// refused connection, body cut short, ...).
    #[error("{0}")]
    Transfer(#[from] curl::Error),

    /// The final response had a non-2xx status.
    #[error("HTTP Error {0}")]
    Http(u32),

    /// The body ended before the declared `Content-Length` was reached.
    #[error("incomplete body: expected {expected} bytes, received {received}")]
    Incomplete { expected: u64, received: u64 },

    /// Creating or writing the destination file failed.
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FetchError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        FetchError::Io {
            path: path.into(),
            source,
        }
    }
}
