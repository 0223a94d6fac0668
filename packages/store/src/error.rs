//! Error types for store operations.

use std::io;
use std::path::PathBuf;

/// Errors returned by [`Driver`](crate::Driver) operations.
///
/// Every error is returned to the immediate caller. The store never retries
/// and never terminates the process.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A collection or resource name was empty.
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// The collection or resource does not exist.
    #[error("unable to find file or directory named {path}")]
    NotFound { path: String },

    /// The root path exists but cannot hold a store.
    #[error("root path {path} is invalid: {error}")]
    RootPathInvalid { path: PathBuf, error: io::Error },

    /// An underlying filesystem call failed.
    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The value could not be serialized.
    #[error("failed to encode record: {source}")]
    Encode {
        #[source]
        source: serde_json::Error,
    },

    /// The stored bytes are not a well-formed record.
    #[error("failed to decode record at {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument { .. })
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, Error>;
