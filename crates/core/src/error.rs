//! Unified error type for Docket.
//!
//! A decode failure on load ([`Error::Corrupted`]) is deliberately a
//! distinct variant from file I/O failure ([`Error::Io`]): the former means
//! the backing file held bytes that are not a store mapping, the latter
//! that the bytes could not be read or written at all.

use std::path::PathBuf;

use thiserror::Error;

/// All Docket errors.
#[derive(Debug, Error)]
pub enum Error {
    /// The backing file exists but could not be decoded as a store mapping.
    ///
    /// The undecodable file has been renamed to a `.corrupt` sibling so its
    /// bytes survive for manual recovery; opening again starts empty.
    #[error("corrupted store file {path}: {source}")]
    Corrupted {
        /// Path of the backing file that failed to decode.
        path: PathBuf,
        /// The underlying decode failure.
        #[source]
        source: serde_json::Error,
    },

    /// Reading or writing the backing file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The in-memory mapping could not be encoded for persistence.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// A document payload was rejected at the write boundary.
    #[error("invalid document: {0}")]
    InvalidDocument(String),
}

/// Result type for Docket operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this is a corrupt-backing-file load failure.
    pub fn is_corrupted(&self) -> bool {
        matches!(self, Error::Corrupted { .. })
    }

    /// Check if this error came from file I/O.
    pub fn is_io(&self) -> bool {
        matches!(self, Error::Io(_))
    }

    /// Check if this is a write-boundary rejection.
    pub fn is_invalid_document(&self) -> bool {
        matches!(self, Error::InvalidDocument(_))
    }
}
