//! Persistence error types
//!
//! The simulation itself has no failure modes; only the statistics and
//! settings stores touch the outside world.

use std::fmt;

/// Failure reading or writing persisted data
#[derive(Debug)]
pub enum StoreError {
    /// Filesystem access failed
    Io(std::io::Error),
    /// Stored document could not be encoded or decoded
    Serde(serde_json::Error),
    /// Backing storage does not exist on this platform/session
    Unavailable(&'static str),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "storage I/O failed: {e}"),
            StoreError::Serde(e) => write!(f, "stored data is malformed: {e}"),
            StoreError::Unavailable(what) => write!(f, "{what} is unavailable"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            StoreError::Serde(e) => Some(e),
            StoreError::Unavailable(_) => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serde(e)
    }
}
