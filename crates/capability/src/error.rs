//! Capability error types.

use thiserror::Error;

/// Errors from loading catalogs and capability records.
///
/// Resolution itself never fails; only reading and parsing input can.
/// This enum is marked `#[non_exhaustive]` to allow adding new variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Failed to parse a catalog or capabilities record.
    #[error("failed to parse capabilities: {0}")]
    Parse(String),

    /// An I/O error occurred while reading input.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
