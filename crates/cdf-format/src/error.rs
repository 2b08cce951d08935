//! Error types for CDF file operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when reading or assembling CDF files.
#[derive(Debug, Error)]
pub enum CdfError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Input shorter than the two leading header words.
    #[error("file too small: {len} bytes (need at least {min})")]
    TooSmall { len: usize, min: usize },

    /// Magic word does not identify a CDF file (strict mode only).
    #[error("not a CDF file: magic {magic:#010x}")]
    NotCdf { magic: u32 },

    /// End of input reached in the middle of a field.
    #[error("truncated input at offset {offset}: need {needed} bytes, have {available}")]
    Truncated {
        offset: u64,
        needed: usize,
        available: usize,
    },

    /// No global descriptor record could be located.
    #[error("no global descriptor record (GDR) in file")]
    MissingGlobalDescriptor,

    /// A pointer chain did not terminate within the record count.
    #[error("{family} chain starting at offset {head} does not terminate (cycle suspected)")]
    CyclicChain { family: &'static str, head: u64 },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for CDF operations.
pub type Result<T> = std::result::Result<T, CdfError>;

impl CdfError {
    /// Create a Truncated error.
    pub fn truncated(offset: u64, needed: usize, available: usize) -> Self {
        Self::Truncated {
            offset,
            needed,
            available,
        }
    }

    /// Create a CyclicChain error.
    pub fn cyclic_chain(family: &'static str, head: u64) -> Self {
        Self::CyclicChain { family, head }
    }

    /// Whether this error is a structural corruption of the pointer graph.
    #[must_use]
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            Self::MissingGlobalDescriptor | Self::CyclicChain { .. } | Self::NotCdf { .. }
        )
    }
}
