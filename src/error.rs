//! Error types for chained maps.

use thiserror::Error;

/// Errors raised by map operations.
///
/// Maps that accept every mutation (`HashMap`, `BTreeMap`, [`ChainedMap`](crate::ChainedMap))
/// never produce these themselves; they only pass through what a backing layer returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    /// A mutating call reached a map that only supports reads.
    #[error("Unsupported operation on read-only map: {operation}")]
    Unsupported { operation: &'static str },
}

impl ChainError {
    pub(crate) fn unsupported(operation: &'static str) -> Self {
        ChainError::Unsupported { operation }
    }
}

/// Result type for map operations.
pub type Result<T> = std::result::Result<T, ChainError>;
