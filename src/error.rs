//! Error types for the lexicon core

use crate::mt::MtError;

/// Errors surfaced by the lexicon service and store.
///
/// A lookup that finds nothing is not an error, and neither is a duplicate
/// import row: those show up in resolution flags and import counters.
#[derive(Debug, thiserror::Error)]
pub enum LexiconError {
    /// Malformed input rejected before any store mutation
    #[error("Validation error: {0}")]
    Validation(String),
    /// No entry with the given id
    #[error("Entry with ID {0} not found")]
    NotFound(u64),
    /// Reading or writing the backing file failed
    #[error("Storage error: {0}")]
    Storage(String),
    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
    /// The external translation capability failed outside an import batch
    #[error(transparent)]
    Translation(#[from] MtError),
}

/// Result type for lexicon operations
pub type LexiconResult<T> = Result<T, LexiconError>;
