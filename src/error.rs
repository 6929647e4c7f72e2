//! Error types for lineup search.

use crate::models::SlotKind;
use crate::validation::ValidationError;

/// Errors raised by lineup construction, genetic operators, and the search driver.
#[derive(Debug, thiserror::Error)]
pub enum LineupError {
    /// Slot index outside `0..LINEUP_SIZE`.
    #[error("Slot index {index} out of range (lineup has {size} slots)")]
    SlotOutOfRange { index: usize, size: usize },

    /// No candidate outside the lineup could be drawn for a slot.
    ///
    /// Raised when a position pool is smaller than the number of slots that
    /// need distinct occupants of that position.
    #[error("Pool exhausted for slot {slot} ({kind}) after {attempts} draw(s)")]
    PoolExhausted {
        slot: usize,
        kind: SlotKind,
        attempts: usize,
    },

    /// The search has not produced a feasible lineup yet.
    #[error("No result available: search has not completed a feasible generation")]
    NotReady,

    /// Search configuration is unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Candidate pools failed validation.
    #[error("Invalid candidate pools: {} problem(s)", .0.len())]
    InvalidPools(Vec<ValidationError>),

    /// The candidate source failed to load.
    #[error("Candidate source error: {0}")]
    Source(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Result alias for lineup operations.
pub type Result<T> = std::result::Result<T, LineupError>;
