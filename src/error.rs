//! Error taxonomy for construction and the two batch operations.
//!
//! Every error is raised synchronously, before any state mutation for the
//! failing call.  None of these are transient: a caller hitting one has an
//! integration bug (wrong shapes, missing selection), not a condition worth
//! retrying.

use thiserror::Error;

/// Errors raised by [`CalendarUcb`](crate::CalendarUcb).
#[derive(Debug, Error)]
pub enum BanditError {
    /// Construction rejected: the slot count must be positive.
    #[error("slot count must be positive")]
    InvalidSlotCount,

    /// Candidate and feature batches must have equal, non-zero lengths.
    #[error(
        "batch shape mismatch: {candidates} candidates vs {features} feature vectors \
         (need equal, non-zero counts)"
    )]
    BatchShape { candidates: usize, features: usize },

    /// A candidate arrangement does not assign exactly one event per slot.
    #[error("candidate {index} has {got} slots, expected {expected}")]
    SlotMismatch {
        index: usize,
        expected: usize,
        got: usize,
    },

    /// A feature vector's length differs from the engine dimensionality
    /// `d = |relevant events| × slot count`.
    #[error("feature vector {index} has length {got}, expected {expected}")]
    DimensionMismatch {
        index: usize,
        expected: usize,
        got: usize,
    },

    /// A reward was reported before any arrangement had been selected.
    #[error("no pending selection: select an arrangement before reporting a reward")]
    NoPendingSelection,

    /// The previously selected arrangement is absent from the supplied batch.
    /// The reward batch must still contain the arrangement the reward is for.
    #[error("previously selected arrangement not present in the candidate batch")]
    ActionNotFound,

    /// The design matrix failed inversion.  The identity prior plus
    /// outer-product increments keeps `A` positive definite, so this guards
    /// against floating-point degeneracy rather than a reachable state.
    #[error("design matrix for action {action} is numerically singular")]
    SingularMatrix { action: usize },
}
