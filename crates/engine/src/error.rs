//! The module contains the errors the engine can return.
//!
//! Allocation functions only fail on invalid input:
//!
//! - [`InvalidAmount`] for negative totals/overrides or unparsable amounts.
//! - [`UnknownParticipant`] when an id is not part of the roster.
//!
//! An empty active set is **not** an error: the split functions return the
//! participants unchanged. The remaining variants come from
//! [`ExpenseDraft::finalize`], which is where "select at least one
//! participant" surfaces.
//!
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`UnknownParticipant`]: EngineError::UnknownParticipant
//!  [`ExpenseDraft::finalize`]: crate::ExpenseDraft::finalize
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("\"{0}\" participant not found!")]
    UnknownParticipant(String),
    #[error("Invalid expense: {0}")]
    InvalidExpense(String),
    #[error("No active participants: {0}")]
    NoActiveParticipants(String),
    #[error("Unbalanced split: {0}")]
    UnbalancedSplit(String),
    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),
}
