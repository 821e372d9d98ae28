//! errors.rs - Typed errors for the scoring core.
//!
//! The engine has no I/O, so the taxonomy is deliberately small: the only
//! failure mode is malformed numeric input caught at the boundary. All
//! retry/timeout/not-found concerns live with the collaborators that
//! supply the input data.

use thiserror::Error;

/// Errors returned by the scoring engine.
///
/// `#[non_exhaustive]` signals to consumers that new variants may be added
/// in future versions without a breaking change.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ScoreError {
    /// A numeric field failed boundary validation (NaN, infinite, or out
    /// of its declared range). No partial computation is performed.
    #[error("invalid input `{field}`: {reason}")]
    InvalidInput { field: String, reason: String },
}

impl ScoreError {
    pub(crate) fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
