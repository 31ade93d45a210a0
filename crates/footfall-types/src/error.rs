//! Error types for footfall.

use thiserror::Error;

/// Result type alias for resource estimation.
pub type Result<T> = std::result::Result<T, EstimateError>;

/// Errors produced by the resource calculator.
///
/// There is exactly one kind: the caller supplied a footfall that cannot be
/// planned for. Nothing is retried and no partial plan is returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EstimateError {
    /// Footfall was negative, non-finite, non-numeric or out of range.
    #[error("Invalid footfall: {reason}")]
    InvalidInput {
        /// Why the value was rejected.
        reason: InvalidFootfall,
    },
}

impl EstimateError {
    /// Returns the rejection reason.
    #[must_use]
    pub const fn reason(&self) -> InvalidFootfall {
        match self {
            Self::InvalidInput { reason } => *reason,
        }
    }
}

impl From<InvalidFootfall> for EstimateError {
    fn from(reason: InvalidFootfall) -> Self {
        Self::InvalidInput { reason }
    }
}

/// Reason a footfall value was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidFootfall {
    /// Value is below zero.
    #[error("must not be negative")]
    Negative,

    /// Value is NaN or infinite.
    #[error("must be a finite number")]
    NonFinite,

    /// Value could not be read as a number at all.
    #[error("must be a number")]
    NonNumeric,

    /// Value is larger than the planner supports.
    #[error("must not exceed 1e12 visitors")]
    TooLarge,
}

/// Error for prediction requests rejected before reaching the ML service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// No location was given.
    #[error("Missing required field: location")]
    MissingLocation,

    /// Month outside 1..=12.
    #[error("Month must be between 1 and 12, got {0}")]
    InvalidMonth(u32),
}
