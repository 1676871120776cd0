//! Error types for series normalization, arithmetic, and fitting.
//!
//! This module defines the single error enum used throughout the library.
//! All argument-validation failures are reported immediately and carry enough
//! context to identify the offending argument. Numerical ill-conditioning is
//! deliberately *not* an error: a rank-deficient fit still returns its
//! coefficients, and the condition is surfaced through diagnostics or an
//! advisory log message instead.

use thiserror::Error;

/// Errors that can occur during series operations.
#[derive(Debug, Clone, Error)]
pub enum SeriesError {
    /// A coefficient or coordinate sequence was empty.
    ///
    /// Every series must contain at least one element; the zero polynomial
    /// is represented by `[0]`, never by an empty sequence.
    #[error("Empty sequence: {context}")]
    EmptySeries {
        /// Description of which input was empty
        context: String,
    },

    /// Two inputs that must share a shape did not.
    ///
    /// This error occurs when sample, weight, or coordinate arrays have
    /// incompatible lengths.
    #[error("Shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch {
        /// Expected shape or length
        expected: String,
        /// Actual shape or length
        actual: String,
    },

    /// Per-axis inputs disagree on the number of axes.
    ///
    /// Raised when the numbers of basis implementations, coordinate arrays,
    /// and degree entries are not all equal, or when zero axes are given.
    #[error("Axis count mismatch for {what}: expected {expected}, got {actual}")]
    AxisCountMismatch {
        /// Expected number of axes
        expected: usize,
        /// Actual number of axes
        actual: usize,
        /// Which argument disagreed
        what: String,
    },

    /// A degree specification was empty.
    #[error("Degree specification must be non-empty")]
    EmptyDegrees,

    /// A degree specification was otherwise invalid.
    #[error("Invalid degree specification: {reason}")]
    InvalidDegree {
        /// Description of the violation
        reason: String,
    },

    /// A trimming tolerance was negative.
    #[error("Tolerance must be non-negative, got {tol}")]
    NegativeTolerance {
        /// The offending tolerance, formatted for display
        tol: String,
    },

    /// A domain interval had coincident endpoints.
    ///
    /// The affine map between domains divides by the source interval length,
    /// so `old[0] == old[1]` is rejected up front.
    #[error("Degenerate domain: endpoints must differ")]
    DegenerateDomain,

    /// Polynomial division by a series whose leading coefficient is zero.
    #[error("Division by a series with zero leading coefficient")]
    DivisionByZero,

    /// A requested power exceeded the caller-supplied limit.
    #[error("Power {power} exceeds the maximum allowed power {maxpower}")]
    PowerTooLarge {
        /// Requested power
        power: usize,
        /// Maximum allowed power
        maxpower: usize,
    },

    /// The least-squares solver failed to produce a factorization.
    #[error("Least-squares solve failed: {reason}")]
    SolverFailed {
        /// Description of the solver failure
        reason: String,
    },
}

impl SeriesError {
    /// Create an EmptySeries error naming the offending input.
    pub fn empty_series<S: Into<String>>(context: S) -> Self {
        Self::EmptySeries {
            context: context.into(),
        }
    }

    /// Create a ShapeMismatch error.
    pub fn shape_mismatch<S1, S2>(expected: S1, actual: S2) -> Self
    where
        S1: std::fmt::Display,
        S2: std::fmt::Display,
    {
        Self::ShapeMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Create an AxisCountMismatch error for a named argument.
    pub fn axis_count_mismatch<S: Into<String>>(expected: usize, actual: usize, what: S) -> Self {
        Self::AxisCountMismatch {
            expected,
            actual,
            what: what.into(),
        }
    }

    /// Create an InvalidDegree error with a custom reason.
    pub fn invalid_degree<S: Into<String>>(reason: S) -> Self {
        Self::InvalidDegree {
            reason: reason.into(),
        }
    }

    /// Create a NegativeTolerance error from any displayable tolerance.
    pub fn negative_tolerance<S: std::fmt::Display>(tol: S) -> Self {
        Self::NegativeTolerance {
            tol: tol.to_string(),
        }
    }

    /// Create a SolverFailed error with a custom reason.
    pub fn solver_failed<S: Into<String>>(reason: S) -> Self {
        Self::SolverFailed {
            reason: reason.into(),
        }
    }
}

/// Result type alias for operations that can produce SeriesError.
pub type Result<T> = std::result::Result<T, SeriesError>;
