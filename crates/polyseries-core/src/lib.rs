//! Core routines for polynomial series in arbitrary bases.
//!
//! This crate provides the shared machinery that concrete polynomial
//! classes are built from: coefficient-sequence normalization, affine
//! domain maps, basis-generic arithmetic kernels, N-dimensional Vandermonde
//! systems, least-squares fitting, and tensor evaluation. Coefficient
//! sequences use one convention throughout: index equals degree, lowest
//! degree first.
//!
//! # Key Concepts
//!
//! - **Series**: a coefficient sequence in some polynomial basis
//! - **Basis**: the family of polynomials the coefficients multiply,
//!   abstracted as [`basis::PolyBasis`]
//! - **Domain**: a two-point interval (or complex line segment) mapped
//!   affinely onto another before evaluation or fitting
//! - **Degree tensor**: an N-dimensional coefficient array indexed by
//!   per-axis degree
//!
//! # Modules
//!
//! - [`arith`]: basis-generic addition, division, powers, roots
//! - [`basis`]: the basis trait plus power and Chebyshev implementations
//! - [`domain`]: interval enclosure and affine domain maps
//! - [`error`]: error types for series operations
//! - [`eval`]: N-dimensional point and grid evaluation
//! - [`fit`]: least-squares coefficient fitting, 1-D and N-D
//! - [`series`]: trimming and normalization of coefficient sequences
//! - [`solve`]: the SVD least-squares solver behind the fits
//! - [`tensor`]: a minimal row-major N-dimensional container
//! - [`types`]: the scalar trait unifying real and complex coefficients
//! - [`vander`]: N-dimensional Vandermonde construction

pub mod arith;
pub mod basis;
pub mod domain;
pub mod error;
pub mod eval;
pub mod fit;
pub mod series;
pub mod solve;
pub mod tensor;
pub mod types;
pub mod vander;

// Re-export commonly used items at the crate root
pub use basis::{ChebyshevBasis, PolyBasis, PowerBasis};
pub use error::{Result, SeriesError};
pub use types::Coefficient;

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use polyseries_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::arith::{add, div, from_roots, pow, sub};
    pub use crate::basis::{ChebyshevBasis, PolyBasis, PowerBasis};
    pub use crate::domain::{get_domain, map_domain, map_parms};
    pub use crate::error::{Result, SeriesError};
    pub use crate::eval::{grid_nd, val_nd};
    pub use crate::fit::{
        fit, fit_multi, fit_nd, Degrees, DegreesNd, FitDiagnostics, FitMultiResult,
        FitNdOptions, FitNdResult, FitOptions, FitResult,
    };
    pub use crate::series::{as_series, as_series_all, trim_coef, trim_seq};
    pub use crate::solve::{lstsq, LstsqResult};
    pub use crate::tensor::{MultiIndexIter, Tensor};
    pub use crate::types::Coefficient;
    pub use crate::vander::{vander_nd, vander_nd_flat, VanderNd};
}
