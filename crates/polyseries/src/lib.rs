//! Polynomial series utilities.
//!
//! This facade crate re-exports the series machinery from
//! [`polyseries_core`]: trimmed coefficient sequences, affine domain maps,
//! basis-generic arithmetic, N-dimensional Vandermonde systems,
//! least-squares fitting, and tensor evaluation, generic over real and
//! complex scalars.
//!
//! # Example
//!
//! ```
//! use polyseries::prelude::*;
//!
//! let basis = PowerBasis;
//! let x: Vec<f64> = (0..20).map(|i| -1.0 + 0.1 * i as f64).collect();
//! let y: Vec<f64> = x.iter().map(|&v| 1.0 - 2.0 * v + 0.5 * v * v).collect();
//! let out = fit(&basis, &x, &y, &Degrees::full(2), &FitOptions::default()).unwrap();
//! assert!((out.coefficients[1] + 2.0).abs() < 1e-8);
//! ```

pub use polyseries_core::{arith, basis, domain, error, eval, fit, series, solve, tensor, types, vander};

pub use polyseries_core::{ChebyshevBasis, Coefficient, PolyBasis, PowerBasis, Result, SeriesError};

// Re-export the linear-algebra backend for downstream type annotations.
pub use nalgebra;

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use polyseries::prelude::*;
/// ```
pub mod prelude {
    pub use polyseries_core::prelude::*;
}
