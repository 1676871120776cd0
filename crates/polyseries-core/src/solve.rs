//! SVD-based least-squares solve.
//!
//! The fitting routines treat the solver as an injected collaborator: given
//! a design matrix, a target, and a relative rank cutoff, return the
//! minimum-norm solution together with residuals, numerical rank, and the
//! singular values. Small singular values are zeroed in the pseudo-inverse,
//! not inverted, so rank-deficient systems still solve.

use crate::error::{Result, SeriesError};
use crate::types::Coefficient;
use nalgebra::DMatrix;
use num_traits::{One, Zero};

/// Outcome of a least-squares solve.
#[derive(Debug, Clone)]
pub struct LstsqResult<T: Coefficient> {
    /// Minimum-norm solution, one column per target column.
    pub solution: DMatrix<T>,
    /// Squared residual norm per target column. Populated only for
    /// full-rank overdetermined systems; empty otherwise.
    pub residuals: Vec<T::RealField>,
    /// Numerical rank of the design matrix at the given cutoff.
    pub rank: usize,
    /// Singular values of the design matrix, descending.
    pub singular_values: Vec<T::RealField>,
}

/// Solve `min ||a x - b||_2` for every column of `b`.
///
/// `rcond` is the relative rank cutoff: singular values at or below
/// `rcond * sigma_max` are treated as zero.
///
/// # Errors
///
/// [`SeriesError::ShapeMismatch`] when `a` and `b` disagree on row count;
/// [`SeriesError::SolverFailed`] when the SVD does not produce both factors.
pub fn lstsq<T: Coefficient>(
    a: &DMatrix<T>,
    b: &DMatrix<T>,
    rcond: T::RealField,
) -> Result<LstsqResult<T>> {
    if a.nrows() != b.nrows() {
        return Err(SeriesError::shape_mismatch(
            format!("{} rows", a.nrows()),
            format!("{} rows", b.nrows()),
        ));
    }

    let svd = a.clone().svd(true, true);
    let u = svd
        .u
        .ok_or_else(|| SeriesError::solver_failed("SVD produced no U factor"))?;
    let v_t = svd
        .v_t
        .ok_or_else(|| SeriesError::solver_failed("SVD produced no V^H factor"))?;
    let sv = svd.singular_values;

    let sigma_max = sv
        .iter()
        .cloned()
        .fold(T::RealField::zero(), |acc, s| if s > acc { s } else { acc });
    let cutoff = rcond * sigma_max;
    let rank = sv.iter().filter(|&&s| s > cutoff).count();

    // x = V Σ⁺ Uᴴ b, with small singular values dropped.
    let mut ut_b = u.ad_mul(b);
    for i in 0..sv.len() {
        let factor = if sv[i] > cutoff {
            T::from_real(T::RealField::one() / sv[i])
        } else {
            T::zero()
        };
        for j in 0..ut_b.ncols() {
            ut_b[(i, j)] *= factor;
        }
    }
    let solution = v_t.ad_mul(&ut_b);

    // Residuals follow the numpy convention: only meaningful when the
    // system is overdetermined and full rank.
    let mut residuals = Vec::new();
    if rank == a.ncols() && a.nrows() > a.ncols() {
        for j in 0..b.ncols() {
            let xj = solution.column(j).into_owned();
            let r = b.column(j).into_owned() - a * xj;
            residuals.push(r.norm_squared());
        }
    }

    Ok(LstsqResult {
        solution,
        residuals,
        rank,
        singular_values: sv.iter().cloned().collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn rcond_default(n: usize) -> f64 {
        n as f64 * f64::EPSILON
    }

    #[test]
    fn test_exact_square_system() {
        let a = DMatrix::from_row_slice(2, 2, &[1.0, 1.0, 1.0, 2.0]);
        let b = DMatrix::from_column_slice(2, 1, &[3.0, 5.0]);
        let out = lstsq(&a, &b, rcond_default(2)).unwrap();
        assert_eq!(out.rank, 2);
        assert!(out.residuals.is_empty());
        assert_relative_eq!(out.solution[(0, 0)], 1.0, epsilon = 1e-12);
        assert_relative_eq!(out.solution[(1, 0)], 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_overdetermined_consistent() {
        // Points on the line y = 1 + 2x: zero residual, full rank.
        let a = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0]);
        let b = DMatrix::from_column_slice(3, 1, &[1.0, 3.0, 5.0]);
        let out = lstsq(&a, &b, rcond_default(3)).unwrap();
        assert_eq!(out.rank, 2);
        assert_eq!(out.residuals.len(), 1);
        assert_relative_eq!(out.residuals[0], 0.0, epsilon = 1e-20);
        assert_relative_eq!(out.solution[(0, 0)], 1.0, epsilon = 1e-12);
        assert_relative_eq!(out.solution[(1, 0)], 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_overdetermined_inconsistent_residual() {
        // 4x2 system with a closed-form line fit: slope 1.4, intercept 3.5.
        let a = DMatrix::from_row_slice(
            4,
            2,
            &[1.0, 1.0, 1.0, 2.0, 1.0, 3.0, 1.0, 4.0],
        );
        let b = DMatrix::from_column_slice(4, 1, &[6.0, 5.0, 7.0, 10.0]);
        let out = lstsq(&a, &b, rcond_default(4)).unwrap();
        assert_eq!(out.rank, 2);
        assert_relative_eq!(out.solution[(0, 0)], 3.5, epsilon = 1e-10);
        assert_relative_eq!(out.solution[(1, 0)], 1.4, epsilon = 1e-10);
        assert_relative_eq!(out.residuals[0], 4.2, epsilon = 1e-10);
    }

    #[test]
    fn test_rank_deficient_system_still_solves() {
        // Second column is twice the first.
        let a = DMatrix::from_row_slice(3, 2, &[1.0, 2.0, 2.0, 4.0, 3.0, 6.0]);
        let b = DMatrix::from_column_slice(3, 1, &[5.0, 10.0, 15.0]);
        let out = lstsq(&a, &b, rcond_default(3)).unwrap();
        assert_eq!(out.rank, 1);
        assert!(out.residuals.is_empty());
        // The minimum-norm solution still reproduces b.
        let back = &a * &out.solution;
        for i in 0..3 {
            assert_relative_eq!(back[(i, 0)], b[(i, 0)], epsilon = 1e-10);
        }
    }

    #[test]
    fn test_row_count_mismatch() {
        let a = DMatrix::<f64>::zeros(3, 2);
        let b = DMatrix::<f64>::zeros(4, 1);
        assert!(matches!(
            lstsq(&a, &b, rcond_default(3)),
            Err(SeriesError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_zero_matrix_has_rank_zero() {
        let a = DMatrix::<f64>::zeros(3, 2);
        let b = DMatrix::from_column_slice(3, 1, &[1.0, 2.0, 3.0]);
        let out = lstsq(&a, &b, rcond_default(3)).unwrap();
        assert_eq!(out.rank, 0);
        assert_relative_eq!(out.solution[(0, 0)], 0.0);
        assert_relative_eq!(out.solution[(1, 0)], 0.0);
    }
}
