//! Series normalization: canonical trimmed coefficient sequences.
//!
//! A series is an ordered coefficient sequence, lowest degree first. The
//! canonical form has no trailing zero coefficient, except that the zero
//! polynomial is the single-element sequence `[0]`. Every other module in
//! this crate consumes series produced here.

use crate::error::{Result, SeriesError};
use crate::types::Coefficient;
use num_traits::Zero;

/// Returns the longest prefix of `seq` whose last element is nonzero.
///
/// If every element is zero, the one-element prefix is returned (so the
/// zero polynomial keeps its single coefficient). The result is a subslice
/// of the input: the element type is preserved exactly, and any `T` with a
/// zero test works, numeric or not.
///
/// Idempotent: `trim_seq(trim_seq(c)) == trim_seq(c)`.
pub fn trim_seq<T: Zero>(seq: &[T]) -> &[T] {
    match seq.iter().rposition(|c| !c.is_zero()) {
        Some(i) => &seq[..=i],
        None => &seq[..seq.len().min(1)],
    }
}

/// Canonicalize a coefficient sequence into a fresh owned series.
///
/// Fails with [`SeriesError::EmptySeries`] on empty input. When `trim` is
/// true, trailing zeros are removed. The returned vector never aliases
/// caller-owned storage.
pub fn as_series<T: Coefficient>(c: &[T], trim: bool) -> Result<Vec<T>> {
    if c.is_empty() {
        return Err(SeriesError::empty_series("coefficient array"));
    }
    if trim {
        Ok(trim_seq(c).to_vec())
    } else {
        Ok(c.to_vec())
    }
}

/// Canonicalize a batch of coefficient sequences.
///
/// Each input is normalized independently with [`as_series`]; the first
/// empty input aborts the whole batch. The original's common-dtype
/// promotion is subsumed by the shared type parameter.
pub fn as_series_all<T: Coefficient>(inputs: &[&[T]], trim: bool) -> Result<Vec<Vec<T>>> {
    inputs.iter().map(|c| as_series(c, trim)).collect()
}

/// Remove small trailing coefficients from a series.
///
/// "Small" means absolute value (modulus, for complex scalars) no greater
/// than `tol`. The highest-index coefficient with `|c[i]| > tol` ends the
/// returned series; if no coefficient exceeds `tol`, a single zero of the
/// same scalar type is returned.
///
/// # Errors
///
/// [`SeriesError::NegativeTolerance`] if `tol < 0`, and
/// [`SeriesError::EmptySeries`] if `c` is empty.
pub fn trim_coef<T: Coefficient>(c: &[T], tol: T::RealField) -> Result<Vec<T>> {
    if tol < T::RealField::zero() {
        return Err(SeriesError::negative_tolerance(tol));
    }
    let c = as_series(c, true)?;
    match c.iter().rposition(|v| v.modulus() > tol) {
        Some(i) => Ok(c[..=i].to_vec()),
        None => Ok(vec![T::zero()]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Complex;

    #[test]
    fn test_trim_seq_removes_trailing_zeros() {
        assert_eq!(trim_seq(&[1.0, 2.0, 0.0, 0.0]), &[1.0, 2.0]);
        assert_eq!(trim_seq(&[1.0, 2.0, 3.0]), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_trim_seq_all_zero_keeps_one_element() {
        assert_eq!(trim_seq(&[0.0, 0.0, 0.0]), &[0.0]);
        assert_eq!(trim_seq::<f64>(&[]), &[] as &[f64]);
    }

    #[test]
    fn test_trim_seq_idempotent() {
        let c = [0.0, 3.0, 0.0, 5.0, 0.0];
        let once = trim_seq(&c);
        assert_eq!(trim_seq(once), once);
    }

    #[test]
    fn test_trim_seq_preserves_integer_elements() {
        // Non-float element types survive untouched.
        let c: [i64; 4] = [4, 0, 7, 0];
        assert_eq!(trim_seq(&c), &[4, 0, 7]);
    }

    #[test]
    fn test_as_series_rejects_empty() {
        assert!(matches!(
            as_series::<f64>(&[], true),
            Err(SeriesError::EmptySeries { .. })
        ));
    }

    #[test]
    fn test_as_series_trim_flag() {
        assert_eq!(as_series(&[2.0, 1.1, 0.0], true).unwrap(), vec![2.0, 1.1]);
        assert_eq!(
            as_series(&[2.0, 1.1, 0.0], false).unwrap(),
            vec![2.0, 1.1, 0.0]
        );
    }

    #[test]
    fn test_as_series_all() {
        let out = as_series_all(&[&[2.0][..], &[1.1, 0.0][..]], true).unwrap();
        assert_eq!(out, vec![vec![2.0], vec![1.1]]);
    }

    #[test]
    fn test_trim_coef_default_tolerance() {
        let out = trim_coef(&[0.0, 0.0, 3.0, 0.0, 5.0, 0.0, 0.0], 0.0).unwrap();
        assert_eq!(out, vec![0.0, 0.0, 3.0, 0.0, 5.0]);
    }

    #[test]
    fn test_trim_coef_tolerance_is_inclusive() {
        // An element exactly equal to tol is trimmed.
        let out = trim_coef(&[0.0, 0.0, 1e-3, 0.0, 1e-5, 0.0, 0.0], 1e-3).unwrap();
        assert_eq!(out, vec![0.0]);
    }

    #[test]
    fn test_trim_coef_complex() {
        let i = Complex::new(0.0, 1.0);
        let c = [
            Complex::new(3e-4, 0.0),
            (Complex::new(1.0, 0.0) - i) * 1e-3,
            Complex::new(5e-4, 0.0),
            (Complex::new(1.0, 0.0) + i) * 2e-5,
        ];
        let out = trim_coef(&c, 1e-3).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[1], (Complex::new(1.0, 0.0) - i) * 1e-3);
    }

    #[test]
    fn test_trim_coef_negative_tolerance() {
        assert!(matches!(
            trim_coef(&[1.0], -1.0),
            Err(SeriesError::NegativeTolerance { .. })
        ));
    }
}
