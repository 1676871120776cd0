//! Affine maps between abscissa intervals.
//!
//! A domain is a two-element interval `[lo, hi]`, real or complex, used as
//! the source or target of an affine reparameterization `L(t) = offset +
//! scale * t`. Complex domains describe lines in the complex plane, so the
//! same machinery maps any line to any other line.

use crate::error::{Result, SeriesError};
use crate::types::Coefficient;
use num_traits::Zero;

/// Returns a domain enclosing the given abscissae.
///
/// Real inputs produce `[min(x), max(x)]`. Complex inputs produce the lower
/// left and upper right corners of the smallest axis-aligned rectangle in
/// the complex plane containing the points.
///
/// # Errors
///
/// [`SeriesError::EmptySeries`] if `x` is empty.
pub fn get_domain<T: Coefficient>(x: &[T]) -> Result<[T; 2]> {
    if x.is_empty() {
        return Err(SeriesError::empty_series("abscissa array"));
    }
    let (lo, hi) = T::enclose(x);
    Ok([lo, hi])
}

/// Parameters of the affine map sending `old` onto `new`.
///
/// Returns `(offset, scale)` such that `L(t) = offset + scale * t` maps
/// `old[0]` to `new[0]` and `old[1]` to `new[1]`.
///
/// # Errors
///
/// [`SeriesError::DegenerateDomain`] if `old[0] == old[1]` (the map divides
/// by the source interval length).
pub fn map_parms<T: Coefficient>(old: &[T; 2], new: &[T; 2]) -> Result<(T, T)> {
    let old_len = old[1] - old[0];
    if old_len.is_zero() {
        return Err(SeriesError::DegenerateDomain);
    }
    let new_len = new[1] - new[0];
    let offset = (old[1] * new[0] - old[0] * new[1]) / old_len;
    let scale = new_len / old_len;
    Ok((offset, scale))
}

/// Apply the affine map between two domains to every element of `x`.
///
/// The output has the same length and order as `x`.
///
/// # Errors
///
/// [`SeriesError::DegenerateDomain`] if `old` has coincident endpoints.
pub fn map_domain<T: Coefficient>(x: &[T], old: &[T; 2], new: &[T; 2]) -> Result<Vec<T>> {
    let (offset, scale) = map_parms(old, new)?;
    Ok(x.iter().map(|&v| offset + scale * v).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Complex;

    #[test]
    fn test_get_domain_real() {
        let d = get_domain(&[-5.0, -4.0, -1.0, 4.0]).unwrap();
        assert_eq!(d, [-5.0, 4.0]);
    }

    #[test]
    fn test_get_domain_complex_bounding_box() {
        let xs = [
            Complex::new(1.0, 1.0),
            Complex::new(-1.0, -1.0),
            Complex::new(0.5, -2.0),
        ];
        let d = get_domain(&xs).unwrap();
        assert_eq!(d[0], Complex::new(-1.0, -2.0));
        assert_eq!(d[1], Complex::new(1.0, 1.0));
    }

    #[test]
    fn test_get_domain_empty() {
        assert!(matches!(
            get_domain::<f64>(&[]),
            Err(SeriesError::EmptySeries { .. })
        ));
    }

    #[test]
    fn test_map_parms_identity() {
        let (off, scl) = map_parms(&[-1.0, 1.0], &[-1.0, 1.0]).unwrap();
        assert_eq!(off, 0.0);
        assert_eq!(scl, 1.0);
    }

    #[test]
    fn test_map_parms_flip() {
        let (off, scl) = map_parms(&[1.0, -1.0], &[-1.0, 1.0]).unwrap();
        assert_eq!(off, 0.0);
        assert_eq!(scl, -1.0);
    }

    #[test]
    fn test_map_parms_complex_line() {
        let i = Complex::new(0.0, 1.0);
        let one = Complex::new(1.0, 0.0);
        let (off, scl) = map_parms(&[-i, -one], &[one, i]).unwrap();
        assert_relative_eq!(off.re, 1.0);
        assert_relative_eq!(off.im, 1.0);
        assert_relative_eq!(scl.re, 1.0);
        assert_relative_eq!(scl.im, 0.0);
    }

    #[test]
    fn test_map_parms_degenerate() {
        assert!(matches!(
            map_parms(&[2.0, 2.0], &[0.0, 1.0]),
            Err(SeriesError::DegenerateDomain)
        ));
    }

    #[test]
    fn test_map_domain_round_trip() {
        let old = [-1.0, 1.0];
        let new = [0.0, 2.0 * std::f64::consts::PI];
        let x = [-1.0, -0.6, -0.2, 0.2, 0.6, 1.0];
        let mapped = map_domain(&x, &old, &new).unwrap();
        let back = map_domain(&mapped, &new, &old).unwrap();
        for (a, b) in x.iter().zip(&back) {
            assert_relative_eq!(*a, *b, epsilon = 1e-14);
        }
    }

    #[test]
    fn test_map_domain_endpoints() {
        let mapped = map_domain(&[-1.0, 1.0], &[-1.0, 1.0], &[3.0, 7.0]).unwrap();
        assert_eq!(mapped, vec![3.0, 7.0]);
    }
}
