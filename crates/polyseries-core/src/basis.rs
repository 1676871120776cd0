//! Polynomial basis abstraction.
//!
//! The arithmetic, evaluation, and fitting kernels in this crate are generic
//! over the basis the coefficients are expressed in. [`PolyBasis`] collects
//! the four primitives a basis must supply: a degree-1 series, a series
//! product, 1-D evaluation, and a 1-D Vandermonde builder. Two bases are
//! provided: plain monomials ([`PowerBasis`]) and first-kind Chebyshev
//! ([`ChebyshevBasis`]).

use crate::types::Coefficient;
use nalgebra::DMatrix;
use num_traits::Zero;

/// Strategy interface for a concrete polynomial basis.
///
/// Implementations must keep the series convention of this crate: index =
/// degree, lowest degree first. `mul` and `line` must be consistent with
/// `eval`, i.e. `eval(x, mul(a, b)) == eval(x, a) * eval(x, b)` within
/// floating tolerance, since division, powers, and root construction are
/// all built on top of the product primitive.
pub trait PolyBasis<T: Coefficient> {
    /// Basis name, for diagnostics.
    fn name(&self) -> &'static str;

    /// The degree-1 series representing `off + scl * x`.
    ///
    /// If `scl` is zero the constant series `[off]` is returned.
    fn line(&self, off: T, scl: T) -> Vec<T>;

    /// Product of two coefficient sequences in this basis.
    ///
    /// Inputs need not be trimmed; the result may carry trailing zeros.
    fn mul(&self, c1: &[T], c2: &[T]) -> Vec<T>;

    /// Evaluate the series at a single point.
    fn eval(&self, x: T, c: &[T]) -> T;

    /// Per-degree basis matrix: entry `(i, j)` is basis function `j`
    /// evaluated at `x[i]`. Shape `x.len() × (deg + 1)`.
    fn vander(&self, x: &[T], deg: usize) -> DMatrix<T>;
}

/// The monomial basis `1, x, x^2, ...`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PowerBasis;

impl<T: Coefficient> PolyBasis<T> for PowerBasis {
    fn name(&self) -> &'static str {
        "power"
    }

    fn line(&self, off: T, scl: T) -> Vec<T> {
        if scl.is_zero() {
            vec![off]
        } else {
            vec![off, scl]
        }
    }

    fn mul(&self, c1: &[T], c2: &[T]) -> Vec<T> {
        if c1.is_empty() || c2.is_empty() {
            return Vec::new();
        }
        // Plain convolution.
        let mut prd = vec![T::zero(); c1.len() + c2.len() - 1];
        for (i, &a) in c1.iter().enumerate() {
            for (j, &b) in c2.iter().enumerate() {
                prd[i + j] += a * b;
            }
        }
        prd
    }

    fn eval(&self, x: T, c: &[T]) -> T {
        // Horner's scheme.
        let mut acc = T::zero();
        for &ci in c.iter().rev() {
            acc = acc * x + ci;
        }
        acc
    }

    fn vander(&self, x: &[T], deg: usize) -> DMatrix<T> {
        let mut v = DMatrix::from_element(x.len(), deg + 1, T::one());
        for (i, &xi) in x.iter().enumerate() {
            for j in 1..=deg {
                v[(i, j)] = v[(i, j - 1)] * xi;
            }
        }
        v
    }
}

/// The Chebyshev basis of the first kind `T_0, T_1, T_2, ...`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChebyshevBasis;

impl<T: Coefficient> PolyBasis<T> for ChebyshevBasis {
    fn name(&self) -> &'static str {
        "chebyshev"
    }

    fn line(&self, off: T, scl: T) -> Vec<T> {
        if scl.is_zero() {
            vec![off]
        } else {
            vec![off, scl]
        }
    }

    fn mul(&self, c1: &[T], c2: &[T]) -> Vec<T> {
        if c1.is_empty() || c2.is_empty() {
            return Vec::new();
        }
        // Linearization T_m T_n = (T_{m+n} + T_{|m-n|}) / 2.
        let half = <T as Coefficient>::from_f64(0.5);
        let mut prd = vec![T::zero(); c1.len() + c2.len() - 1];
        for (i, &a) in c1.iter().enumerate() {
            for (j, &b) in c2.iter().enumerate() {
                let term = a * b * half;
                prd[i + j] += term;
                prd[i.abs_diff(j)] += term;
            }
        }
        prd
    }

    fn eval(&self, x: T, c: &[T]) -> T {
        // Clenshaw recurrence.
        match c.len() {
            0 => T::zero(),
            1 => c[0],
            2 => c[0] + c[1] * x,
            n => {
                let two_x = x + x;
                let mut c0 = c[n - 2];
                let mut c1 = c[n - 1];
                for &ci in c[..n - 2].iter().rev() {
                    let tmp = c0;
                    c0 = ci - c1;
                    c1 = tmp + c1 * two_x;
                }
                c0 + c1 * x
            }
        }
    }

    fn vander(&self, x: &[T], deg: usize) -> DMatrix<T> {
        let mut v = DMatrix::from_element(x.len(), deg + 1, T::one());
        for (i, &xi) in x.iter().enumerate() {
            if deg >= 1 {
                v[(i, 1)] = xi;
            }
            let two_x = xi + xi;
            for j in 2..=deg {
                v[(i, j)] = v[(i, j - 1)] * two_x - v[(i, j - 2)];
            }
        }
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_power_mul_matches_convolution() {
        let basis = PowerBasis;
        // (1 + 2x)(3 + x) = 3 + 7x + 2x^2
        let prd = basis.mul(&[1.0, 2.0], &[3.0, 1.0]);
        assert_eq!(prd, vec![3.0, 7.0, 2.0]);
    }

    #[test]
    fn test_power_eval_horner() {
        let basis = PowerBasis;
        // 1 + 2x + 3x^2 at x = 2 -> 17
        assert_relative_eq!(basis.eval(2.0, &[1.0, 2.0, 3.0]), 17.0);
    }

    #[test]
    fn test_power_vander_columns_are_powers() {
        let basis = PowerBasis;
        let v: DMatrix<f64> = basis.vander(&[2.0, 3.0], 3);
        assert_eq!(v.nrows(), 2);
        assert_eq!(v.ncols(), 4);
        assert_eq!(v[(0, 3)], 8.0);
        assert_eq!(v[(1, 2)], 9.0);
    }

    #[test]
    fn test_cheb_mul_linearization() {
        let basis = ChebyshevBasis;
        // T_1 * T_1 = (T_2 + T_0) / 2
        let prd = basis.mul(&[0.0, 1.0], &[0.0, 1.0]);
        assert_eq!(prd, vec![0.5, 0.0, 0.5]);
    }

    #[test]
    fn test_cheb_eval_matches_cos_identity() {
        let basis = ChebyshevBasis;
        // T_3(cos t) = cos(3t)
        let t = 0.7_f64;
        let x = t.cos();
        let val = basis.eval(x, &[0.0, 0.0, 0.0, 1.0]);
        assert_relative_eq!(val, (3.0 * t).cos(), epsilon = 1e-12);
    }

    #[test]
    fn test_mul_eval_consistency() {
        let power = PowerBasis;
        let cheb = ChebyshevBasis;
        let a = [1.0, -2.0, 0.5];
        let b = [0.0, 3.0, 1.0, -1.0];
        for x in [-0.9, -0.3, 0.0, 0.4, 0.8] {
            let lhs = power.eval(x, &power.mul(&a, &b));
            assert_relative_eq!(lhs, power.eval(x, &a) * power.eval(x, &b), epsilon = 1e-12);
            let lhs = cheb.eval(x, &cheb.mul(&a, &b));
            assert_relative_eq!(lhs, cheb.eval(x, &a) * cheb.eval(x, &b), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_cheb_vander_recurrence() {
        let basis = ChebyshevBasis;
        let v: DMatrix<f64> = basis.vander(&[0.5], 3);
        // T_0..T_3 at 0.5: 1, 0.5, -0.5, -1
        assert_relative_eq!(v[(0, 0)], 1.0);
        assert_relative_eq!(v[(0, 1)], 0.5);
        assert_relative_eq!(v[(0, 2)], -0.5);
        assert_relative_eq!(v[(0, 3)], -1.0);
    }

    #[test]
    fn test_line_constant_when_scale_zero() {
        let basis = PowerBasis;
        assert_eq!(PolyBasis::<f64>::line(&basis, 4.0, 0.0), vec![4.0]);
        assert_eq!(PolyBasis::<f64>::line(&basis, 4.0, 2.0), vec![4.0, 2.0]);
    }
}
