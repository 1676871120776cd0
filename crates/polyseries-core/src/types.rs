//! Scalar abstractions for series coefficients and abscissae.
//!
//! The [`Coefficient`] trait is the element type of every series, domain,
//! and design matrix in this crate. It is built on nalgebra's `ComplexField`
//! so that real and complex scalars share one arithmetic surface, and it adds
//! the handful of operations the fitting and domain-mapping code needs beyond
//! plain field arithmetic: machine epsilon, finiteness, a total order for
//! sorting roots, and interval enclosure.

use nalgebra::{Complex, ComplexField};
use num_traits::{One, Zero};
use std::cmp::Ordering;

/// Trait for scalar types usable as series coefficients (real or complex).
///
/// Implemented for `f32`, `f64`, `Complex<f32>`, and `Complex<f64>`. The
/// associated `RealField` carries magnitudes, tolerances, and singular
/// values, so comparisons are always performed on real quantities.
pub trait Coefficient: ComplexField<RealField: Copy> + Copy + Zero + One + 'static {
    /// Machine epsilon of the underlying floating-point type.
    ///
    /// Drives the default relative rank cutoff `n_samples * eps` used by
    /// the fitting routines.
    fn machine_eps() -> Self::RealField;

    /// Convert a sample count to the real field (for `n * eps`).
    fn real_from_usize(n: usize) -> Self::RealField;

    /// Convert an `f64` constant to this scalar.
    fn from_f64(v: f64) -> Self;

    /// Convert an `f64` constant to the real field.
    fn real_from_f64(v: f64) -> Self::RealField;

    /// True when the value is finite (both components, for complex scalars).
    ///
    /// Non-finite samples are treated as masked by the N-dimensional fit.
    fn is_finite_value(self) -> bool;

    /// Total order used when sorting roots.
    ///
    /// Real scalars order numerically; complex scalars order
    /// lexicographically on (re, im).
    fn order(a: &Self, b: &Self) -> Ordering;

    /// Smallest enclosure of a non-empty set of abscissae.
    ///
    /// Real scalars return `(min, max)`. Complex scalars return the lower
    /// left and upper right corners of the axis-aligned bounding rectangle
    /// in the complex plane.
    fn enclose(xs: &[Self]) -> (Self, Self);
}

impl Coefficient for f32 {
    fn machine_eps() -> f32 {
        f32::EPSILON
    }

    fn real_from_usize(n: usize) -> f32 {
        n as f32
    }

    fn from_f64(v: f64) -> f32 {
        v as f32
    }

    fn real_from_f64(v: f64) -> f32 {
        v as f32
    }

    fn is_finite_value(self) -> bool {
        self.is_finite()
    }

    fn order(a: &Self, b: &Self) -> Ordering {
        a.total_cmp(b)
    }

    fn enclose(xs: &[Self]) -> (Self, Self) {
        let mut lo = xs[0];
        let mut hi = xs[0];
        for &x in &xs[1..] {
            lo = lo.min(x);
            hi = hi.max(x);
        }
        (lo, hi)
    }
}

impl Coefficient for f64 {
    fn machine_eps() -> f64 {
        f64::EPSILON
    }

    fn real_from_usize(n: usize) -> f64 {
        n as f64
    }

    fn from_f64(v: f64) -> f64 {
        v
    }

    fn real_from_f64(v: f64) -> f64 {
        v
    }

    fn is_finite_value(self) -> bool {
        self.is_finite()
    }

    fn order(a: &Self, b: &Self) -> Ordering {
        a.total_cmp(b)
    }

    fn enclose(xs: &[Self]) -> (Self, Self) {
        let mut lo = xs[0];
        let mut hi = xs[0];
        for &x in &xs[1..] {
            lo = lo.min(x);
            hi = hi.max(x);
        }
        (lo, hi)
    }
}

impl Coefficient for Complex<f32> {
    fn machine_eps() -> f32 {
        f32::EPSILON
    }

    fn real_from_usize(n: usize) -> f32 {
        n as f32
    }

    fn from_f64(v: f64) -> Self {
        Complex::new(v as f32, 0.0)
    }

    fn real_from_f64(v: f64) -> f32 {
        v as f32
    }

    fn is_finite_value(self) -> bool {
        self.re.is_finite() && self.im.is_finite()
    }

    fn order(a: &Self, b: &Self) -> Ordering {
        a.re.total_cmp(&b.re).then_with(|| a.im.total_cmp(&b.im))
    }

    fn enclose(xs: &[Self]) -> (Self, Self) {
        let (mut rmin, mut rmax) = (xs[0].re, xs[0].re);
        let (mut imin, mut imax) = (xs[0].im, xs[0].im);
        for x in &xs[1..] {
            rmin = rmin.min(x.re);
            rmax = rmax.max(x.re);
            imin = imin.min(x.im);
            imax = imax.max(x.im);
        }
        (Complex::new(rmin, imin), Complex::new(rmax, imax))
    }
}

impl Coefficient for Complex<f64> {
    fn machine_eps() -> f64 {
        f64::EPSILON
    }

    fn real_from_usize(n: usize) -> f64 {
        n as f64
    }

    fn from_f64(v: f64) -> Self {
        Complex::new(v, 0.0)
    }

    fn real_from_f64(v: f64) -> f64 {
        v
    }

    fn is_finite_value(self) -> bool {
        self.re.is_finite() && self.im.is_finite()
    }

    fn order(a: &Self, b: &Self) -> Ordering {
        a.re.total_cmp(&b.re).then_with(|| a.im.total_cmp(&b.im))
    }

    fn enclose(xs: &[Self]) -> (Self, Self) {
        let (mut rmin, mut rmax) = (xs[0].re, xs[0].re);
        let (mut imin, mut imax) = (xs[0].im, xs[0].im);
        for x in &xs[1..] {
            rmin = rmin.min(x.re);
            rmax = rmax.max(x.re);
            imin = imin.min(x.im);
            imax = imax.max(x.im);
        }
        (Complex::new(rmin, imin), Complex::new(rmax, imax))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_real_enclose() {
        let (lo, hi) = f64::enclose(&[-5.0, -4.0, -1.0, 4.0]);
        assert_eq!(lo, -5.0);
        assert_eq!(hi, 4.0);
    }

    #[test]
    fn test_complex_enclose_is_bounding_box() {
        let xs = [
            Complex::new(1.0, -2.0),
            Complex::new(-3.0, 0.5),
            Complex::new(0.0, 4.0),
        ];
        let (lo, hi) = Complex::<f64>::enclose(&xs);
        assert_eq!(lo, Complex::new(-3.0, -2.0));
        assert_eq!(hi, Complex::new(1.0, 4.0));
    }

    #[test]
    fn test_complex_order_is_lexicographic() {
        let a = Complex::new(1.0_f64, 5.0);
        let b = Complex::new(2.0_f64, -5.0);
        let c = Complex::new(1.0_f64, 6.0);
        assert_eq!(Complex::order(&a, &b), Ordering::Less);
        assert_eq!(Complex::order(&a, &c), Ordering::Less);
        assert_eq!(Complex::order(&b, &c), Ordering::Greater);
    }

    #[test]
    fn test_finiteness() {
        assert!(1.0_f64.is_finite_value());
        assert!(!f64::NAN.is_finite_value());
        assert!(!Complex::new(0.0_f64, f64::INFINITY).is_finite_value());
    }

    #[test]
    fn test_machine_eps_matches_float_type() {
        assert_eq!(f32::machine_eps(), f32::EPSILON);
        assert_eq!(Complex::<f64>::machine_eps(), f64::EPSILON);
    }
}
