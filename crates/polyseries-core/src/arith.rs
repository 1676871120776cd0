//! Coefficient-sequence arithmetic, generic over the basis product.
//!
//! Addition and subtraction are basis-independent (coefficients add
//! termwise in any basis); division, powers, and root construction lean on
//! the [`PolyBasis::mul`] primitive so the same kernels serve every basis.
//! All kernels copy their inputs before mutating; caller slices are never
//! modified.

use crate::basis::PolyBasis;
use crate::error::{Result, SeriesError};
use crate::series::{as_series, trim_seq};
use crate::types::Coefficient;
use num_traits::Zero;

/// Sum of two series.
///
/// The shorter operand is padded (by termwise addition on a fresh copy of
/// the longer one) and the result trimmed.
pub fn add<T: Coefficient>(c1: &[T], c2: &[T]) -> Result<Vec<T>> {
    let mut c1 = as_series(c1, true)?;
    let mut c2 = as_series(c2, true)?;
    let mut ret = if c1.len() > c2.len() {
        for (a, b) in c1.iter_mut().zip(&c2) {
            *a += *b;
        }
        c1
    } else {
        for (b, a) in c2.iter_mut().zip(&c1) {
            *b += *a;
        }
        c2
    };
    ret.truncate(trim_seq(&ret).len());
    Ok(ret)
}

/// Difference of two series (`c1 - c2`).
pub fn sub<T: Coefficient>(c1: &[T], c2: &[T]) -> Result<Vec<T>> {
    let mut c1 = as_series(c1, true)?;
    let mut c2 = as_series(c2, true)?;
    let mut ret = if c1.len() > c2.len() {
        for (a, b) in c1.iter_mut().zip(&c2) {
            *a -= *b;
        }
        c1
    } else {
        for b in c2.iter_mut() {
            *b = -*b;
        }
        for (b, a) in c2.iter_mut().zip(&c1) {
            *b += *a;
        }
        c2
    };
    ret.truncate(trim_seq(&ret).len());
    Ok(ret)
}

/// Quotient and remainder of polynomial long division.
///
/// Implemented by repeated subtraction of the divisor embedded at each
/// quotient degree through `basis.mul`; for some bases a faster scheme
/// exists, but this one is correct for all of them.
///
/// # Errors
///
/// [`SeriesError::DivisionByZero`] when the trimmed divisor's leading
/// coefficient is zero (i.e. the divisor is the zero series).
pub fn div<T, B>(basis: &B, c1: &[T], c2: &[T]) -> Result<(Vec<T>, Vec<T>)>
where
    T: Coefficient,
    B: PolyBasis<T> + ?Sized,
{
    let c1 = as_series(c1, true)?;
    let c2 = as_series(c2, true)?;
    if c2[c2.len() - 1].is_zero() {
        return Err(SeriesError::DivisionByZero);
    }

    let lc1 = c1.len();
    let lc2 = c2.len();
    if lc1 < lc2 {
        return Ok((vec![T::zero()], c1));
    }
    if lc2 == 1 {
        let d = c2[0];
        let quo = c1.iter().map(|&v| v / d).collect();
        return Ok((quo, vec![T::zero()]));
    }

    let mut quo = vec![T::zero(); lc1 - lc2 + 1];
    let mut rem = c1;
    for i in (0..=lc1 - lc2).rev() {
        // Divisor shifted to quotient degree i: mul(e_i, c2).
        let mut unit = vec![T::zero(); i + 1];
        unit[i] = T::one();
        let p = basis.mul(&unit, &c2);
        let q = rem[rem.len() - 1] / p[p.len() - 1];
        rem.truncate(rem.len() - 1);
        let keep = rem.len().min(p.len() - 1);
        for k in 0..keep {
            rem[k] -= q * p[k];
        }
        quo[i] = q;
    }
    rem.truncate(trim_seq(&rem).len());
    Ok((quo, rem))
}

/// Raise a series to a non-negative integer power.
///
/// `pow == 0` yields `[1]` and `pow == 1` a trimmed copy of `c`; otherwise
/// the product is accumulated by repeated multiplication. (No fast
/// exponentiation: operand growth dominates, so squaring buys little.)
///
/// # Errors
///
/// [`SeriesError::PowerTooLarge`] when `maxpower` is given and exceeded.
pub fn pow<T, B>(basis: &B, c: &[T], pow: usize, maxpower: Option<usize>) -> Result<Vec<T>>
where
    T: Coefficient,
    B: PolyBasis<T> + ?Sized,
{
    let c = as_series(c, true)?;
    if let Some(maxpower) = maxpower {
        if pow > maxpower {
            return Err(SeriesError::PowerTooLarge { power: pow, maxpower });
        }
    }
    match pow {
        0 => Ok(vec![T::one()]),
        1 => Ok(c),
        _ => {
            let mut prd = c.clone();
            for _ in 2..=pow {
                prd = basis.mul(&prd, &c);
            }
            Ok(prd)
        }
    }
}

/// The monic-product series whose roots are the given values.
///
/// An empty root list yields `[1]`. Roots are sorted ascending and one
/// degree-1 factor built per root via `basis.line(-r, 1)`; factors are then
/// combined by balanced pairwise multiplication (adjacent pairs per round,
/// odd leftover folded into the first pair of the next round) so operand
/// sizes grow evenly instead of chaining linearly.
pub fn from_roots<T, B>(basis: &B, roots: &[T]) -> Vec<T>
where
    T: Coefficient,
    B: PolyBasis<T> + ?Sized,
{
    if roots.is_empty() {
        return vec![T::one()];
    }
    let mut roots = roots.to_vec();
    roots.sort_by(T::order);

    let mut p: Vec<Vec<T>> = roots.iter().map(|&r| basis.line(-r, T::one())).collect();
    let mut n = p.len();
    while n > 1 {
        let m = n / 2;
        let odd = n % 2 == 1;
        let mut tmp: Vec<Vec<T>> = (0..m).map(|i| basis.mul(&p[i], &p[i + m])).collect();
        if odd {
            tmp[0] = basis.mul(&tmp[0], &p[n - 1]);
        }
        p = tmp;
        n = m;
    }
    p.swap_remove(0)
}
