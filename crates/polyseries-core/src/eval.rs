//! Evaluation of N-dimensional coefficient tensors.
//!
//! Both evaluators contract one tensor axis at a time with the matching
//! basis: gathering the series along the leading axis, evaluating it, and
//! keeping the remaining axes. [`val_nd`] contracts against paired sample
//! coordinates and yields one value per sample; [`grid_nd`] contracts
//! against per-axis grids and yields the full Cartesian-product tensor.

use crate::basis::PolyBasis;
use crate::error::{Result, SeriesError};
use crate::tensor::Tensor;
use crate::types::Coefficient;

/// Contract the leading axis of `c` by evaluating the series along it at
/// each of the given points. The contracted axis is replaced by a new
/// trailing axis of length `points.len()`; a rank-1 input yields a rank-1
/// output over the points.
fn contract_leading_axis<T, B>(basis: &B, c: &Tensor<T>, points: &[T]) -> Result<Tensor<T>>
where
    T: Coefficient,
    B: PolyBasis<T> + ?Sized,
{
    let order = c.shape()[0];
    let rest: Vec<usize> = c.shape()[1..].to_vec();
    let rest_len: usize = rest.iter().product();
    let data = c.data();

    let mut out_shape = rest;
    out_shape.push(points.len());
    let mut out = Vec::with_capacity(rest_len * points.len());
    let mut series = vec![T::zero(); order];
    for rest_flat in 0..rest_len {
        for (slot, j) in series.iter_mut().zip(0..order) {
            *slot = data[j * rest_len + rest_flat];
        }
        for &x in points {
            out.push(basis.eval(x, &series));
        }
    }
    Tensor::from_parts(out_shape, out)
}

fn validate_rank<T: Coefficient>(
    bases: &[&dyn PolyBasis<T>],
    c: &Tensor<T>,
    n_axes: usize,
) -> Result<()> {
    if n_axes == 0 {
        return Err(SeriesError::axis_count_mismatch(1, 0, "coordinates"));
    }
    if c.rank() != n_axes {
        return Err(SeriesError::axis_count_mismatch(
            n_axes,
            c.rank(),
            "coefficient axes",
        ));
    }
    if bases.len() != n_axes {
        return Err(SeriesError::axis_count_mismatch(
            n_axes,
            bases.len(),
            "basis functions",
        ));
    }
    if c.is_empty() {
        return Err(SeriesError::empty_series("coefficient tensor"));
    }
    Ok(())
}

/// Evaluate an N-dimensional series at paired sample points.
///
/// `coords[k][s]` is the axis-`k` coordinate of sample `s`; the result
/// holds one value per sample. The coefficient tensor is indexed by
/// per-axis degree, matching the layout produced by [`crate::fit::fit_nd`]
/// for `ndim >= 2`.
///
/// # Errors
///
/// Axis-count mismatches between `bases`, `coords`, and the tensor rank;
/// [`SeriesError::ShapeMismatch`] for unequal coordinate lengths;
/// [`SeriesError::EmptySeries`] for an empty coefficient tensor.
pub fn val_nd<T: Coefficient>(
    bases: &[&dyn PolyBasis<T>],
    c: &Tensor<T>,
    coords: &[&[T]],
) -> Result<Vec<T>> {
    validate_rank(bases, c, coords.len())?;
    let n_samples = coords[0].len();
    for (k, pts) in coords.iter().enumerate() {
        if pts.len() != n_samples {
            return Err(SeriesError::shape_mismatch(
                format!("{n_samples} coordinates on every axis"),
                format!("{} coordinates on axis {k}", pts.len()),
            ));
        }
    }

    let mut values = Vec::with_capacity(n_samples);
    for s in 0..n_samples {
        let mut cur = c.clone();
        for (basis, pts) in bases.iter().zip(coords) {
            cur = contract_leading_axis(*basis, &cur, &[pts[s]])?;
            // Drop the singleton point axis before the next contraction.
            let shape = cur.shape()[..cur.rank() - 1].to_vec();
            let data = cur.into_data();
            cur = Tensor::from_parts(shape, data)?;
        }
        values.push(cur.data()[0]);
    }
    Ok(values)
}

/// Evaluate an N-dimensional series on the Cartesian product of per-axis
/// grids.
///
/// The result has shape `(grids[0].len(), ..., grids[N-1].len())`, entry
/// `[i_0, ..., i_{N-1}]` being the series value at
/// `(grids[0][i_0], ..., grids[N-1][i_{N-1}])`.
///
/// # Errors
///
/// Axis-count mismatches between `bases`, `grids`, and the tensor rank;
/// [`SeriesError::EmptySeries`] for an empty coefficient tensor.
pub fn grid_nd<T: Coefficient>(
    bases: &[&dyn PolyBasis<T>],
    c: &Tensor<T>,
    grids: &[&[T]],
) -> Result<Tensor<T>> {
    validate_rank(bases, c, grids.len())?;

    // Each contraction consumes the leading axis and appends the grid axis
    // at the end, so after N rounds the axes are the grids, in order.
    let mut cur = c.clone();
    for (basis, pts) in bases.iter().zip(grids) {
        cur = contract_leading_axis(*basis, &cur, pts)?;
    }
    Ok(cur)
}
