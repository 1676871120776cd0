//! Generalized N-dimensional Vandermonde construction.
//!
//! One 1-D Vandermonde builder per axis (a [`PolyBasis`]) is combined into
//! the product tensor `W[row, j_0, ..., j_{N-1}] = Π_k V_k(x_k)[row, j_k]`.
//! Samples occupy the matrix rows; the degree axes are kept as metadata on
//! [`VanderNd`] and flattened row-major (last axis fastest) for the
//! least-squares design matrix.

use crate::basis::PolyBasis;
use crate::error::{Result, SeriesError};
use crate::tensor::MultiIndexIter;
use crate::types::Coefficient;
use nalgebra::DMatrix;

/// An N-dimensional Vandermonde tensor in sample-major layout.
///
/// Row `i` holds the basis products for sample `i`; column `f` corresponds
/// to the multi-degree obtained by unflattening `f` against
/// [`degree_shape`](Self::degree_shape) in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct VanderNd<T: Coefficient> {
    values: DMatrix<T>,
    degree_shape: Vec<usize>,
}

impl<T: Coefficient> VanderNd<T> {
    /// Extent of each trailing degree axis (`deg_k + 1`).
    pub fn degree_shape(&self) -> &[usize] {
        &self.degree_shape
    }

    /// Number of sample rows.
    pub fn num_samples(&self) -> usize {
        self.values.nrows()
    }

    /// Entry for a sample row and per-axis degree multi-index.
    pub fn value(&self, row: usize, degrees: &[usize]) -> Option<T> {
        if row >= self.values.nrows() || degrees.len() != self.degree_shape.len() {
            return None;
        }
        let mut flat = 0;
        for (&j, &extent) in degrees.iter().zip(&self.degree_shape) {
            if j >= extent {
                return None;
            }
            flat = flat * extent + j;
        }
        Some(self.values[(row, flat)])
    }

    /// Iterate the degree multi-indices in column order.
    pub fn degree_indices(&self) -> MultiIndexIter {
        MultiIndexIter::new(self.degree_shape.clone())
    }

    /// Collapse the degree axes into the flat column axis.
    pub fn into_flat(self) -> DMatrix<T> {
        self.values
    }
}

fn validate_axes<T: Coefficient>(
    bases: &[&dyn PolyBasis<T>],
    points: &[&[T]],
    degrees: &[usize],
) -> Result<usize> {
    let n_dims = bases.len();
    if n_dims != points.len() {
        return Err(SeriesError::axis_count_mismatch(
            n_dims,
            points.len(),
            "sample points",
        ));
    }
    if n_dims != degrees.len() {
        return Err(SeriesError::axis_count_mismatch(
            n_dims,
            degrees.len(),
            "degrees",
        ));
    }
    if n_dims == 0 {
        return Err(SeriesError::axis_count_mismatch(
            1,
            0,
            "basis functions (at least one axis is required)",
        ));
    }
    let n_samples = points[0].len();
    if n_samples == 0 {
        return Err(SeriesError::empty_series("sample point array"));
    }
    for (k, p) in points.iter().enumerate() {
        if p.len() != n_samples {
            return Err(SeriesError::shape_mismatch(
                format!("{n_samples} points on every axis"),
                format!("{} points on axis {k}", p.len()),
            ));
        }
    }
    Ok(n_samples)
}

/// Build the N-dimensional Vandermonde tensor for the given axes.
///
/// # Errors
///
/// [`SeriesError::AxisCountMismatch`] when the numbers of bases, point
/// arrays, and degrees disagree or zero axes are given;
/// [`SeriesError::ShapeMismatch`] when the point arrays have unequal
/// lengths; [`SeriesError::EmptySeries`] when the point arrays are empty.
pub fn vander_nd<T: Coefficient>(
    bases: &[&dyn PolyBasis<T>],
    points: &[&[T]],
    degrees: &[usize],
) -> Result<VanderNd<T>> {
    let n_samples = validate_axes(bases, points, degrees)?;

    let axis_mats: Vec<DMatrix<T>> = bases
        .iter()
        .zip(points)
        .zip(degrees)
        .map(|((basis, pts), &deg)| basis.vander(pts, deg))
        .collect();

    let degree_shape: Vec<usize> = degrees.iter().map(|&d| d + 1).collect();
    let n_terms: usize = degree_shape.iter().product();

    let values = DMatrix::from_fn(n_samples, n_terms, |row, col| {
        // Unflatten col against the degree shape, last axis fastest.
        let mut rem = col;
        let mut acc = T::one();
        for k in (0..degree_shape.len()).rev() {
            let j = rem % degree_shape[k];
            rem /= degree_shape[k];
            acc *= axis_mats[k][(row, j)];
        }
        acc
    });

    Ok(VanderNd {
        values,
        degree_shape,
    })
}

/// Like [`vander_nd`], but with the degree axes flattened into the column
/// axis (row-major, last listed degree varying fastest).
pub fn vander_nd_flat<T: Coefficient>(
    bases: &[&dyn PolyBasis<T>],
    points: &[&[T]],
    degrees: &[usize],
) -> Result<DMatrix<T>> {
    vander_nd(bases, points, degrees).map(VanderNd::into_flat)
}
