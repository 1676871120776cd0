//! Least-squares fitting of series coefficients to sampled data.
//!
//! The design matrix is a (possibly N-dimensional, possibly
//! column-selected) Vandermonde matrix; the solve is delegated to
//! [`crate::solve::lstsq`] after weighting and per-column normalization.
//! Rank deficiency is advisory, never fatal: with diagnostics requested the
//! caller inspects the rank directly, otherwise a `log::warn!` is emitted
//! and the coefficients are returned anyway.

use crate::basis::PolyBasis;
use crate::error::{Result, SeriesError};
use crate::solve::lstsq;
use crate::tensor::{MultiIndexIter, Tensor};
use crate::types::Coefficient;
use nalgebra::{ComplexField as _, DMatrix};
use num_traits::{One, Zero};

/// Degree specification for a 1-D fit.
///
/// `Full(d)` requests every degree `0..=d`; `List` requests a sparse subset
/// of degrees (kept sorted and distinct), with the unrequested degrees
/// zero-filled in the returned coefficients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Degrees {
    /// All degrees up to and including the given maximum.
    Full(usize),
    /// A sparse, sorted, distinct set of degrees.
    List(Vec<usize>),
}

impl Degrees {
    /// Every degree up to and including `deg`.
    pub fn full(deg: usize) -> Self {
        Self::Full(deg)
    }

    /// A sparse set of degrees; sorted and deduplicated.
    ///
    /// # Errors
    ///
    /// [`SeriesError::EmptyDegrees`] if the list is empty.
    pub fn list(mut degrees: Vec<usize>) -> Result<Self> {
        if degrees.is_empty() {
            return Err(SeriesError::EmptyDegrees);
        }
        degrees.sort_unstable();
        degrees.dedup();
        Ok(Self::List(degrees))
    }

    /// Build a degree list from signed integers, rejecting negatives.
    ///
    /// # Errors
    ///
    /// [`SeriesError::InvalidDegree`] for any negative entry,
    /// [`SeriesError::EmptyDegrees`] for an empty list.
    pub fn try_from_signed(degrees: &[i64]) -> Result<Self> {
        if degrees.is_empty() {
            return Err(SeriesError::EmptyDegrees);
        }
        let mut out = Vec::with_capacity(degrees.len());
        for &d in degrees {
            if d < 0 {
                return Err(SeriesError::invalid_degree(format!(
                    "expected deg >= 0, got {d}"
                )));
            }
            out.push(d as usize);
        }
        Self::list(out)
    }

    /// Highest requested degree.
    fn max_degree(&self) -> usize {
        match self {
            Self::Full(d) => *d,
            // list() guarantees non-empty and sorted
            Self::List(v) => v[v.len() - 1],
        }
    }

    /// Number of requested terms.
    fn num_terms(&self) -> usize {
        match self {
            Self::Full(d) => d + 1,
            Self::List(v) => v.len(),
        }
    }
}

/// Options shared by the 1-D fitting routines.
#[derive(Debug, Clone)]
pub struct FitOptions<T: Coefficient> {
    /// Relative rank cutoff for the solver. Defaults to
    /// `n_samples * machine_eps` when `None`.
    pub rcond: Option<T::RealField>,
    /// Per-sample weights, applied to both sides of the system.
    pub weights: Option<Vec<T>>,
    /// Request the diagnostic tuple; also suppresses the advisory
    /// rank-deficiency warning, since the caller inspects the rank itself.
    pub full: bool,
}

impl<T: Coefficient> Default for FitOptions<T> {
    fn default() -> Self {
        Self {
            rcond: None,
            weights: None,
            full: false,
        }
    }
}

/// Diagnostic output of a fit, mirroring the solver's view of the scaled
/// design matrix.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(serialize = "T::RealField: serde::Serialize"))
)]
pub struct FitDiagnostics<T: Coefficient> {
    /// Squared residual norm per dataset (empty unless overdetermined and
    /// full rank).
    pub residuals: Vec<T::RealField>,
    /// Numerical rank of the scaled design matrix.
    pub rank: usize,
    /// Singular values of the scaled design matrix.
    pub singular_values: Vec<T::RealField>,
    /// The rank cutoff actually used.
    pub rcond: T::RealField,
}

impl<T: Coefficient> FitDiagnostics<T> {
    /// True when fewer independent columns than requested terms were found.
    pub fn is_rank_deficient(&self, num_terms: usize) -> bool {
        self.rank < num_terms
    }
}

/// Result of a 1-D fit against a single dataset.
#[derive(Debug, Clone)]
pub struct FitResult<T: Coefficient> {
    /// Coefficients indexed by degree, lowest first.
    pub coefficients: Vec<T>,
    /// Present iff `FitOptions::full` was set.
    pub diagnostics: Option<FitDiagnostics<T>>,
}

/// Result of a 1-D fit against multiple datasets (one column each).
#[derive(Debug, Clone)]
pub struct FitMultiResult<T: Coefficient> {
    /// Coefficient matrix: row = degree, column = dataset.
    pub coefficients: DMatrix<T>,
    /// Present iff `FitOptions::full` was set.
    pub diagnostics: Option<FitDiagnostics<T>>,
}

/// Shared 1-D fitting core operating on a column-per-dataset target.
fn fit_system<T, B>(
    basis: &B,
    x: &[T],
    mut rhs: DMatrix<T>,
    deg: &Degrees,
    opts: &FitOptions<T>,
) -> Result<(DMatrix<T>, Option<FitDiagnostics<T>>)>
where
    T: Coefficient,
    B: PolyBasis<T> + ?Sized,
{
    let n = x.len();
    if n == 0 {
        return Err(SeriesError::empty_series("sample vector x"));
    }
    if rhs.nrows() != n {
        return Err(SeriesError::shape_mismatch(
            format!("{n} samples in y"),
            rhs.nrows(),
        ));
    }

    let lmax = deg.max_degree();
    let order = deg.num_terms();
    let mut lhs = match deg {
        Degrees::Full(_) => basis.vander(x, lmax),
        Degrees::List(v) => basis.vander(x, lmax).select_columns(v.iter()),
    };

    if let Some(w) = &opts.weights {
        if w.len() != n {
            return Err(SeriesError::shape_mismatch(
                format!("{n} weights"),
                w.len(),
            ));
        }
        for (i, &wi) in w.iter().enumerate() {
            for j in 0..lhs.ncols() {
                lhs[(i, j)] *= wi;
            }
            for j in 0..rhs.ncols() {
                rhs[(i, j)] *= wi;
            }
        }
    }

    let rcond = opts
        .rcond
        .unwrap_or_else(|| T::real_from_usize(n) * T::machine_eps());

    // Column-normalize the design matrix; zero-norm columns scale by one.
    let mut scl = Vec::with_capacity(lhs.ncols());
    for j in 0..lhs.ncols() {
        let mut sum = T::RealField::zero();
        for i in 0..lhs.nrows() {
            sum += lhs[(i, j)].modulus_squared();
        }
        let norm = sum.sqrt();
        let norm = if norm == T::RealField::zero() {
            T::RealField::one()
        } else {
            norm
        };
        let inv = T::from_real(T::RealField::one() / norm);
        for i in 0..lhs.nrows() {
            lhs[(i, j)] *= inv;
        }
        scl.push(norm);
    }

    let solved = lstsq(&lhs, &rhs, rcond)?;
    let mut compact = solved.solution;
    for (j, &norm) in scl.iter().enumerate() {
        let inv = T::from_real(T::RealField::one() / norm);
        for col in 0..compact.ncols() {
            compact[(j, col)] *= inv;
        }
    }

    // Expand sparse degree lists to the full degree range.
    let coefficients = match deg {
        Degrees::Full(_) => compact,
        Degrees::List(v) => {
            let mut cc = DMatrix::zeros(lmax + 1, compact.ncols());
            for (row, &d) in v.iter().enumerate() {
                for col in 0..compact.ncols() {
                    cc[(d, col)] = compact[(row, col)];
                }
            }
            cc
        }
    };

    if solved.rank < order && !opts.full {
        log::warn!(
            "{} fit may be poorly conditioned: rank {} < {} requested terms",
            basis.name(),
            solved.rank,
            order
        );
    }

    let diagnostics = opts.full.then(|| FitDiagnostics {
        residuals: solved.residuals,
        rank: solved.rank,
        singular_values: solved.singular_values,
        rcond,
    });

    Ok((coefficients, diagnostics))
}

/// Least-squares fit of series coefficients to one dataset.
///
/// Returns coefficients indexed by degree (lowest first), with unrequested
/// degrees zero-filled when `deg` is a sparse list.
///
/// # Errors
///
/// Shape violations ([`SeriesError::ShapeMismatch`],
/// [`SeriesError::EmptySeries`]) and solver failures. Rank deficiency is
/// not an error; see [`FitOptions::full`].
pub fn fit<T, B>(
    basis: &B,
    x: &[T],
    y: &[T],
    deg: &Degrees,
    opts: &FitOptions<T>,
) -> Result<FitResult<T>>
where
    T: Coefficient,
    B: PolyBasis<T> + ?Sized,
{
    let rhs = DMatrix::from_column_slice(y.len(), 1, y);
    let (coefficients, diagnostics) = fit_system(basis, x, rhs, deg, opts)?;
    Ok(FitResult {
        coefficients: coefficients.column(0).iter().cloned().collect(),
        diagnostics,
    })
}

/// Least-squares fit against several datasets sharing the same abscissae.
///
/// Each column of `y` is an independent dataset; the coefficient matrix
/// has one column per dataset.
pub fn fit_multi<T, B>(
    basis: &B,
    x: &[T],
    y: &DMatrix<T>,
    deg: &Degrees,
    opts: &FitOptions<T>,
) -> Result<FitMultiResult<T>>
where
    T: Coefficient,
    B: PolyBasis<T> + ?Sized,
{
    let (coefficients, diagnostics) = fit_system(basis, x, y.clone(), deg, opts)?;
    Ok(FitMultiResult {
        coefficients,
        diagnostics,
    })
}

/// Degree specification for an N-dimensional fit.
#[derive(Debug, Clone, PartialEq)]
pub enum DegreesNd {
    /// The same maximum degree on every axis.
    Uniform(usize),
    /// One maximum degree per axis.
    PerAxis(Vec<usize>),
    /// A boolean tensor of shape `(deg_0+1, ..., deg_{N-1}+1)` selecting
    /// which multi-degree terms participate in the fit.
    Mask(Tensor<bool>),
}

/// Options for [`fit_nd`].
#[derive(Debug, Clone)]
pub struct FitNdOptions<T: Coefficient> {
    /// Relative rank cutoff; defaults to `n_samples * machine_eps`.
    pub rcond: Option<T::RealField>,
    /// Per-sample weights.
    pub weights: Option<Vec<T>>,
    /// Request diagnostics and suppress the advisory warning.
    pub full: bool,
    /// Upper bound on the summed per-axis degrees of participating terms.
    pub max_degree: Option<usize>,
}

impl<T: Coefficient> Default for FitNdOptions<T> {
    fn default() -> Self {
        Self {
            rcond: None,
            weights: None,
            full: false,
            max_degree: None,
        }
    }
}

/// Result of an N-dimensional fit.
#[derive(Debug, Clone)]
pub struct FitNdResult<T: Coefficient> {
    /// Dense coefficient tensor indexed by per-axis degree. For the 1-D
    /// case only, the coefficients are reversed (highest degree first).
    pub coefficients: Tensor<T>,
    /// Present iff `FitNdOptions::full` was set.
    pub diagnostics: Option<FitDiagnostics<T>>,
}

/// N-dimensional least-squares fit to coordinates and data.
///
/// Samples with a non-finite data value or coordinate are excluded before
/// the system is assembled, so missing values may be encoded as NaN. The
/// solved coefficients are scattered back into a dense tensor indexed by
/// per-axis degree; terms excluded by a mask or by `max_degree` stay zero.
///
/// # Errors
///
/// Axis-count and shape violations, empty inputs, degree masks selecting
/// no terms, and solver failures.
pub fn fit_nd<T: Coefficient>(
    bases: &[&dyn PolyBasis<T>],
    coords: &[&[T]],
    data: &[T],
    deg: &DegreesNd,
    opts: &FitNdOptions<T>,
) -> Result<FitNdResult<T>> {
    let ndim = coords.len();
    if ndim == 0 {
        return Err(SeriesError::axis_count_mismatch(1, 0, "coordinates"));
    }
    if bases.len() != ndim {
        return Err(SeriesError::axis_count_mismatch(
            ndim,
            bases.len(),
            "basis functions",
        ));
    }
    if data.is_empty() {
        return Err(SeriesError::empty_series("data vector"));
    }
    for (k, c) in coords.iter().enumerate() {
        if c.len() != data.len() {
            return Err(SeriesError::shape_mismatch(
                format!("{} values on axis {k}", data.len()),
                c.len(),
            ));
        }
    }
    if let Some(w) = &opts.weights {
        if w.len() != data.len() {
            return Err(SeriesError::shape_mismatch(
                format!("{} weights", data.len()),
                w.len(),
            ));
        }
    }

    // Exclude samples where the data or any coordinate is masked.
    let kept: Vec<usize> = (0..data.len())
        .filter(|&i| {
            data[i].is_finite_value() && coords.iter().all(|c| c[i].is_finite_value())
        })
        .collect();
    if kept.is_empty() {
        return Err(SeriesError::empty_series(
            "data vector (every sample is masked)",
        ));
    }
    let data_kept: Vec<T> = kept.iter().map(|&i| data[i]).collect();
    let coords_kept: Vec<Vec<T>> = coords
        .iter()
        .map(|c| kept.iter().map(|&i| c[i]).collect())
        .collect();
    let weights_kept: Option<Vec<T>> = opts
        .weights
        .as_ref()
        .map(|w| kept.iter().map(|&i| w[i]).collect());

    // Resolve the degree specification into per-axis maxima and an
    // optional term mask (flat, matching the Vandermonde column order).
    let (per_axis, keep_mask): (Vec<usize>, Option<Vec<bool>>) = match deg {
        DegreesNd::Uniform(d) => (vec![*d; ndim], None),
        DegreesNd::PerAxis(v) => {
            if v.len() != ndim {
                return Err(SeriesError::axis_count_mismatch(
                    ndim,
                    v.len(),
                    "per-axis degrees",
                ));
            }
            (v.clone(), None)
        }
        DegreesNd::Mask(m) => {
            if m.rank() != ndim {
                return Err(SeriesError::axis_count_mismatch(
                    ndim,
                    m.rank(),
                    "degree mask axes",
                ));
            }
            if m.shape().iter().any(|&e| e == 0) {
                return Err(SeriesError::invalid_degree(
                    "degree mask axes must be non-empty",
                ));
            }
            let mut keep = m.data().to_vec();
            if !keep.iter().any(|&k| k) {
                return Err(SeriesError::invalid_degree(
                    "degree mask must select at least one term",
                ));
            }
            // The 1-D output is reversed below, so its mask flips too.
            if ndim == 1 {
                keep.reverse();
            }
            (m.shape().iter().map(|&e| e - 1).collect(), Some(keep))
        }
    };

    let coord_slices: Vec<&[T]> = coords_kept.iter().map(Vec::as_slice).collect();
    let lhs_full = crate::vander::vander_nd_flat(bases, &coord_slices, &per_axis)?;

    let degree_shape: Vec<usize> = per_axis.iter().map(|&d| d + 1).collect();
    let term_indices: Vec<Vec<usize>> = MultiIndexIter::new(degree_shape.clone()).collect();

    let selected: Vec<usize> = (0..term_indices.len())
        .filter(|&f| keep_mask.as_ref().is_none_or(|keep| keep[f]))
        .filter(|&f| {
            opts.max_degree
                .is_none_or(|md| term_indices[f].iter().sum::<usize>() <= md)
        })
        .collect();
    if selected.is_empty() {
        return Err(SeriesError::invalid_degree(
            "degree restrictions selected no terms",
        ));
    }

    let mut lhs = lhs_full.select_columns(selected.iter());
    let mut rhs = DMatrix::from_column_slice(data_kept.len(), 1, &data_kept);

    if let Some(w) = &weights_kept {
        for (i, &wi) in w.iter().enumerate() {
            for j in 0..lhs.ncols() {
                lhs[(i, j)] *= wi;
            }
            rhs[(i, 0)] *= wi;
        }
    }

    let rcond = opts
        .rcond
        .unwrap_or_else(|| T::real_from_usize(data_kept.len()) * T::machine_eps());

    let mut scl = Vec::with_capacity(lhs.ncols());
    for j in 0..lhs.ncols() {
        let mut sum = T::RealField::zero();
        for i in 0..lhs.nrows() {
            sum += lhs[(i, j)].modulus_squared();
        }
        let norm = sum.sqrt();
        let norm = if norm == T::RealField::zero() {
            T::RealField::one()
        } else {
            norm
        };
        let inv = T::from_real(T::RealField::one() / norm);
        for i in 0..lhs.nrows() {
            lhs[(i, j)] *= inv;
        }
        scl.push(norm);
    }

    let solved = lstsq(&lhs, &rhs, rcond)?;
    let order = selected.len();

    // Scatter the compact solution back into a dense degree tensor.
    let mut coefficients = Tensor::filled(degree_shape, T::zero());
    for (row, &flat) in selected.iter().enumerate() {
        let value = solved.solution[(row, 0)] * T::from_real(T::RealField::one() / scl[row]);
        coefficients.set(&term_indices[flat], value);
    }

    // 1-D results use the highest-degree-first convention.
    if ndim == 1 {
        let shape = coefficients.shape().to_vec();
        let mut data = coefficients.into_data();
        data.reverse();
        coefficients = Tensor::from_parts(shape, data)?;
    }

    if solved.rank < order && !opts.full {
        log::warn!(
            "N-dimensional fit may be poorly conditioned: rank {} < {} requested terms",
            solved.rank,
            order
        );
    }

    let diagnostics = opts.full.then(|| FitDiagnostics {
        residuals: solved.residuals,
        rank: solved.rank,
        singular_values: solved.singular_values,
        rcond,
    });

    Ok(FitNdResult {
        coefficients,
        diagnostics,
    })
}
