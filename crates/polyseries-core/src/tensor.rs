//! Minimal row-major coefficient tensor.
//!
//! N-dimensional fit results, degree masks, and grid evaluations need a
//! shape-carrying container; nalgebra stops at two axes. [`Tensor`] is the
//! smallest thing that works: a shape plus row-major storage with the last
//! axis varying fastest. It is not an array engine (no broadcasting,
//! strides, or views).

use crate::error::{Result, SeriesError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A dense N-dimensional container with row-major storage.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tensor<A> {
    shape: Vec<usize>,
    data: Vec<A>,
}

impl<A> Tensor<A> {
    /// Build a tensor from a shape and matching row-major data.
    ///
    /// # Errors
    ///
    /// [`SeriesError::ShapeMismatch`] if `data.len()` is not the product of
    /// the shape entries.
    pub fn from_parts(shape: Vec<usize>, data: Vec<A>) -> Result<Self> {
        let expected: usize = shape.iter().product();
        if data.len() != expected {
            return Err(SeriesError::shape_mismatch(
                format!("{expected} elements for shape {shape:?}"),
                data.len(),
            ));
        }
        Ok(Self { shape, data })
    }

    /// The extent of each axis.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Number of axes.
    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Total number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when the tensor holds no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Row-major flat offset of a multi-index, if in bounds.
    pub fn flat_index(&self, idx: &[usize]) -> Option<usize> {
        if idx.len() != self.shape.len() {
            return None;
        }
        let mut flat = 0;
        for (&i, &extent) in idx.iter().zip(&self.shape) {
            if i >= extent {
                return None;
            }
            flat = flat * extent + i;
        }
        Some(flat)
    }

    /// Element at a multi-index.
    pub fn get(&self, idx: &[usize]) -> Option<&A> {
        self.flat_index(idx).map(|f| &self.data[f])
    }

    /// Overwrite the element at a multi-index.
    ///
    /// Returns false (leaving the tensor untouched) when the index is out
    /// of bounds.
    pub fn set(&mut self, idx: &[usize], value: A) -> bool {
        match self.flat_index(idx) {
            Some(f) => {
                self.data[f] = value;
                true
            }
            None => false,
        }
    }

    /// The underlying row-major storage.
    pub fn data(&self) -> &[A] {
        &self.data
    }

    /// Consume the tensor, yielding its row-major storage.
    pub fn into_data(self) -> Vec<A> {
        self.data
    }

    /// Iterate multi-indices in row-major order (last axis fastest).
    pub fn indices(&self) -> MultiIndexIter {
        MultiIndexIter::new(self.shape.clone())
    }
}

impl<A: Clone> Tensor<A> {
    /// A tensor of the given shape with every element set to `value`.
    pub fn filled(shape: Vec<usize>, value: A) -> Self {
        let len = shape.iter().product();
        Self {
            shape,
            data: vec![value; len],
        }
    }
}

/// Row-major odometer over the multi-indices of a shape.
#[derive(Debug, Clone)]
pub struct MultiIndexIter {
    shape: Vec<usize>,
    current: Option<Vec<usize>>,
}

impl MultiIndexIter {
    /// Iterator over every multi-index of `shape`, last axis fastest.
    pub fn new(shape: Vec<usize>) -> Self {
        let current = if shape.iter().any(|&e| e == 0) {
            None
        } else {
            Some(vec![0; shape.len()])
        };
        Self { shape, current }
    }
}

impl Iterator for MultiIndexIter {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        let current = self.current.as_mut()?;
        let out = current.clone();
        // Advance the odometer from the last axis.
        let mut done = true;
        for axis in (0..self.shape.len()).rev() {
            current[axis] += 1;
            if current[axis] < self.shape[axis] {
                done = false;
                break;
            }
            current[axis] = 0;
        }
        if done {
            self.current = None;
        }
        Some(out)
    }
}
