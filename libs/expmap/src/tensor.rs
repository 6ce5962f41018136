// This file is part of Expmap.
//
// Expmap is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// Expmap is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with Expmap.  If not, see <http://www.gnu.org/licenses/>.
use crate::error::{ConvertError, Result};
use nalgebra::{Matrix3, RealField};
use std::fmt;

/// A dense, row-major batch of scalars with an explicit shape.
///
/// The leading dimension is always the batch size. Conversions never mutate
/// their input; every result is a freshly allocated tensor.
#[derive(Clone, Debug, PartialEq)]
pub struct Tensor<T> {
    data: Vec<T>,
    shape: Vec<usize>,
}

impl<T: Copy> Tensor<T> {
    pub fn new(data: Vec<T>, shape: &[usize]) -> Result<Self> {
        if shape.is_empty() || shape.iter().product::<usize>() != data.len() {
            return Err(ConvertError::ShapeMismatch {
                expected: "a shape whose volume matches the data length",
                found: shape.to_vec(),
            });
        }
        Ok(Self {
            data,
            shape: shape.to_vec(),
        })
    }

    pub fn from_rows<const K: usize>(rows: &[[T; K]]) -> Self {
        Self {
            data: rows.iter().flatten().copied().collect(),
            shape: vec![rows.len(), K],
        }
    }

    // Callers have already validated the shape.
    pub(crate) fn from_parts(data: Vec<T>, shape: Vec<usize>) -> Self {
        debug_assert_eq!(shape.iter().product::<usize>(), data.len());
        Self { data, shape }
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn into_data(self) -> Vec<T> {
        self.data
    }

    pub fn batch_size(&self) -> usize {
        self.shape[0]
    }

    fn row_width(&self) -> usize {
        self.shape[1..].iter().product()
    }

    /// The flattened contents of sample `n`.
    pub fn row(&self, n: usize) -> &[T] {
        let width = self.row_width();
        &self.data[n * width..(n + 1) * width]
    }

    /// Iterate over the samples of an `[N, K]` tensor as fixed size arrays.
    pub fn rows<const K: usize>(&self) -> Result<impl Iterator<Item = [T; K]> + '_> {
        if K == 0 || self.shape.len() != 2 || self.shape[1] != K {
            return Err(ConvertError::ShapeMismatch {
                expected: "[N, K] matching the requested row width",
                found: self.shape.clone(),
            });
        }
        Ok(self.data.chunks_exact(K).map(|chunk| {
            let mut row = [chunk[0]; K];
            row.copy_from_slice(chunk);
            row
        }))
    }

    /// Check that this tensor is `[N, tail...]` and return N.
    pub(crate) fn expect_shape(&self, tail: &[usize], expected: &'static str) -> Result<usize> {
        if self.shape.len() != tail.len() + 1 || self.shape[1..] != *tail {
            return Err(ConvertError::ShapeMismatch {
                expected,
                found: self.shape.clone(),
            });
        }
        Ok(self.shape[0])
    }
}

impl<T: RealField + Copy> Tensor<T> {
    pub fn from_matrices(matrices: &[Matrix3<T>]) -> Self {
        let mut data = Vec::with_capacity(matrices.len() * 9);
        for m in matrices {
            for i in 0..3 {
                for j in 0..3 {
                    data.push(m[(i, j)]);
                }
            }
        }
        Self {
            data,
            shape: vec![matrices.len(), 3, 3],
        }
    }

    /// Iterate over the samples of an `[N, 3, 3]` tensor as matrices.
    pub fn matrices(&self) -> Result<impl Iterator<Item = Matrix3<T>> + '_> {
        self.expect_shape(&[3, 3], "[N, 3, 3]")?;
        Ok(self.data.chunks_exact(9).map(Matrix3::from_row_slice))
    }

    pub fn all_finite(&self) -> bool {
        self.data.iter().all(|v| v.is_finite())
    }

    /// Largest elementwise absolute difference between two tensors of the
    /// same shape. Zero for empty tensors.
    pub fn max_abs_diff(&self, other: &Self) -> Result<T> {
        if self.shape != other.shape {
            return Err(ConvertError::ShapeMismatch {
                expected: "identical shapes",
                found: other.shape.clone(),
            });
        }
        Ok(self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(&a, &b)| (a - b).abs())
            .fold(T::zero(), |acc, d| {
                if d > acc || !d.is_finite() {
                    d
                } else {
                    acc
                }
            }))
    }
}

impl<T: fmt::Display> fmt::Display for Tensor<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let width: usize = self.shape[1..].iter().product();
        for (n, row) in self.data.chunks(width.max(1)).enumerate() {
            write!(f, "{:>4}: [", n)?;
            for (i, v) in row.iter().enumerate() {
                if i != 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{:>12.8}", v)?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}
