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
use crate::{
    backend::{Backend, Sequential},
    error::{ConvertError, Result},
    kernel,
    options::{ConverterOptions, NonFinitePolicy},
    tensor::Tensor,
    Real,
};
use log::{debug, trace};
use nalgebra::{Matrix3, Quaternion, Vector3};

/// Batched rotation conversions.
///
/// The formulas live in `kernel`; a converter only validates shapes, hands
/// rows to its backend, and applies the non-finite policy to the result.
#[derive(Clone, Copy, Debug, Default)]
pub struct RotationConverter<B: Backend = Sequential> {
    options: ConverterOptions,
    backend: B,
}

impl<B: Backend> RotationConverter<B> {
    pub fn new(backend: B) -> Self {
        Self {
            options: ConverterOptions::default(),
            backend,
        }
    }

    pub fn with_options(mut self, options: ConverterOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &ConverterOptions {
        &self.options
    }

    /// `[N, 3]` axis-angle to `[N, 3, 3]` rotation matrices.
    pub fn axis_angle_to_rotation_matrix<T: Real>(&self, r: &Tensor<T>) -> Result<Tensor<T>> {
        let n = r.expect_shape(&[3], "[N, 3]")?;
        trace!("axis_angle_to_rotation_matrix: {} rows", n);
        let out = self.backend.map_rows(r.data(), 3, 9, |src, dst| {
            let m = kernel::rodrigues(&Vector3::from_column_slice(src));
            write_matrix(&m, dst);
        });
        self.finish("axis_angle_to_rotation_matrix", out, vec![n, 3, 3])
    }

    /// `[N, 3, 3]` rotation matrices to `[N, 3]` axis-angle.
    pub fn rotation_matrix_to_axis_angle<T: Real>(&self, m: &Tensor<T>) -> Result<Tensor<T>> {
        let n = m.expect_shape(&[3, 3], "[N, 3, 3]")?;
        trace!("rotation_matrix_to_axis_angle: {} rows", n);
        let out = self.backend.map_rows(m.data(), 9, 3, |src, dst| {
            let r = kernel::log_rotation_matrix(&Matrix3::from_row_slice(src));
            dst.copy_from_slice(r.as_slice());
        });
        self.finish("rotation_matrix_to_axis_angle", out, vec![n, 3])
    }

    /// `[N, 3]` axis-angle to `[N, 4]` quaternions laid out `[w, x, y, z]`.
    pub fn axis_angle_to_quaternion<T: Real>(&self, r: &Tensor<T>) -> Result<Tensor<T>> {
        let n = r.expect_shape(&[3], "[N, 3]")?;
        trace!("axis_angle_to_quaternion: {} rows", n);
        let guard = self.options.quaternion_guard;
        let out = self.backend.map_rows(r.data(), 3, 4, |src, dst| {
            let q = kernel::exp_quaternion(&Vector3::from_column_slice(src), guard);
            write_quaternion(&q, dst);
        });
        self.finish("axis_angle_to_quaternion", out, vec![n, 4])
    }

    /// `[N, 4]` quaternions laid out `[w, x, y, z]` to `[N, 3]` axis-angle.
    pub fn quaternion_to_axis_angle<T: Real>(&self, q: &Tensor<T>) -> Result<Tensor<T>> {
        let n = q.expect_shape(&[4], "[N, 4]")?;
        trace!("quaternion_to_axis_angle: {} rows", n);
        let out = self.backend.map_rows(q.data(), 4, 3, |src, dst| {
            let q = Quaternion::new(src[0], src[1], src[2], src[3]);
            dst.copy_from_slice(kernel::log_quaternion(&q).as_slice());
        });
        self.finish("quaternion_to_axis_angle", out, vec![n, 3])
    }

    fn finish<T: Real>(
        &self,
        conversion: &'static str,
        data: Vec<T>,
        shape: Vec<usize>,
    ) -> Result<Tensor<T>> {
        let width: usize = shape[1..].iter().product();
        let mut bad_rows = data
            .chunks_exact(width)
            .enumerate()
            .filter(|(_, row)| row.iter().any(|v| !v.is_finite()))
            .map(|(i, _)| i);
        match self.options.non_finite {
            NonFinitePolicy::Reject => {
                if let Some(row) = bad_rows.next() {
                    return Err(ConvertError::NonFinite { conversion, row });
                }
            }
            NonFinitePolicy::Propagate => {
                let count = bad_rows.count();
                if count > 0 {
                    debug!("{}: {} non-finite rows", conversion, count);
                }
            }
        }
        Ok(Tensor::from_parts(data, shape))
    }
}

fn write_matrix<T: Real>(m: &Matrix3<T>, dst: &mut [T]) {
    for i in 0..3 {
        for j in 0..3 {
            dst[i * 3 + j] = m[(i, j)];
        }
    }
}

fn write_quaternion<T: Real>(q: &Quaternion<T>, dst: &mut [T]) {
    dst[0] = q.w;
    dst[1] = q.i;
    dst[2] = q.j;
    dst[3] = q.k;
}

/// Axis-angle to rotation matrix with default options on the calling thread.
pub fn axis_angle_to_rotation_matrix<T: Real>(r: &Tensor<T>) -> Result<Tensor<T>> {
    RotationConverter::<Sequential>::default().axis_angle_to_rotation_matrix(r)
}

/// Rotation matrix to axis-angle with default options on the calling thread.
pub fn rotation_matrix_to_axis_angle<T: Real>(m: &Tensor<T>) -> Result<Tensor<T>> {
    RotationConverter::<Sequential>::default().rotation_matrix_to_axis_angle(m)
}

/// Axis-angle to quaternion with default options on the calling thread.
pub fn axis_angle_to_quaternion<T: Real>(r: &Tensor<T>) -> Result<Tensor<T>> {
    RotationConverter::<Sequential>::default().axis_angle_to_quaternion(r)
}

/// Quaternion to axis-angle with default options on the calling thread.
pub fn quaternion_to_axis_angle<T: Real>(q: &Tensor<T>) -> Result<Tensor<T>> {
    RotationConverter::<Sequential>::default().quaternion_to_axis_angle(q)
}
