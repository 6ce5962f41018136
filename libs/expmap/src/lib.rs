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
mod backend;
mod converter;
mod error;
pub mod kernel;
mod options;
mod tensor;

pub use crate::{
    backend::{Backend, Parallel, Sequential},
    converter::{
        axis_angle_to_quaternion, axis_angle_to_rotation_matrix, quaternion_to_axis_angle,
        rotation_matrix_to_axis_angle, RotationConverter,
    },
    error::{ConvertError, Result},
    options::{ConverterOptions, Guard, NonFinitePolicy},
    tensor::Tensor,
};

use nalgebra::RealField;

/// Added to denominators that vanish at zero rotation.
pub const EPS: f64 = 1e-8;

/// Scalars the conversions can run on: in practice `f32` and `f64`.
pub trait Real: RealField + Copy + Send + Sync {}
impl<T: RealField + Copy + Send + Sync> Real for T {}
