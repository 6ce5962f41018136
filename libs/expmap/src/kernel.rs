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
//! Single-sample conversions. The batch entry points in `converter` run
//! these once per row; they are public for callers that already hold
//! nalgebra values.
use crate::{options::Guard, Real, EPS};
use nalgebra::{clamp, convert, Matrix3, Quaternion, Vector3};

/// Axis-angle to rotation matrix via Rodrigues' formula.
///
/// The axis is `r / (|r| + EPS)`, so a zero vector yields exactly the
/// identity.
pub fn rodrigues<T: Real>(r: &Vector3<T>) -> Matrix3<T> {
    let eps: T = convert(EPS);
    let theta = r.norm();
    let (sin_theta, cos_theta) = theta.sin_cos();
    let axis = r / (theta + eps);
    Matrix3::identity() * cos_theta
        + axis * axis.transpose() * (T::one() - cos_theta)
        + axis.cross_matrix() * sin_theta
}

/// Rotation matrix to axis-angle.
///
/// The axis comes from the skew-symmetric part of `m` divided by
/// `2 sin(theta)` with no guard: at theta = 0 and at theta = pi the result
/// is not finite.
pub fn log_rotation_matrix<T: Real>(m: &Matrix3<T>) -> Vector3<T> {
    let one = T::one();
    let two: T = convert(2.0);
    let theta = clamp((m.trace() - one) / two, -one, one).acos();
    let v = Vector3::new(
        m[(2, 1)] - m[(1, 2)],
        m[(0, 2)] - m[(2, 0)],
        m[(1, 0)] - m[(0, 1)],
    ) / (two * theta.sin());
    v / v.norm() * theta
}

/// Axis-angle to unit quaternion `[w, x, y, z]`.
pub fn exp_quaternion<T: Real>(r: &Vector3<T>, guard: Guard) -> Quaternion<T> {
    let eps: T = convert(EPS);
    let two: T = convert(2.0);
    let theta = r.norm();
    let denom = match guard {
        Guard::Unguarded => theta,
        Guard::Epsilon => theta + eps,
    };
    let (sin_half, cos_half) = (theta / two).sin_cos();
    Quaternion::from_parts(cos_half, r / denom * sin_half)
}

/// Unit quaternion to axis-angle. Guarded by `EPS` at zero rotation.
pub fn log_quaternion<T: Real>(q: &Quaternion<T>) -> Vector3<T> {
    let one = T::one();
    let eps: T = convert(EPS);
    let two: T = convert(2.0);
    let cos_half = clamp(q.scalar(), -one, one);
    let theta = cos_half.acos() * two;
    let sin_half = (one - cos_half * cos_half).sqrt();
    q.imag() * theta / (sin_half + eps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_rodrigues_zero_is_identity() {
        assert_eq!(rodrigues(&Vector3::<f64>::zeros()), Matrix3::identity());
        assert_eq!(rodrigues(&Vector3::<f32>::zeros()), Matrix3::identity());
    }

    #[test]
    fn test_rodrigues_quarter_turn() {
        let m = rodrigues(&Vector3::new(0f64, 0f64, FRAC_PI_2));
        assert_abs_diff_eq!(
            m * Vector3::x(),
            Vector3::new(0f64, 1f64, 0f64),
            epsilon = 1e-7
        );
        assert_abs_diff_eq!(
            m * Vector3::y(),
            Vector3::new(-1f64, 0f64, 0f64),
            epsilon = 1e-7
        );
    }

    #[test]
    fn test_rodrigues_is_orthonormal() {
        let m = rodrigues(&Vector3::new(-0.4f64, 1.3f64, 2.2f64));
        assert_abs_diff_eq!(m * m.transpose(), Matrix3::identity(), epsilon = 1e-6);
        assert_abs_diff_eq!(m.determinant(), 1f64, epsilon = 1e-6);
    }

    #[test]
    fn test_log_rotation_matrix_inverts_rodrigues() {
        let r = Vector3::new(0.3f64, -0.7f64, 0.9f64);
        assert_abs_diff_eq!(log_rotation_matrix(&rodrigues(&r)), r, epsilon = 1e-6);
    }

    #[test]
    fn test_log_rotation_matrix_singularities() {
        let identity = log_rotation_matrix(&Matrix3::<f64>::identity());
        assert!(identity.iter().all(|v| !v.is_finite()));

        // Half turn about x, built exactly so the skew-symmetric part is zero.
        let half_turn = Matrix3::from_diagonal(&Vector3::new(1f64, -1f64, -1f64));
        assert!(log_rotation_matrix(&half_turn).iter().any(|v| !v.is_finite()));
    }

    #[test]
    fn test_exp_quaternion_known_value() {
        let q = exp_quaternion(&Vector3::new(0.1f64, 0.2f64, 0.3f64), Guard::Unguarded);
        assert_relative_eq!(q.w, 0.982_550_982_155_258_9, epsilon = 1e-12);
        assert_relative_eq!(q.i, 0.049_708_843_324_859_48, epsilon = 1e-12);
        assert_relative_eq!(q.j, 0.099_417_686_649_718_96, epsilon = 1e-12);
        assert_relative_eq!(q.k, 0.149_126_529_974_578_43, epsilon = 1e-12);
        assert_relative_eq!(q.norm(), 1f64, epsilon = 1e-12);
    }

    #[test]
    fn test_exp_quaternion_guard_at_zero() {
        let r = Vector3::<f64>::zeros();
        let q = exp_quaternion(&r, Guard::Unguarded);
        assert_eq!(q.w, 1f64);
        assert!(q.imag().iter().all(|v| v.is_nan()));

        let q = exp_quaternion(&r, Guard::Epsilon);
        assert_eq!(q, Quaternion::new(1f64, 0f64, 0f64, 0f64));
    }

    #[test]
    fn test_log_quaternion() {
        let identity = log_quaternion(&Quaternion::<f64>::identity());
        assert_eq!(identity, Vector3::zeros());

        // Half turn about z.
        let q = Quaternion::new(0f64, 0f64, 0f64, 1f64);
        assert_abs_diff_eq!(
            log_quaternion(&q),
            Vector3::new(0f64, 0f64, PI),
            epsilon = 1e-6
        );

        // Slightly denormalized input is clamped rather than producing NaN.
        let q = Quaternion::new(1.000_001f64, 0f64, 0f64, 0f64);
        assert!(log_quaternion(&q).iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_single_precision() {
        let r = Vector3::new(0.5f32, -0.25f32, 1f32);
        let q = exp_quaternion(&r, Guard::Unguarded);
        assert_abs_diff_eq!(log_quaternion(&q), r, epsilon = 1e-5);
        assert_abs_diff_eq!(log_rotation_matrix(&rodrigues(&r)), r, epsilon = 1e-5);
    }
}
