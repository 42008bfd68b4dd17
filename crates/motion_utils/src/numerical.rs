use crate::vector::{mat3d_from_view, set_row_from_vec3d, set_view_from_mat3d, vec3d_from_row, Matrix3d, Vector3d};
use ndarray as nd;

/// Rotation angles (radians) below this are treated as no rotation at all.
/// The same bound decides when ``sin(angle)`` is too small to divide by.
pub const ANGLE_EPS: f64 = 1e-8;

/// Obtuse rotations with ``sin(angle)`` under this bound take their axis from
/// the symmetric part of the matrix, where rounding noise in the antisymmetric
/// part would dominate the axis.
pub const HALF_TURN_EPS: f64 = 1e-6;

/// How the batched conversions distribute their work. Both variants produce
/// bit-identical results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Execution {
    Serial,
    #[default]
    Parallel,
}

/// Cross-product matrix of ``k``, so that ``skew(k) * v == k.cross(v)``
pub fn skew(k: &Vector3d) -> Matrix3d {
    Matrix3d::new(0.0, -k.z, k.y, k.z, 0.0, -k.x, -k.y, k.x, 0.0)
}

/// Rodrigues' formula for a single axis-angle vector.
///
/// Vectors with a norm under [`ANGLE_EPS`] map to the exact identity instead
/// of being divided by their (near) zero norm. Non-finite input is not
/// sanitized and comes out as a non-finite matrix.
pub fn axis_angle_to_rotmat(axis_angle: &Vector3d) -> Matrix3d {
    let angle = axis_angle.norm();
    if angle < ANGLE_EPS {
        return Matrix3d::identity();
    }
    let k = skew(&(axis_angle / angle));
    Matrix3d::identity() + k * angle.sin() + (k * k) * (1.0 - angle.cos())
}

/// Inverse of [`axis_angle_to_rotmat`].
///
/// ``cos(angle)`` is clamped into ``[-1, 1]`` since composed matrices drift
/// slightly off orthonormal. When ``sin(angle)`` vanishes the antisymmetric
/// part carries no axis: near zero the result is the zero vector, near a half
/// turn the axis is recovered from the symmetric part instead.
pub fn rotmat_to_axis_angle(rot: &Matrix3d) -> Vector3d {
    let cos_angle = ((rot.trace() - 1.0) / 2.0).clamp(-1.0, 1.0);
    let angle = cos_angle.acos();
    let sin_angle = angle.sin();
    let antisym = Vector3d::new(rot[(2, 1)] - rot[(1, 2)], rot[(0, 2)] - rot[(2, 0)], rot[(1, 0)] - rot[(0, 1)]);
    if cos_angle < 0.0 && sin_angle < HALF_TURN_EPS {
        return half_turn_axis(rot, cos_angle, &antisym) * angle;
    }
    if sin_angle.abs() < ANGLE_EPS {
        return Vector3d::zeros();
    }
    antisym / (2.0 * sin_angle) * angle
}

/// Axis of a rotation whose angle is close to pi.
///
/// The symmetric part of ``R`` is ``cos I + (1 - cos) k k^T``, so the column of
/// ``k k^T`` with the largest diagonal entry is the best conditioned estimate of
/// ``k``. The sign is arbitrary at exactly pi; it follows the antisymmetric part
/// when that still carries one and otherwise keeps the dominant component
/// positive.
fn half_turn_axis(rot: &Matrix3d, cos_angle: f64, antisym: &Vector3d) -> Vector3d {
    let kkt = ((rot + rot.transpose()) * 0.5 - Matrix3d::identity() * cos_angle) / (1.0 - cos_angle);
    let mut best = 0;
    for i in 1..3 {
        if kkt[(i, i)] > kkt[(best, best)] {
            best = i;
        }
    }
    let column: Vector3d = kkt.column(best).into_owned();
    let norm = column.norm();
    if norm < ANGLE_EPS {
        return Vector3d::zeros();
    }
    let axis = column / norm;
    if axis.dot(antisym) < 0.0 {
        -axis
    } else {
        axis
    }
}

/// Fixed frame-change convention shared by every motion tool: the elemental
/// rotations about X, Y and Z (radians) composed as ``Rz * Ry * Rx``.
pub fn euler_xyz_to_rotmat(rx: f64, ry: f64, rz: f64) -> Matrix3d {
    let (sx, cx) = rx.sin_cos();
    let (sy, cy) = ry.sin_cos();
    let (sz, cz) = rz.sin_cos();
    let rot_x = Matrix3d::new(1.0, 0.0, 0.0, 0.0, cx, -sx, 0.0, sx, cx);
    let rot_y = Matrix3d::new(cy, 0.0, sy, 0.0, 1.0, 0.0, -sy, 0.0, cy);
    let rot_z = Matrix3d::new(cz, -sz, 0.0, sz, cz, 0.0, 0.0, 0.0, 1.0);
    rot_z * rot_y * rot_x
}

/// Same as [`euler_xyz_to_rotmat`] but with the angles given in degrees
pub fn euler_xyz_deg_to_rotmat(rx_deg: f64, ry_deg: f64, rz_deg: f64) -> Matrix3d {
    euler_xyz_to_rotmat(rx_deg.to_radians(), ry_deg.to_radians(), rz_deg.to_radians())
}

/// Calculates the rotation matrices for a batch of rotation vectors.
/// Input is ``[N, 3]``, output is ``[N, 3, 3]``. The identity policy for
/// near-zero vectors is applied to each row on its own.
pub fn batch_rodrigues(axis_angles: &nd::ArrayView2<f64>, execution: Execution) -> nd::Array3<f64> {
    assert_eq!(axis_angles.ncols(), 3, "axis angles should be an [N, 3] array");
    let mut rotations_per_joint = nd::Array3::<f64>::zeros((axis_angles.nrows(), 3, 3));
    let zip = nd::Zip::from(rotations_per_joint.outer_iter_mut()).and(axis_angles.outer_iter());
    let convert = |mut rot: nd::ArrayViewMut2<f64>, aa: nd::ArrayView1<f64>| {
        let rot_mat = axis_angle_to_rotmat(&vec3d_from_row(&aa));
        set_view_from_mat3d(&mut rot, &rot_mat);
    };
    match execution {
        Execution::Serial => zip.for_each(convert),
        Execution::Parallel => zip.par_for_each(convert),
    }
    rotations_per_joint
}

/// Batched [`rotmat_to_axis_angle`]: ``[N, 3, 3]`` in, ``[N, 3]`` out
pub fn batch_rotmat_to_axis_angle(rot_mats: &nd::ArrayView3<f64>, execution: Execution) -> nd::Array2<f64> {
    assert_eq!(&rot_mats.shape()[1..], &[3, 3], "rotation matrices should be an [N, 3, 3] array");
    let mut axis_angles = nd::Array2::<f64>::zeros((rot_mats.shape()[0], 3));
    let zip = nd::Zip::from(axis_angles.outer_iter_mut()).and(rot_mats.outer_iter());
    let convert = |mut aa: nd::ArrayViewMut1<f64>, rot: nd::ArrayView2<f64>| {
        let axis_angle = rotmat_to_axis_angle(&mat3d_from_view(&rot));
        set_row_from_vec3d(&mut aa, &axis_angle);
    };
    match execution {
        Execution::Serial => zip.for_each(convert),
        Execution::Parallel => zip.par_for_each(convert),
    }
    axis_angles
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn sample_vectors() -> Vec<Vector3d> {
        let mut out = Vec::new();
        for &angle in &[1e-6, 1e-3, 0.1, 0.5, 1.0, 2.0, 3.0, PI - 1e-3] {
            for dir in [
                Vector3d::new(1.0, 0.0, 0.0),
                Vector3d::new(0.0, 1.0, 0.0),
                Vector3d::new(0.0, 0.0, 1.0),
                Vector3d::new(1.0, 2.0, -3.0).normalize(),
                Vector3d::new(-0.3, 0.7, 0.2).normalize(),
            ] {
                out.push(dir * angle);
            }
        }
        out
    }

    #[test]
    fn zero_vector_is_exact_identity() {
        let rot = axis_angle_to_rotmat(&Vector3d::zeros());
        assert_eq!(rot, Matrix3d::identity());
    }

    #[test]
    fn near_zero_vector_is_exact_identity() {
        let rot = axis_angle_to_rotmat(&Vector3d::new(1e-9, -2e-9, 0.0));
        assert_eq!(rot, Matrix3d::identity());
    }

    #[test]
    fn rodrigues_is_orthonormal() {
        for v in sample_vectors() {
            let rot = axis_angle_to_rotmat(&v);
            assert!((rot.transpose() * rot - Matrix3d::identity()).norm() < 1e-5);
            assert!((rot.determinant() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn round_trip_recovers_vector() {
        for v in sample_vectors() {
            let back = rotmat_to_axis_angle(&axis_angle_to_rotmat(&v));
            assert_relative_eq!(back, v, epsilon = 1e-5);
        }
    }

    #[test]
    fn rodrigues_agrees_with_nalgebra() {
        for v in sample_vectors() {
            let ours = axis_angle_to_rotmat(&v);
            let theirs = nalgebra::Rotation3::from_scaled_axis(v);
            assert_relative_eq!(ours, *theirs.matrix(), epsilon = 1e-9);
        }
    }

    #[test]
    fn identity_decodes_to_zero() {
        assert_eq!(rotmat_to_axis_angle(&Matrix3d::identity()), Vector3d::zeros());
    }

    #[test]
    fn half_turn_keeps_its_axis() {
        let half_turn_y = euler_xyz_to_rotmat(0.0, PI, 0.0);
        let aa = rotmat_to_axis_angle(&half_turn_y);
        assert_relative_eq!(aa.norm(), PI, epsilon = 1e-9);
        assert_relative_eq!(axis_angle_to_rotmat(&aa), half_turn_y, epsilon = 1e-9);

        let axis = Vector3d::new(1.0, -1.0, 2.0).normalize();
        let half_turn = axis_angle_to_rotmat(&(axis * PI));
        let back = axis_angle_to_rotmat(&rotmat_to_axis_angle(&half_turn));
        assert_relative_eq!(back, half_turn, epsilon = 1e-7);
    }

    #[test]
    fn cos_is_clamped_for_drifted_matrices() {
        let drifted = Matrix3d::identity() * (1.0 + 1e-7);
        let aa = rotmat_to_axis_angle(&drifted);
        assert!(aa.iter().all(|x| x.is_finite()));
        assert_eq!(aa, Vector3d::zeros());
    }

    #[test]
    fn non_finite_input_propagates() {
        let rot = axis_angle_to_rotmat(&Vector3d::new(f64::NAN, 0.0, 0.0));
        assert!(rot.iter().any(|x| x.is_nan()));
        let aa = rotmat_to_axis_angle(&rot);
        assert!(aa.iter().any(|x| x.is_nan()));
    }

    #[test]
    fn euler_order_is_z_y_x() {
        let (rx, ry, rz) = (0.3, -0.7, 1.1);
        let expected = axis_angle_to_rotmat(&Vector3d::new(0.0, 0.0, rz))
            * axis_angle_to_rotmat(&Vector3d::new(0.0, ry, 0.0))
            * axis_angle_to_rotmat(&Vector3d::new(rx, 0.0, 0.0));
        assert_relative_eq!(euler_xyz_to_rotmat(rx, ry, rz), expected, epsilon = 1e-12);
    }

    #[test]
    fn quarter_turn_about_y_maps_x_to_minus_z() {
        let rot = euler_xyz_deg_to_rotmat(0.0, 90.0, 0.0);
        assert_relative_eq!(rot * Vector3d::x(), -Vector3d::z(), epsilon = 1e-12);
        assert_relative_eq!(euler_xyz_to_rotmat(0.0, FRAC_PI_2, 0.0), rot, epsilon = 1e-12);
    }

    #[test]
    fn batch_applies_identity_policy_per_row() {
        let aa = array![[0.0, 0.0, 0.0], [0.0, FRAC_PI_2, 0.0], [1e-10, 0.0, 0.0]];
        let rots = batch_rodrigues(&aa.view(), Execution::Serial);
        assert_eq!(rots.shape(), &[3, 3, 3]);
        assert_eq!(rots.index_axis(nd::Axis(0), 0), nd::Array2::<f64>::eye(3));
        assert_eq!(rots.index_axis(nd::Axis(0), 2), nd::Array2::<f64>::eye(3));
        assert_relative_eq!(rots[(1, 0, 2)], 1.0, epsilon = 1e-12);
        assert_relative_eq!(rots[(1, 2, 0)], -1.0, epsilon = 1e-12);
    }

    #[test]
    fn serial_and_parallel_batches_match() {
        let rows: Vec<f64> = sample_vectors().iter().flat_map(|v| [v.x, v.y, v.z]).collect();
        let aa = nd::Array2::from_shape_vec((rows.len() / 3, 3), rows).unwrap();
        let serial = batch_rodrigues(&aa.view(), Execution::Serial);
        let parallel = batch_rodrigues(&aa.view(), Execution::Parallel);
        assert_eq!(serial, parallel);
        let back_serial = batch_rotmat_to_axis_angle(&serial.view(), Execution::Serial);
        let back_parallel = batch_rotmat_to_axis_angle(&parallel.view(), Execution::Parallel);
        assert_eq!(back_serial, back_parallel);
        for (got, want) in back_serial.iter().zip(aa.iter()) {
            assert!((got - want).abs() < 1e-5);
        }
    }
}
