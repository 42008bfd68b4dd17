use motion_utils::{
    numerical::euler_xyz_deg_to_rotmat,
    vector::{Matrix3d, Vector3d},
};

/// Fixed change of frame applied to a whole motion: a rotation for every joint
/// and for the trajectory, then optional re-centering of the trajectory, then
/// a constant offset.
#[derive(Clone, Debug, PartialEq)]
pub struct RigidTransform {
    /// ``R_fix``, expected to be orthonormal with determinant +1
    pub rotation: Matrix3d,
    /// Subtract the mean position after rotating
    pub center: bool,
    /// Added to every frame last, in scene units
    pub offset: Vector3d,
}
impl Default for RigidTransform {
    fn default() -> Self {
        Self::identity()
    }
}
impl RigidTransform {
    pub fn new(rotation: Matrix3d, center: bool, offset: Vector3d) -> Self {
        Self { rotation, center, offset }
    }
    pub fn identity() -> Self {
        Self::new(Matrix3d::identity(), false, Vector3d::zeros())
    }
    /// Rotation about X, then Y, then Z (degrees), i.e. ``Rz * Ry * Rx``
    pub fn from_euler_deg(rx: f64, ry: f64, rz: f64) -> Self {
        Self::new(euler_xyz_deg_to_rotmat(rx, ry, rz), false, Vector3d::zeros())
    }
    #[must_use]
    pub fn with_centering(mut self, center: bool) -> Self {
        self.center = center;
        self
    }
    #[must_use]
    pub fn with_offset(mut self, offset: Vector3d) -> Self {
        self.offset = offset;
        self
    }
    /// ``R_fix * M * R_fix^T``: the same rotation expressed in the new frame.
    /// The rotation angle of ``M`` is preserved, only its axis moves.
    pub fn conjugate(&self, local_rotation: &Matrix3d) -> Matrix3d {
        self.rotation * local_rotation * self.rotation.transpose()
    }
    /// Positions are world vectors and get rotated directly
    pub fn rotate_point(&self, point: &Vector3d) -> Vector3d {
        self.rotation * point
    }
}
