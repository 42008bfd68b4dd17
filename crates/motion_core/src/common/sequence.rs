use super::{
    errors::{MotionError, Result},
    metadata::{BODY_POSE_DIM, NUM_BETAS, NUM_JOINTS},
};
use log::warn;
use nd::concatenate;
use ndarray as nd;
use ndarray::prelude::*;

/// SMPL motion in the layout the renderer reads: per-frame root rotation,
/// flattened body joint rotations and root translation, plus one set of shape
/// parameters for the whole sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct MotionSequence {
    /// ``[T, 3]`` axis-angle rotation of the pelvis
    pub global_orient: nd::Array2<f32>,
    /// ``[T, 69]`` axis-angle rotations of the 23 body joints
    pub body_pose: nd::Array2<f32>,
    /// ``[T, 3]`` pelvis position
    pub transl: nd::Array2<f32>,
    /// ``[10]`` shape parameters
    pub betas: nd::Array1<f32>,
}
impl MotionSequence {
    /// # Errors
    /// Will return ``ShapeMismatch`` if the arrays don't describe the same
    /// number of frames or don't have the per-frame sizes of the SMPL body
    pub fn new(global_orient: nd::Array2<f32>, body_pose: nd::Array2<f32>, transl: nd::Array2<f32>, betas: nd::Array1<f32>) -> Result<Self> {
        let seq = Self {
            global_orient,
            body_pose,
            transl,
            betas,
        };
        seq.validate()?;
        Ok(seq)
    }
    /// A sequence of ``num_frames`` rest poses at the origin with the mean shape
    pub fn new_rest(num_frames: usize) -> Self {
        Self {
            global_orient: nd::Array2::<f32>::zeros((num_frames, 3)),
            body_pose: nd::Array2::<f32>::zeros((num_frames, BODY_POSE_DIM)),
            transl: nd::Array2::<f32>::zeros((num_frames, 3)),
            betas: nd::Array1::<f32>::zeros(NUM_BETAS),
        }
    }
    /// Builds a sequence from ``[T, 24, 3]`` joint rotations where joint 0 is
    /// the root.
    ///
    /// # Errors
    /// Will return ``ShapeMismatch`` if the joint count isn't 24 or any other
    /// field disagrees with it
    pub fn from_joint_poses(joint_poses: &nd::ArrayView3<f32>, transl: nd::Array2<f32>, betas: nd::Array1<f32>) -> Result<Self> {
        let (num_frames, num_joints, dim) = joint_poses.dim();
        if num_joints != NUM_JOINTS || dim != 3 {
            return Err(MotionError::shape_mismatch("joint_poses", format!("[{num_frames}, {NUM_JOINTS}, 3]"), joint_poses.shape()));
        }
        let global_orient = joint_poses.index_axis(nd::Axis(1), 0).to_owned();
        let body_pose = joint_poses
            .slice(s![.., 1.., ..])
            .as_standard_layout()
            .into_owned()
            .into_shape_with_order((num_frames, BODY_POSE_DIM))?;
        Self::new(global_orient, body_pose, transl, betas)
    }
    /// Checks every shape invariant. Runs before any transform touches the
    /// data so that a bad sequence never yields partial output.
    ///
    /// # Errors
    /// Will return ``ShapeMismatch`` naming the first offending field
    pub fn validate(&self) -> Result<()> {
        let num_frames = self.global_orient.nrows();
        if num_frames == 0 {
            return Err(MotionError::shape_mismatch(
                "global_orient",
                "at least one frame",
                self.global_orient.shape(),
            ));
        }
        if self.body_pose.nrows() != num_frames {
            return Err(MotionError::shape_mismatch("body_pose", format!("{num_frames} frames"), self.body_pose.shape()));
        }
        if self.transl.nrows() != num_frames {
            return Err(MotionError::shape_mismatch("transl", format!("{num_frames} frames"), self.transl.shape()));
        }
        if self.global_orient.ncols() != 3 {
            return Err(MotionError::shape_mismatch("global_orient", format!("[{num_frames}, 3]"), self.global_orient.shape()));
        }
        if self.body_pose.ncols() != BODY_POSE_DIM {
            return Err(MotionError::shape_mismatch(
                "body_pose",
                format!("[{num_frames}, {BODY_POSE_DIM}]"),
                self.body_pose.shape(),
            ));
        }
        if self.transl.ncols() != 3 {
            return Err(MotionError::shape_mismatch("transl", format!("[{num_frames}, 3]"), self.transl.shape()));
        }
        if self.betas.len() != NUM_BETAS {
            return Err(MotionError::shape_mismatch("betas", format!("[{NUM_BETAS}]"), self.betas.shape()));
        }
        Ok(())
    }
    pub fn num_frames(&self) -> usize {
        self.global_orient.nrows()
    }
    /// Root and body rotations side by side as ``[T, 24, 3]``
    ///
    /// # Errors
    /// Will return ``ShapeMismatch`` if the sequence is malformed
    pub fn joint_poses(&self) -> Result<nd::Array3<f32>> {
        self.validate()?;
        // concatenate appends column blocks, so the result isn't row major
        let per_frame = concatenate(nd::Axis(1), &[self.global_orient.view(), self.body_pose.view()])?
            .as_standard_layout()
            .into_owned();
        Ok(per_frame.into_shape_with_order((self.num_frames(), NUM_JOINTS, 3))?)
    }
    pub fn has_non_finite(&self) -> bool {
        [&self.global_orient, &self.body_pose, &self.transl]
            .iter()
            .any(|arr| arr.iter().any(|x| !x.is_finite()))
            || self.betas.iter().any(|x| !x.is_finite())
    }
    /// Logs a warning if any value is NaN or infinite. Such values are never
    /// rejected, they just propagate through every transform.
    pub fn warn_if_non_finite(&self, context: &str) {
        if self.has_non_finite() {
            warn!("{context}: motion contains non-finite values, they will propagate to the output");
        }
    }
    /// Shift each frame of the motion by the given translation vector.
    pub fn translate(&mut self, translation: &[f32; 3]) {
        let offset = nd::arr1(translation);
        for mut row in self.transl.rows_mut() {
            row += &offset;
        }
    }
    pub fn scale_translation(&mut self, scale: f32) {
        self.transl.mapv_inplace(|x| x * scale);
    }
    /// Shifts one axis of the trajectory so that its mean lands on ``target``
    /// without changing the shape of the trajectory.
    pub fn center_translation_axis(&mut self, axis: usize, target: f32) {
        let mut column = self.transl.column_mut(axis);
        if let Some(mean) = column.mean() {
            column -= mean - target;
        }
    }
    /// Moves the mean of the trajectory to the origin
    pub fn center_translation(&mut self) {
        for axis in 0..3 {
            self.center_translation_axis(axis, 0.0);
        }
    }
}
