use crate::common::{
    errors::{MotionError, Result},
    metadata::{BODY_POSE_DIM, NUM_BETAS},
    sequence::MotionSequence,
};
use log::{debug, info, warn};
use ndarray as nd;
use ndarray_npy::read_npy;
use std::path::Path;

/// Joints in the skeleton text-to-motion generators emit, pelvis first
pub const NUM_GENERATOR_JOINTS: usize = 22;

/// Global XYZ joint positions per frame, ``[T, J, 3]``, as produced by motion
/// generators that don't solve for joint rotations. Joint 0 is the pelvis.
#[derive(Clone, Debug, PartialEq)]
pub struct JointPositions {
    pub positions: nd::Array3<f32>,
}
impl JointPositions {
    /// # Errors
    /// Will return ``ShapeMismatch`` unless the array is ``[T, J, 3]`` with
    /// at least one frame and one joint
    pub fn new(positions: nd::Array3<f32>) -> Result<Self> {
        let (num_frames, num_joints, dim) = positions.dim();
        if num_frames == 0 || num_joints == 0 || dim != 3 {
            return Err(MotionError::shape_mismatch("joint_positions", "[T >= 1, J >= 1, 3]", positions.shape()));
        }
        if num_joints != NUM_GENERATOR_JOINTS {
            warn!("expected {NUM_GENERATOR_JOINTS} joints, got {num_joints}; only the pelvis is used");
        }
        Ok(Self { positions })
    }
    /// Accepts the generator layout ``[samples, J, 3, T]`` or ``[J, 3, T]``.
    /// Only the first sample is kept.
    ///
    /// # Errors
    /// Will return ``ShapeMismatch`` for any other layout
    pub fn from_generator_layout(motion: &nd::ArrayViewD<f32>) -> Result<Self> {
        let per_sample = match motion.ndim() {
            4 => {
                if motion.shape()[0] == 0 {
                    return Err(MotionError::shape_mismatch("motion", "at least one sample", motion.shape()));
                }
                if motion.shape()[0] > 1 {
                    info!("{} samples found, using the first one", motion.shape()[0]);
                }
                motion.index_axis(nd::Axis(0), 0)
            }
            3 => motion.view(),
            _ => return Err(MotionError::shape_mismatch("motion", "[samples, J, 3, T] or [J, 3, T]", motion.shape())),
        };
        let per_sample = per_sample.into_dimensionality::<nd::Ix3>()?;
        // [J, 3, T] -> [T, J, 3]
        let positions = per_sample.permuted_axes([2, 0, 1]).as_standard_layout().into_owned();
        debug!("joint positions shape {:?}", positions.shape());
        Self::new(positions)
    }
    /// Reads a raw ``.npy`` array in generator layout, float32 or float64.
    ///
    /// # Errors
    /// Will return an error if the file can't be read as a numeric array or
    /// has the wrong layout
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_npy(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("loading joint positions from {}", path.display());
        let motion: nd::ArrayD<f32> = match read_npy(path) {
            Ok(arr) => arr,
            Err(err_f32) => {
                debug!("not float32 ({err_f32}), trying float64");
                let arr: nd::ArrayD<f64> = read_npy(path).map_err(|_| err_f32)?;
                arr.mapv(|x| x as f32)
            }
        };
        Self::from_generator_layout(&motion.view())
    }
    pub fn num_frames(&self) -> usize {
        self.positions.shape()[0]
    }
    pub fn num_joints(&self) -> usize {
        self.positions.shape()[1]
    }
    /// Pelvis position per frame, ``[T, 3]``
    pub fn root_trajectory(&self) -> nd::Array2<f32> {
        self.positions.index_axis(nd::Axis(1), 0).to_owned()
    }
    /// A sequence that follows the pelvis trajectory in the rest pose with
    /// the mean shape. Positions alone carry no joint rotations.
    ///
    /// # Errors
    /// Will return ``ShapeMismatch`` if ``positions`` was replaced with an
    /// array of another layout after construction
    pub fn to_sequence(&self) -> Result<MotionSequence> {
        let num_frames = self.num_frames();
        MotionSequence::new(
            nd::Array2::zeros((num_frames, 3)),
            nd::Array2::zeros((num_frames, BODY_POSE_DIM)),
            self.root_trajectory(),
            nd::Array1::zeros(NUM_BETAS),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// ``[samples, 22, 3, T]`` with the pelvis at ``(t, 1, -t)`` and every
    /// other joint offset from it
    fn generator_output(samples: usize, frames: usize) -> nd::ArrayD<f32> {
        nd::Array4::from_shape_fn((samples, NUM_GENERATOR_JOINTS, 3, frames), |(s, j, c, t)| {
            let pelvis = [t as f32, 1.0, -(t as f32)][c];
            pelvis + 0.1 * j as f32 + 100.0 * s as f32
        })
        .into_dyn()
    }

    #[test]
    fn first_sample_pelvis_becomes_translation() {
        let joints = JointPositions::from_generator_layout(&generator_output(2, 5).view()).unwrap();
        assert_eq!(joints.num_frames(), 5);
        assert_eq!(joints.num_joints(), NUM_GENERATOR_JOINTS);
        let seq = joints.to_sequence().unwrap();
        assert_eq!(seq.transl.row(3).to_vec(), vec![3.0, 1.0, -3.0]);
        assert!(seq.global_orient.iter().all(|&x| x == 0.0));
        assert!(seq.body_pose.iter().all(|&x| x == 0.0));
        assert_eq!(seq.betas.len(), NUM_BETAS);
    }

    #[test]
    fn single_sample_layout_is_accepted() {
        let motion = generator_output(1, 4);
        let squeezed = motion.index_axis(nd::Axis(0), 0);
        let joints = JointPositions::from_generator_layout(&squeezed).unwrap();
        approx::assert_relative_eq!(joints.positions[(2, 1, 0)], 2.1, epsilon = 1e-6);
    }

    #[test]
    fn zero_frames_is_a_shape_mismatch() {
        let motion = nd::ArrayD::<f32>::zeros(nd::IxDyn(&[1, 22, 3, 0]));
        let err = JointPositions::from_generator_layout(&motion.view()).unwrap_err();
        assert!(matches!(err, MotionError::ShapeMismatch { field: "joint_positions", .. }));
    }

    #[test]
    fn flat_arrays_are_rejected() {
        let motion = nd::ArrayD::<f32>::zeros(nd::IxDyn(&[22, 3]));
        assert!(matches!(
            JointPositions::from_generator_layout(&motion.view()),
            Err(MotionError::ShapeMismatch { field: "motion", .. })
        ));
    }
}
