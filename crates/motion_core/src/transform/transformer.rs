use super::{options::TransformerOptions, rigid::RigidTransform};
use crate::common::{errors::Result, metadata::NUM_JOINTS, sequence::MotionSequence};
use log::debug;
use motion_utils::{
    numerical::{batch_rodrigues, batch_rotmat_to_axis_angle, Execution},
    vector::{mat3d_from_view, set_row_from_vec3d, set_view_from_mat3d, vec3d_from_row_f},
};
use ndarray as nd;
use ndarray::s;

/// Re-expresses whole motion sequences in the frame given by a fixed
/// [`RigidTransform`]. Every joint rotation is conjugated, the root trajectory
/// is rotated, optionally centered and then offset. Shape parameters are
/// copied through untouched.
#[derive(Clone, Debug, Default)]
pub struct SequenceTransformer {
    transform: RigidTransform,
    options: TransformerOptions,
}
impl SequenceTransformer {
    pub fn new(transform: RigidTransform) -> Self {
        Self::with_options(transform, TransformerOptions::default())
    }
    pub fn with_options(transform: RigidTransform, options: TransformerOptions) -> Self {
        Self { transform, options }
    }
    pub fn transform(&self) -> &RigidTransform {
        &self.transform
    }
    pub fn options(&self) -> &TransformerOptions {
        &self.options
    }
    /// Returns a new sequence with the same shapes as ``seq``; ``seq`` itself
    /// is never modified.
    ///
    /// # Errors
    /// Will return ``ShapeMismatch`` if the sequence is malformed. Nothing is
    /// computed in that case.
    #[allow(clippy::cast_possible_truncation)]
    pub fn apply(&self, seq: &MotionSequence) -> Result<MotionSequence> {
        seq.validate()?;
        seq.warn_if_non_finite("rigid transform");
        let num_frames = seq.num_frames();
        let execution = self.options.execution;
        debug!("re-basing {num_frames} frames ({execution:?})");

        let axis_angles = seq
            .joint_poses()?
            .mapv(f64::from)
            .into_shape_with_order((num_frames * NUM_JOINTS, 3))?;
        let mut rot_mats = batch_rodrigues(&axis_angles.view(), execution);
        self.conjugate_all(&mut rot_mats);
        let joint_poses = batch_rotmat_to_axis_angle(&rot_mats.view(), execution)
            .mapv(|x| x as f32)
            .into_shape_with_order((num_frames, NUM_JOINTS * 3))?;

        Ok(MotionSequence {
            global_orient: joint_poses.slice(s![.., ..3]).to_owned(),
            body_pose: joint_poses.slice(s![.., 3..]).to_owned(),
            transl: self.transform_translation(&seq.transl),
            betas: seq.betas.clone(),
        })
    }
    /// ``M <- R_fix * M * R_fix^T`` for every matrix of an ``[N, 3, 3]`` batch
    fn conjugate_all(&self, rot_mats: &mut nd::Array3<f64>) {
        let zip = nd::Zip::from(rot_mats.outer_iter_mut());
        let conjugate = |mut rot: nd::ArrayViewMut2<f64>| {
            let local = mat3d_from_view(&rot.view());
            set_view_from_mat3d(&mut rot, &self.transform.conjugate(&local));
        };
        match self.options.execution {
            Execution::Serial => zip.for_each(conjugate),
            Execution::Parallel => zip.par_for_each(conjugate),
        }
    }
    /// Rotate, then center, then offset. Done in f64 so the mean of a long
    /// trajectory doesn't lose precision.
    #[allow(clippy::cast_possible_truncation)]
    fn transform_translation(&self, transl: &nd::Array2<f32>) -> nd::Array2<f32> {
        let mut moved = nd::Array2::<f64>::zeros(transl.raw_dim());
        let zip = nd::Zip::from(moved.outer_iter_mut()).and(transl.outer_iter());
        let rotate = |mut out: nd::ArrayViewMut1<f64>, t: nd::ArrayView1<f32>| {
            set_row_from_vec3d(&mut out, &self.transform.rotate_point(&vec3d_from_row_f(&t)));
        };
        match self.options.execution {
            Execution::Serial => zip.for_each(rotate),
            Execution::Parallel => zip.par_for_each(rotate),
        }
        if self.transform.center {
            if let Some(mean) = moved.mean_axis(nd::Axis(0)) {
                moved -= &mean;
            }
        }
        moved += &nd::arr1(self.transform.offset.as_slice());
        moved.mapv(|x| x as f32)
    }
}

/// One-off version of [`SequenceTransformer::apply`] with default options
///
/// # Errors
/// Will return ``ShapeMismatch`` if the sequence is malformed
pub fn transform_sequence(seq: &MotionSequence, transform: &RigidTransform) -> Result<MotionSequence> {
    SequenceTransformer::new(transform.clone()).apply(seq)
}
