//! Scene fitting helpers that only touch the root of a motion: they turn the
//! whole body in place and move its trajectory, leaving ``body_pose`` and
//! ``betas`` alone.

use crate::common::{errors::Result, sequence::MotionSequence};
use log::info;
use motion_utils::{
    numerical::{batch_rodrigues, batch_rotmat_to_axis_angle, euler_xyz_deg_to_rotmat, Execution},
    vector::{mat3d_from_view, set_row_f_from_vec3d, set_view_from_mat3d, vec3d_from_row_f, Matrix3d},
};
use ndarray as nd;
use serde::{Deserialize, Serialize};

/// Y axis in the renderer's convention
const UP_AXIS: usize = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AdjustConfig {
    /// Turn about the vertical axis in degrees, applied before scaling
    pub rotate_y: f64,
    pub scale: f32,
    /// Height the mean of the trajectory is moved to
    pub center_y: f32,
}
impl Default for AdjustConfig {
    fn default() -> Self {
        Self {
            rotate_y: 0.0,
            scale: 1.0,
            center_y: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FlipConfig {
    pub center_y: f32,
}
impl Default for FlipConfig {
    fn default() -> Self {
        Self { center_y: 1.0 }
    }
}

/// ``global_orient <- rotation * global_orient`` for every frame. Unlike the
/// full re-basing this is a left multiplication, so the body turns in world
/// space while its joints keep their local frames.
///
/// # Errors
/// Will return ``ShapeMismatch`` if the sequence is malformed
#[allow(clippy::cast_possible_truncation)]
pub fn reorient_root(seq: &MotionSequence, rotation: &Matrix3d) -> Result<nd::Array2<f32>> {
    seq.validate()?;
    let axis_angles = seq.global_orient.mapv(f64::from);
    let mut rot_mats = batch_rodrigues(&axis_angles.view(), Execution::Serial);
    for mut rot in rot_mats.outer_iter_mut() {
        let turned = rotation * mat3d_from_view(&rot.view());
        set_view_from_mat3d(&mut rot, &turned);
    }
    Ok(batch_rotmat_to_axis_angle(&rot_mats.view(), Execution::Serial).mapv(|x| x as f32))
}

fn rotate_translation(seq: &mut MotionSequence, rotation: &Matrix3d) {
    for mut row in seq.transl.rows_mut() {
        let p = rotation * vec3d_from_row_f(&row.view());
        set_row_f_from_vec3d(&mut row, &p);
    }
}

fn recenter(seq: &mut MotionSequence, center_y: f32) {
    seq.center_translation_axis(UP_AXIS, center_y);
    seq.center_translation_axis(0, 0.0);
    seq.center_translation_axis(2, 0.0);
}

/// Turns, scales and re-centers a motion so it sits in a scene: the mean
/// height ends at ``center_y`` and the horizontal mean at the origin.
///
/// # Errors
/// Will return ``ShapeMismatch`` if the sequence is malformed
pub fn adjust_translation(seq: &MotionSequence, config: &AdjustConfig) -> Result<MotionSequence> {
    seq.validate()?;
    seq.warn_if_non_finite("adjust translation");
    let mut out = seq.clone();
    if config.rotate_y != 0.0 {
        info!("rotating {} degrees around Y", config.rotate_y);
        let rot_y = euler_xyz_deg_to_rotmat(0.0, config.rotate_y, 0.0);
        rotate_translation(&mut out, &rot_y);
        out.global_orient = reorient_root(seq, &rot_y)?;
    }
    out.scale_translation(config.scale);
    recenter(&mut out, config.center_y);
    Ok(out)
}

/// Makes a motion walk the other way: Z of the trajectory is mirrored and the
/// body is turned half way around the vertical axis.
///
/// # Errors
/// Will return ``ShapeMismatch`` if the sequence is malformed
pub fn flip_direction(seq: &MotionSequence, config: &FlipConfig) -> Result<MotionSequence> {
    seq.validate()?;
    seq.warn_if_non_finite("flip direction");
    let mut out = seq.clone();
    out.transl.column_mut(2).mapv_inplace(|z| -z);
    out.global_orient = reorient_root(seq, &euler_xyz_deg_to_rotmat(0.0, 180.0, 0.0))?;
    recenter(&mut out, config.center_y);
    Ok(out)
}
