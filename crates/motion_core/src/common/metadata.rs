//! Fixed sizes of the SMPL body layout the renderer consumes.

/// Non-root joints stored in ``body_pose``
pub const NUM_BODY_JOINTS: usize = 23;
/// Root joint plus the body joints
pub const NUM_JOINTS: usize = NUM_BODY_JOINTS + 1;
/// Flattened per-frame size of ``body_pose``
pub const BODY_POSE_DIM: usize = NUM_BODY_JOINTS * 3;
/// Shape space dimension of ``betas``
pub const NUM_BETAS: usize = 10;

pub const GLOBAL_ORIENT_KEY: &str = "global_orient";
pub const BODY_POSE_KEY: &str = "body_pose";
pub const TRANSL_KEY: &str = "transl";
pub const BETAS_KEY: &str = "betas";
