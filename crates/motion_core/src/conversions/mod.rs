pub mod adjust;
pub mod joints;
