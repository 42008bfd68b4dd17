pub mod errors;
pub mod metadata;
pub mod sequence;
pub mod stats;
