use ndarray_npy::{ReadNpyError, ReadNpzError, WriteNpzError};
use thiserror::Error;

/// Everything that can go wrong while loading, re-basing or saving a motion.
///
/// Only [`MotionError::ShapeMismatch`] can come out of the pure transforms;
/// numerical degeneracies are handled silently and non-finite values are
/// passed through.
#[derive(Debug, Error)]
pub enum MotionError {
    #[error("shape mismatch for `{field}`: expected {expected}, found {found}")]
    ShapeMismatch {
        field: &'static str,
        expected: String,
        found: String,
    },
    #[error("motion archive has no `{0}` array")]
    MissingField(String),
    #[error("unsupported file {path}: expected a .{expected} file")]
    UnsupportedFile { path: String, expected: &'static str },
    #[error("array layout error: {0}")]
    Layout(#[from] ndarray::ShapeError),
    #[error("failed to read npz archive: {0}")]
    ReadNpz(#[from] ReadNpzError),
    #[error("failed to write npz archive: {0}")]
    WriteNpz(#[from] WriteNpzError),
    #[error("failed to read npy array: {0}")]
    ReadNpy(#[from] ReadNpyError),
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl MotionError {
    pub fn shape_mismatch(field: &'static str, expected: impl Into<String>, found: &[usize]) -> Self {
        Self::ShapeMismatch {
            field,
            expected: expected.into(),
            found: format!("{found:?}"),
        }
    }
}

pub type Result<T> = std::result::Result<T, MotionError>;
