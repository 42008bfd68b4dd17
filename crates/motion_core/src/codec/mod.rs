pub mod npz;

use crate::common::errors::{MotionError, Result};
use motion_utils::io::FileType;
use std::path::Path;

/// Rejects paths whose extension doesn't match ``expected``
///
/// # Errors
/// Will return ``UnsupportedFile`` naming the expected extension
pub fn ensure_file_type(path: &Path, expected: FileType) -> Result<()> {
    if FileType::from_path(path) == expected {
        Ok(())
    } else {
        Err(MotionError::UnsupportedFile {
            path: path.display().to_string(),
            expected: expected.value()[0],
        })
    }
}
