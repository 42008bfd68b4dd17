use std::path::Path;
/// associating a extension with a enum
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};
#[derive(Clone, Copy, Debug, Display, EnumIter, PartialEq, Eq)]
pub enum FileType {
    /// Motion archive with ``global_orient``, ``body_pose``, ``transl`` and ``betas``
    Npz,
    /// Single raw array, for example joint positions from a motion generator
    Npy,
    Json,
    Unknown,
}
impl FileType {
    pub fn value(&self) -> &'static [&'static str] {
        match self {
            Self::Npz => &["npz"],
            Self::Npy => &["npy"],
            Self::Json => &["json"],
            Self::Unknown => &[""],
        }
    }
    pub fn find_match(ext: &str) -> Self {
        Self::iter()
            .find(|filetype| filetype.value().contains(&(ext.to_lowercase()).as_str()))
            .unwrap_or(FileType::Unknown)
    }
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(std::ffi::OsStr::to_str)
            .map_or(FileType::Unknown, Self::find_match)
    }
}
