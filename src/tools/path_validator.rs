use crate::error::{ChapterError, Result};
use std::path::Path;

/// Creates `path` and its parents when missing.
pub fn ensure_directory_exists(path: &Path) -> Result<()> {
    if !path.is_dir() {
        std::fs::create_dir_all(path).map_err(|source| ChapterError::Filesystem {
            path: path.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}
