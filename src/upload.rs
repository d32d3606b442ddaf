use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::AppError;

/// Strips path components and any byte outside `[A-Za-z0-9._-]` from a
/// client-supplied filename before it touches the filesystem.
pub fn sanitize_filename(filename: &str) -> String {
    let name = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect()
}

/// An upload written to the upload directory for the lifetime of one
/// request. The file is removed when the guard drops, whether or not
/// extraction succeeded, so failed requests cannot accumulate files.
pub struct SavedUpload {
    path: PathBuf,
}

impl SavedUpload {
    pub fn write(upload_dir: &Path, filename: &str, bytes: &[u8]) -> Result<Self, AppError> {
        let safe = sanitize_filename(filename);
        // Uuid prefix keeps concurrent uploads of the same name apart.
        let path = upload_dir.join(format!("{}-{}", Uuid::new_v4(), safe));
        fs::write(&path, bytes)?;
        debug!(path = %path.display(), size = bytes.len(), "upload saved");
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for SavedUpload {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            warn!(path = %self.path.display(), error = %e, "failed to remove upload");
        }
    }
}
