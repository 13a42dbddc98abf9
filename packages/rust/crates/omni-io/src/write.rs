//! Atomic whole-file overwrite.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::IoError;

/// Overwrite `path` with `content` in one step.
///
/// The content is written to a temp file in the same directory, fsync'd and
/// renamed over the target, so readers see either the old or the new file.
/// An existing target keeps its permissions.
///
/// # Errors
/// Returns `IoError::System` when the temp file cannot be created, written
/// or persisted over the target.
pub fn write_text_atomic<P: AsRef<Path>>(path: P, content: &str) -> Result<(), IoError> {
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut temp_file = NamedTempFile::new_in(parent)?;
    if let Ok(metadata) = std::fs::metadata(path) {
        temp_file.as_file().set_permissions(metadata.permissions())?;
    }
    temp_file.write_all(content.as_bytes())?;
    temp_file.as_file().sync_all()?;
    temp_file.persist(path).map_err(|e| IoError::System(e.error))?;

    tracing::debug!(path = %path.display(), bytes = content.len(), "wrote source file");
    Ok(())
}
