//! Synchronous file reads.

use std::fs as std_fs;
use std::io::Read;
use std::path::Path;

use crate::detect::decode_buffer;
use crate::error::IoError;

/// Read text from a file with size, binary and encoding checks.
///
/// # Arguments
/// * `path` - Path to the file
/// * `max_bytes` - Maximum file size in bytes
///
/// # Returns
/// Decoded text content or an error.
///
/// # Errors
/// `IoError::NotFound` when the path cannot be stat'ed, `IoError::TooLarge`
/// above `max_bytes`, and the decoding errors of [`crate::decode_buffer`].
///
/// # Example
///
/// ```rust,ignore
/// use omni_io::read_text_safe;
///
/// let content = read_text_safe("Production/src/main.js", 16 * 1024 * 1024)?;
/// ```
pub fn read_text_safe<P: AsRef<Path>>(path: P, max_bytes: u64) -> Result<String, IoError> {
    let path = path.as_ref();

    let metadata = std_fs::metadata(path)
        .map_err(|_| IoError::NotFound(path.to_string_lossy().to_string()))?;

    if metadata.len() > max_bytes {
        return Err(IoError::TooLarge(metadata.len(), max_bytes));
    }

    let mut file = std_fs::File::open(path)?;
    let mut buffer = Vec::with_capacity(usize::try_from(metadata.len()).unwrap_or_default());
    file.read_to_end(&mut buffer)?;

    tracing::debug!(path = %path.display(), bytes = buffer.len(), "read source file");
    decode_buffer(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_sync_read() {
        let dir = TempDir::new().unwrap();
        let p = dir.path().join("sync.js");
        std_fs::write(&p, "import * as A from './a.js';").unwrap();
        assert_eq!(
            read_text_safe(&p, 1024).unwrap(),
            "import * as A from './a.js';"
        );
    }

    #[test]
    fn test_sync_binary() {
        let dir = TempDir::new().unwrap();
        let p = dir.path().join("binary.bin");
        let mut file = std_fs::File::create(&p).unwrap();
        file.write_all(b"\x00\x01\x02\x03").unwrap();
        assert!(matches!(read_text_safe(&p, 1024), Err(IoError::BinaryFile)));
    }

    #[test]
    fn test_file_not_found() {
        let result = read_text_safe("/nonexistent/main.js", 1024);
        assert!(matches!(result, Err(IoError::NotFound(_))));
    }
}
