//! Binary detection and decoding utilities.
//!
//! Quick binary detection using NULL byte scanning.

use memchr::memchr;

use crate::error::IoError;

/// Quick binary detection - checks first 8KB for NULL bytes.
///
/// Files containing NULL bytes in the first 8KB are considered binary.
#[must_use]
pub fn is_binary(buffer: &[u8]) -> bool {
    let check_len = std::cmp::min(buffer.len(), 8192);
    memchr(0, &buffer[..check_len]).is_some()
}

/// Decode bytes to a `String`, strictly.
///
/// Source files are written back after rewriting, so a lossy decode would
/// silently replace bytes with U+FFFD. Invalid UTF-8 is an error instead.
///
/// # Errors
/// Returns `IoError::BinaryFile` when binary content is detected and
/// `IoError::Encoding` with the offset of the first invalid byte otherwise.
pub fn decode_buffer(buffer: Vec<u8>) -> Result<String, IoError> {
    if is_binary(&buffer) {
        return Err(IoError::BinaryFile);
    }

    String::from_utf8(buffer).map_err(|e| IoError::Encoding(e.utf8_error().valid_up_to()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_past_window_is_text() {
        let mut buffer = vec![b'a'; 9000];
        buffer.push(0);
        assert!(!is_binary(&buffer));
    }

    #[test]
    fn test_invalid_utf8_offset() {
        let result = decode_buffer(vec![0x48, 0x65, 0x6c, 0xff, 0x6f]);
        assert!(matches!(result, Err(IoError::Encoding(3))));
    }
}
