#![allow(clippy::doc_markdown)]

//! omni-io - Safe whole-file text I/O for Omni Splice
//!
//! Reads a source file once and writes it back once, with the guards a
//! rewriting tool needs.
//!
//! # Features
//!
//! - **Safety**: Binary detection, size limits, strict UTF-8
//! - **Atomic writes**: Sibling temp file, fsync, rename into place
//!
//! # Architecture (ODF-REP Compliant)
//!
//! ```text
//! omni-io/src/
//! ├── lib.rs      # Re-exports (this file)
//! ├── error.rs    # IoError enum
//! ├── detect.rs   # Binary detection & decoding
//! ├── sync.rs     # Synchronous read API
//! └── write.rs    # Atomic overwrite
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use omni_io::{read_text_safe, write_text_atomic};
//!
//! let content = read_text_safe("main.js", 16 * 1024 * 1024)?;
//! write_text_atomic("main.js", &content.replace("a", "b"))?;
//! ```

// ============================================================================
// Module Declarations (ODF-REP: Atomic Structure)
// ============================================================================

mod detect;
mod error;
mod sync;
mod write;

// ============================================================================
// Public Re-exports
// ============================================================================

pub use error::IoError;
pub use sync::read_text_safe;
pub use write::write_text_atomic;

// Re-export detection utilities for advanced use
pub use detect::{decode_buffer, is_binary};
