//! Binary buffer utilities for the protobuf wire format.
//!
//! # Overview
//!
//! - [`Reader`] - Reads wire primitives from a byte slice with cursor tracking
//! - [`Writer`] - Writes wire primitives to an auto-growing buffer
//!
//! Reads are fallible: running past the end of the input or overlong varints
//! produce a [`BufferError`] carrying the absolute byte offset, never a panic.
//!
//! # Example
//!
//! ```
//! use portspec_buffers::{Reader, Writer};
//!
//! let mut writer = Writer::new();
//! writer.tag(1, 0);
//! writer.varint(8080);
//! let data = writer.flush();
//!
//! let mut reader = Reader::new(&data);
//! assert_eq!(reader.varint().unwrap(), 0x08);
//! assert_eq!(reader.varint().unwrap(), 8080);
//! assert!(reader.is_empty());
//! ```

mod reader;
mod writer;

pub use reader::Reader;
pub use writer::Writer;

use thiserror::Error;

/// Maximum encoded length of a 64-bit varint.
pub const MAX_VARINT_LEN: usize = 10;

/// Error type for buffer operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// Attempted to read past the end of the buffer.
    #[error("end of buffer at byte {offset}: wanted {wanted} more byte(s)")]
    EndOfBuffer { offset: usize, wanted: usize },
    /// Varint longer than 10 bytes or overflowing 64 bits.
    #[error("varint overflow at byte {offset}")]
    VarintOverflow { offset: usize },
}

impl BufferError {
    /// Absolute offset where the failing read started.
    pub fn offset(&self) -> usize {
        match self {
            BufferError::EndOfBuffer { offset, .. } | BufferError::VarintOverflow { offset } => {
                *offset
            }
        }
    }
}
