//! Wire-format structural error type.

use portspec_buffers::BufferError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WireError {
    #[error("truncated varint at byte {offset}")]
    TruncatedVarint { offset: usize },
    #[error("varint longer than 10 bytes at byte {offset}")]
    VarintOverflow { offset: usize },
    #[error("field number 0 at byte {offset}")]
    FieldNumberZero { offset: usize },
    #[error("field number {number} out of range at byte {offset}")]
    FieldNumberOutOfRange { number: u64, offset: usize },
    #[error("invalid wire type {wire_type} at byte {offset}")]
    InvalidWireType { wire_type: u8, offset: usize },
    #[error("truncated {what} at byte {offset}: {wanted} byte(s) past end of buffer")]
    Truncated {
        what: &'static str,
        offset: usize,
        wanted: usize,
    },
    #[error("end group for field {number} without matching start group at byte {offset}")]
    UnmatchedEndGroup { number: u32, offset: usize },
    #[error("group for field {number} not terminated (started at byte {offset})")]
    UnterminatedGroup { number: u32, offset: usize },
    #[error("nesting deeper than {limit} levels at byte {offset}", limit = super::RECURSION_LIMIT)]
    RecursionLimit { offset: usize },
}

impl WireError {
    pub fn offset(&self) -> usize {
        match self {
            WireError::TruncatedVarint { offset }
            | WireError::VarintOverflow { offset }
            | WireError::FieldNumberZero { offset }
            | WireError::FieldNumberOutOfRange { offset, .. }
            | WireError::InvalidWireType { offset, .. }
            | WireError::Truncated { offset, .. }
            | WireError::UnmatchedEndGroup { offset, .. }
            | WireError::UnterminatedGroup { offset, .. }
            | WireError::RecursionLimit { offset } => *offset,
        }
    }

    /// Maps a failed varint read.
    pub(crate) fn varint(err: BufferError) -> Self {
        match err {
            BufferError::EndOfBuffer { offset, .. } => WireError::TruncatedVarint { offset },
            BufferError::VarintOverflow { offset } => WireError::VarintOverflow { offset },
        }
    }

    /// Maps a failed fixed-width or length-delimited read.
    pub(crate) fn truncated(what: &'static str, err: BufferError) -> Self {
        match err {
            BufferError::EndOfBuffer { offset, wanted } => WireError::Truncated {
                what,
                offset,
                wanted,
            },
            BufferError::VarintOverflow { offset } => WireError::VarintOverflow { offset },
        }
    }
}
