//! Decode-side error type shared by the text and record stages.

use std::fmt;

use thiserror::Error;

use crate::wire::WireError;

/// Pipeline stage that produced a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// base64 text to raw bytes.
    Text,
    /// Raw bytes to typed record.
    Record,
    /// Typed record to JSON text.
    Render,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Text => f.write_str("text decode"),
            Stage::Record => f.write_str("record decode"),
            Stage::Render => f.write_str("render"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("malformed base64 text (input length {len}): {message}")]
    MalformedText { len: usize, message: String },
    #[error("malformed record{at}: {rule}", at = at_offset(.offset))]
    MalformedRecord { rule: String, offset: Option<usize> },
}

fn at_offset(offset: &Option<usize>) -> String {
    match offset {
        Some(offset) => format!(" at byte {offset}"),
        None => String::new(),
    }
}

impl DecodeError {
    pub fn stage(&self) -> Stage {
        match self {
            DecodeError::MalformedText { .. } => Stage::Text,
            DecodeError::MalformedRecord { .. } => Stage::Record,
        }
    }

    /// Byte offset of a structural violation, when known.
    pub fn offset(&self) -> Option<usize> {
        match self {
            DecodeError::MalformedRecord { offset, .. } => *offset,
            DecodeError::MalformedText { .. } => None,
        }
    }
}

impl From<WireError> for DecodeError {
    fn from(err: WireError) -> Self {
        DecodeError::MalformedRecord {
            offset: Some(err.offset()),
            rule: err.to_string(),
        }
    }
}

impl From<prost::DecodeError> for DecodeError {
    fn from(err: prost::DecodeError) -> Self {
        DecodeError::MalformedRecord {
            rule: err.to_string(),
            offset: None,
        }
    }
}
