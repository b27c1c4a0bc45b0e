//! Record capability traits.
//!
//! The pipeline only ever talks to these two traits, so any schema can be
//! plugged in: the shipped [`crate::api::PortSpecCodec`], or a fake record in
//! a test.

use serde_json::Value;

use crate::render::{RenderError, RenderOptions};
use crate::DecodeError;

/// A typed, decoded record that knows how to map itself to JSON.
pub trait StructuredRecord {
    /// Fully qualified message name.
    fn type_name(&self) -> &'static str;

    /// Builds the JSON value for this record. Object keys must be inserted
    /// in schema declaration order.
    fn to_json(&self, options: &RenderOptions) -> Result<Value, RenderError>;
}

/// Binary codec for one record type.
pub trait RecordCodec {
    type Record: StructuredRecord;

    fn id(&self) -> &'static str;
    fn decode(&self, bytes: &[u8]) -> Result<Self::Record, DecodeError>;
    fn encode(&self, record: &Self::Record) -> Vec<u8>;
}
