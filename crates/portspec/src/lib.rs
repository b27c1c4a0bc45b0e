//! Decode opaque, base64-encoded protobuf port specifications and render them
//! as canonical JSON.
//!
//! # Overview
//!
//! - [`text`] - base64 transport text to raw bytes
//! - [`wire`] - structural validation of the protobuf wire format
//! - [`record`] - the record capability traits the pipeline depends on
//! - [`render`] - deterministic JSON rendering with [`RenderOptions`]
//! - [`api`] - the `ExposedPorts` schema and its codec
//! - [`pipeline`] - the three stages wired together
//!
//! # Example
//!
//! ```
//! use portspec::api::{ExposedPorts, PortSpec};
//!
//! let blob = ExposedPorts {
//!     ports: vec![PortSpec { port: 8080, ..Default::default() }],
//! }
//! .to_base64();
//!
//! let json = portspec::decode_portspec(&blob).unwrap();
//! assert_eq!(json, "{\n  \"ports\": [\n    {\n      \"port\": 8080\n    }\n  ]\n}");
//! ```

mod error;

pub mod api;
pub mod pipeline;
pub mod record;
pub mod render;
pub mod text;
pub mod wire;

pub use error::{DecodeError, Stage};
pub use pipeline::{decode_portspec, Pipeline, PipelineError};
pub use record::{RecordCodec, StructuredRecord};
pub use render::{render, RenderError, RenderOptions};
