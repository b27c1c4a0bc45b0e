//! Port specification schema shipped with the workspace manager.

mod json;
mod port_spec;

pub use json::JsonInputError;
pub use port_spec::{
    ExposedPorts, PortProtocol, PortSpec, PortSpecCodec, PortVisibility, EXPOSED_PORTS_SHAPE,
    PORT_SPEC_SHAPE,
};
