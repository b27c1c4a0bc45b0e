//! Debug commands.

mod decode_portspec;
mod encode_portspec;

use anyhow::Result;

use crate::registry::CommandRegistry;

pub fn register_all(registry: &mut CommandRegistry) -> Result<()> {
    registry.register(decode_portspec::COMMAND)?;
    registry.register(encode_portspec::COMMAND)?;
    Ok(())
}
