use std::io::Write;

use anyhow::{bail, Context, Result};
use portspec::api::ExposedPorts;

use crate::registry::CommandDescriptor;

pub const COMMAND: CommandDescriptor = CommandDescriptor {
    name: "encode-portspec",
    about: "Encodes a JSON port spec into a base64-encoded protobuf string",
    args: &["json"],
    handler: run,
};

fn run(args: &[String], out: &mut dyn Write) -> Result<()> {
    let [input] = args else {
        bail!("expected exactly one argument, got {}", args.len());
    };
    let record = ExposedPorts::from_json_str(input).context("parsing port spec JSON")?;
    out.write_all(record.to_base64().as_bytes())?;
    Ok(())
}
