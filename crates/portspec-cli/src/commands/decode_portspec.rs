use std::io::Write;

use anyhow::{bail, Result};

use crate::registry::CommandDescriptor;

pub const COMMAND: CommandDescriptor = CommandDescriptor {
    name: "decode-portspec",
    about: "Decodes and marshals a port spec to JSON from a base64-encoded protobuf string",
    args: &["str"],
    handler: run,
};

fn run(args: &[String], out: &mut dyn Write) -> Result<()> {
    let [input] = args else {
        bail!("expected exactly one argument, got {}", args.len());
    };
    let json = portspec::decode_portspec(input)?;
    out.write_all(json.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_json_without_trailing_newline() {
        let mut out = Vec::new();
        run(&["".to_owned()], &mut out).unwrap();
        assert_eq!(out, b"{}");
    }

    #[test]
    fn writes_nothing_on_failure() {
        let mut out = Vec::new();
        let err = run(&["not-valid-base64!!".to_owned()], &mut out).unwrap_err();
        assert!(err.to_string().starts_with("text decode stage"));
        assert!(out.is_empty());
    }
}
