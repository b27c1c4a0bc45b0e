//! wsdebug - workspace-manager debug commands.
//!
//! Inspects the opaque blobs the workspace manager stores, e.g.
//! `wsdebug decode-portspec <str>`.

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Command;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

mod commands;
mod registry;

use registry::CommandRegistry;

fn root_command() -> Command {
    Command::new("wsdebug")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Workspace-manager debug commands")
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // Logs go to stderr; stdout carries command output only.
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();
}

fn run(registry: &CommandRegistry) -> Result<()> {
    let matches = registry.command(root_command()).get_matches();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    registry.run(&matches, &mut out)?;
    out.flush().context("flushing stdout")
}

fn main() -> ExitCode {
    init_tracing();

    let mut registry = CommandRegistry::new();
    let result = commands::register_all(&mut registry).and_then(|()| run(&registry));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
