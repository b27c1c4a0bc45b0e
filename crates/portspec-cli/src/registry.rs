//! Explicit command registry.
//!
//! Commands are registered into a registry the caller owns, then turned into
//! a `clap` command tree. Nothing is registered globally.

use std::fmt;
use std::io::Write;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Arg, ArgMatches, Command};
use tracing::debug;

/// Command entry point: positional arguments in declaration order, and the
/// sink for standard output.
pub type Handler = fn(&[String], &mut dyn Write) -> Result<()>;

#[derive(Clone, Copy)]
pub struct CommandDescriptor {
    pub name: &'static str,
    pub about: &'static str,
    /// Positional argument names. The command takes exactly this many.
    pub args: &'static [&'static str],
    pub handler: Handler,
}

impl fmt::Debug for CommandDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDescriptor")
            .field("name", &self.name)
            .field("args", &self.args)
            .finish_non_exhaustive()
    }
}

impl CommandDescriptor {
    fn to_command(self) -> Command {
        self.args.iter().fold(
            Command::new(self.name).about(self.about),
            |command, arg| {
                command.arg(
                    Arg::new(*arg)
                        .value_name(*arg)
                        .required(true)
                        .allow_hyphen_values(true),
                )
            },
        )
    }
}

#[derive(Debug, Default)]
pub struct CommandRegistry {
    commands: Vec<CommandDescriptor>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, descriptor: CommandDescriptor) -> Result<()> {
        if self.get(descriptor.name).is_some() {
            bail!("command `{}` is already registered", descriptor.name);
        }
        self.commands.push(descriptor);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&CommandDescriptor> {
        self.commands.iter().find(|command| command.name == name)
    }

    /// Attaches every registered command to `root` as a subcommand.
    pub fn command(&self, root: Command) -> Command {
        self.commands.iter().fold(
            root.subcommand_required(true).arg_required_else_help(true),
            |root, descriptor| root.subcommand(descriptor.to_command()),
        )
    }

    /// Dispatches parsed `matches` to the selected command's handler.
    pub fn run(&self, matches: &ArgMatches, out: &mut dyn Write) -> Result<()> {
        let (name, sub) = matches
            .subcommand()
            .ok_or_else(|| anyhow!("no command given"))?;
        let descriptor = self
            .get(name)
            .ok_or_else(|| anyhow!("unknown command `{name}`"))?;
        let args = descriptor
            .args
            .iter()
            .map(|arg| {
                sub.get_one::<String>(arg)
                    .cloned()
                    .ok_or_else(|| anyhow!("missing argument <{arg}>"))
            })
            .collect::<Result<Vec<_>>>()?;
        debug!(command = name, args = args.len(), "dispatching command");
        (descriptor.handler)(&args, out).with_context(|| name.to_owned())
    }
}
