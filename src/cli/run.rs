//! Command dispatch.

use anyhow::Result;

use super::args::{Arguments, Command};
use super::commands::{init::init, lookup::lookup, sources::sources};
use super::exit_status::ExitStatus;

pub fn run(Arguments { command }: Arguments) -> Result<ExitStatus> {
    match command {
        Some(Command::Lookup(cmd)) => lookup(cmd),
        Some(Command::Sources(cmd)) => sources(cmd),
        Some(Command::Init) => init(),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
