//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `lookup`: Resolve a key across the configured hierarchy
//! - `sources`: Show the data sources consulted for a scope
//! - `init`: Initialize a tier settings file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};

use crate::core::ResolutionType;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Lookup(cmd)) => cmd.args.verbose,
            Some(Command::Sources(cmd)) => cmd.args.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Settings file path (overrides discovery)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Scope variable as NAME=VALUE (repeatable)
    #[arg(short = 's', long = "scope", value_name = "NAME=VALUE")]
    pub scope: Vec<String>,

    /// Load scope variables from a JSON file
    #[arg(long)]
    pub scope_file: Option<PathBuf>,

    /// Data directory (overrides settings file)
    #[arg(long)]
    pub datadir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// How values found across hierarchy levels are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResolutionArg {
    /// Return the first value found
    First,
    /// Collect values from every level into a list
    Array,
    /// Deep-merge mapping values from every level
    Hash,
}

impl From<ResolutionArg> for ResolutionType {
    fn from(arg: ResolutionArg) -> Self {
        match arg {
            ResolutionArg::First => ResolutionType::First,
            ResolutionArg::Array => ResolutionType::Array,
            ResolutionArg::Hash => ResolutionType::Hash,
        }
    }
}

#[derive(Debug, Args)]
pub struct LookupCommand {
    /// The key to resolve, e.g. `db.host` or `db."driver.options"`
    pub key: String,

    /// Resolution strategy across hierarchy levels
    #[arg(long, value_enum, default_value = "first")]
    pub resolution: ResolutionArg,

    /// Consult this data source before the configured hierarchy
    #[arg(long)]
    pub order_override: Option<String>,

    #[command(flatten)]
    pub args: CommonArgs,
}

#[derive(Debug, Args)]
pub struct SourcesCommand {
    /// Emit the source list as JSON instead of the human-readable table
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub args: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Look up a key across the configured hierarchy
    Lookup(LookupCommand),
    /// Show the data sources that would be consulted for a scope
    Sources(SourcesCommand),
    /// Initialize a new .tierrc.json settings file
    Init,
}
