use crate::cli::args::OutputFormat;
use crate::cli::output::ConsoleWriter;
use crate::domain::config::Settings;
use crate::domain::error::{ManageError, ManageResult};
use clap::ArgMatches;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::process::ExitStatus;

/// A management command exposed as a subcommand.
///
/// Commands are stateless. The registry keys each one by [`ManageCommand::name`],
/// which defaults to the implementing type's name in lower case, so a
/// `struct Test` is reachable as `manage test`.
pub trait ManageCommand {
    /// Subcommand name
    fn name(&self) -> String {
        command_name_of::<Self>()
    }

    /// Help text shown in the subcommand listing
    fn about(&self) -> String;

    /// Where the command comes from
    fn kind(&self) -> CommandKind {
        CommandKind::Builtin
    }

    /// Declare accepted arguments on the subcommand parser
    fn add_args(&self, command: clap::Command) -> clap::Command {
        command
    }

    /// Command logic
    fn run(&self, _ctx: &RunContext, _args: &ArgMatches) -> ManageResult<Outcome> {
        Err(ManageError::NotImplemented {
            command: self.name(),
        })
    }
}

/// Lower-cased last path segment of a type name, without generic parameters.
pub fn command_name_of<T: ?Sized>() -> String {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base).to_lowercase()
}

/// Command origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandKind {
    Builtin,
    Proxy,
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandKind::Builtin => write!(f, "builtin"),
            CommandKind::Proxy => write!(f, "proxy"),
        }
    }
}

/// Registered command as listed by `manage commands`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandSummary {
    pub name: String,
    pub kind: CommandKind,
    pub help: String,
}

/// Everything a command may need while running
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Directory proxied commands run in
    pub project_root: PathBuf,
    pub settings: Settings,
    pub output: OutputFormat,
    /// Commands registered for this invocation
    pub catalog: Vec<CommandSummary>,
}

impl RunContext {
    pub fn new(project_root: PathBuf, settings: Settings) -> Self {
        Self {
            project_root,
            settings,
            output: OutputFormat::default(),
            catalog: Vec::new(),
        }
    }

    pub fn writer(&self) -> ConsoleWriter {
        ConsoleWriter::new(self.output)
    }
}

/// Result of a command run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    /// A proxied child process exited
    Child(ExitStatus),
}

impl Outcome {
    /// Process exit code for this outcome.
    ///
    /// A failing child only changes the code when `propagate` is set.
    pub fn exit_code(&self, propagate: bool) -> u8 {
        match self {
            Outcome::Completed => 0,
            Outcome::Child(status) if propagate && !status.success() => status
                .code()
                .and_then(|code| u8::try_from(code).ok())
                .filter(|code| *code != 0)
                .unwrap_or(1),
            Outcome::Child(_) => 0,
        }
    }
}
