// Built-in management commands
use crate::cli::output::OutputWriter;
use crate::core::command::{ManageCommand, Outcome, RunContext};
use crate::domain::config::ProxyConfig;
use crate::domain::error::ManageResult;
use crate::infrastructure::config::ConfigManager;
use clap::{Arg, ArgAction, ArgMatches};
use std::path::PathBuf;
use tracing::info;

/// Test runner proxy
#[derive(Debug, Clone, Default)]
pub struct Test {
    runner: ProxyConfig,
}

impl Test {
    pub fn new(runner: ProxyConfig) -> Self {
        Self { runner }
    }

    pub fn runner(&self) -> &ProxyConfig {
        &self.runner
    }
}

impl ManageCommand for Test {
    fn about(&self) -> String {
        self.runner.about()
    }

    fn add_args(&self, command: clap::Command) -> clap::Command {
        self.runner.declare_args(command)
    }

    fn run(&self, ctx: &RunContext, args: &ArgMatches) -> ManageResult<Outcome> {
        self.runner.proxy(ctx, args)
    }
}

/// Lists registered commands
#[derive(Debug, Clone, Copy, Default)]
pub struct Commands;

impl ManageCommand for Commands {
    fn about(&self) -> String {
        "List available commands".to_string()
    }

    fn run(&self, ctx: &RunContext, _args: &ArgMatches) -> ManageResult<Outcome> {
        ctx.writer().write_commands(&ctx.catalog)?;
        Ok(Outcome::Completed)
    }
}

/// Writes a starter project configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct Init;

impl ManageCommand for Init {
    fn about(&self) -> String {
        "Create a manage.toml in the given directory".to_string()
    }

    fn add_args(&self, command: clap::Command) -> clap::Command {
        command
            .arg(
                Arg::new("dir")
                    .help("Target directory")
                    .value_parser(clap::value_parser!(PathBuf))
                    .default_value("."),
            )
            .arg(
                Arg::new("force")
                    .short('f')
                    .long("force")
                    .help("Overwrite an existing file")
                    .action(ArgAction::SetTrue),
            )
    }

    fn run(&self, ctx: &RunContext, args: &ArgMatches) -> ManageResult<Outcome> {
        let dir = args
            .get_one::<PathBuf>("dir")
            .cloned()
            .unwrap_or_else(|| PathBuf::from("."));
        let force = args.get_flag("force");

        let path = ConfigManager::init_project_config(&dir, force)?;
        info!("Wrote {}", path.display());
        ctx.writer()
            .write_message(&format!("Created {}", path.display()))?;
        Ok(Outcome::Completed)
    }
}
