use crate::core::command::{CommandKind, ManageCommand, Outcome, RunContext};
use crate::domain::config::{NamedProxy, ProxyConfig};
use crate::domain::error::ManageResult;
use crate::infrastructure::shell::ShellRunner;
use clap::{Arg, ArgAction, ArgMatches};
use tracing::debug;

/// Id of the positional holding proxied arguments
pub const PROXY_ARGS: &str = "args";

impl ProxyConfig {
    /// Help text for the subcommand
    pub fn about(&self) -> String {
        self.help
            .clone()
            .unwrap_or_else(|| format!("Runs {} with received arguments", self.command))
    }

    /// Shell line for the given arguments.
    ///
    /// The template is split on whitespace and the arguments are appended
    /// verbatim, so shell syntax in them is interpreted by the shell.
    pub fn invocation_line(&self, args: &[String]) -> String {
        self.command
            .split_whitespace()
            .chain(args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Takes any number of arguments, falling back to the configured default
    pub fn declare_args(&self, command: clap::Command) -> clap::Command {
        let arg = Arg::new(PROXY_ARGS)
            .help(format!("Arguments that will be sent to \"{}\"", self.command))
            .num_args(0..)
            .action(ArgAction::Append)
            .trailing_var_arg(true)
            .allow_hyphen_values(true);

        let arg = match &self.default {
            Some(default) => arg.default_value(default.clone()),
            None => arg,
        };

        command.arg(arg)
    }

    /// Run the proxied command in the project root, streaming its output
    pub fn proxy(&self, ctx: &RunContext, args: &ArgMatches) -> ManageResult<Outcome> {
        let line = self.invocation_line(&proxied_args(args));
        debug!("Proxying to `{}` in {}", line, ctx.project_root.display());

        let runner = ShellRunner::new(&ctx.settings.shell, &ctx.project_root);
        let status = runner.run(&line)?;
        Ok(Outcome::Child(status))
    }
}

/// Arguments collected by [`ProxyConfig::declare_args`]
pub fn proxied_args(args: &ArgMatches) -> Vec<String> {
    args.get_many::<String>(PROXY_ARGS)
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

/// Proxy command declared in project configuration
#[derive(Debug, Clone)]
pub struct ProxyCommand {
    name: String,
    config: ProxyConfig,
}

impl ProxyCommand {
    pub fn new(name: impl Into<String>, config: ProxyConfig) -> Self {
        Self {
            name: name.into(),
            config,
        }
    }

    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }
}

impl From<NamedProxy> for ProxyCommand {
    fn from(entry: NamedProxy) -> Self {
        Self::new(entry.name, entry.proxy)
    }
}

impl ManageCommand for ProxyCommand {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn about(&self) -> String {
        self.config.about()
    }

    fn kind(&self) -> CommandKind {
        CommandKind::Proxy
    }

    fn add_args(&self, command: clap::Command) -> clap::Command {
        self.config.declare_args(command)
    }

    fn run(&self, ctx: &RunContext, args: &ArgMatches) -> ManageResult<Outcome> {
        self.config.proxy(ctx, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(config: &ProxyConfig, argv: &[&str]) -> Vec<String> {
        let command = config.declare_args(clap::Command::new("proxy"));
        let matches = command
            .try_get_matches_from(std::iter::once("proxy").chain(argv.iter().copied()))
            .unwrap();
        proxied_args(&matches)
    }

    #[test]
    fn test_default_argument() {
        let config = ProxyConfig::test_runner();
        assert_eq!(parse(&config, &[]), vec!["discover"]);
        assert_eq!(
            config.invocation_line(&parse(&config, &[])),
            "python -m unittest discover"
        );
    }

    #[test]
    fn test_explicit_argument_replaces_default() {
        let config = ProxyConfig::test_runner();
        let args = parse(&config, &["tests.test_models"]);
        assert_eq!(args, vec!["tests.test_models"]);
        assert_eq!(
            config.invocation_line(&args),
            "python -m unittest tests.test_models"
        );
    }

    #[test]
    fn test_hyphen_arguments_pass_through() {
        let config = ProxyConfig::new("pytest");
        let args = parse(&config, &["-x", "--lf", "tests/"]);
        assert_eq!(args, vec!["-x", "--lf", "tests/"]);
        assert_eq!(config.invocation_line(&args), "pytest -x --lf tests/");
    }

    #[test]
    fn test_no_default_appends_nothing() {
        let config = ProxyConfig::new("  ruff   check ");
        let args = parse(&config, &[]);
        assert!(args.is_empty());
        assert_eq!(config.invocation_line(&args), "ruff check");
    }

    #[test]
    fn test_about_text() {
        assert_eq!(
            ProxyConfig::test_runner().about(),
            "Runs python -m unittest with received arguments"
        );

        let mut config = ProxyConfig::new("ruff check");
        config.help = Some("Lint the project".to_string());
        assert_eq!(config.about(), "Lint the project");
    }

    #[test]
    fn test_proxy_command_identity() {
        let command = ProxyCommand::from(NamedProxy {
            name: "lint".to_string(),
            proxy: ProxyConfig::new("ruff check"),
        });
        assert_eq!(command.name(), "lint");
        assert_eq!(command.kind(), CommandKind::Proxy);
        assert_eq!(command.config().command, "ruff check");
    }

    #[cfg(unix)]
    #[test]
    fn test_proxy_runs_in_project_root() {
        use crate::domain::config::Settings;

        let dir = tempfile::TempDir::new().unwrap();
        let config = ProxyConfig::new("touch");
        let ctx = RunContext::new(dir.path().to_path_buf(), Settings::default());
        let matches = config
            .declare_args(clap::Command::new("touch"))
            .try_get_matches_from(["touch", "marker"])
            .unwrap();

        let outcome = config.proxy(&ctx, &matches).unwrap();
        assert!(matches!(outcome, Outcome::Child(status) if status.success()));
        assert!(dir.path().join("marker").exists());
    }
}
