use crate::cli::args::GlobalArgs;
use crate::core::command::{Outcome, RunContext};
use crate::core::registry::Registry;
use crate::domain::error::{ManageError, ManageResult};
use clap::{ArgMatches, Args as ClapArgs, FromArgMatches};
use std::ffi::OsString;
use tracing::debug;

/// Parsed command line, ready to dispatch
#[derive(Debug)]
pub struct Invocation {
    pub global: GlobalArgs,
    /// Selected subcommand name
    pub command: String,
    /// Arguments of the selected subcommand
    pub args: ArgMatches,
}

/// Routes parsed command lines to registered commands
pub struct Dispatcher {
    registry: Registry,
}

impl Dispatcher {
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Parser with one required subcommand per registered command
    pub fn build_cli(&self) -> clap::Command {
        let root = GlobalArgs::augment_args(clap::Command::new("manage"))
            .version(env!("CARGO_PKG_VERSION"))
            .about("Management scripts runner")
            .subcommand_required(true);

        self.registry
            .iter()
            .fold(root, |cli, (name, command)| {
                let subcommand = clap::Command::new(name.to_string()).about(command.about());
                cli.subcommand(command.add_args(subcommand))
            })
    }

    /// Parse `argv`; usage errors are left to the caller to report
    pub fn parse_from<I, T>(&self, argv: I) -> Result<Invocation, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let mut cli = self.build_cli();
        let matches = cli.try_get_matches_from_mut(argv)?;
        let global = GlobalArgs::from_arg_matches(&matches)?;

        match matches.subcommand() {
            Some((name, args)) => Ok(Invocation {
                global,
                command: name.to_string(),
                args: args.clone(),
            }),
            None => Err(cli.error(
                clap::error::ErrorKind::MissingSubcommand,
                "a subcommand is required",
            )),
        }
    }

    /// Run the command selected by `invocation`
    pub fn dispatch(&self, invocation: &Invocation, ctx: &RunContext) -> ManageResult<Outcome> {
        let command = self
            .registry
            .get(&invocation.command)
            .ok_or_else(|| ManageError::UnknownCommand(invocation.command.clone()))?;

        debug!("Dispatching '{}'", invocation.command);
        command.run(ctx, &invocation.args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::command::ManageCommand;
    use crate::core::proxy::proxied_args;
    use crate::domain::config::{ManageConfig, NamedProxy, ProxyConfig, Settings};
    use clap::error::ErrorKind;
    use std::path::PathBuf;

    fn dispatcher() -> Dispatcher {
        let config = ManageConfig {
            proxy: vec![NamedProxy {
                name: "lint".to_string(),
                proxy: ProxyConfig::new("ruff check"),
            }],
            ..ManageConfig::default()
        };
        Dispatcher::new(Registry::from_config(&config))
    }

    #[test]
    fn test_one_subcommand_per_entry() {
        let cli = dispatcher().build_cli();
        let mut names: Vec<_> = cli.get_subcommands().map(|sub| sub.get_name()).collect();
        names.sort_unstable();
        assert_eq!(names, vec!["commands", "init", "lint", "test"]);

        let test = cli.find_subcommand("test").unwrap();
        assert_eq!(
            test.get_about().map(|about| about.to_string()),
            Some("Runs python -m unittest with received arguments".to_string())
        );
    }

    #[test]
    fn test_missing_subcommand_is_usage_error() {
        let err = dispatcher().parse_from(["manage"]).unwrap_err();
        assert!(matches!(
            err.kind(),
            ErrorKind::MissingSubcommand | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
        ));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_unknown_subcommand_is_usage_error() {
        let err = dispatcher().parse_from(["manage", "deploy"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidSubcommand);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_test_defaults_to_discover() {
        let invocation = dispatcher().parse_from(["manage", "test"]).unwrap();
        assert_eq!(invocation.command, "test");
        assert_eq!(proxied_args(&invocation.args), vec!["discover"]);
    }

    #[test]
    fn test_test_module_passed_verbatim() {
        let invocation = dispatcher()
            .parse_from(["manage", "test", "app.tests.test_views"])
            .unwrap();
        assert_eq!(proxied_args(&invocation.args), vec!["app.tests.test_views"]);
    }

    #[test]
    fn test_global_args_before_subcommand() {
        let invocation = dispatcher()
            .parse_from(["manage", "-q", "--output", "json", "commands"])
            .unwrap();
        assert!(invocation.global.quiet);
        assert_eq!(invocation.global.output, crate::cli::args::OutputFormat::Json);
        assert_eq!(invocation.command, "commands");
    }

    #[test]
    fn test_flags_after_proxy_subcommand_are_forwarded() {
        let invocation = dispatcher()
            .parse_from(["manage", "lint", "-v", "src"])
            .unwrap();
        assert!(!invocation.global.verbose);
        assert_eq!(proxied_args(&invocation.args), vec!["-v", "src"]);
    }

    struct Unfinished;

    impl ManageCommand for Unfinished {
        fn about(&self) -> String {
            "Not done yet".to_string()
        }
    }

    #[test]
    fn test_dispatch_unimplemented_command() {
        let mut registry = Registry::new();
        registry.register(Box::new(Unfinished));
        let dispatcher = Dispatcher::new(registry);

        let invocation = dispatcher.parse_from(["manage", "unfinished"]).unwrap();
        let ctx = RunContext::new(PathBuf::from("."), Settings::default());
        let err = dispatcher.dispatch(&invocation, &ctx).unwrap_err();
        assert!(matches!(err, ManageError::NotImplemented { .. }));
    }

    #[test]
    fn test_dispatch_unknown_name() {
        let dispatcher = dispatcher();
        let mut invocation = dispatcher.parse_from(["manage", "commands"]).unwrap();
        invocation.command = "missing".to_string();

        let ctx = RunContext::new(PathBuf::from("."), Settings::default());
        let err = dispatcher.dispatch(&invocation, &ctx).unwrap_err();
        assert!(matches!(err, ManageError::UnknownCommand(ref name) if name == "missing"));
    }
}
