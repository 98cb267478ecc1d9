use crate::core::builtin::{Commands, Init, Test};
use crate::core::command::{CommandSummary, ManageCommand};
use crate::core::proxy::ProxyCommand;
use crate::domain::config::ManageConfig;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Command registry, keyed by lower-cased command name.
///
/// Names are unique: when two commands lower-case to the same name the
/// first one registered stays reachable and the later one is dropped.
#[derive(Default)]
pub struct Registry {
    commands: BTreeMap<String, Box<dyn ManageCommand>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in commands, with `test` using the configured runner
    pub fn with_builtins(config: &ManageConfig) -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(Test::new(config.test.clone())));
        registry.register(Box::new(Commands));
        registry.register(Box::new(Init));
        registry
    }

    /// Built-ins followed by the proxies declared in `config`, in file order
    pub fn from_config(config: &ManageConfig) -> Self {
        let mut registry = Self::with_builtins(config);
        for entry in &config.proxy {
            registry.register(Box::new(ProxyCommand::from(entry.clone())));
        }
        registry
    }

    /// Register a command. Returns false if its name is unusable as a
    /// subcommand or was already taken.
    pub fn register(&mut self, command: Box<dyn ManageCommand>) -> bool {
        let name = command.name().to_lowercase();
        if !is_valid_name(&name) {
            warn!("Command name '{}' is not a valid subcommand, ignoring", name);
            return false;
        }
        if self.commands.contains_key(&name) {
            warn!("Command '{}' is already registered, ignoring duplicate", name);
            return false;
        }

        debug!("Registered {} command '{}'", command.kind(), name);
        self.commands.insert(name, command);
        true
    }

    pub fn get(&self, name: &str) -> Option<&dyn ManageCommand> {
        self.commands.get(name).map(|command| &**command)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.commands.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &(dyn ManageCommand + 'static))> {
        self.commands
            .iter()
            .map(|(name, command)| (name.as_str(), &**command))
    }

    /// Name, kind and help text of every registered command
    pub fn catalog(&self) -> Vec<CommandSummary> {
        self.iter()
            .map(|(name, command)| CommandSummary {
                name: name.to_string(),
                kind: command.kind(),
                help: command.about(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Subcommand names must be non-empty, must not look like a flag or contain
/// whitespace, and must not shadow clap's generated `help` subcommand.
fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('-')
        && !name.chars().any(char::is_whitespace)
        && name != "help"
}
