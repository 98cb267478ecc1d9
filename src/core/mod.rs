// Core module - Command model and registry
pub mod builtin;
pub mod command;
pub mod proxy;
pub mod registry;

pub use builtin::{Commands, Init, Test};
pub use command::{CommandKind, CommandSummary, ManageCommand, Outcome, RunContext};
pub use proxy::ProxyCommand;
pub use registry::Registry;
