//! Manage Library
//!
//! Project management script runner: a registry of management commands,
//! each exposed as a CLI subcommand, and a dispatcher that parses the
//! command line and runs the selected command. Proxy commands forward
//! their arguments to a shell invocation such as a test runner.

pub mod cli;
pub mod core;
pub mod domain;
pub mod infrastructure;

pub use cli::dispatch::{Dispatcher, Invocation};
pub use core::command::{ManageCommand, Outcome, RunContext};
pub use core::registry::Registry;
pub use domain::config::{ManageConfig, ProxyConfig};
pub use domain::error::{ManageError, ManageResult};
