// CLI module - Command line interface
pub mod args;
pub mod dispatch;
pub mod output;

pub use args::{peek_global_args, GlobalArgs, OutputFormat};
pub use dispatch::{Dispatcher, Invocation};
pub use output::{ConsoleWriter, OutputWriter};
