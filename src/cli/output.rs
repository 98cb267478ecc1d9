use crate::cli::args::OutputFormat;
use crate::core::command::CommandSummary;
use std::io;
use tabled::{Table, Tabled};

/// Output writer trait for different formats
pub trait OutputWriter {
    fn write_commands(&self, commands: &[CommandSummary]) -> Result<(), OutputError>;
    fn write_message(&self, message: &str) -> Result<(), OutputError>;
    fn write_error(&self, error: &str) -> Result<(), OutputError>;
}

/// Output formatting errors
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

impl From<OutputError> for crate::domain::error::ManageError {
    fn from(err: OutputError) -> Self {
        Self::Output(err.to_string())
    }
}

/// Console output writer
pub struct ConsoleWriter {
    format: OutputFormat,
}

impl ConsoleWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Render a command listing in this writer's format
    pub fn render_commands(&self, commands: &[CommandSummary]) -> Result<String, OutputError> {
        let rendered = match self.format {
            OutputFormat::Text => {
                let width = commands
                    .iter()
                    .map(|command| command.name.len())
                    .max()
                    .unwrap_or(0);
                commands
                    .iter()
                    .map(|command| format!("  {:<width$}  {}", command.name, command.help))
                    .collect::<Vec<_>>()
                    .join("\n")
            }
            OutputFormat::Json => serde_json::to_string_pretty(commands)?,
            OutputFormat::Table => {
                if commands.is_empty() {
                    String::new()
                } else {
                    let rows: Vec<CommandTableRow> =
                        commands.iter().map(CommandTableRow::from).collect();
                    Table::new(rows).to_string()
                }
            }
        };
        Ok(rendered)
    }
}

impl OutputWriter for ConsoleWriter {
    fn write_commands(&self, commands: &[CommandSummary]) -> Result<(), OutputError> {
        let rendered = self.render_commands(commands)?;
        if !rendered.is_empty() {
            println!("{}", rendered);
        }
        Ok(())
    }

    fn write_message(&self, message: &str) -> Result<(), OutputError> {
        match self.format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "message": message,
                    "level": "info"
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            _ => {
                println!("{}", message);
            }
        }
        Ok(())
    }

    fn write_error(&self, error: &str) -> Result<(), OutputError> {
        match self.format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "error": error,
                    "level": "error"
                });
                eprintln!("{}", serde_json::to_string_pretty(&output)?);
            }
            _ => {
                eprintln!("Error: {}", error);
            }
        }
        Ok(())
    }
}

/// Table row for the command listing
#[derive(Tabled)]
struct CommandTableRow {
    name: String,
    kind: String,
    help: String,
}

impl From<&CommandSummary> for CommandTableRow {
    fn from(command: &CommandSummary) -> Self {
        Self {
            name: command.name.clone(),
            kind: command.kind.to_string(),
            help: command.help.clone(),
        }
    }
}
