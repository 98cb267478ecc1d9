use thiserror::Error;

/// Manage unified error type
#[derive(Error, Debug)]
pub enum ManageError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Command '{command}' does not implement run")]
    NotImplemented { command: String },

    #[error("Failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Output error: {0}")]
    Output(String),
}

pub type ManageResult<T> = Result<T, ManageError>;
