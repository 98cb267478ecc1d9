// Logging module - Logging infrastructure
use crate::domain::error::{ManageError, ManageResult};
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter directive for a configured log level
fn default_directive(log_level: &str, verbose: bool) -> String {
    let level = if verbose {
        "debug"
    } else {
        match log_level {
            "error" | "warn" | "info" | "debug" | "trace" => log_level,
            _ => "info",
        }
    };
    format!("manage={level},warn")
}

/// Initialize logging system.
///
/// `RUST_LOG` takes precedence over the configured level unless `verbose`
/// is set. Output goes to stderr so proxied stdout stays untouched.
pub fn init_logging(log_level: &str, verbose: bool) -> ManageResult<()> {
    let directive = default_directive(log_level, verbose);
    let env_filter = if verbose {
        EnvFilter::new(directive)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive))
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .with_level(true),
        )
        .try_init()
        .map_err(|e| ManageError::Config {
            message: format!("Failed to initialize logging: {}", e),
        })?;

    tracing::debug!("Logging initialized at {}", log_level);
    Ok(())
}
