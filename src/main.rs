// Manage - Project management script runner
use anyhow::Context;
use manage::cli::args::{peek_global_args, GlobalArgs};
use manage::cli::dispatch::Dispatcher;
use manage::cli::output::{ConsoleWriter, OutputWriter};
use manage::core::command::RunContext;
use manage::core::registry::Registry;
use manage::infrastructure::config::ConfigManager;
use manage::infrastructure::logging::init_logging;
use std::ffi::OsString;
use std::process::ExitCode;

fn main() -> ExitCode {
    let argv: Vec<OsString> = std::env::args_os().collect();
    let global = peek_global_args(&argv);
    let writer = ConsoleWriter::new(global.output);

    match run(&argv, &global) {
        Ok(code) => code,
        Err(e) => {
            let message = format!("{:#}", e);
            if writer.write_error(&message).is_err() {
                eprintln!("Error: {}", message);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(argv: &[OsString], global: &GlobalArgs) -> anyhow::Result<ExitCode> {
    let mut config_manager = ConfigManager::new().context("Failed to resolve working directory")?;
    if let Some(path) = &global.config {
        config_manager = config_manager.with_project_config(path);
    }
    let config = config_manager
        .load_config()
        .context("Failed to load configuration")?;

    if !global.quiet {
        init_logging(&config.settings.log_level, global.verbose)?;
    }

    let dispatcher = Dispatcher::new(Registry::from_config(&config));
    let invocation = dispatcher.parse_from(argv).unwrap_or_else(|e| e.exit());

    let ctx = RunContext {
        project_root: config_manager.project_root(),
        settings: config.settings.clone(),
        output: invocation.global.output,
        catalog: dispatcher.registry().catalog(),
    };

    let outcome = dispatcher
        .dispatch(&invocation, &ctx)
        .with_context(|| format!("Command '{}' failed", invocation.command))?;

    Ok(ExitCode::from(
        outcome.exit_code(config.settings.propagate_exit_code),
    ))
}
