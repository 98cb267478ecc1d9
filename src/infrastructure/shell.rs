use crate::domain::error::{ManageError, ManageResult};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use tracing::{info, warn};

/// Runs command lines through a shell, inheriting stdio
#[derive(Debug, Clone)]
pub struct ShellRunner {
    shell: String,
    root: PathBuf,
}

impl ShellRunner {
    pub fn new(shell: impl Into<String>, root: impl AsRef<Path>) -> Self {
        Self {
            shell: shell.into(),
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Flag that makes the shell read the command line from its arguments
    fn command_flag(&self) -> &'static str {
        let program = Path::new(&self.shell)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or_default();
        if program.eq_ignore_ascii_case("cmd") {
            "/C"
        } else {
            "-c"
        }
    }

    /// Process for `line`, not yet spawned
    pub fn command(&self, line: &str) -> Command {
        let mut command = Command::new(&self.shell);
        command
            .arg(self.command_flag())
            .arg(line)
            .current_dir(&self.root)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        command
    }

    /// Run `line` and block until it exits
    pub fn run(&self, line: &str) -> ManageResult<ExitStatus> {
        info!("Running `{}`", line);
        let status = self
            .command(line)
            .status()
            .map_err(|source| ManageError::Spawn {
                command: line.to_string(),
                source,
            })?;

        if !status.success() {
            warn!("`{}` exited with {}", line, status);
        }
        Ok(status)
    }
}
