//! External command execution.
//!
//! Every tool the pipeline shells out to goes through [`CommandRunner`]. The build and deploy
//! stages only describe *what* to run as a [`CommandSpec`]; the runner decides how.

mod process;
mod spec;

use std::io;

use thiserror::Error;
use tracing::{debug, info};

pub use process::ProcessRunner;
pub use spec::{CommandSpec, RunStatus};

/// Runs external commands to completion.
pub trait CommandRunner {
  /// Run `cmd` and report how it exited.
  ///
  /// An `Err` means the command could not be started at all; a non-zero exit is reported
  /// through [`RunStatus`].
  fn run(&self, cmd: &CommandSpec) -> impl Future<Output = io::Result<RunStatus>> + Send;
}

/// Errors from running an external command.
#[derive(Debug, Error)]
pub enum CommandError {
  #[error("failed to run cmd {cmd}: {source}")]
  Spawn { cmd: String, source: io::Error },

  #[error("failed to run cmd {cmd} (exit code {})", display_code(.code))]
  Failed { cmd: String, code: Option<i32> },
}

fn display_code(code: &Option<i32>) -> String {
  code.map_or_else(|| "none".to_string(), |c| c.to_string())
}

/// Run `cmd` and turn anything but a clean exit into an error.
pub async fn run_checked<R: CommandRunner>(runner: &R, cmd: &CommandSpec) -> Result<(), CommandError> {
  info!(cmd = %cmd, "running command");

  let status = runner.run(cmd).await.map_err(|source| CommandError::Spawn {
    cmd: cmd.to_string(),
    source,
  })?;

  if !status.is_success() {
    debug!(cmd = %cmd, code = ?status.code, "command failed");
    return Err(CommandError::Failed {
      cmd: cmd.to_string(),
      code: status.code,
    });
  }

  Ok(())
}
