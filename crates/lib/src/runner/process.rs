//! Runs commands as child processes.

use std::io;

use tokio::process::Command;
use tracing::debug;

use super::{CommandRunner, CommandSpec, RunStatus};

/// Spawns real processes. Stdio is inherited so tool output streams straight to the terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
  async fn run(&self, cmd: &CommandSpec) -> io::Result<RunStatus> {
    let mut command = Command::new(&cmd.program);
    command.args(&cmd.args).envs(&cmd.env);

    if let Some(dir) = &cmd.cwd {
      command.current_dir(dir);
    }

    debug!(program = %cmd.program, cwd = ?cmd.cwd, "spawning process");

    let status = command.status().await?;

    debug!(program = %cmd.program, code = ?status.code(), "process exited");

    Ok(RunStatus { code: status.code() })
  }
}
