//! Test utilities for bouncer-lib.
//!
//! Cross-platform command helpers for tests that spawn real processes, and a
//! [`RecordingRunner`] for tests that only need to see what would have run.

use std::io;
use std::sync::Mutex;

use crate::runner::{CommandRunner, CommandSpec, RunStatus};

/// A command that runs `script` through the platform shell.
#[cfg(unix)]
pub fn shell_cmd(script: &str) -> CommandSpec {
  CommandSpec::new("/bin/sh").args(["-c", script])
}

#[cfg(windows)]
pub fn shell_cmd(script: &str) -> CommandSpec {
  CommandSpec::new("cmd.exe").args(["/C", script])
}

/// A command that creates an empty file named `filename` in its working directory.
#[cfg(unix)]
pub fn touch_file(filename: &str) -> CommandSpec {
  CommandSpec::new("/usr/bin/touch").arg(filename)
}

#[cfg(windows)]
pub fn touch_file(filename: &str) -> CommandSpec {
  CommandSpec::new("powershell.exe").args([
    "-NoProfile".to_string(),
    "-Command".to_string(),
    format!("New-Item -ItemType File -Path '{}' -Force | Out-Null", filename),
  ])
}

/// Records every command it is asked to run instead of running it.
///
/// Commands succeed unless their program matches the one given to [`failing_on`](Self::failing_on),
/// which exits with code 1.
#[derive(Debug, Default)]
pub struct RecordingRunner {
  calls: Mutex<Vec<CommandSpec>>,
  fail_on: Option<String>,
}

impl RecordingRunner {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn failing_on(program: &str) -> Self {
    Self {
      calls: Mutex::default(),
      fail_on: Some(program.to_string()),
    }
  }

  pub fn calls(&self) -> Vec<CommandSpec> {
    self.calls.lock().unwrap().clone()
  }

  pub fn programs(&self) -> Vec<String> {
    self.calls().into_iter().map(|c| c.program).collect()
  }
}

impl CommandRunner for RecordingRunner {
  async fn run(&self, cmd: &CommandSpec) -> io::Result<RunStatus> {
    self.calls.lock().unwrap().push(cmd.clone());

    if self.fail_on.as_deref() == Some(cmd.program.as_str()) {
      return Ok(RunStatus::exited(1));
    }
    Ok(RunStatus::success())
  }
}
