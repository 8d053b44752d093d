//! Runner selection for the CLI: real processes, or printing them for `--dry-run`.

use std::io;

use owo_colors::{OwoColorize, Stream};

use bouncer_lib::runner::{CommandRunner, CommandSpec, ProcessRunner, RunStatus};

use crate::output::print_step;

/// Prints each command and reports success without running anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunRunner;

impl CommandRunner for DryRunRunner {
  async fn run(&self, cmd: &CommandSpec) -> io::Result<RunStatus> {
    match &cmd.cwd {
      Some(dir) => print_step(format!(
        "{} {}",
        cmd,
        format!("(in {})", dir.display()).if_supports_color(Stream::Stdout, |s| s.dimmed())
      )),
      None => print_step(cmd),
    }
    Ok(RunStatus::success())
  }
}

#[derive(Debug, Clone, Copy)]
pub enum Runner {
  Process(ProcessRunner),
  DryRun(DryRunRunner),
}

impl Runner {
  pub fn new(dry_run: bool) -> Self {
    if dry_run {
      Runner::DryRun(DryRunRunner)
    } else {
      Runner::Process(ProcessRunner)
    }
  }

  pub fn is_dry_run(&self) -> bool {
    matches!(self, Runner::DryRun(_))
  }
}

impl CommandRunner for Runner {
  async fn run(&self, cmd: &CommandSpec) -> io::Result<RunStatus> {
    match self {
      Runner::Process(runner) => runner.run(cmd).await,
      Runner::DryRun(runner) => runner.run(cmd).await,
    }
  }
}
