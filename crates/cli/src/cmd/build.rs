//! Implementation of the `bouncer build` command.

use anyhow::{Context, Result};
use tracing::debug;

use bouncer_lib::build::{BuildLayout, build};

use crate::output::{print_info, print_success};
use crate::runner::Runner;

/// Stage the handler and package it, without touching config or deploying.
pub fn cmd_build(layout: &BuildLayout, runner: &Runner) -> Result<()> {
  debug!(root = %layout.root().display(), dry_run = runner.is_dry_run(), "resolved project layout");
  print_info(format!("Building {}", layout.entry_point().display()));

  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  rt.block_on(build(layout, runner)).context("Build failed")?;

  print_success(format!("Built {}", layout.archive().display()));
  Ok(())
}
