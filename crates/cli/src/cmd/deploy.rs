//! Implementation of the `bouncer deploy` command.
//!
//! Runs the whole pipeline: config is loaded and validated first, then the handler is built
//! (unless `--skip-build`), then the stack is deployed.

use anyhow::{Context, Result};
use tracing::debug;

use bouncer_lib::pipeline::{PipelineOptions, run_pipeline};

use crate::output::{format_duration, print_info, print_stat, print_success, region_or_default};
use crate::runner::Runner;

pub fn cmd_deploy(options: &PipelineOptions, runner: &Runner) -> Result<()> {
  debug!(
    root = %options.layout.root().display(),
    sources = ?options.sources,
    skip_build = options.skip_build,
    dry_run = runner.is_dry_run(),
    "resolved project layout"
  );
  if runner.is_dry_run() {
    print_info("Dry run, external commands are printed instead of run");
  }

  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  let report = rt.block_on(run_pipeline(options, runner)).context("Deploy failed")?;

  println!();
  if runner.is_dry_run() {
    print_success("Dry run complete");
  } else {
    print_success("Deployed lambda");
  }
  print_stat("Stack", &report.config.app_name);
  print_stat("Region", region_or_default(report.config.region.as_deref()));
  print_stat("Redirect", &report.config.redirect_uri);
  print_stat("Built", if report.built { "yes" } else { "no (skipped)" });
  print_stat("Elapsed", format_duration(report.elapsed));

  Ok(())
}
