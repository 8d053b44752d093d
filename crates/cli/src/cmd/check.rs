//! Implementation of the `bouncer check` command.
//!
//! Loads the config files, merges and validates them, and prints the result without building
//! or deploying anything.

use std::path::PathBuf;

use anyhow::{Context, Result};

use bouncer_lib::config::load_config;

use crate::output::{OutputFormat, print_json, print_stat, print_success, region_or_default};

pub fn cmd_check(sources: &[PathBuf], format: OutputFormat) -> Result<()> {
  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  let config = rt.block_on(load_config(sources)).context("Invalid configuration")?;

  if format.is_json() {
    return print_json(&config);
  }

  print_success("Config is valid");
  print_stat("App", &config.app_name);
  print_stat("Bucket", &config.s3_bucket);
  print_stat("Prefix", &config.s3_prefix);
  print_stat("Redirect", &config.redirect_uri);
  print_stat("Region", region_or_default(config.region.as_deref()));
  if !config.extra.is_empty() {
    let keys: Vec<&str> = config.extra.keys().map(String::as_str).collect();
    print_stat("Extra", &keys.join(", "));
  }

  Ok(())
}
