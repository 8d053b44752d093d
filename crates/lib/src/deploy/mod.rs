//! Deployment through the infrastructure tool.

use tracing::info;

use crate::config::Config;
use crate::consts::{CAPABILITIES, REDIRECT_PARAMETER};
use crate::runner::{CommandError, CommandRunner, CommandSpec, run_checked};

/// The `sam deploy` invocation for `config`.
///
/// Flag order is fixed. `--region` is appended last, and only when a region is configured.
pub fn deploy_command(config: &Config) -> CommandSpec {
  let cmd = CommandSpec::new("sam")
    .args([
      "deploy",
      "--stack-name",
      config.app_name.as_str(),
      "--s3-bucket",
      config.s3_bucket.as_str(),
      "--s3-prefix",
      config.s3_prefix.as_str(),
      "--capabilities",
    ])
    .args(CAPABILITIES)
    .arg("--parameter-overrides")
    .arg(format!(
      "ParameterKey={REDIRECT_PARAMETER},ParameterValue={}",
      config.redirect_uri
    ));

  match &config.region {
    Some(region) => cmd.args(["--region", region.as_str()]),
    None => cmd,
  }
}

/// Deploy the packaged archive using the ambient working directory.
pub async fn deploy<R: CommandRunner>(config: &Config, runner: &R) -> Result<(), CommandError> {
  run_checked(runner, &deploy_command(config)).await?;

  info!(stack = %config.app_name, "deployed lambda");
  Ok(())
}
