//! The full run: load config, build, deploy.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::info;

use crate::build::{BuildError, BuildLayout, build};
use crate::config::{Config, ConfigError, default_sources, load_config};
use crate::deploy::deploy;
use crate::runner::{CommandError, CommandRunner};

/// What a pipeline run should do.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
  /// Candidate config files, in merge order.
  pub sources: Vec<PathBuf>,
  pub layout: BuildLayout,
  /// Deploy the existing archive without rebuilding it.
  pub skip_build: bool,
}

impl PipelineOptions {
  /// Default config candidates under the layout's root.
  pub fn new(layout: BuildLayout) -> Self {
    Self {
      sources: default_sources(layout.root()),
      layout,
      skip_build: false,
    }
  }
}

/// Summary of a successful run.
#[derive(Debug, Clone)]
pub struct PipelineReport {
  pub config: Config,
  pub built: bool,
  pub elapsed: Duration,
}

#[derive(Debug, Error)]
pub enum PipelineError {
  #[error(transparent)]
  Config(#[from] ConfigError),

  #[error(transparent)]
  Build(#[from] BuildError),

  #[error(transparent)]
  Deploy(#[from] CommandError),
}

/// Run every stage in order, stopping at the first failure.
///
/// Config is loaded and validated before anything on disk is touched.
pub async fn run_pipeline<R: CommandRunner>(
  options: &PipelineOptions,
  runner: &R,
) -> Result<PipelineReport, PipelineError> {
  let started = Instant::now();

  let config = load_config(&options.sources).await?;
  info!(app = %config.app_name, region = ?config.region, "config loaded");

  if options.skip_build {
    info!("skipping build");
  } else {
    build(&options.layout, runner).await?;
  }

  deploy(&config, runner).await?;

  Ok(PipelineReport {
    config,
    built: !options.skip_build,
    elapsed: started.elapsed(),
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::consts::ENTRY_POINT;
  use crate::util::testutil::RecordingRunner;
  use tempfile::TempDir;

  const CONFIG: &str =
    r#"{"appName":"bouncer","s3Bucket":"b","s3Prefix":"p","redirectUri":"https://example.com/x"}"#;

  fn project(config: Option<&str>) -> (TempDir, PipelineOptions) {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join(ENTRY_POINT), "export const handler = 1;\n").unwrap();
    if let Some(content) = config {
      std::fs::write(temp.path().join("config.json"), content).unwrap();
    }
    let options = PipelineOptions::new(BuildLayout::new(temp.path()));
    (temp, options)
  }

  #[tokio::test]
  async fn runs_build_then_deploy() {
    let (_temp, options) = project(Some(CONFIG));
    let runner = RecordingRunner::new();

    let report = run_pipeline(&options, &runner).await.unwrap();

    assert_eq!(runner.programs(), vec!["deno", "cp", "zip", "sam"]);
    assert!(report.built);
    assert_eq!(report.config.app_name, "bouncer");
  }

  #[tokio::test]
  async fn skip_build_only_deploys() {
    let (_temp, mut options) = project(Some(CONFIG));
    options.skip_build = true;
    let runner = RecordingRunner::new();

    let report = run_pipeline(&options, &runner).await.unwrap();

    assert_eq!(runner.programs(), vec!["sam"]);
    assert!(!report.built);
    assert!(!options.layout.dist_dir().exists());
  }

  #[tokio::test]
  async fn invalid_config_touches_nothing() {
    let (_temp, options) = project(Some(r#"{"appName":"bouncer"}"#));
    std::fs::create_dir_all(options.layout.dist_dir()).unwrap();
    std::fs::write(options.layout.archive(), "previous").unwrap();
    let runner = RecordingRunner::new();

    let err = run_pipeline(&options, &runner).await.unwrap_err();

    assert!(matches!(err, PipelineError::Config(ConfigError::MissingFields { .. })));
    assert!(runner.calls().is_empty());
    assert!(options.layout.dist_dir().exists());
    assert!(options.layout.archive().exists());
  }

  #[tokio::test]
  async fn missing_config_fails_before_build() {
    let (_temp, options) = project(None);
    let runner = RecordingRunner::new();

    let err = run_pipeline(&options, &runner).await.unwrap_err();

    assert!(matches!(err, PipelineError::Config(ConfigError::NoSources { .. })));
    assert!(runner.calls().is_empty());
  }

  #[tokio::test]
  async fn build_failure_skips_deploy() {
    let (_temp, options) = project(Some(CONFIG));
    let runner = RecordingRunner::failing_on("cp");

    let err = run_pipeline(&options, &runner).await.unwrap_err();

    assert!(matches!(err, PipelineError::Build(BuildError::Command(_))));
    assert_eq!(runner.programs(), vec!["deno", "cp"]);
  }

  #[tokio::test]
  async fn deploy_failure_is_reported() {
    let (_temp, options) = project(Some(CONFIG));
    let runner = RecordingRunner::failing_on("sam");

    let err = run_pipeline(&options, &runner).await.unwrap_err();

    assert!(matches!(err, PipelineError::Deploy(CommandError::Failed { .. })));
    assert!(err.to_string().contains("sam deploy --stack-name bouncer"));
  }
}
