mod cmd;
mod output;
mod runner;

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use bouncer_lib::build::BuildLayout;
use bouncer_lib::config::default_sources;
use bouncer_lib::pipeline::PipelineOptions;

use crate::cmd::{cmd_build, cmd_check, cmd_deploy};
use crate::output::{OutputFormat, print_error};
use crate::runner::Runner;

/// bouncer - build and deploy the redirect function
#[derive(Parser)]
#[command(name = "bouncer")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Run as if started in this directory
  #[arg(short = 'C', long = "dir", global = true, value_name = "DIR")]
  dir: Option<PathBuf>,

  /// Config file to merge, repeatable; later files win (default: config.json, config.local.json)
  #[arg(long = "config", global = true, value_name = "FILE")]
  configs: Vec<PathBuf>,

  /// Print external commands instead of running them
  #[arg(long, global = true)]
  dry_run: bool,

  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Load and validate the merged config
  Check {
    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    output: OutputFormat,
  },

  /// Package the handler into dist.zip
  Build,

  /// Build and deploy (default)
  Deploy {
    /// Deploy the existing archive without rebuilding
    #[arg(long)]
    skip_build: bool,
  },
}

fn main() {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "warn" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(io::stderr)
    .with_ansi(io::stderr().is_terminal())
    .without_time()
    .init();

  if let Err(err) = run(cli) {
    print_error(&err);
    std::process::exit(1);
  }
}

fn run(cli: Cli) -> Result<()> {
  if let Some(dir) = &cli.dir {
    std::env::set_current_dir(dir).with_context(|| format!("Failed to change directory to {}", dir.display()))?;
  }

  let layout = BuildLayout::from_current_dir().context("Failed to resolve project directory")?;
  let sources = if cli.configs.is_empty() {
    default_sources(layout.root())
  } else {
    cli.configs
  };
  let runner = Runner::new(cli.dry_run);

  match cli.command {
    Some(Commands::Check { output }) => cmd_check(&sources, output),
    Some(Commands::Build) => cmd_build(&layout, &runner),
    Some(Commands::Deploy { skip_build }) => cmd_deploy(
      &PipelineOptions {
        sources,
        layout,
        skip_build,
      },
      &runner,
    ),
    None => cmd_deploy(
      &PipelineOptions {
        sources,
        layout,
        skip_build: false,
      },
      &runner,
    ),
  }
}
