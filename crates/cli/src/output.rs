//! CLI output formatting utilities.
//!
//! Provides consistent formatting for terminal output: colored status lines with Unicode
//! symbols, labelled stats, JSON output and human-readable durations.

use std::fmt::Display;
use std::time::Duration;

use anyhow::Context;
use clap::ValueEnum;
use owo_colors::{OwoColorize, Stream};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
  #[default]
  Text,
  Json,
}

impl OutputFormat {
  pub fn is_json(self) -> bool {
    matches!(self, OutputFormat::Json)
  }
}

pub mod symbols {
  pub const SUCCESS: &str = "✓";
  pub const ERROR: &str = "✗";
  pub const INFO: &str = "•";
  pub const ARROW: &str = "→";
}

/// Elapsed time for the deploy summary: `850ms`, `12.34s`, `3m 07s`.
pub fn format_duration(duration: Duration) -> String {
  match duration.as_secs() {
    0 => format!("{}ms", duration.subsec_millis()),
    secs @ 1..60 => format!("{}.{:02}s", secs, duration.subsec_millis() / 10),
    secs => format!("{}m {:02}s", secs / 60, secs % 60),
  }
}

pub fn print_success(message: impl Display) {
  println!(
    "{} {}",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
    message
  );
}

/// Print a failed run: the top-level context in red, then one line per underlying cause.
pub fn print_error(err: &anyhow::Error) {
  let mut lines = error_lines(err).into_iter();
  if let Some(head) = lines.next() {
    eprintln!(
      "{} {}",
      symbols::ERROR.if_supports_color(Stream::Stderr, |s| s.red()),
      head.if_supports_color(Stream::Stderr, |s| s.red())
    );
  }
  for cause in lines {
    eprintln!("  {} {}", "caused by:".if_supports_color(Stream::Stderr, |s| s.dimmed()), cause);
  }
}

fn error_lines(err: &anyhow::Error) -> Vec<String> {
  err.chain().map(ToString::to_string).collect()
}

pub fn print_info(message: impl Display) {
  println!(
    "{} {}",
    symbols::INFO.if_supports_color(Stream::Stdout, |s| s.blue()),
    message
  );
}

/// An external command about to run (or, in a dry run, that would run).
pub fn print_step(message: impl Display) {
  println!(
    "{} {}",
    symbols::ARROW.if_supports_color(Stream::Stdout, |s| s.cyan()),
    message
  );
}

/// One line of a summary block, labels padded so values line up.
pub fn print_stat(label: &str, value: impl Display) {
  let label = format!("{:<10}", format!("{label}:"));
  println!(
    "  {} {}",
    label.if_supports_color(Stream::Stdout, |s| s.dimmed()),
    value
  );
}

/// A region falls back to whatever the deploy tool is configured with.
pub fn region_or_default(region: Option<&str>) -> &str {
  region.unwrap_or("(sam default)")
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(value).context("Failed to serialize config as JSON")?;
  println!("{json}");
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_format_duration() {
    assert_eq!(format_duration(Duration::from_millis(50)), "50ms");
    assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
    assert_eq!(format_duration(Duration::from_secs(65)), "1m 05s");
    assert_eq!(format_duration(Duration::from_secs(600)), "10m 00s");
  }

  #[test]
  fn error_lines_follow_context_chain() {
    let err = anyhow::anyhow!("failed to run cmd zip -r ../dist.zip . (exit code 12)").context("Deploy failed");

    assert_eq!(
      error_lines(&err),
      vec!["Deploy failed", "failed to run cmd zip -r ../dist.zip . (exit code 12)"]
    );
  }

  #[test]
  fn missing_region_names_the_deploy_tool() {
    assert_eq!(region_or_default(None), "(sam default)");
    assert_eq!(region_or_default(Some("eu-west-1")), "eu-west-1");
  }

  #[test]
  fn test_output_format_default_is_text() {
    assert!(!OutputFormat::default().is_json());
    assert!(OutputFormat::Json.is_json());
  }
}
