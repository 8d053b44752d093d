//! Packaging of the redirect handler.
//!
//! # Layout
//!
//! ```text
//! <root>/
//! ├── main.ts                         # handler entry point
//! ├── dist/                           # staging directory, rebuilt every run
//! │   ├── main.ts
//! │   └── .deno_dir/
//! │       ├── gen/file/<root>/dist/   # written by `deno cache`
//! │       └── LAMBDA_TASK_ROOT/       # copy of the above, read by the runtime
//! └── dist.zip                        # deployable archive
//! ```
//!
//! Nothing is kept between runs: the staging directory and archive are deleted first.

mod layout;

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs;
use tracing::{debug, info};

use crate::consts::{CACHE_DIR, ENTRY_POINT};
use crate::runner::{CommandError, CommandRunner, CommandSpec, run_checked};

pub use layout::BuildLayout;

/// Errors that can occur while building the archive.
#[derive(Debug, Error)]
pub enum BuildError {
  #[error("failed to remove {}: {source}", path.display())]
  Remove { path: PathBuf, source: io::Error },

  #[error("failed to create directory {}: {source}", path.display())]
  CreateDir { path: PathBuf, source: io::Error },

  #[error("failed to copy {} to {}: {source}", from.display(), to.display())]
  CopyFile {
    from: PathBuf,
    to: PathBuf,
    source: io::Error,
  },

  #[error(transparent)]
  Command(#[from] CommandError),
}

/// Stage the handler and package it into the archive.
///
/// Steps, each aborting the build on failure:
/// 1. Remove the previous staging directory and archive (concurrently)
/// 2. Create the staging directory and copy the entry point into it
/// 3. Resolve dependencies into the cache directory
/// 4. Copy the generated sources to where the runtime expects them
/// 5. Zip the staging directory
pub async fn build<R: CommandRunner>(layout: &BuildLayout, runner: &R) -> Result<(), BuildError> {
  let dist = layout.dist_dir();
  let archive = layout.archive();

  info!(dist = %dist.display(), "cleaning previous build");
  tokio::try_join!(try_remove(&dist), try_remove(&archive))?;

  fs::create_dir_all(&dist).await.map_err(|source| BuildError::CreateDir {
    path: dist.clone(),
    source,
  })?;

  let from = layout.entry_point();
  let to = layout.staged_entry_point();
  if let Err(source) = fs::copy(&from, &to).await {
    return Err(BuildError::CopyFile { from, to, source });
  }

  run_checked(runner, &cache_command(layout)).await?;
  run_checked(runner, &copy_sources_command(layout)).await?;
  run_checked(runner, &archive_command(layout)).await?;

  info!(archive = %archive.display(), "build complete");
  Ok(())
}

/// `deno cache main.ts`, run inside the staging directory with its own cache.
pub fn cache_command(layout: &BuildLayout) -> CommandSpec {
  CommandSpec::new("deno")
    .args(["cache", ENTRY_POINT])
    .current_dir(layout.dist_dir())
    .env("DENO_DIR", CACHE_DIR)
}

/// `cp -R <generated sources> <task root>`.
pub fn copy_sources_command(layout: &BuildLayout) -> CommandSpec {
  CommandSpec::new("cp")
    .arg("-R")
    .path_arg(&layout.generated_sources())
    .path_arg(&layout.task_root())
}

/// `zip -r ../dist.zip .`, run inside the staging directory.
pub fn archive_command(layout: &BuildLayout) -> CommandSpec {
  CommandSpec::new("zip")
    .arg("-r")
    .path_arg(&layout.archive_from_dist())
    .arg(".")
    .current_dir(layout.dist_dir())
}

/// Remove a file or directory tree.
///
/// Returns whether anything was removed. A missing path is not an error; any other failure is.
pub async fn try_remove(path: &Path) -> Result<bool, BuildError> {
  let metadata = match fs::symlink_metadata(path).await {
    Ok(metadata) => metadata,
    Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
    Err(source) => {
      return Err(BuildError::Remove {
        path: path.to_path_buf(),
        source,
      });
    }
  };

  let result = if metadata.is_dir() {
    fs::remove_dir_all(path).await
  } else {
    fs::remove_file(path).await
  };

  match result {
    Ok(()) => {
      debug!(path = %path.display(), "removed");
      Ok(true)
    }
    Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
    Err(source) => Err(BuildError::Remove {
      path: path.to_path_buf(),
      source,
    }),
  }
}
