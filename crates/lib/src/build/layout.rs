use std::io;
use std::path::{Component, Path, PathBuf};

use crate::consts::{CACHE_DIR, DIST_DIR, ENTRY_POINT, TASK_ROOT_DIR};

/// The well-known paths of a build, all derived from the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildLayout {
  root: PathBuf,
}

impl BuildLayout {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  /// Layout rooted at the current working directory, canonicalized.
  ///
  /// The dependency cache keys generated sources by the absolute project path, so the root
  /// has to match what the cache tool sees.
  pub fn from_current_dir() -> io::Result<Self> {
    let cwd = std::env::current_dir()?;
    Ok(Self::new(dunce::canonicalize(cwd)?))
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  pub fn entry_point(&self) -> PathBuf {
    self.root.join(ENTRY_POINT)
  }

  /// Staging directory, removed and recreated on every build.
  pub fn dist_dir(&self) -> PathBuf {
    self.root.join(DIST_DIR)
  }

  pub fn staged_entry_point(&self) -> PathBuf {
    self.dist_dir().join(ENTRY_POINT)
  }

  /// Archive file, a sibling of the staging directory.
  pub fn archive(&self) -> PathBuf {
    self.root.join(archive_name())
  }

  /// Archive path as seen from inside the staging directory.
  pub fn archive_from_dist(&self) -> PathBuf {
    Path::new("..").join(archive_name())
  }

  pub fn cache_dir(&self) -> PathBuf {
    self.dist_dir().join(CACHE_DIR)
  }

  /// Where the cache tool writes compiled sources for the staged entry point.
  ///
  /// Keyed by the absolute staging path with its root (and drive prefix) dropped, e.g.
  /// `/home/me/site` gives `dist/.deno_dir/gen/file/home/me/site/dist`.
  pub fn generated_sources(&self) -> PathBuf {
    self
      .cache_dir()
      .join("gen")
      .join("file")
      .join(strip_root(&self.root))
      .join(DIST_DIR)
  }

  /// Location the function runtime reads compiled sources from.
  pub fn task_root(&self) -> PathBuf {
    self.cache_dir().join(TASK_ROOT_DIR)
  }
}

fn archive_name() -> String {
  format!("{DIST_DIR}.zip")
}

fn strip_root(path: &Path) -> PathBuf {
  path
    .components()
    .filter(|c| matches!(c, Component::Normal(_)))
    .collect()
}
