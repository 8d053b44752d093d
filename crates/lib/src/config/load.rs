use std::io;
use std::path::{Path, PathBuf};

use futures::future::try_join_all;
use serde_json::{Map, Value};
use tokio::fs;
use tracing::{debug, info};

use super::types::{Config, ConfigError};
use crate::consts::CONFIG_FILES;

/// The default candidate files, resolved against `root`.
pub fn default_sources(root: &Path) -> Vec<PathBuf> {
  CONFIG_FILES.iter().map(|name| root.join(name)).collect()
}

/// Load, merge and validate deploy settings from `sources`.
///
/// Sources that do not exist are skipped; all present ones are read concurrently and merged in
/// the order given, later files winning per top-level key.
///
/// # Errors
///
/// Returns an error if:
/// - none of `sources` exists
/// - a present source cannot be read, is not valid JSON, or is not a JSON object
/// - a required value is missing or falsy after merging
pub async fn load_config(sources: &[PathBuf]) -> Result<Config, ConfigError> {
  let documents = try_join_all(sources.iter().map(|path| read_optional(path))).await?;
  let documents: Vec<_> = documents.into_iter().flatten().collect();

  if documents.is_empty() {
    return Err(ConfigError::NoSources {
      candidates: sources.to_vec(),
    });
  }

  info!(files = documents.len(), "merging config files");
  Config::from_document(merge_documents(documents))
}

/// Shallow merge: each document's top-level keys replace those already present.
pub fn merge_documents<I>(documents: I) -> Map<String, Value>
where
  I: IntoIterator<Item = Map<String, Value>>,
{
  documents.into_iter().fold(Map::new(), |mut merged, document| {
    merged.extend(document);
    merged
  })
}

async fn read_optional(path: &Path) -> Result<Option<Map<String, Value>>, ConfigError> {
  if !is_file(path).await? {
    debug!(path = %path.display(), "config file not present, skipping");
    return Ok(None);
  }

  let text = fs::read_to_string(path).await.map_err(|source| ConfigError::Read {
    path: path.to_path_buf(),
    source,
  })?;

  debug!(path = %path.display(), "read config file");
  parse_document(path, &text).map(Some)
}

async fn is_file(path: &Path) -> Result<bool, ConfigError> {
  match fs::metadata(path).await {
    Ok(metadata) => Ok(metadata.is_file()),
    Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
    Err(source) => Err(ConfigError::Read {
      path: path.to_path_buf(),
      source,
    }),
  }
}

fn parse_document(path: &Path, text: &str) -> Result<Map<String, Value>, ConfigError> {
  let value: Value = serde_json::from_str(text).map_err(|source| ConfigError::Parse {
    path: path.to_path_buf(),
    source,
  })?;

  match value {
    Value::Object(map) => Ok(map),
    _ => Err(ConfigError::NotAnObject {
      path: path.to_path_buf(),
    }),
  }
}
