use std::path::PathBuf;

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Keys that must be present and truthy once all config files are merged.
pub const REQUIRED_FIELDS: [&str; 4] = ["appName", "s3Bucket", "s3Prefix", "redirectUri"];

/// Validated deploy settings.
///
/// Serializes back to the same camelCase shape it was read from, with passthrough keys
/// flattened alongside the known ones.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
  /// Stack name handed to the deploy tool.
  pub app_name: String,
  /// Bucket the packaged artifact is uploaded to.
  pub s3_bucket: String,
  /// Key prefix inside `s3_bucket`.
  pub s3_prefix: String,
  /// Where the deployed function redirects to.
  pub redirect_uri: String,
  /// Target region; the deploy tool resolves its own default when unset.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub region: Option<String>,
  /// Keys this crate does not interpret, kept as-is.
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

impl Config {
  /// Validate a merged config document.
  ///
  /// Every missing or falsy required key is reported together, in [`REQUIRED_FIELDS`] order.
  /// A falsy `region` counts as unset.
  pub fn from_document(mut document: Map<String, Value>) -> Result<Self, ConfigError> {
    let missing: Vec<String> = REQUIRED_FIELDS
      .iter()
      .filter(|field| !document.get(**field).is_some_and(is_truthy))
      .map(|field| field.to_string())
      .collect();

    if !missing.is_empty() {
      return Err(ConfigError::MissingFields { fields: missing });
    }

    let app_name = take_string(&mut document, "appName")?;
    let s3_bucket = take_string(&mut document, "s3Bucket")?;
    let s3_prefix = take_string(&mut document, "s3Prefix")?;
    let redirect_uri = take_string(&mut document, "redirectUri")?;

    let region = match document.remove("region") {
      Some(value) if is_truthy(&value) => Some(into_string("region", value)?),
      _ => None,
    };

    Ok(Self {
      app_name,
      s3_bucket,
      s3_prefix,
      redirect_uri,
      region,
      extra: document,
    })
  }
}

/// JavaScript-style truthiness for a JSON value.
///
/// `null`, `false`, `0` and `""` are falsy; everything else, including empty arrays and
/// objects, is truthy.
pub fn is_truthy(value: &Value) -> bool {
  match value {
    Value::Null => false,
    Value::Bool(b) => *b,
    Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
    Value::String(s) => !s.is_empty(),
    Value::Array(_) | Value::Object(_) => true,
  }
}

fn take_string(document: &mut Map<String, Value>, field: &str) -> Result<String, ConfigError> {
  match document.remove(field) {
    Some(value) => into_string(field, value),
    None => Err(ConfigError::MissingFields {
      fields: vec![field.to_string()],
    }),
  }
}

fn into_string(field: &str, value: Value) -> Result<String, ConfigError> {
  match value {
    Value::String(s) => Ok(s),
    other => Err(ConfigError::InvalidField {
      field: field.to_string(),
      found: json_kind(&other).to_string(),
    }),
  }
}

fn json_kind(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "boolean",
    Value::Number(_) => "number",
    Value::String(_) => "string",
    Value::Array(_) => "array",
    Value::Object(_) => "object",
  }
}

/// Errors that can occur while loading deploy configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
  /// None of the candidate files exist.
  #[error("no config files found, at least one of the following needs to exist:{}", path_list(.candidates))]
  NoSources { candidates: Vec<PathBuf> },

  #[error("failed to read config {}: {source}", path.display())]
  Read { path: PathBuf, source: std::io::Error },

  #[error("failed to parse config {}: {source}", path.display())]
  Parse { path: PathBuf, source: serde_json::Error },

  #[error("config {} must contain a JSON object", path.display())]
  NotAnObject { path: PathBuf },

  /// Required keys absent or falsy after merging.
  #[error("not all required values defined in configs, missing values:{}", name_list(.fields))]
  MissingFields { fields: Vec<String> },

  #[error("config value `{field}` must be a string, found {found}")]
  InvalidField { field: String, found: String },
}

fn path_list(paths: &[PathBuf]) -> String {
  paths.iter().map(|p| format!("\n\t{}", p.display())).collect()
}

fn name_list(names: &[String]) -> String {
  names.iter().map(|n| format!("\n\t{n}")).collect()
}
