use std::collections::BTreeMap;

use serde::Serialize;

/// Environment variable holding the redirect target.
pub const REDIRECT_ENV_VAR: &str = "REDIRECT_URI";

/// Body returned when no redirect target is configured.
pub const LOCATION_NOT_SET: &str = "Location not set";

/// A proxy-integration response, serialized the way the HTTP gateway expects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyResponse {
  pub status_code: u16,
  #[serde(skip_serializing_if = "BTreeMap::is_empty")]
  pub headers: BTreeMap<String, String>,
  pub body: String,
}

impl ProxyResponse {
  pub fn redirect(location: impl Into<String>) -> Self {
    Self {
      status_code: 302,
      headers: BTreeMap::from([("location".to_string(), location.into())]),
      body: String::new(),
    }
  }

  pub fn location_not_set() -> Self {
    Self {
      status_code: 500,
      headers: BTreeMap::new(),
      body: LOCATION_NOT_SET.to_string(),
    }
  }
}

/// Handle one request, looking up the redirect target through `lookup`.
///
/// An empty value is treated the same as an unset one.
pub fn respond<F>(lookup: F) -> ProxyResponse
where
  F: FnOnce(&str) -> Option<String>,
{
  match lookup(REDIRECT_ENV_VAR).filter(|location| !location.is_empty()) {
    Some(location) => ProxyResponse::redirect(location),
    None => ProxyResponse::location_not_set(),
  }
}

/// [`respond`] against the process environment, read fresh on every call.
pub fn respond_from_env() -> ProxyResponse {
  respond(|key| std::env::var(key).ok())
}
