//! Lambda custom-runtime loop.
//!
//! Polls the Runtime API for the next invocation and posts the handler's response back. The
//! request event itself is drained but not inspected.

use std::env;

use thiserror::Error;
use tracing::{debug, info};

use crate::ProxyResponse;

/// Host and port of the Runtime API, set by the platform.
pub const RUNTIME_API_ENV_VAR: &str = "AWS_LAMBDA_RUNTIME_API";

const API_VERSION: &str = "2018-06-01";
const REQUEST_ID_HEADER: &str = "Lambda-Runtime-Aws-Request-Id";

#[derive(Debug, Error)]
pub enum RuntimeError {
  #[error("AWS_LAMBDA_RUNTIME_API is not set")]
  MissingApi,

  #[error("runtime api request to {url} failed: {source}")]
  Request { url: String, source: reqwest::Error },

  #[error("runtime api returned HTTP {status} for {url}")]
  Status { url: String, status: u16 },

  #[error("invocation is missing the Lambda-Runtime-Aws-Request-Id header")]
  MissingRequestId,
}

/// A pending invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
  pub request_id: String,
}

/// Client for the Runtime API.
#[derive(Debug, Clone)]
pub struct RuntimeClient {
  http: reqwest::Client,
  base_url: String,
}

impl RuntimeClient {
  /// `api` is the `host:port` the platform publishes.
  pub fn new(api: &str) -> Self {
    Self {
      http: reqwest::Client::new(),
      base_url: format!("http://{api}/{API_VERSION}/runtime"),
    }
  }

  pub fn from_env() -> Result<Self, RuntimeError> {
    let api = env::var(RUNTIME_API_ENV_VAR).map_err(|_| RuntimeError::MissingApi)?;
    Ok(Self::new(&api))
  }

  /// Block until the platform hands over the next invocation.
  pub async fn next_invocation(&self) -> Result<Invocation, RuntimeError> {
    let url = format!("{}/invocation/next", self.base_url);

    let response = self
      .http
      .get(&url)
      .send()
      .await
      .map_err(|source| RuntimeError::Request { url: url.clone(), source })?;

    if !response.status().is_success() {
      return Err(RuntimeError::Status {
        url,
        status: response.status().as_u16(),
      });
    }

    let request_id = response
      .headers()
      .get(REQUEST_ID_HEADER)
      .and_then(|v| v.to_str().ok())
      .map(str::to_string)
      .ok_or(RuntimeError::MissingRequestId)?;

    response
      .bytes()
      .await
      .map_err(|source| RuntimeError::Request { url, source })?;

    Ok(Invocation { request_id })
  }

  pub async fn send_response(&self, request_id: &str, body: &ProxyResponse) -> Result<(), RuntimeError> {
    let url = format!("{}/invocation/{}/response", self.base_url, request_id);

    let response = self
      .http
      .post(&url)
      .json(body)
      .send()
      .await
      .map_err(|source| RuntimeError::Request { url: url.clone(), source })?;

    if !response.status().is_success() {
      return Err(RuntimeError::Status {
        url,
        status: response.status().as_u16(),
      });
    }

    Ok(())
  }
}

/// Answer a single invocation.
pub async fn serve_one<F>(client: &RuntimeClient, handler: F) -> Result<(), RuntimeError>
where
  F: FnOnce() -> ProxyResponse,
{
  let invocation = client.next_invocation().await?;
  let response = handler();

  debug!(request_id = %invocation.request_id, status = response.status_code, "handled invocation");

  client.send_response(&invocation.request_id, &response).await
}

/// Answer invocations until the platform shuts the process down.
pub async fn run<F>(client: &RuntimeClient, handler: F) -> Result<(), RuntimeError>
where
  F: Fn() -> ProxyResponse,
{
  info!("runtime loop started");
  loop {
    serve_one(client, &handler).await?;
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::respond;
  use mockito::Matcher;
  use serde_json::json;

  const NEXT_PATH: &str = "/2018-06-01/runtime/invocation/next";

  #[tokio::test]
  async fn posts_redirect_for_invocation() {
    let mut server = mockito::Server::new_async().await;
    let next = server
      .mock("GET", NEXT_PATH)
      .with_status(200)
      .with_header(REQUEST_ID_HEADER, "req-1")
      .with_body(r#"{"path":"/anything"}"#)
      .create_async()
      .await;
    let reply = server
      .mock("POST", "/2018-06-01/runtime/invocation/req-1/response")
      .match_body(Matcher::Json(json!({
        "statusCode": 302,
        "headers": { "location": "https://example.com/x" },
        "body": "",
      })))
      .with_status(202)
      .create_async()
      .await;

    let client = RuntimeClient::new(&server.host_with_port());
    serve_one(&client, || respond(|_| Some("https://example.com/x".to_string())))
      .await
      .unwrap();

    next.assert_async().await;
    reply.assert_async().await;
  }

  #[tokio::test]
  async fn posts_error_body_when_unset() {
    let mut server = mockito::Server::new_async().await;
    let _next = server
      .mock("GET", NEXT_PATH)
      .with_status(200)
      .with_header(REQUEST_ID_HEADER, "req-2")
      .with_body("{}")
      .create_async()
      .await;
    let reply = server
      .mock("POST", "/2018-06-01/runtime/invocation/req-2/response")
      .match_body(Matcher::Json(json!({ "statusCode": 500, "body": "Location not set" })))
      .with_status(202)
      .create_async()
      .await;

    let client = RuntimeClient::new(&server.host_with_port());
    serve_one(&client, || respond(|_| None)).await.unwrap();

    reply.assert_async().await;
  }

  #[tokio::test]
  async fn missing_request_id_is_an_error() {
    let mut server = mockito::Server::new_async().await;
    let _next = server
      .mock("GET", NEXT_PATH)
      .with_status(200)
      .with_body("{}")
      .create_async()
      .await;

    let client = RuntimeClient::new(&server.host_with_port());
    let err = serve_one(&client, || respond(|_| None)).await.unwrap_err();

    assert!(matches!(err, RuntimeError::MissingRequestId));
  }

  #[tokio::test]
  async fn rejected_response_is_an_error() {
    let mut server = mockito::Server::new_async().await;
    let _next = server
      .mock("GET", NEXT_PATH)
      .with_status(200)
      .with_header(REQUEST_ID_HEADER, "req-3")
      .create_async()
      .await;
    let _reply = server
      .mock("POST", "/2018-06-01/runtime/invocation/req-3/response")
      .with_status(413)
      .create_async()
      .await;

    let client = RuntimeClient::new(&server.host_with_port());
    let err = serve_one(&client, || respond(|_| None)).await.unwrap_err();

    assert!(matches!(err, RuntimeError::Status { status: 413, .. }));
  }
}
