use anyhow::{Context, Result};
use bouncer_handler::respond_from_env;
use bouncer_handler::runtime::{RuntimeClient, run};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .with_ansi(false)
    .without_time()
    .init();

  let client = RuntimeClient::from_env().context("Failed to configure runtime client")?;
  run(&client, respond_from_env).await.context("Runtime loop failed")?;

  Ok(())
}
