// stagehand_cli/src/main.rs

mod args;
mod commands;
mod config;
mod errors;
mod types;

use crate::args::Cli;
use crate::config::ProjectConfig;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn init_tracing(json: bool) {
  // RUST_LOG wins; otherwise info. Logs go to stderr so stdout stays pipeable.
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  let builder = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr);
  if json {
    builder.json().init();
  } else {
    builder.init();
  }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Load .env before parsing so STAGEHAND_DEV_* can come from it.
  dotenvy::dotenv().ok();
  let cli = Cli::parse();
  init_tracing(cli.log_json);

  let config = match ProjectConfig::from_args(&cli.project, &cli.server) {
    Ok(config) => config,
    Err(e) => {
      tracing::error!(error = %e, "Failed to load configuration.");
      return Err(e.into());
    }
  };

  if let Err(e) = commands::run(&cli.command, &config).await {
    tracing::error!(error = %e, "Command failed.");
    return Err(e.into());
  }
  Ok(())
}
