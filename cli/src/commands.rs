// stagehand_cli/src/commands.rs

use crate::args::Command;
use crate::config::ProjectConfig;
use crate::errors::{CliError, Result};
use crate::types::output_format::OutputFormat;
use stagehand::{BuildProfile, BuildTarget, StageRuntime};
use std::sync::Arc;
use tracing::{event, Level};

pub async fn run(command: &Command, config: &ProjectConfig) -> Result<()> {
  match command {
    Command::Compose { target, format } => compose(config, (*target).into(), *format),
    Command::Check { target } => check(config, (*target).into()),
    Command::Route {
      path,
      target,
      method,
      accept,
    } => route(config, (*target).into(), path, method, accept),
    Command::Plan { target, inputs } => plan(config, (*target).into(), inputs).await,
  }
}

fn composed(config: &ProjectConfig, target: BuildTarget) -> Result<BuildProfile> {
  Ok(config.registry_for(target)?.compose(target)?)
}

fn compose(config: &ProjectConfig, target: BuildTarget, format: OutputFormat) -> Result<()> {
  let profile = composed(config, target)?;
  let rendered = match format {
    OutputFormat::Json => serde_json::to_string_pretty(&profile).map_err(|e| CliError::Render {
      format: "json",
      message: e.to_string(),
    })?,
    OutputFormat::Toml => toml::to_string_pretty(&profile).map_err(|e| CliError::Render {
      format: "toml",
      message: e.to_string(),
    })?,
  };
  println!("{rendered}");
  Ok(())
}

fn check(config: &ProjectConfig, target: BuildTarget) -> Result<()> {
  let profile = composed(config, target)?;
  println!("{target}: ok");
  println!("  output       {}", profile.output_path.display());
  println!("  source maps  {}", profile.source_map_mode);
  println!("  bail         {}", profile.bail);
  println!("  scripts      {}", profile.file_names.script.as_str());
  println!("  stylesheets  {}", profile.file_names.stylesheet.as_str());
  println!("  entries      {}", profile.entries.keys().cloned().collect::<Vec<_>>().join(", "));
  println!("  stages       {}", profile.stages.len());
  for page in profile.html_pages() {
    println!("  page         {} [{}]", page.filename, page.chunks.join(", "));
  }
  if let Some(server) = &profile.dev_server {
    println!("  dev server   {} ({} proxy rules)", server.address(), server.proxy_table().len());
  }
  Ok(())
}

fn route(config: &ProjectConfig, target: BuildTarget, path: &str, method: &str, accept: &str) -> Result<()> {
  let profile = composed(config, target)?;
  let server = profile.dev_server.as_ref().ok_or(CliError::NoDevServer { target })?;

  if let Some(rule) = server.proxy_table().resolve(path) {
    println!("proxy    {path} -> {}", rule.target);
  } else if let Some(index) = server
    .history_api_fallback
    .as_ref()
    .and_then(|fallback| fallback.rewrite(method, path, accept))
  {
    println!("rewrite  {path} -> {index}");
  } else {
    println!("static   {path}");
  }
  Ok(())
}

async fn plan(config: &ProjectConfig, target: BuildTarget, inputs: &[String]) -> Result<()> {
  let registry = config.registry_for(target)?;
  let runtime = StageRuntime::dry_run().with_inputs(inputs.iter().cloned());
  let profile = Arc::new(registry.compose(target)?);
  let report = runtime.run(Arc::clone(&profile)).await?;

  for (index, stage) in profile.stages.iter().enumerate() {
    let status = if runtime.skips(stage) { "skip" } else { "run" };
    println!("{index:>3}  {status:<4} {}", stage.name);
  }
  for path in &report.emitted {
    println!("     writes {}", path.display());
  }
  for diagnostic in &report.diagnostics {
    println!("     {diagnostic}");
  }
  event!(Level::INFO, %target, executed = report.executed.len(), skipped = report.skipped.len(), "Plan finished.");
  Ok(())
}
