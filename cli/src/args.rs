// stagehand_cli/src/args.rs

use crate::types::{output_format::OutputFormat, target::TargetArg};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[clap(name = "stagehand", version, about = "Compose, check and preview build profiles.")]
pub struct Cli {
  #[clap(flatten)]
  pub project: ProjectArgs,

  #[clap(flatten)]
  pub server: ServerArgs,

  /// Emit logs as JSON lines on stderr.
  #[clap(long, global = true)]
  pub log_json: bool,

  #[clap(subcommand)]
  pub command: Command,
}

#[derive(Debug, Args)]
pub struct ProjectArgs {
  /// Project root; relative profile paths resolve against it.
  #[clap(long, global = true, default_value = ".")]
  pub root: PathBuf,

  /// Extra override layer (.toml or .json), applied after the built-in preset.
  /// May be given several times; layers apply in order.
  #[clap(long = "layer", global = true, action = ArgAction::Append)]
  pub layers: Vec<PathBuf>,

  /// File with `[[proxy_rules]]` entries for the dev server.
  #[clap(long, global = true)]
  pub proxy_rules: Option<PathBuf>,
}

/// Dev server address. Flags win over the environment (and `.env`).
#[derive(Debug, Args)]
pub struct ServerArgs {
  #[clap(long, global = true, env = "STAGEHAND_DEV_HOST")]
  pub host: Option<String>,

  #[clap(long, global = true, env = "STAGEHAND_DEV_PORT")]
  pub port: Option<u16>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
  /// Print the composed profile.
  Compose {
    #[clap(value_enum)]
    target: TargetArg,
    #[clap(long, value_enum, default_value_t)]
    format: OutputFormat,
  },
  /// Validate the profile and print a summary.
  Check {
    #[clap(value_enum)]
    target: TargetArg,
  },
  /// Show where the dev server would send a request.
  Route {
    path: String,
    #[clap(long, value_enum, default_value = "development")]
    target: TargetArg,
    #[clap(long, default_value = "GET")]
    method: String,
    #[clap(long, default_value = "text/html")]
    accept: String,
  },
  /// Dry-run the stage list in order.
  Plan {
    #[clap(value_enum)]
    target: TargetArg,
    /// Source path known to the build; stages matching none are skipped.
    #[clap(long = "input", action = ArgAction::Append)]
    inputs: Vec<String>,
  },
}

#[cfg(test)]
mod tests {
  use super::*;
  use serial_test::serial;

  fn clear_env() {
    std::env::remove_var("STAGEHAND_DEV_HOST");
    std::env::remove_var("STAGEHAND_DEV_PORT");
  }

  #[test]
  #[serial]
  fn server_address_comes_from_env_when_no_flag() {
    clear_env();
    std::env::set_var("STAGEHAND_DEV_HOST", "0.0.0.0");
    std::env::set_var("STAGEHAND_DEV_PORT", "4000");
    let cli = Cli::try_parse_from(["stagehand", "check", "dev"]).unwrap();
    clear_env();
    assert_eq!(cli.server.host.as_deref(), Some("0.0.0.0"));
    assert_eq!(cli.server.port, Some(4000));
  }

  #[test]
  #[serial]
  fn flags_take_precedence_over_env() {
    clear_env();
    std::env::set_var("STAGEHAND_DEV_PORT", "4000");
    let cli = Cli::try_parse_from(["stagehand", "check", "dev", "--port", "5000", "--host", "127.0.0.1"]).unwrap();
    clear_env();
    assert_eq!(cli.server.port, Some(5000));
    assert_eq!(cli.server.host.as_deref(), Some("127.0.0.1"));
  }

  #[test]
  #[serial]
  fn nothing_set_leaves_preset_defaults() {
    clear_env();
    let cli = Cli::try_parse_from(["stagehand", "compose", "production", "--format", "toml"]).unwrap();
    assert_eq!(cli.server.host, None);
    assert_eq!(cli.server.port, None);
    assert!(matches!(
      cli.command,
      Command::Compose {
        target: TargetArg::Production,
        format: OutputFormat::Toml
      }
    ));
  }

  #[test]
  #[serial]
  fn layers_keep_their_order() {
    clear_env();
    let cli = Cli::try_parse_from(["stagehand", "plan", "prod", "--layer", "a.toml", "--layer", "b.json"]).unwrap();
    assert_eq!(cli.project.layers, vec![PathBuf::from("a.toml"), PathBuf::from("b.json")]);
  }
}
