// stagehand_cli/src/errors.rs

use stagehand::{BuildTarget, StagehandError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
  #[error("Target '{target}' has no dev server configured")]
  NoDevServer { target: BuildTarget },

  #[error("Failed to render profile as {format}: {message}")]
  Render { format: &'static str, message: String },

  #[error(transparent)]
  Stagehand(#[from] StagehandError),
}

pub type Result<T, E = CliError> = std::result::Result<T, E>;
