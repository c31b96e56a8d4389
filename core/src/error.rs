// stagehand/src/error.rs
use anyhow::Error as AnyhowError;
use std::path::PathBuf;
use thiserror::Error;

/// Validation failures raised while composing a profile.
///
/// Every one of these is reported before any stage runs; a build that hits one
/// never produces partial output.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
  #[error("No output path configured for target '{target}'")]
  MissingOutputPath { target: String },

  #[error("No project context configured for target '{target}'")]
  MissingContext { target: String },

  #[error("Unknown stage '{stage_name}' at position {index}")]
  UnknownStage { stage_name: String, index: usize },

  #[error("Malformed proxy rule for prefix '{path_prefix}': {reason}")]
  MalformedProxyRule { path_prefix: String, reason: String },

  #[error("Invalid file name template '{template}': {reason}")]
  InvalidTemplate { template: String, reason: String },

  #[error("Invalid match pattern '{pattern}': {reason}")]
  InvalidPattern { pattern: String, reason: String },

  #[error("Stage '{stage_name}' at position {index} is missing required option '{option}'")]
  MissingStageOption {
    stage_name: String,
    index: usize,
    option: String,
  },

  #[error("Stage '{stage_name}' at position {index} has a malformed option '{option}': {reason}")]
  MalformedStageOption {
    stage_name: String,
    index: usize,
    option: String,
    reason: String,
  },

  #[error("Page '{page}' references unknown chunk '{chunk}'")]
  UnknownChunk { page: String, chunk: String },

  #[error("More than one stage produces '{filename}'")]
  DuplicateOutput { filename: String },

  #[error("Unknown build target '{name}'")]
  UnknownTarget { name: String },

  #[error("Unknown source map mode '{value}'")]
  InvalidSourceMapMode { value: String },

  #[error("Dev server port must be non-zero")]
  InvalidPort,
}

#[derive(Debug, Error)]
pub enum StagehandError {
  #[error("Configuration error: {0}")]
  Configuration(#[from] ConfigurationError),

  #[error("Stage '{stage_name}' (position {index}) failed. Source: {source}")]
  StageExecution {
    stage_name: String,
    index: usize,
    #[source]
    source: AnyhowError,
  },

  #[error("No handler registered for stage '{stage_name}' at position {index}")]
  HandlerMissing { stage_name: String, index: usize },

  #[error("Failed to read layer file '{}': {source}", path.display())]
  LayerIo {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("Failed to parse layer '{origin}': {message}")]
  LayerParse { origin: String, message: String },

  #[error("Error in an external stage runtime. Source: {source}")]
  External {
    #[source]
    source: AnyhowError,
  },

  #[error("Internal stagehand error: {0}")]
  Internal(String),
}

impl StagehandError {
  /// The configuration failure behind this error, if it is one.
  pub fn as_configuration(&self) -> Option<&ConfigurationError> {
    match self {
      StagehandError::Configuration(inner) => Some(inner),
      _ => None,
    }
  }
}

// Errors coming back from handlers are plain anyhow errors. If one of them is
// really a ConfigurationError that travelled through anyhow, unwrap it again.
impl From<AnyhowError> for StagehandError {
  fn from(err: AnyhowError) -> Self {
    match err.downcast::<ConfigurationError>() {
      Ok(config_err) => StagehandError::Configuration(config_err),
      Err(err) => StagehandError::External { source: err },
    }
  }
}

pub type StagehandResult<T, E = StagehandError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn anyhow_wrapping_configuration_error_is_unwrapped() {
    let wrapped = AnyhowError::new(ConfigurationError::InvalidPort);
    let err = StagehandError::from(wrapped);
    assert_eq!(err.as_configuration(), Some(&ConfigurationError::InvalidPort));
  }

  #[test]
  fn other_anyhow_errors_become_external() {
    let err = StagehandError::from(anyhow::anyhow!("loader crashed"));
    assert!(matches!(err, StagehandError::External { .. }));
    assert!(err.to_string().contains("loader crashed"));
  }
}
