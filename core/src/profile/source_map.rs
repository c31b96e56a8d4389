// stagehand/src/profile/source_map.rs
use crate::error::ConfigurationError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// How source maps are produced for emitted scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceMapMode {
  #[default]
  None,
  /// Embedded as a data URL at the end of each script.
  Inline,
  /// Written next to the script, named by `OutputFileNames::source_map`.
  External,
}

impl SourceMapMode {
  #[inline]
  pub fn writes_map_files(&self) -> bool {
    matches!(self, Self::External)
  }
}

impl FromStr for SourceMapMode {
  type Err = ConfigurationError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "none" | "false" => Ok(Self::None),
      "inline" | "inline-source-map" => Ok(Self::Inline),
      "external" | "source-map" => Ok(Self::External),
      _ => Err(ConfigurationError::InvalidSourceMapMode { value: s.to_string() }),
    }
  }
}

impl Display for SourceMapMode {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::None => write!(f, "none"),
      Self::Inline => write!(f, "inline"),
      Self::External => write!(f, "external"),
    }
  }
}
