// stagehand/src/profile/target.rs

//! The named build targets a registry can compose.

use crate::error::ConfigurationError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildTarget {
  Development,
  Production,
}

impl BuildTarget {
  pub const ALL: [BuildTarget; 2] = [BuildTarget::Development, BuildTarget::Production];

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Development => "development",
      Self::Production => "production",
    }
  }

  /// Whether a stage failure should abort the whole build by default.
  #[inline]
  pub fn bails_by_default(&self) -> bool {
    matches!(self, Self::Production)
  }
}

impl FromStr for BuildTarget {
  type Err = ConfigurationError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "development" | "dev" => Ok(Self::Development),
      "production" | "prod" => Ok(Self::Production),
      _ => Err(ConfigurationError::UnknownTarget { name: s.to_string() }),
    }
  }
}

impl Display for BuildTarget {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}
