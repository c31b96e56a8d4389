// stagehand/src/profile/stage.rs

//! Defines a single named stage of the build pipeline and the set of stage
//! names an external runtime understands.

use crate::error::ConfigurationError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::Display;
use std::str::FromStr;

/// Option record of a stage. Its shape depends on the stage kind.
pub type StageOptions = Map<String, Value>;

/// Every stage name the runtime knows how to execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StageKind {
  TranspileScripts,
  SplitChunks,
  CompileStyles,
  HtmlPage,
  CleanOutput,
  CopyAssets,
  DefineEnv,
  ExtractStyles,
  MinifyScripts,
  LintStyles,
  LoaderOptions,
  Dashboard,
  BundleAnalyzer,
}

impl StageKind {
  pub const ALL: [StageKind; 13] = [
    StageKind::TranspileScripts,
    StageKind::SplitChunks,
    StageKind::CompileStyles,
    StageKind::HtmlPage,
    StageKind::CleanOutput,
    StageKind::CopyAssets,
    StageKind::DefineEnv,
    StageKind::ExtractStyles,
    StageKind::MinifyScripts,
    StageKind::LintStyles,
    StageKind::LoaderOptions,
    StageKind::Dashboard,
    StageKind::BundleAnalyzer,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::TranspileScripts => "transpile-scripts",
      Self::SplitChunks => "split-chunks",
      Self::CompileStyles => "compile-styles",
      Self::HtmlPage => "html-page",
      Self::CleanOutput => "clean-output",
      Self::CopyAssets => "copy-assets",
      Self::DefineEnv => "define-env",
      Self::ExtractStyles => "extract-styles",
      Self::MinifyScripts => "minify-scripts",
      Self::LintStyles => "lint-styles",
      Self::LoaderOptions => "loader-options",
      Self::Dashboard => "dashboard",
      Self::BundleAnalyzer => "bundle-analyzer",
    }
  }

  /// Option keys that must be present for the runtime to execute the stage.
  pub fn required_options(&self) -> &'static [&'static str] {
    match self {
      Self::TranspileScripts => &["loader"],
      Self::SplitChunks => &["names"],
      Self::CompileStyles => &["loaders"],
      Self::HtmlPage => &["template", "filename", "chunks"],
      Self::CleanOutput => &["paths"],
      Self::CopyAssets => &["from"],
      Self::DefineEnv => &["definitions"],
      Self::LintStyles => &["config_file", "files"],
      Self::ExtractStyles | Self::MinifyScripts | Self::LoaderOptions | Self::Dashboard | Self::BundleAnalyzer => &[],
    }
  }
}

impl FromStr for StageKind {
  type Err = ();

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::ALL.into_iter().find(|kind| kind.as_str() == s).ok_or(())
  }
}

impl Display for StageKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A compiled regular expression restricting which input files a stage sees.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MatchPattern(Regex);

impl MatchPattern {
  pub fn new(pattern: &str) -> Result<Self, ConfigurationError> {
    Regex::new(pattern)
      .map(Self)
      .map_err(|e| ConfigurationError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
      })
  }

  pub fn as_str(&self) -> &str {
    self.0.as_str()
  }

  pub fn is_match(&self, path: &str) -> bool {
    self.0.is_match(path)
  }
}

impl PartialEq for MatchPattern {
  fn eq(&self, other: &Self) -> bool {
    self.as_str() == other.as_str()
  }
}

impl TryFrom<String> for MatchPattern {
  type Error = ConfigurationError;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    Self::new(&value)
  }
}

impl From<MatchPattern> for String {
  fn from(value: MatchPattern) -> Self {
    value.0.as_str().to_string()
  }
}

/// Definition of a pipeline stage: its name, option record and optional input filter.
///
/// The name stays a plain string so that override layers can carry stage names
/// this build does not know about; they are rejected when the profile is finalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageSpec {
  pub name: String,
  #[serde(default)]
  pub options: StageOptions,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub match_pattern: Option<MatchPattern>,
}

impl StageSpec {
  pub fn new(kind: StageKind) -> Self {
    Self {
      name: kind.as_str().to_string(),
      options: StageOptions::new(),
      match_pattern: None,
    }
  }

  /// Builds a stage whose options are the serialized form of `options`.
  ///
  /// `options` must serialize to a JSON object.
  pub fn with_typed_options<O: Serialize>(kind: StageKind, options: &O) -> Result<Self, ConfigurationError> {
    let malformed = |reason: String| ConfigurationError::MalformedStageOption {
      stage_name: kind.as_str().to_string(),
      index: 0,
      option: "<root>".to_string(),
      reason,
    };
    match serde_json::to_value(options).map_err(|e| malformed(e.to_string()))? {
      Value::Object(map) => Ok(Self {
        name: kind.as_str().to_string(),
        options: map,
        match_pattern: None,
      }),
      other => Err(malformed(format!("expected an object, got {other}"))),
    }
  }

  pub fn option(mut self, key: &str, value: impl Into<Value>) -> Self {
    self.options.insert(key.to_string(), value.into());
    self
  }

  pub fn matching(mut self, pattern: MatchPattern) -> Self {
    self.match_pattern = Some(pattern);
    self
  }

  /// The known kind for this stage's name, if any.
  pub fn kind(&self) -> Option<StageKind> {
    self.name.parse().ok()
  }

  /// Whether the stage applies to the given input path. A stage without a
  /// pattern applies to everything.
  pub fn applies_to(&self, path: &str) -> bool {
    self.match_pattern.as_ref().map_or(true, |p| p.is_match(path))
  }

  /// Deserializes the option record into a typed view.
  pub fn typed_options<O: serde::de::DeserializeOwned>(&self) -> Result<O, serde_json::Error> {
    serde_json::from_value(Value::Object(self.options.clone()))
  }
}
