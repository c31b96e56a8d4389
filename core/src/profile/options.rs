// stagehand/src/profile/options.rs

//! Typed views over the option records of the known stage kinds.
//!
//! Stages store their options as plain JSON objects so that layers can be read
//! from files; these structs are what presets serialize into that form and what
//! validation and handlers deserialize out of it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranspileScriptsOptions {
  pub loader: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub exclude: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitChunksOptions {
  /// Shared chunk names, in the order they are emitted.
  pub names: Vec<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub min_chunks: Option<u32>,
}

/// One loader in a chain. The chain runs last to first, like webpack's `use`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoaderSpec {
  pub loader: String,
  #[serde(default)]
  pub options: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompileStylesOptions {
  /// Loader used when styles are not extracted into their own file.
  pub fallback: String,
  pub loaders: Vec<LoaderSpec>,
}

#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HtmlMinifyOptions {
  pub remove_comments: bool,
  pub collapse_whitespace: bool,
  pub remove_redundant_attributes: bool,
  pub use_short_doctype: bool,
  pub remove_empty_attributes: bool,
  pub remove_style_link_type_attributes: bool,
  pub keep_closing_slash: bool,
  pub minify_js: bool,
  pub minify_css: bool,
  pub minify_urls: bool,
}

impl HtmlMinifyOptions {
  /// Everything on: the production page settings.
  pub fn full() -> Self {
    Self {
      remove_comments: true,
      collapse_whitespace: true,
      remove_redundant_attributes: true,
      use_short_doctype: true,
      remove_empty_attributes: true,
      remove_style_link_type_attributes: true,
      keep_closing_slash: true,
      minify_js: true,
      minify_css: true,
      minify_urls: true,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HtmlPageOptions {
  #[serde(default = "default_true")]
  pub inject: bool,
  pub template: PathBuf,
  /// Chunks injected as script tags, in order.
  pub chunks: Vec<String>,
  /// Output path relative to the profile's output directory.
  pub filename: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub minify: Option<HtmlMinifyOptions>,
}

fn default_true() -> bool {
  true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanOutputOptions {
  pub paths: Vec<String>,
  pub root: PathBuf,
  #[serde(default)]
  pub exclude: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyAssetsOptions {
  pub from: PathBuf,
  #[serde(default)]
  pub ignore: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefineEnvOptions {
  /// Identifier to literal source text, e.g. `process.env.NODE_ENV` to `"\"production\""`.
  pub definitions: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressOptions {
  pub screw_ie8: bool,
  pub warnings: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MangleOptions {
  pub screw_ie8: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinifyOutputOptions {
  pub comments: bool,
  pub screw_ie8: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinifyScriptsOptions {
  pub compress: CompressOptions,
  pub mangle: MangleOptions,
  pub output: MinifyOutputOptions,
  pub source_map: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LintStylesOptions {
  pub config_file: String,
  pub context: String,
  pub files: String,
  pub fail_on_error: bool,
  pub quiet: bool,
  pub syntax: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedLoaderOptions {
  pub context: String,
  pub sass_include_paths: Vec<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleAnalyzerOptions {
  pub analyzer_mode: String,
  pub analyzer_host: String,
  pub analyzer_port: u16,
  pub report_filename: String,
  pub default_sizes: String,
  pub open_analyzer: bool,
  pub generate_stats_file: bool,
  pub stats_filename: String,
  pub log_level: String,
}
