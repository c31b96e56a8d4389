// stagehand/src/profile/layer.rs

//! Partial profiles. A base layer and any number of override layers are merged
//! (see `crate::merge`) and then finalized into a `BuildProfile`.

use super::file_name::FileNameTemplate;
use super::source_map::SourceMapMode;
use super::stage::StageSpec;
use crate::server::{HistoryApiFallback, OverlayOptions, ProxyRule};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputNamesLayer {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub script: Option<FileNameTemplate>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub source_map: Option<FileNameTemplate>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub stylesheet: Option<FileNameTemplate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerLayer {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub host: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub port: Option<u16>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub content_base: Vec<PathBuf>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub watch_content_base: Option<bool>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub compress: Option<bool>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub hot_reload: Option<bool>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub history_api_fallback: Option<HistoryApiFallback>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub overlay: Option<OverlayOptions>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub proxy_rules: Vec<ProxyRule>,
  #[serde(skip_serializing_if = "BTreeSet::is_empty")]
  pub watch_exclusions: BTreeSet<String>,
}

impl ServerLayer {
  /// A layer that only carries a host and/or port, as read from the environment
  /// or the command line.
  pub fn address(host: Option<String>, port: Option<u16>) -> Self {
    Self {
      host,
      port,
      ..Self::default()
    }
  }

  pub fn proxy_rules(rules: Vec<ProxyRule>) -> Self {
    Self {
      proxy_rules: rules,
      ..Self::default()
    }
  }
}

/// The partial form of `BuildProfile`: every field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProfileLayer {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub context: Option<PathBuf>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub source_map: Option<SourceMapMode>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub output_path: Option<PathBuf>,
  pub file_names: OutputNamesLayer,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub bail: Option<bool>,
  #[serde(skip_serializing_if = "IndexMap::is_empty")]
  pub entries: IndexMap<String, PathBuf>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub stages: Vec<StageSpec>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub dev_server: Option<ServerLayer>,
}

impl ProfileLayer {
  pub fn with_dev_server(server: ServerLayer) -> Self {
    Self {
      dev_server: Some(server),
      ..Self::default()
    }
  }

  pub fn with_stages(stages: Vec<StageSpec>) -> Self {
    Self {
      stages,
      ..Self::default()
    }
  }
}
