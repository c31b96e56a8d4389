// stagehand/src/load.rs

//! Reading override layers and proxy rule lists from TOML or JSON files.

use crate::error::{StagehandError, StagehandResult};
use crate::profile::{ProfileLayer, ServerLayer};
use crate::server::ProxyRule;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::Path;
use tracing::{event, Level};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerFormat {
  Toml,
  Json,
}

impl LayerFormat {
  /// Picks the format from a file extension; anything but `.json` is read as TOML.
  pub fn from_path(path: &Path) -> Self {
    match path.extension().and_then(|ext| ext.to_str()) {
      Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
      _ => Self::Toml,
    }
  }
}

fn parse<T: DeserializeOwned>(source: &str, format: LayerFormat, origin: &str) -> StagehandResult<T> {
  let parsed = match format {
    LayerFormat::Toml => toml::from_str(source).map_err(|e| e.to_string()),
    LayerFormat::Json => serde_json::from_str(source).map_err(|e| e.to_string()),
  };
  parsed.map_err(|message| StagehandError::LayerParse {
    origin: origin.to_string(),
    message,
  })
}

fn read(path: &Path) -> StagehandResult<String> {
  std::fs::read_to_string(path).map_err(|source| StagehandError::LayerIo {
    path: path.to_path_buf(),
    source,
  })
}

impl ProfileLayer {
  pub fn from_str_as(source: &str, format: LayerFormat) -> StagehandResult<Self> {
    parse(source, format, "<inline>")
  }

  pub fn from_file(path: &Path) -> StagehandResult<Self> {
    let layer = parse(&read(path)?, LayerFormat::from_path(path), &path.display().to_string())?;
    event!(Level::DEBUG, path = %path.display(), "Override layer loaded.");
    Ok(layer)
  }
}

#[derive(Debug, Deserialize)]
struct ProxyRuleFile {
  #[serde(default)]
  proxy_rules: Vec<ProxyRule>,
}

/// Loads `[[proxy_rules]]` entries from a file into a dev-server-only layer.
pub fn proxy_rules_layer(path: &Path) -> StagehandResult<ProfileLayer> {
  let file: ProxyRuleFile = parse(&read(path)?, LayerFormat::from_path(path), &path.display().to_string())?;
  event!(Level::DEBUG, path = %path.display(), rules = file.proxy_rules.len(), "Proxy rules loaded.");
  Ok(ProfileLayer::with_dev_server(ServerLayer::proxy_rules(file.proxy_rules)))
}
