// stagehand/src/server/options.rs

//! Static parameters handed to the external development server.

use super::proxy::{ProxyRule, ProxyTable};
use crate::error::ConfigurationError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 3000;

/// Rewrites client-side routes to the index page, like
/// `connect-history-api-fallback` does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryApiFallback {
  /// When false, paths whose last segment contains a dot are treated as files
  /// and never rewritten.
  #[serde(default)]
  pub disable_dot_rule: bool,
  #[serde(default = "default_index")]
  pub index: String,
}

fn default_index() -> String {
  "/index.html".to_string()
}

impl Default for HistoryApiFallback {
  fn default() -> Self {
    Self {
      disable_dot_rule: false,
      index: default_index(),
    }
  }
}

impl HistoryApiFallback {
  /// Returns the rewritten path for requests that should fall back to the
  /// index page, or `None` when the request must be served as-is.
  pub fn rewrite(&self, method: &str, path: &str, accept: &str) -> Option<&str> {
    if !matches!(method, "GET" | "HEAD") {
      return None;
    }
    if !(accept.contains("text/html") || accept.contains("*/*")) {
      return None;
    }
    let path = path.split(['?', '#']).next().unwrap_or(path);
    if !self.disable_dot_rule {
      let last_segment = path.rsplit('/').next().unwrap_or(path);
      if last_segment.contains('.') {
        return None;
      }
    }
    Some(self.index.as_str())
  }
}

/// Which stage failures are shown in the browser overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayOptions {
  pub warnings: bool,
  pub errors: bool,
}

impl Default for OverlayOptions {
  fn default() -> Self {
    Self {
      warnings: false,
      errors: true,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerOptions {
  pub host: String,
  pub port: u16,
  pub content_base: Vec<PathBuf>,
  pub watch_content_base: bool,
  pub compress: bool,
  pub hot_reload: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub history_api_fallback: Option<HistoryApiFallback>,
  pub overlay: OverlayOptions,
  pub proxy_rules: Vec<ProxyRule>,
  pub watch_exclusions: BTreeSet<String>,
}

impl ServerOptions {
  pub fn address(&self) -> String {
    format!("{}:{}", self.host, self.port)
  }

  pub fn proxy_table(&self) -> ProxyTable<'_> {
    ProxyTable::new(&self.proxy_rules)
  }

  /// Whether a changed path should be ignored by the file watcher.
  ///
  /// Patterns are validated when the profile is composed; any that fail to
  /// compile here are skipped.
  pub fn is_watch_excluded(&self, path: &str) -> bool {
    self
      .watch_exclusions
      .iter()
      .filter_map(|pattern| Regex::new(pattern).ok())
      .any(|re| re.is_match(path))
  }
}

pub(crate) fn compile_watch_exclusions(patterns: &BTreeSet<String>) -> Result<Vec<Regex>, ConfigurationError> {
  patterns
    .iter()
    .map(|pattern| {
      Regex::new(pattern).map_err(|e| ConfigurationError::InvalidPattern {
        pattern: pattern.clone(),
        reason: e.to_string(),
      })
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  const HTML: &str = "text/html,application/xhtml+xml,*/*;q=0.8";

  #[test]
  fn rewrites_client_routes() {
    let fallback = HistoryApiFallback::default();
    assert_eq!(fallback.rewrite("GET", "/users/42", HTML), Some("/index.html"));
    assert_eq!(fallback.rewrite("HEAD", "/", HTML), Some("/index.html"));
  }

  #[test]
  fn wildcard_accept_counts_as_html() {
    let fallback = HistoryApiFallback::default();
    assert_eq!(fallback.rewrite("GET", "/users", "*/*"), Some("/index.html"));
    assert_eq!(fallback.rewrite("GET", "/users", "application/json, */*;q=0.1"), Some("/index.html"));
    assert_eq!(fallback.rewrite("GET", "/app.js", "*/*"), None);
  }

  #[test]
  fn leaves_non_html_and_non_get_requests() {
    let fallback = HistoryApiFallback::default();
    assert_eq!(fallback.rewrite("POST", "/users", HTML), None);
    assert_eq!(fallback.rewrite("GET", "/users", "application/json"), None);
    assert_eq!(fallback.rewrite("GET", "/users", ""), None);
  }

  #[test]
  fn dot_rule_and_its_disabling() {
    let strict = HistoryApiFallback::default();
    assert_eq!(strict.rewrite("GET", "/user/jane.doe", HTML), None);
    assert_eq!(strict.rewrite("GET", "/v1.2/users", HTML), Some("/index.html"));

    let relaxed = HistoryApiFallback {
      disable_dot_rule: true,
      ..HistoryApiFallback::default()
    };
    assert_eq!(relaxed.rewrite("GET", "/user/jane.doe", HTML), Some("/index.html"));
  }

  #[test]
  fn query_string_does_not_trigger_dot_rule() {
    let strict = HistoryApiFallback::default();
    assert_eq!(strict.rewrite("GET", "/search?q=a.b", HTML), Some("/index.html"));
  }
}
