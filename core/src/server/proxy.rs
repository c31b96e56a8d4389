// stagehand/src/server/proxy.rs

//! Proxy rules of the development server.
//!
//! Rules are tried in declaration order; the first rule whose prefix matches the
//! request path wins. Matching is a plain string-prefix test, so `/api` also
//! catches `/apiary`. Declare the more specific rule first when that matters.

use crate::error::ConfigurationError;
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyRule {
  pub path_prefix: String,
  pub target: String,
}

impl ProxyRule {
  pub fn new(path_prefix: impl Into<String>, target: impl Into<String>) -> Self {
    Self {
      path_prefix: path_prefix.into(),
      target: target.into(),
    }
  }

  pub fn matches(&self, path: &str) -> bool {
    path.starts_with(&self.path_prefix)
  }

  /// Checks the prefix is rooted and the target is an absolute http(s) URL.
  pub fn validate(&self) -> Result<Url, ConfigurationError> {
    let malformed = |reason: String| ConfigurationError::MalformedProxyRule {
      path_prefix: self.path_prefix.clone(),
      reason,
    };
    if !self.path_prefix.starts_with('/') {
      return Err(malformed("path prefix must start with '/'".to_string()));
    }
    let url = Url::parse(&self.target).map_err(|e| malformed(format!("target '{}' is not a URL: {e}", self.target)))?;
    match url.scheme() {
      "http" | "https" => {}
      other => return Err(malformed(format!("unsupported target scheme '{other}'"))),
    }
    if url.host_str().map_or(true, str::is_empty) {
      return Err(malformed(format!("target '{}' has no host", self.target)));
    }
    Ok(url)
  }
}

/// Borrowed, ordered view over a list of proxy rules.
#[derive(Debug, Clone, Copy)]
pub struct ProxyTable<'a> {
  rules: &'a [ProxyRule],
}

impl<'a> ProxyTable<'a> {
  pub fn new(rules: &'a [ProxyRule]) -> Self {
    Self { rules }
  }

  /// Returns the first rule matching `path`, or `None` when the request is
  /// served locally.
  pub fn resolve(&self, path: &str) -> Option<&'a ProxyRule> {
    let rule = self.rules.iter().find(|rule| rule.matches(path));
    tracing::trace!(%path, target = rule.map(|r| r.target.as_str()), "Proxy lookup.");
    rule
  }

  pub fn len(&self) -> usize {
    self.rules.len()
  }

  pub fn is_empty(&self) -> bool {
    self.rules.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn rejects_relative_prefix_and_bad_targets() {
    assert!(ProxyRule::new("api", "http://localhost:8080").validate().is_err());
    assert!(ProxyRule::new("/api", "localhost:8080").validate().is_err());
    assert!(ProxyRule::new("/api", "ftp://example.com").validate().is_err());
    assert!(ProxyRule::new("/api", "not a url").validate().is_err());
    assert!(ProxyRule::new("/api", "https://example.com/v1").validate().is_ok());
  }

  #[test]
  fn empty_table_resolves_nothing() {
    let table = ProxyTable::new(&[]);
    assert!(table.is_empty());
    assert_eq!(table.resolve("/api"), None);
  }
}
