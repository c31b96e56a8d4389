// stagehand/src/merge.rs

//! The Configuration Merger.
//!
//! Merging is a pure function over layers:
//!  - scalar fields present in the override replace the base value;
//!  - sequences (stages, proxy rules, content bases) are concatenated, base first;
//!  - sets (watch exclusions) are unioned;
//!  - ordered maps (entries) keep base order, replace existing keys in place and
//!    append new keys;
//!  - nested records (file names, dev server) merge field by field, one level deep.
//!
//! All of these are associative, so folding a stack of layers gives the same
//! result no matter how the stack is grouped.

use crate::error::StagehandResult;
use crate::profile::{BuildProfile, BuildTarget, OutputNamesLayer, ProfileLayer, ServerLayer};
use tracing::{event, instrument, Level};

pub trait Merge {
  /// Merges `over` on top of `self`.
  fn merge(self, over: Self) -> Self;
}

impl<T: Merge> Merge for Option<T> {
  fn merge(self, over: Self) -> Self {
    match (self, over) {
      (Some(base), Some(over)) => Some(base.merge(over)),
      (base, None) => base,
      (None, over) => over,
    }
  }
}

impl Merge for OutputNamesLayer {
  fn merge(self, over: Self) -> Self {
    Self {
      script: over.script.or(self.script),
      source_map: over.source_map.or(self.source_map),
      stylesheet: over.stylesheet.or(self.stylesheet),
    }
  }
}

impl Merge for ServerLayer {
  fn merge(mut self, over: Self) -> Self {
    self.content_base.extend(over.content_base);
    self.proxy_rules.extend(over.proxy_rules);
    self.watch_exclusions.extend(over.watch_exclusions);
    Self {
      host: over.host.or(self.host),
      port: over.port.or(self.port),
      content_base: self.content_base,
      watch_content_base: over.watch_content_base.or(self.watch_content_base),
      compress: over.compress.or(self.compress),
      hot_reload: over.hot_reload.or(self.hot_reload),
      history_api_fallback: over.history_api_fallback.or(self.history_api_fallback),
      overlay: over.overlay.or(self.overlay),
      proxy_rules: self.proxy_rules,
      watch_exclusions: self.watch_exclusions,
    }
  }
}

impl Merge for ProfileLayer {
  fn merge(mut self, over: Self) -> Self {
    self.stages.extend(over.stages);
    for (name, path) in over.entries {
      self.entries.insert(name, path);
    }
    Self {
      context: over.context.or(self.context),
      source_map: over.source_map.or(self.source_map),
      output_path: over.output_path.or(self.output_path),
      file_names: self.file_names.merge(over.file_names),
      bail: over.bail.or(self.bail),
      entries: self.entries,
      stages: self.stages,
      dev_server: self.dev_server.merge(over.dev_server),
    }
  }
}

/// Composes a base layer and its overrides into a finished profile.
pub struct ConfigComposer;

impl ConfigComposer {
  /// Folds `overrides` over `base` in order, then validates the result.
  #[instrument(name = "ConfigComposer::compose", skip_all, fields(%target), err(Display))]
  pub fn compose(
    target: BuildTarget,
    base: ProfileLayer,
    overrides: impl IntoIterator<Item = ProfileLayer>,
  ) -> StagehandResult<BuildProfile> {
    let mut composed = base;
    let mut layer_count = 1usize;
    for layer in overrides {
      composed = composed.merge(layer);
      layer_count += 1;
    }
    event!(Level::DEBUG, layer_count, stage_count = composed.stages.len(), "Layers merged; validating.");
    let profile = composed.finalize(target)?;
    event!(Level::INFO, stages = profile.stages.len(), output = %profile.output_path.display(), "Profile composed.");
    Ok(profile)
  }
}

impl BuildProfile {
  /// Applies an override layer to an already composed profile.
  pub fn merge(&self, over: &ProfileLayer) -> StagehandResult<BuildProfile> {
    ConfigComposer::compose(self.target, ProfileLayer::from(self.clone()), [over.clone()])
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::profile::{StageKind, StageSpec};
  use crate::server::ProxyRule;
  use std::path::PathBuf;

  fn stage(kind: StageKind) -> StageSpec {
    StageSpec::new(kind)
  }

  #[test]
  fn scalars_replace_sequences_concatenate() {
    let base = ProfileLayer {
      output_path: Some("base".into()),
      bail: Some(false),
      stages: vec![stage(StageKind::DefineEnv)],
      ..ProfileLayer::default()
    };
    let over = ProfileLayer {
      output_path: Some("over".into()),
      stages: vec![stage(StageKind::Dashboard)],
      ..ProfileLayer::default()
    };
    let merged = base.merge(over);
    assert_eq!(merged.output_path, Some(PathBuf::from("over")));
    assert_eq!(merged.bail, Some(false));
    let names: Vec<_> = merged.stages.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["define-env", "dashboard"]);
  }

  #[test]
  fn nested_records_merge_field_by_field() {
    let base = ProfileLayer::with_dev_server(ServerLayer {
      host: Some("localhost".into()),
      port: Some(3000),
      proxy_rules: vec![ProxyRule::new("/api", "http://a.test")],
      ..ServerLayer::default()
    });
    let over = ProfileLayer::with_dev_server(ServerLayer {
      port: Some(4000),
      proxy_rules: vec![ProxyRule::new("/", "http://b.test")],
      ..ServerLayer::default()
    });
    let server = base.merge(over).dev_server.unwrap();
    assert_eq!(server.host.as_deref(), Some("localhost"));
    assert_eq!(server.port, Some(4000));
    assert_eq!(server.proxy_rules.len(), 2);
    assert_eq!(server.proxy_rules[0].path_prefix, "/api");
  }

  #[test]
  fn entries_keep_base_order_and_replace_in_place() {
    let mut base = ProfileLayer::default();
    base.entries.insert("vendor".into(), "vendor.js".into());
    base.entries.insert("index".into(), "index.js".into());
    let mut over = ProfileLayer::default();
    over.entries.insert("admin".into(), "admin.js".into());
    over.entries.insert("vendor".into(), "vendor.prod.js".into());

    let merged = base.merge(over);
    let keys: Vec<_> = merged.entries.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["vendor", "index", "admin"]);
    assert_eq!(merged.entries["vendor"], PathBuf::from("vendor.prod.js"));
  }
}
