// stagehand/src/profile/build_profile.rs

//! The fully composed set of build parameters for one target.

use super::file_name::FileNameTemplate;
use super::layer::{OutputNamesLayer, ProfileLayer, ServerLayer};
use super::options::HtmlPageOptions;
use super::source_map::SourceMapMode;
use super::stage::{StageKind, StageSpec};
use super::target::BuildTarget;
use crate::server::ServerOptions;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputFileNames {
  pub script: FileNameTemplate,
  pub source_map: FileNameTemplate,
  pub stylesheet: FileNameTemplate,
}

impl OutputFileNames {
  pub fn iter(&self) -> impl Iterator<Item = &FileNameTemplate> {
    [&self.script, &self.source_map, &self.stylesheet].into_iter()
  }
}

/// A composed, validated profile. Built once per target by
/// `ConfigComposer::compose` and never mutated afterwards; runtimes share it
/// behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildProfile {
  pub target: BuildTarget,
  /// Project root. Relative paths in the profile resolve against it.
  pub context: PathBuf,
  pub source_map_mode: SourceMapMode,
  /// Absolute output directory.
  pub output_path: PathBuf,
  pub file_names: OutputFileNames,
  /// Abort the whole pipeline on the first stage failure.
  pub bail: bool,
  pub entries: IndexMap<String, PathBuf>,
  pub stages: Vec<StageSpec>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub dev_server: Option<ServerOptions>,
}

impl BuildProfile {
  /// The script file-name template.
  pub fn file_name_template(&self) -> &FileNameTemplate {
    &self.file_names.script
  }

  pub fn stages_of(&self, kind: StageKind) -> impl Iterator<Item = &StageSpec> {
    self.stages.iter().filter(move |stage| stage.kind() == Some(kind))
  }

  /// Typed options of every `html-page` stage, in pipeline order.
  pub fn html_pages(&self) -> Vec<HtmlPageOptions> {
    // Validated during composition, so every html-page stage deserializes.
    self
      .stages_of(StageKind::HtmlPage)
      .filter_map(|stage| stage.typed_options().ok())
      .collect()
  }

  /// Chunk names a page may reference: entries plus shared split chunks.
  pub fn known_chunks(&self) -> Vec<String> {
    super::known_chunks(&self.entries, &self.stages)
  }
}

// Turning a finished profile back into a layer lets it act as the base of a
// further merge.
impl From<BuildProfile> for ProfileLayer {
  fn from(profile: BuildProfile) -> Self {
    let dev_server = profile.dev_server.map(|server| ServerLayer {
      host: Some(server.host),
      port: Some(server.port),
      content_base: server.content_base,
      watch_content_base: Some(server.watch_content_base),
      compress: Some(server.compress),
      hot_reload: Some(server.hot_reload),
      history_api_fallback: server.history_api_fallback,
      overlay: Some(server.overlay),
      proxy_rules: server.proxy_rules,
      watch_exclusions: server.watch_exclusions,
    });
    ProfileLayer {
      context: Some(profile.context),
      source_map: Some(profile.source_map_mode),
      output_path: Some(profile.output_path),
      file_names: OutputNamesLayer {
        script: Some(profile.file_names.script),
        source_map: Some(profile.file_names.source_map),
        stylesheet: Some(profile.file_names.stylesheet),
      },
      bail: Some(profile.bail),
      entries: profile.entries,
      stages: profile.stages,
      dev_server,
    }
  }
}
