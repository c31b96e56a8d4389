// stagehand/src/validate.rs

//! Turns a merged `ProfileLayer` into a `BuildProfile`, rejecting anything an
//! external runtime could not execute. Nothing here touches the filesystem.

use crate::error::ConfigurationError;
use crate::profile::options::{HtmlPageOptions, SplitChunksOptions};
use crate::profile::{
  known_chunks, BuildProfile, BuildTarget, FileNameTemplate, OutputFileNames, ProfileLayer, ServerLayer, StageKind,
  StageSpec,
};
use crate::server::options::compile_watch_exclusions;
use crate::server::{ServerOptions, DEFAULT_HOST, DEFAULT_PORT};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{event, Level};

impl ProfileLayer {
  /// Validates the layer and fills in defaults.
  pub fn finalize(self, target: BuildTarget) -> Result<BuildProfile, ConfigurationError> {
    let context = self.context.ok_or_else(|| ConfigurationError::MissingContext {
      target: target.to_string(),
    })?;
    let output_path = self.output_path.ok_or_else(|| ConfigurationError::MissingOutputPath {
      target: target.to_string(),
    })?;
    if output_path.as_os_str().is_empty() {
      return Err(ConfigurationError::MissingOutputPath {
        target: target.to_string(),
      });
    }
    let output_path = resolve(&context, output_path);

    let file_names = OutputFileNames {
      script: or_default(self.file_names.script, "[name].js")?,
      source_map: or_default(self.file_names.source_map, "[name].map")?,
      stylesheet: or_default(self.file_names.stylesheet, "[name].css")?,
    };

    validate_stages(&self.entries, &self.stages)?;

    let dev_server = self
      .dev_server
      .map(|server| finalize_server(server, &output_path))
      .transpose()?;

    Ok(BuildProfile {
      target,
      context,
      source_map_mode: self.source_map.unwrap_or_default(),
      output_path,
      file_names,
      bail: self.bail.unwrap_or_else(|| target.bails_by_default()),
      entries: self.entries,
      stages: self.stages,
      dev_server,
    })
  }
}

fn or_default(template: Option<FileNameTemplate>, default: &str) -> Result<FileNameTemplate, ConfigurationError> {
  match template {
    Some(template) => Ok(template),
    None => FileNameTemplate::new(default),
  }
}

fn resolve(context: &Path, path: PathBuf) -> PathBuf {
  if path.is_absolute() {
    path
  } else {
    context.join(path)
  }
}

fn validate_stages(
  entries: &indexmap::IndexMap<String, PathBuf>,
  stages: &[StageSpec],
) -> Result<(), ConfigurationError> {
  // Names first: an unknown stage anywhere fails the whole profile before any
  // option of any stage is looked at.
  let mut kinds = Vec::with_capacity(stages.len());
  for (index, stage) in stages.iter().enumerate() {
    let kind = stage.kind().ok_or_else(|| ConfigurationError::UnknownStage {
      stage_name: stage.name.clone(),
      index,
    })?;
    kinds.push(kind);
  }

  for (index, (stage, kind)) in stages.iter().zip(&kinds).enumerate() {
    for option in kind.required_options() {
      if !stage.options.contains_key(*option) {
        return Err(ConfigurationError::MissingStageOption {
          stage_name: stage.name.clone(),
          index,
          option: (*option).to_string(),
        });
      }
    }
    if *kind == StageKind::SplitChunks {
      typed::<SplitChunksOptions>(stage, index)?;
    }
  }

  let chunks = known_chunks(entries, stages);
  let mut page_outputs = HashSet::new();
  for (index, stage) in stages.iter().enumerate() {
    if stage.kind() != Some(StageKind::HtmlPage) {
      continue;
    }
    let page: HtmlPageOptions = typed(stage, index)?;
    FileNameTemplate::new(page.filename.clone())?;
    if !page_outputs.insert(page.filename.clone()) {
      return Err(ConfigurationError::DuplicateOutput {
        filename: page.filename,
      });
    }
    if let Some(missing) = page.chunks.iter().find(|chunk| !chunks.contains(chunk)) {
      return Err(ConfigurationError::UnknownChunk {
        page: page.filename.clone(),
        chunk: missing.clone(),
      });
    }
  }

  event!(Level::DEBUG, stages = stages.len(), pages = page_outputs.len(), "Stage list validated.");
  Ok(())
}

fn typed<O: serde::de::DeserializeOwned>(stage: &StageSpec, index: usize) -> Result<O, ConfigurationError> {
  stage
    .typed_options()
    .map_err(|e| ConfigurationError::MalformedStageOption {
      stage_name: stage.name.clone(),
      index,
      option: "<options>".to_string(),
      reason: e.to_string(),
    })
}

// With no content base set, the server serves the build output.
fn finalize_server(layer: ServerLayer, output_path: &Path) -> Result<ServerOptions, ConfigurationError> {
  let port = layer.port.unwrap_or(DEFAULT_PORT);
  if port == 0 {
    return Err(ConfigurationError::InvalidPort);
  }
  for rule in &layer.proxy_rules {
    rule.validate()?;
  }
  compile_watch_exclusions(&layer.watch_exclusions)?;

  Ok(ServerOptions {
    host: layer.host.unwrap_or_else(|| DEFAULT_HOST.to_string()),
    port,
    content_base: if layer.content_base.is_empty() {
      vec![output_path.to_path_buf()]
    } else {
      layer.content_base
    },
    watch_content_base: layer.watch_content_base.unwrap_or(false),
    compress: layer.compress.unwrap_or(false),
    hot_reload: layer.hot_reload.unwrap_or(false),
    history_api_fallback: layer.history_api_fallback,
    overlay: layer.overlay.unwrap_or_default(),
    proxy_rules: layer.proxy_rules,
    watch_exclusions: layer.watch_exclusions,
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::profile::options::SplitChunksOptions;
  use crate::server::ProxyRule;
  use serde_json::json;

  fn minimal() -> ProfileLayer {
    ProfileLayer {
      context: Some("/project".into()),
      output_path: Some("dev".into()),
      ..ProfileLayer::default()
    }
  }

  #[test]
  fn relative_output_resolves_against_context() {
    let profile = minimal().finalize(BuildTarget::Development).unwrap();
    assert_eq!(profile.output_path, PathBuf::from("/project/dev"));
    assert!(!profile.bail);
    assert_eq!(profile.file_names.script.as_str(), "[name].js");
  }

  #[test]
  fn production_bails_unless_told_otherwise() {
    let profile = minimal().finalize(BuildTarget::Production).unwrap();
    assert!(profile.bail);
    let relaxed = ProfileLayer {
      bail: Some(false),
      ..minimal()
    };
    assert!(!relaxed.finalize(BuildTarget::Production).unwrap().bail);
  }

  #[test]
  fn missing_output_path_is_rejected() {
    let layer = ProfileLayer {
      output_path: None,
      ..minimal()
    };
    assert_eq!(
      layer.finalize(BuildTarget::Production).unwrap_err(),
      ConfigurationError::MissingOutputPath {
        target: "production".into()
      }
    );
  }

  #[test]
  fn missing_required_option_is_rejected() {
    let layer = ProfileLayer {
      stages: vec![StageSpec::new(StageKind::CopyAssets)],
      ..minimal()
    };
    assert!(matches!(
      layer.finalize(BuildTarget::Development),
      Err(ConfigurationError::MissingStageOption { ref option, .. }) if option == "from"
    ));
  }

  #[test]
  fn html_pages_must_reference_known_chunks_and_be_unique() {
    let split = StageSpec::with_typed_options(
      StageKind::SplitChunks,
      &SplitChunksOptions {
        names: vec!["common".into()],
        min_chunks: None,
      },
    )
    .unwrap();
    let page = |filename: &str, chunks: serde_json::Value| {
      StageSpec::new(StageKind::HtmlPage)
        .option("template", "index.html")
        .option("filename", filename)
        .option("chunks", chunks)
    };
    let mut layer = minimal();
    layer.entries.insert("index".into(), "index.js".into());

    let ok = ProfileLayer {
      stages: vec![split.clone(), page("index.html", json!(["common", "index"]))],
      ..layer.clone()
    };
    assert!(ok.finalize(BuildTarget::Development).is_ok());

    let unknown = ProfileLayer {
      stages: vec![split.clone(), page("index.html", json!(["vendor", "index"]))],
      ..layer.clone()
    };
    assert_eq!(
      unknown.finalize(BuildTarget::Development).unwrap_err(),
      ConfigurationError::UnknownChunk {
        page: "index.html".into(),
        chunk: "vendor".into()
      }
    );

    let duplicate = ProfileLayer {
      stages: vec![split, page("index.html", json!(["index"])), page("index.html", json!(["index"]))],
      ..layer
    };
    assert!(matches!(
      duplicate.finalize(BuildTarget::Development),
      Err(ConfigurationError::DuplicateOutput { .. })
    ));
  }

  #[test]
  fn server_defaults_and_validation() {
    let layer = ProfileLayer {
      dev_server: Some(ServerLayer::default()),
      ..minimal()
    };
    let server = layer.finalize(BuildTarget::Development).unwrap().dev_server.unwrap();
    assert_eq!(server.address(), "localhost:3000");
    assert_eq!(server.content_base, vec![PathBuf::from("/project/dev")]);

    let explicit = ProfileLayer {
      dev_server: Some(ServerLayer {
        content_base: vec!["/srv/static".into()],
        ..ServerLayer::default()
      }),
      ..minimal()
    };
    let server = explicit.finalize(BuildTarget::Development).unwrap().dev_server.unwrap();
    assert_eq!(server.content_base, vec![PathBuf::from("/srv/static")]);

    let bad_port = ProfileLayer {
      dev_server: Some(ServerLayer::address(None, Some(0))),
      ..minimal()
    };
    assert_eq!(
      bad_port.finalize(BuildTarget::Development).unwrap_err(),
      ConfigurationError::InvalidPort
    );

    let bad_rule = ProfileLayer {
      dev_server: Some(ServerLayer::proxy_rules(vec![ProxyRule::new("/api", "nowhere")])),
      ..minimal()
    };
    assert!(matches!(
      bad_rule.finalize(BuildTarget::Development),
      Err(ConfigurationError::MalformedProxyRule { .. })
    ));
  }
}
