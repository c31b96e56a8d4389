// stagehand/src/presets/development.rs
use super::common;
use super::pages::default_pages;
use crate::error::ConfigurationError;
use crate::profile::{FileNameTemplate, OutputNamesLayer, ProfileLayer, ServerLayer, SourceMapMode, StageKind, StageSpec};
use crate::server::{HistoryApiFallback, OverlayOptions, DEFAULT_HOST, DEFAULT_PORT};
use std::collections::BTreeSet;
use std::path::Path;

pub const OUTPUT_DIR: &str = "dev";

/// Override layer for the development target: unhashed names, inline source
/// maps, a single minifier pass and a hot-reloading dev server.
///
/// Proxy rules are not part of the preset; they come from an external layer.
pub fn development(root: &Path) -> Result<ProfileLayer, ConfigurationError> {
  let mut stages: Vec<StageSpec> = vec![common::compile_styles(root, false)?];
  for page in default_pages() {
    stages.push(common::html_page(root, &page, None)?);
  }
  stages.extend([
    common::clean_output(root, OUTPUT_DIR)?,
    common::copy_assets(root)?,
    common::define_env()?,
    common::extract_styles(),
    common::minify_scripts(false, None)?,
    common::lint_styles()?,
    common::loader_options(root)?,
    StageSpec::new(StageKind::Dashboard),
    common::bundle_analyzer()?,
  ]);

  Ok(ProfileLayer {
    source_map: Some(SourceMapMode::Inline),
    output_path: Some(OUTPUT_DIR.into()),
    file_names: OutputNamesLayer {
      script: Some(FileNameTemplate::new("js/[name].js")?),
      source_map: Some(FileNameTemplate::new("js/[name].map")?),
      stylesheet: Some(FileNameTemplate::new("css/[name].css")?),
    },
    bail: Some(false),
    stages,
    dev_server: Some(ServerLayer {
      host: Some(DEFAULT_HOST.to_string()),
      port: Some(DEFAULT_PORT),
      content_base: Vec::new(),
      watch_content_base: Some(true),
      compress: Some(true),
      hot_reload: Some(true),
      history_api_fallback: Some(HistoryApiFallback {
        disable_dot_rule: true,
        ..HistoryApiFallback::default()
      }),
      overlay: Some(OverlayOptions {
        warnings: true,
        errors: true,
      }),
      proxy_rules: Vec::new(),
      watch_exclusions: BTreeSet::from(["node_modules".to_string()]),
    }),
    ..ProfileLayer::default()
  })
}
