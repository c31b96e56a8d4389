// stagehand/src/presets/production.rs
use super::common;
use super::pages::default_pages;
use crate::error::ConfigurationError;
use crate::profile::options::HtmlMinifyOptions;
use crate::profile::{FileNameTemplate, OutputNamesLayer, ProfileLayer, SourceMapMode, StageSpec};
use std::path::Path;

pub const OUTPUT_DIR: &str = "dist";

/// Override layer for the production target: content-hashed names, external
/// source maps, minified pages and fail-fast execution.
pub fn production(root: &Path) -> Result<ProfileLayer, ConfigurationError> {
  let mut stages: Vec<StageSpec> = vec![common::compile_styles(root, true)?];
  for page in default_pages() {
    stages.push(common::html_page(root, &page, Some(HtmlMinifyOptions::full()))?);
  }
  stages.extend([
    common::clean_output(root, OUTPUT_DIR)?,
    common::copy_assets(root)?,
    common::define_env()?,
    common::extract_styles(),
    common::minify_scripts(true, None)?,
    // Second pass over the shared chunk only.
    common::minify_scripts(true, Some("common-"))?,
    common::lint_styles()?,
    common::loader_options(root)?,
    common::bundle_analyzer()?,
  ]);

  Ok(ProfileLayer {
    source_map: Some(SourceMapMode::External),
    output_path: Some(OUTPUT_DIR.into()),
    file_names: OutputNamesLayer {
      script: Some(FileNameTemplate::new("js/[name]-[contenthash].min.js")?),
      source_map: Some(FileNameTemplate::new("js/[name]-[contenthash].map")?),
      stylesheet: Some(FileNameTemplate::new("css/[name]-[contenthash].min.css")?),
    },
    bail: Some(true),
    stages,
    ..ProfileLayer::default()
  })
}
