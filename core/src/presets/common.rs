// stagehand/src/presets/common.rs

//! The shared base layer and the stage builders both targets draw from.

use super::pages::PageSpec;
use crate::error::ConfigurationError;
use crate::profile::options::{
  BundleAnalyzerOptions, CleanOutputOptions, CompileStylesOptions, CompressOptions, CopyAssetsOptions,
  DefineEnvOptions, HtmlMinifyOptions, HtmlPageOptions, LintStylesOptions, LoaderSpec, MangleOptions,
  MinifyOutputOptions, MinifyScriptsOptions, SharedLoaderOptions, SplitChunksOptions, TranspileScriptsOptions,
};
use crate::profile::{MatchPattern, ProfileLayer, StageKind, StageSpec};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use std::path::Path;

/// Chunks every page loads before its own.
pub const SHARED_CHUNKS: [&str; 2] = ["vendor", "common"];

/// Entries and stages shared by development and production.
pub fn base(root: &Path) -> Result<ProfileLayer, ConfigurationError> {
  let mut layer = ProfileLayer {
    context: Some(root.to_path_buf()),
    ..ProfileLayer::default()
  };
  layer.entries.insert("vendor".into(), "src/app/js/vendor.js".into());
  for page in super::pages::default_pages() {
    layer.entries.insert(page.name.clone(), page.entry.clone());
  }
  layer.stages = vec![
    StageSpec::with_typed_options(
      StageKind::TranspileScripts,
      &TranspileScriptsOptions {
        loader: "babel-loader".into(),
        exclude: Some("node_modules".into()),
      },
    )?
    .matching(MatchPattern::new(r"\.js$")?),
    StageSpec::with_typed_options(
      StageKind::SplitChunks,
      &SplitChunksOptions {
        names: vec!["common".into(), "vendor".into()],
        min_chunks: Some(2),
      },
    )?,
  ];
  Ok(layer)
}

fn object(value: Value) -> Map<String, Value> {
  match value {
    Value::Object(map) => map,
    _ => Map::new(),
  }
}

/// The scss chain: sass, then postcss, then css modules.
pub fn compile_styles(root: &Path, minimize: bool) -> Result<StageSpec, ConfigurationError> {
  let postcss_config = root.join("webpack/postcss.config.js");
  let postcss_config = postcss_config
    .to_str()
    .ok_or_else(|| ConfigurationError::MalformedStageOption {
      stage_name: StageKind::CompileStyles.as_str().to_string(),
      index: 0,
      option: "loaders".to_string(),
      reason: format!("postcss config path {} is not valid UTF-8", postcss_config.display()),
    })?;
  let options = CompileStylesOptions {
    fallback: "style-loader".into(),
    loaders: vec![
      LoaderSpec {
        loader: "css-loader".into(),
        options: object(json!({
          "modules": true,
          "minimize": minimize,
          "source_map": true,
          "import_loaders": 2,
          "local_ident_name": "[name]__[local]",
        })),
      },
      LoaderSpec {
        loader: "postcss-loader".into(),
        options: object(json!({
          "config": { "path": postcss_config },
          "source_map": true,
        })),
      },
      LoaderSpec {
        loader: "sass-loader".into(),
        options: object(json!({
          "output_style": "expanded",
          "source_map": true,
          "source_map_contents": true,
        })),
      },
    ],
  };
  Ok(StageSpec::with_typed_options(StageKind::CompileStyles, &options)?.matching(MatchPattern::new(r"\.scss$")?))
}

pub fn html_page(root: &Path, page: &PageSpec, minify: Option<HtmlMinifyOptions>) -> Result<StageSpec, ConfigurationError> {
  let mut chunks: Vec<String> = SHARED_CHUNKS.iter().map(|c| (*c).to_string()).collect();
  chunks.push(page.name.clone());
  StageSpec::with_typed_options(
    StageKind::HtmlPage,
    &HtmlPageOptions {
      inject: true,
      template: root.join(&page.template),
      chunks,
      filename: page.filename.clone(),
      minify,
    },
  )
}

pub fn clean_output(root: &Path, dir: &str) -> Result<StageSpec, ConfigurationError> {
  StageSpec::with_typed_options(
    StageKind::CleanOutput,
    &CleanOutputOptions {
      paths: vec![dir.to_string()],
      root: root.to_path_buf(),
      exclude: vec![".gitignore".into()],
    },
  )
}

pub fn copy_assets(root: &Path) -> Result<StageSpec, ConfigurationError> {
  StageSpec::with_typed_options(
    StageKind::CopyAssets,
    &CopyAssetsOptions {
      from: root.join("src/app/assets"),
      ignore: vec!["js/".into(), "sass/".into()],
    },
  )
}

// Both targets define NODE_ENV as "production"; the development build keeps it
// so that libraries behave the same while developing.
pub fn define_env() -> Result<StageSpec, ConfigurationError> {
  let mut definitions = BTreeMap::new();
  definitions.insert("process.env.NODE_ENV".to_string(), "\"production\"".to_string());
  StageSpec::with_typed_options(StageKind::DefineEnv, &DefineEnvOptions { definitions })
}

/// File naming comes from the profile's stylesheet template.
pub fn extract_styles() -> StageSpec {
  StageSpec::new(StageKind::ExtractStyles)
}

pub fn minify_scripts(mangle_screw_ie8: bool, only: Option<&str>) -> Result<StageSpec, ConfigurationError> {
  let stage = StageSpec::with_typed_options(
    StageKind::MinifyScripts,
    &MinifyScriptsOptions {
      compress: CompressOptions {
        screw_ie8: true,
        warnings: false,
      },
      mangle: MangleOptions {
        screw_ie8: mangle_screw_ie8,
      },
      output: MinifyOutputOptions {
        comments: false,
        screw_ie8: true,
      },
      source_map: true,
    },
  )?;
  match only {
    Some(pattern) => Ok(stage.matching(MatchPattern::new(pattern)?)),
    None => Ok(stage),
  }
}

pub fn lint_styles() -> Result<StageSpec, ConfigurationError> {
  StageSpec::with_typed_options(
    StageKind::LintStyles,
    &LintStylesOptions {
      config_file: ".stylelintrc".into(),
      context: "src/sass".into(),
      files: "**/*.scss".into(),
      fail_on_error: true,
      quiet: false,
      syntax: "scss".into(),
    },
  )
}

pub fn loader_options(root: &Path) -> Result<StageSpec, ConfigurationError> {
  StageSpec::with_typed_options(
    StageKind::LoaderOptions,
    &SharedLoaderOptions {
      context: "/".into(),
      sass_include_paths: vec![root.join("src/app")],
    },
  )
}

pub fn bundle_analyzer() -> Result<StageSpec, ConfigurationError> {
  StageSpec::with_typed_options(
    StageKind::BundleAnalyzer,
    &BundleAnalyzerOptions {
      analyzer_mode: "server".into(),
      analyzer_host: "0.0.0.0".into(),
      analyzer_port: 3001,
      report_filename: "bundle-report.html".into(),
      default_sizes: "parsed".into(),
      open_analyzer: false,
      generate_stats_file: false,
      stats_filename: "bundle-stats.json".into(),
      log_level: "info".into(),
    },
  )
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn compile_styles_points_postcss_at_the_project() {
    let stage = compile_styles(Path::new("/project"), false).unwrap();
    let options: CompileStylesOptions = stage.typed_options().unwrap();
    assert_eq!(
      options.loaders[1].options["config"]["path"],
      json!("/project/webpack/postcss.config.js")
    );
  }

  #[cfg(unix)]
  #[test]
  fn non_utf8_root_is_a_configuration_error() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let root = Path::new(OsStr::from_bytes(b"/proj\xffect"));
    assert!(matches!(
      compile_styles(root, true),
      Err(ConfigurationError::MalformedStageOption { .. })
    ));
    assert!(base(root).is_ok());
  }
}
