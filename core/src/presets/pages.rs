// stagehand/src/presets/pages.rs
use std::path::PathBuf;

/// A page of the site: its chunk name, entry script, HTML template and output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSpec {
  pub name: String,
  pub entry: PathBuf,
  pub template: PathBuf,
  pub filename: String,
}

impl PageSpec {
  /// A page under `pages/`, e.g. `some-page-1` becomes `pages/some-page-1.html`.
  pub fn nested(name: &str) -> Self {
    Self {
      name: name.to_string(),
      entry: PathBuf::from(format!("src/app/js/pages/{name}.js")),
      template: PathBuf::from(format!("src/app/pages/{name}.html")),
      filename: format!("pages/{name}.html"),
    }
  }

  pub fn index() -> Self {
    Self {
      name: "index".to_string(),
      entry: PathBuf::from("src/app/js/index.js"),
      template: PathBuf::from("src/app/index.html"),
      filename: "index.html".to_string(),
    }
  }
}

/// The two named pages followed by the index.
pub fn default_pages() -> Vec<PageSpec> {
  vec![PageSpec::nested("some-page-1"), PageSpec::nested("some-page-2"), PageSpec::index()]
}
