// stagehand/src/presets/mod.rs

//! Built-in layers for the two targets. Each target is the shared `base` layer
//! with its own override merged on top.

pub mod common;
pub mod development;
pub mod pages;
pub mod production;

pub use common::{base, SHARED_CHUNKS};
pub use development::development;
pub use pages::{default_pages, PageSpec};
pub use production::production;

use crate::error::ConfigurationError;
use crate::profile::{BuildTarget, ProfileLayer};
use std::path::Path;

/// The built-in override layer for `target`.
pub fn override_for(target: BuildTarget, root: &Path) -> Result<ProfileLayer, ConfigurationError> {
  match target {
    BuildTarget::Development => development(root),
    BuildTarget::Production => production(root),
  }
}
