// stagehand/src/profile/mod.rs

//! Profile data model: targets, layers, stages and the composed `BuildProfile`.

pub mod build_profile;
pub mod file_name;
pub mod layer;
pub mod options;
pub mod source_map;
pub mod stage;
pub mod target;

pub use build_profile::{BuildProfile, OutputFileNames};
pub use file_name::{FileNameTemplate, RenderInput};
pub use layer::{OutputNamesLayer, ProfileLayer, ServerLayer};
pub use source_map::SourceMapMode;
pub use stage::{MatchPattern, StageKind, StageOptions, StageSpec};
pub use target::BuildTarget;

use indexmap::IndexMap;
use options::SplitChunksOptions;
use std::path::PathBuf;

/// Entry names followed by the names of every `split-chunks` stage, without duplicates.
pub(crate) fn known_chunks(entries: &IndexMap<String, PathBuf>, stages: &[StageSpec]) -> Vec<String> {
  let mut chunks: Vec<String> = entries.keys().cloned().collect();
  let shared = stages
    .iter()
    .filter(|stage| stage.kind() == Some(StageKind::SplitChunks))
    .filter_map(|stage| stage.typed_options::<SplitChunksOptions>().ok())
    .flat_map(|opts| opts.names);
  for name in shared {
    if !chunks.contains(&name) {
      chunks.push(name);
    }
  }
  chunks
}
