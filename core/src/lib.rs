// stagehand/src/lib.rs

//! Stagehand: declarative build-pipeline profiles for front-end bundlers.
//!
//! Stagehand describes *what* a bundler should do for a given target, not how
//! to bundle. It provides:
//!  - Layered profiles: a shared base plus per-target overrides, merged by an
//!    associative Configuration Merger.
//!  - Validation up front: unknown stages, malformed proxy rules or bad file
//!    name templates fail composition before any stage runs.
//!  - An ordered stage list (transpile, split chunks, html pages, minify, ...)
//!    with free-form options and typed views over them.
//!  - A dev server descriptor: address, proxy table, history fallback, overlay.
//!  - A stage runtime seam with before/on/after handlers and bail vs overlay
//!    failure policies.
//!  - Built-in development and production presets and a target registry.

pub mod error;
pub mod load;
pub mod merge;
pub mod presets;
pub mod profile;
pub mod registry;
pub mod runtime;
pub mod server;
pub mod validate;

// --- Re-exports for the Public API ---

pub use crate::error::{ConfigurationError, StagehandError, StagehandResult};
pub use crate::load::{proxy_rules_layer, LayerFormat};
pub use crate::merge::{ConfigComposer, Merge};
pub use crate::profile::{
  BuildProfile, BuildTarget, FileNameTemplate, MatchPattern, OutputFileNames, ProfileLayer, ServerLayer,
  SourceMapMode, StageKind, StageSpec,
};
pub use crate::registry::TargetRegistry;
pub use crate::runtime::{
  BuildReport, FailurePolicy, PipelineControl, PipelineResult, Severity, StageDiagnostic, StageExecutor,
  StageInvocation, StageRuntime,
};
pub use crate::server::{HistoryApiFallback, OverlayOptions, ProxyRule, ProxyTable, ServerOptions};
