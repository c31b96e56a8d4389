// tests/common/mod.rs
#![allow(dead_code)] // Not every test binary uses every helper.

use stagehand::{
  presets, BuildProfile, BuildTarget, ConfigComposer, PipelineControl, ProfileLayer, StageInvocation, StageKind,
  StageRuntime,
};
use std::path::{Path, PathBuf};
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};
use tracing::Level;

pub const PROJECT_ROOT: &str = "/project";

pub fn project_root() -> PathBuf {
  PathBuf::from(PROJECT_ROOT)
}

/// Base plus the built-in override for `target`, plus any `extra` layers.
pub fn compose_preset(target: BuildTarget, extra: Vec<ProfileLayer>) -> stagehand::StagehandResult<BuildProfile> {
  let root = project_root();
  let mut overrides = vec![presets::override_for(target, &root)?];
  overrides.extend(extra);
  ConfigComposer::compose(target, presets::base(&root)?, overrides)
}

/// A bare layer with just enough to finalize.
pub fn minimal_layer(output: &str) -> ProfileLayer {
  ProfileLayer {
    context: Some(project_root()),
    output_path: Some(output.into()),
    ..ProfileLayer::default()
  }
}

// --- Common Error Type for Tests ---
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum TestError {
  #[error("Test handler failed: {0}")]
  Handler(String),
}

// --- Handlers ---

/// A fallback that records every stage it visits (in `visited`) and emits one
/// file per stage.
pub fn recording_runtime(visited: Arc<parking_lot::Mutex<Vec<String>>>) -> StageRuntime {
  let mut runtime = StageRuntime::new();
  runtime.fallback(move |invocation: StageInvocation| {
    let visited = visited.clone();
    async move {
      visited.lock().push(invocation.stage.name.clone());
      invocation.emit(format!("{}-{}.out", invocation.index, invocation.stage.name));
      Ok::<_, TestError>(PipelineControl::Continue)
    }
  });
  runtime
}

/// Registers an `on` handler for `kind` that always fails.
pub fn fail_on(runtime: &mut StageRuntime, kind: StageKind, message: &'static str) {
  runtime.on(kind, move |_invocation: StageInvocation| async move {
    Err::<PipelineControl, _>(TestError::Handler(message.to_string()))
  });
}

pub fn relative(path: &Path) -> String {
  path.strip_prefix(PROJECT_ROOT).unwrap_or(path).display().to_string()
}

// --- Helper for Tracing Setup ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Atomic counters for checking execution counts ---
pub static HANDLER_EXEC_COUNTER: Lazy<Arc<AtomicUsize>> = Lazy::new(|| Arc::new(AtomicUsize::new(0)));

pub fn reset_counters() {
  HANDLER_EXEC_COUNTER.store(0, Ordering::SeqCst);
}
