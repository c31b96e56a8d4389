// stagehand/src/runtime/state.rs
use super::report::{Severity, StageDiagnostic};
use parking_lot::{RwLock, RwLockReadGuard};
use std::path::PathBuf;
use std::sync::Arc;

/// What handlers have recorded so far during one run.
#[derive(Debug, Default)]
pub struct BuildLedger {
  pub executed: Vec<String>,
  pub skipped: Vec<String>,
  pub diagnostics: Vec<StageDiagnostic>,
  pub emitted: Vec<PathBuf>,
}

/// Shared, lock-protected build state handed to every handler of a run.
///
/// Guards returned here are blocking and MUST NOT be held across `.await`.
#[derive(Debug, Clone, Default)]
pub struct BuildState(Arc<RwLock<BuildLedger>>);

impl BuildState {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn read(&self) -> RwLockReadGuard<'_, BuildLedger> {
    self.0.read()
  }

  pub fn record(&self, stage_name: &str, index: usize, severity: Severity, message: impl Into<String>) {
    self.0.write().diagnostics.push(StageDiagnostic {
      stage_name: stage_name.to_string(),
      index,
      severity,
      message: message.into(),
    });
  }

  pub fn emit(&self, path: impl Into<PathBuf>) {
    self.0.write().emitted.push(path.into());
  }

  pub(crate) fn mark_executed(&self, stage_name: &str) {
    self.0.write().executed.push(stage_name.to_string());
  }

  pub(crate) fn mark_skipped(&self, stage_name: &str) {
    self.0.write().skipped.push(stage_name.to_string());
  }

  /// Takes the ledger out, leaving an empty one behind.
  pub(crate) fn take(&self) -> BuildLedger {
    std::mem::take(&mut *self.0.write())
  }
}
