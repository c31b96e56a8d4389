// stagehand/src/runtime/report.rs
use super::control::PipelineResult;
use crate::profile::BuildProfile;
use crate::server::OverlayOptions;
use std::fmt::Display;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
  Warning,
  Error,
}

impl Display for Severity {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Warning => write!(f, "warning"),
      Self::Error => write!(f, "error"),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageDiagnostic {
  pub stage_name: String,
  pub index: usize,
  pub severity: Severity,
  pub message: String,
}

impl Display for StageDiagnostic {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "[{}] {} (#{}): {}", self.severity, self.stage_name, self.index, self.message)
  }
}

/// What happens when a stage handler fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
  /// Abort the whole pipeline on the first failure.
  Bail,
  /// Record the failure as a diagnostic and move on to the next stage.
  Overlay,
}

impl FailurePolicy {
  pub fn for_profile(profile: &BuildProfile) -> Self {
    if profile.bail {
      Self::Bail
    } else {
      Self::Overlay
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
  pub result: PipelineResult,
  pub policy: FailurePolicy,
  /// Stages whose handlers all returned successfully, in execution order.
  pub executed: Vec<String>,
  /// Stages skipped because their match pattern matched none of the inputs.
  pub skipped: Vec<String>,
  pub diagnostics: Vec<StageDiagnostic>,
  pub emitted: Vec<PathBuf>,
  pub overlay: Option<OverlayOptions>,
}

impl BuildReport {
  pub fn has_errors(&self) -> bool {
    self.diagnostics.iter().any(|d| d.severity == Severity::Error)
  }

  /// Diagnostics the dev server overlay should display, honouring its
  /// warnings/errors switches. Empty when there is no dev server.
  pub fn overlay_messages(&self) -> Vec<&StageDiagnostic> {
    let Some(overlay) = self.overlay else {
      return Vec::new();
    };
    self
      .diagnostics
      .iter()
      .filter(|d| match d.severity {
        Severity::Warning => overlay.warnings,
        Severity::Error => overlay.errors,
      })
      .collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn report(overlay: Option<OverlayOptions>) -> BuildReport {
    BuildReport {
      result: PipelineResult::Completed,
      policy: FailurePolicy::Overlay,
      executed: Vec::new(),
      skipped: Vec::new(),
      diagnostics: vec![
        StageDiagnostic {
          stage_name: "lint-styles".into(),
          index: 3,
          severity: Severity::Warning,
          message: "unused selector".into(),
        },
        StageDiagnostic {
          stage_name: "copy-assets".into(),
          index: 4,
          severity: Severity::Error,
          message: "missing directory".into(),
        },
      ],
      emitted: Vec::new(),
      overlay,
    }
  }

  #[test]
  fn no_dev_server_means_no_overlay() {
    assert!(report(None).overlay_messages().is_empty());
    assert!(report(None).has_errors());
  }

  #[test]
  fn default_overlay_shows_errors_only() {
    let report = report(Some(OverlayOptions::default()));
    let shown = report.overlay_messages();
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].to_string(), "[error] copy-assets (#4): missing directory");
  }
}
