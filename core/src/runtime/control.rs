// stagehand/src/runtime/control.rs

//! Signals for controlling pipeline flow and the outcome of a pipeline run.

/// Signal from a handler indicating whether the pipeline should continue or stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineControl {
  /// Continue with the current stage's remaining handlers and the following stages.
  Continue,
  /// Halt the pipeline. No further handlers or stages run.
  Stop,
}

/// Outcome of a full pipeline execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineResult {
  /// Every stage was visited. Under the overlay policy some of them may have
  /// failed; see `BuildReport::diagnostics`.
  Completed,
  /// A handler returned `PipelineControl::Stop`.
  Stopped,
}
