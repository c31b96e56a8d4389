// stagehand/src/runtime/execution.rs

//! Contains `StageRuntime::run()`, which executes a composed profile's stages.

use super::control::{PipelineControl, PipelineResult};
use super::definition::StageRuntime;
use super::handler::{StageHandler, StageInvocation};
use super::report::{BuildReport, FailurePolicy, Severity};
use super::state::BuildState;
use crate::error::{ConfigurationError, StagehandError, StagehandResult};
use crate::profile::{BuildProfile, StageKind};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{event, instrument, span, Instrument, Level};

impl StageRuntime {
  /// Executes `profile`'s stages in order.
  ///
  /// Every stage is checked for a handler first, so a missing handler fails
  /// the run before any handler has executed. After that, a failing handler
  /// either aborts the run (`bail`) or becomes an overlay diagnostic.
  #[instrument(
    name = "StageRuntime::run",
    skip_all,
    fields(target = %profile.target, num_stages = profile.stages.len()),
    err(Display)
  )]
  pub async fn run(&self, profile: Arc<BuildProfile>) -> StagehandResult<BuildReport> {
    let kinds = self.preflight(&profile)?;
    let policy = FailurePolicy::for_profile(&profile);
    let state = BuildState::new();
    event!(Level::DEBUG, ?policy, "Pipeline execution starting.");

    let mut result = PipelineResult::Completed;
    for (index, (stage, kind)) in profile.stages.iter().zip(kinds).enumerate() {
      if self.skips(stage) {
        event!(Level::INFO, stage_name = %stage.name, index, "Stage skipped; no input matches its pattern.");
        state.mark_skipped(&stage.name);
        continue;
      }

      let invocation = StageInvocation {
        index,
        kind,
        stage: stage.clone(),
        profile: Arc::clone(&profile),
        state: state.clone(),
      };
      let stage_span = span!(Level::INFO, "stage_execution", stage_name = %stage.name, index);
      match self.run_stage(&invocation).instrument(stage_span).await {
        Ok(PipelineControl::Continue) => state.mark_executed(&stage.name),
        Ok(PipelineControl::Stop) => {
          event!(Level::INFO, stage_name = %stage.name, index, "Pipeline stopped by a handler.");
          result = PipelineResult::Stopped;
          break;
        }
        Err(source) => match policy {
          FailurePolicy::Bail => {
            event!(Level::ERROR, stage_name = %stage.name, index, error = %source, "Stage failed; bailing.");
            return Err(StagehandError::StageExecution {
              stage_name: stage.name.clone(),
              index,
              source,
            });
          }
          FailurePolicy::Overlay => {
            event!(Level::WARN, stage_name = %stage.name, index, error = %source, "Stage failed; reported to overlay.");
            state.record(&stage.name, index, Severity::Error, format!("{source:#}"));
          }
        },
      }
    }

    let ledger = state.take();
    event!(
      Level::DEBUG,
      executed = ledger.executed.len(),
      diagnostics = ledger.diagnostics.len(),
      "Pipeline execution finished."
    );
    Ok(BuildReport {
      result,
      policy,
      executed: ledger.executed,
      skipped: ledger.skipped,
      diagnostics: ledger.diagnostics,
      emitted: ledger.emitted,
      overlay: profile.dev_server.as_ref().map(|server| server.overlay),
    })
  }

  /// Resolves every stage's kind and checks it has a handler.
  fn preflight(&self, profile: &BuildProfile) -> StagehandResult<Vec<StageKind>> {
    profile
      .stages
      .iter()
      .enumerate()
      .map(|(index, stage)| -> StagehandResult<StageKind> {
        let kind = stage.kind().ok_or_else(|| ConfigurationError::UnknownStage {
          stage_name: stage.name.clone(),
          index,
        })?;
        if !self.handles(kind) {
          event!(Level::ERROR, stage_name = %stage.name, index, "Stage has no handler.");
          return Err(StagehandError::HandlerMissing {
            stage_name: stage.name.clone(),
            index,
          });
        }
        Ok(kind)
      })
      .collect()
  }

  async fn run_stage(&self, invocation: &StageInvocation) -> anyhow::Result<PipelineControl> {
    for (phase, handlers) in self.phases(invocation.kind) {
      for (handler_index, handler_fn) in handlers.into_iter().enumerate() {
        let handler_span = span!(Level::DEBUG, "stage_handler", phase, handler_index);
        match handler_fn(invocation.clone()).instrument(handler_span).await? {
          PipelineControl::Continue => {}
          PipelineControl::Stop => return Ok(PipelineControl::Stop),
        }
      }
    }
    Ok(PipelineControl::Continue)
  }

  fn phases(&self, kind: StageKind) -> [(&'static str, Vec<&StageHandler>); 3] {
    let mut on = registered(&self.on, kind);
    if on.is_empty() {
      on.extend(self.fallback.as_ref());
    }
    [("before", registered(&self.before, kind)), ("on", on), ("after", registered(&self.after, kind))]
  }
}

fn registered(handlers: &HashMap<StageKind, Vec<StageHandler>>, kind: StageKind) -> Vec<&StageHandler> {
  handlers.get(&kind).map(|list| list.iter().collect()).unwrap_or_default()
}
