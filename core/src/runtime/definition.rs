// stagehand/src/runtime/definition.rs

//! Contains the `StageRuntime` struct and its construction.

use super::control::PipelineControl;
use super::handler::{boxed, StageHandler, StageInvocation};
use crate::profile::options::HtmlPageOptions;
use crate::profile::{StageKind, StageSpec};
use std::collections::HashMap;
use tracing::{event, Level};

/// Executes the stages of a composed profile against registered handlers.
///
/// Handlers are keyed by `StageKind`, so one handler serves every stage of
/// that kind (a profile has several `html-page` stages, for instance).
#[derive(Default)]
pub struct StageRuntime {
  pub(crate) before: HashMap<StageKind, Vec<StageHandler>>,
  pub(crate) on: HashMap<StageKind, Vec<StageHandler>>,
  pub(crate) after: HashMap<StageKind, Vec<StageHandler>>,
  /// Runs as the `on` phase of any kind with no `on` handler of its own.
  pub(crate) fallback: Option<StageHandler>,
  /// Source paths the build knows about. Empty means "run every stage".
  pub(crate) inputs: Vec<String>,
}

impl std::fmt::Debug for StageRuntime {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("StageRuntime")
      .field("before", &self.before.keys().collect::<Vec<_>>())
      .field("on", &self.on.keys().collect::<Vec<_>>())
      .field("after", &self.after.keys().collect::<Vec<_>>())
      .field("fallback", &self.fallback.is_some())
      .field("inputs", &self.inputs)
      .finish()
  }
}

impl StageRuntime {
  pub fn new() -> Self {
    Self::default()
  }

  /// A runtime that does no work. Every stage "runs" through a fallback that
  /// records the files it would produce, which is enough to preview a build.
  pub fn dry_run() -> Self {
    let mut runtime = Self::new();
    runtime.fallback(|invocation: StageInvocation| async move {
      if invocation.kind == StageKind::HtmlPage {
        let page: HtmlPageOptions = invocation.options()?;
        invocation.emit(&page.filename);
      }
      event!(Level::DEBUG, stage = %invocation.stage.name, index = invocation.index, "Dry run visited stage.");
      Ok::<_, anyhow::Error>(PipelineControl::Continue)
    });
    runtime
  }

  /// Declares the source paths of this build. Stages with a match pattern
  /// that matches none of them are skipped.
  pub fn with_inputs<I, S>(mut self, inputs: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.inputs = inputs.into_iter().map(Into::into).collect();
    self
  }

  /// Whether a stage of `kind` would find a handler for its `on` phase.
  pub fn handles(&self, kind: StageKind) -> bool {
    self.on.get(&kind).is_some_and(|handlers| !handlers.is_empty()) || self.fallback.is_some()
  }

  /// Sets the handler used for kinds that have no `on` handler.
  pub fn fallback<F, UserErr>(&mut self, handler_fn: impl Fn(StageInvocation) -> F + Send + Sync + 'static)
  where
    F: std::future::Future<Output = Result<PipelineControl, UserErr>> + Send + 'static,
    UserErr: Into<anyhow::Error> + Send + Sync + 'static,
  {
    self.fallback = Some(boxed(handler_fn));
  }

  /// Whether `stage` is skipped because none of the declared inputs match it.
  pub fn skips(&self, stage: &StageSpec) -> bool {
    if self.inputs.is_empty() {
      return false;
    }
    !self.inputs.iter().any(|input| stage.applies_to(input))
  }
}
