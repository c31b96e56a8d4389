// stagehand/src/runtime/handler.rs

//! The handler type external runtimes register, and the invocation each
//! handler receives.

use super::control::PipelineControl;
use super::report::Severity;
use super::state::BuildState;
use crate::profile::{BuildProfile, StageKind, StageSpec};
use anyhow::Context;
use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::sync::Arc;

/// A stage handler.
///
/// Handlers take ownership of a `StageInvocation` (cheap: the profile and the
/// build state are both `Arc`s) and resolve to `PipelineControl`. Any lock
/// taken on the build state must be released before the handler awaits.
pub type StageHandler = Box<
  dyn Fn(StageInvocation) -> Pin<Box<dyn Future<Output = anyhow::Result<PipelineControl>> + Send>> + Send + Sync,
>;

/// One stage of one run, as seen by its handlers.
#[derive(Debug, Clone)]
pub struct StageInvocation {
  /// Position of the stage in the profile's stage list.
  pub index: usize,
  pub kind: StageKind,
  pub stage: StageSpec,
  pub profile: Arc<BuildProfile>,
  pub state: BuildState,
}

impl StageInvocation {
  /// Deserializes the stage's options into `O`.
  pub fn options<O: serde::de::DeserializeOwned>(&self) -> anyhow::Result<O> {
    self
      .stage
      .typed_options()
      .with_context(|| format!("options of stage '{}' at position {}", self.stage.name, self.index))
  }

  pub fn warn(&self, message: impl Into<String>) {
    self.state.record(&self.stage.name, self.index, Severity::Warning, message);
  }

  /// Records `path`, relative to the profile's output directory, as written.
  pub fn emit(&self, path: impl AsRef<Path>) {
    self.state.emit(self.profile.output_path.join(path));
  }
}

pub(crate) fn boxed<F, UserErr>(handler_fn: impl Fn(StageInvocation) -> F + Send + Sync + 'static) -> StageHandler
where
  F: Future<Output = Result<PipelineControl, UserErr>> + Send + 'static,
  UserErr: Into<anyhow::Error> + Send + Sync + 'static,
{
  Box::new(move |invocation| {
    let user_fut = handler_fn(invocation);
    Box::pin(async move { user_fut.await.map_err(Into::into) })
  })
}
