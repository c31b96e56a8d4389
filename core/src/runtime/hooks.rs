// stagehand/src/runtime/hooks.rs

//! Methods for registering `before`, `on` and `after` handlers per stage kind.

use super::control::PipelineControl;
use super::definition::StageRuntime;
use super::handler::{boxed, StageInvocation};
use crate::profile::StageKind;
use std::future::Future;
use tracing::{event, Level};

impl StageRuntime {
  /// Registers a handler that runs before the `on` phase of every stage of `kind`.
  ///
  /// The handler's error type only has to convert into `anyhow::Error`.
  pub fn before<F, UserErr>(&mut self, kind: StageKind, handler_fn: impl Fn(StageInvocation) -> F + Send + Sync + 'static)
  where
    F: Future<Output = Result<PipelineControl, UserErr>> + Send + 'static,
    UserErr: Into<anyhow::Error> + Send + Sync + 'static,
  {
    self.before.entry(kind).or_default().push(boxed(handler_fn));
    event!(Level::TRACE, %kind, "'before' handler registered.");
  }

  /// Registers the main handler for stages of `kind`. Several may be
  /// registered; they run in registration order.
  pub fn on<F, UserErr>(&mut self, kind: StageKind, handler_fn: impl Fn(StageInvocation) -> F + Send + Sync + 'static)
  where
    F: Future<Output = Result<PipelineControl, UserErr>> + Send + 'static,
    UserErr: Into<anyhow::Error> + Send + Sync + 'static,
  {
    self.on.entry(kind).or_default().push(boxed(handler_fn));
    event!(Level::TRACE, %kind, "'on' handler registered.");
  }

  pub fn after<F, UserErr>(&mut self, kind: StageKind, handler_fn: impl Fn(StageInvocation) -> F + Send + Sync + 'static)
  where
    F: Future<Output = Result<PipelineControl, UserErr>> + Send + 'static,
    UserErr: Into<anyhow::Error> + Send + Sync + 'static,
  {
    self.after.entry(kind).or_default().push(boxed(handler_fn));
    event!(Level::TRACE, %kind, "'after' handler registered.");
  }
}
