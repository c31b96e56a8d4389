// stagehand/src/runtime/executor.rs

//! Defines the `StageExecutor` trait, the object-safe seam between the target
//! registry and whatever actually runs the stages.

use super::definition::StageRuntime;
use super::report::BuildReport;
use crate::error::StagehandResult;
use crate::profile::BuildProfile;
use async_trait::async_trait;
use std::sync::Arc;

/// Runs a composed profile.
///
/// `TargetRegistry::build` takes a `&dyn StageExecutor`, so callers can plug in
/// `StageRuntime` or their own executor without the registry knowing which.
#[async_trait]
pub trait StageExecutor: Send + Sync {
  async fn execute(&self, profile: Arc<BuildProfile>) -> StagehandResult<BuildReport>;
}

#[async_trait]
impl StageExecutor for StageRuntime {
  async fn execute(&self, profile: Arc<BuildProfile>) -> StagehandResult<BuildReport> {
    self.run(profile).await
  }
}
