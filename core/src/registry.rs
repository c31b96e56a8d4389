// stagehand/src/registry.rs

//! Defines `TargetRegistry`, a target-keyed registry of layer stacks.
//! Each registered target is a base layer plus ordered overrides, composed into
//! a `BuildProfile` on demand.

use crate::error::{ConfigurationError, StagehandResult};
use crate::merge::ConfigComposer;
use crate::presets;
use crate::profile::{BuildProfile, BuildTarget, ProfileLayer};
use crate::runtime::{BuildReport, StageExecutor};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{event, instrument, Level};

#[derive(Debug, Clone)]
struct LayerStack {
  base: ProfileLayer,
  overrides: Vec<ProfileLayer>,
}

/// The stagehand registry.
///
/// Registration takes `&self`, so a registry can be shared behind an `Arc`
/// between the code that loads configuration and the code that builds.
#[derive(Debug, Default)]
pub struct TargetRegistry {
  targets: RwLock<HashMap<BuildTarget, LayerStack>>,
}

impl TargetRegistry {
  /// Creates a new, empty registry.
  pub fn new() -> Self {
    Self::default()
  }

  /// A registry with the built-in development and production stacks for the
  /// project rooted at `root`.
  pub fn with_defaults(root: &Path) -> StagehandResult<Self> {
    let registry = Self::new();
    for target in BuildTarget::ALL {
      registry.register(target, presets::base(root)?, vec![presets::override_for(target, root)?]);
    }
    Ok(registry)
  }

  /// Registers (or replaces) the layer stack of `target`.
  pub fn register(&self, target: BuildTarget, base: ProfileLayer, overrides: Vec<ProfileLayer>) {
    event!(Level::DEBUG, %target, overrides = overrides.len(), "Registering target.");
    self.targets.write().insert(target, LayerStack { base, overrides });
  }

  /// Appends an override to an already registered target.
  pub fn push_override(&self, target: BuildTarget, layer: ProfileLayer) -> StagehandResult<()> {
    let mut targets = self.targets.write();
    let stack = targets.get_mut(&target).ok_or_else(|| unknown(target))?;
    stack.overrides.push(layer);
    event!(Level::DEBUG, %target, overrides = stack.overrides.len(), "Override appended.");
    Ok(())
  }

  pub fn is_registered(&self, target: BuildTarget) -> bool {
    self.targets.read().contains_key(&target)
  }

  /// Composes the profile registered for `target`.
  #[instrument(name = "TargetRegistry::compose", skip(self), err(Display))]
  pub fn compose(&self, target: BuildTarget) -> StagehandResult<BuildProfile> {
    // Clone out of the lock; composing does not need it.
    let stack = {
      let targets = self.targets.read();
      targets.get(&target).cloned().ok_or_else(|| {
        event!(Level::ERROR, "No layer stack registered for target.");
        unknown(target)
      })?
    };
    ConfigComposer::compose(target, stack.base, stack.overrides)
  }

  /// Composes `target` and hands the profile to `executor`.
  ///
  /// A configuration error stops here, before the executor sees anything.
  pub async fn build(&self, target: BuildTarget, executor: &dyn StageExecutor) -> StagehandResult<BuildReport> {
    let profile = Arc::new(self.compose(target)?);
    executor.execute(profile).await
  }
}

fn unknown(target: BuildTarget) -> ConfigurationError {
  ConfigurationError::UnknownTarget {
    name: target.to_string(),
  }
}
