// stagehand_cli/src/config.rs

use crate::args::{ProjectArgs, ServerArgs};
use crate::errors::Result;
use stagehand::{proxy_rules_layer, BuildTarget, ProfileLayer, ServerLayer, StagehandError, TargetRegistry};
use std::path::PathBuf;

/// Everything the command line adds on top of the built-in presets.
#[derive(Debug, Clone)]
pub struct ProjectConfig {
  pub root: PathBuf,
  /// `--layer` files, in order. Applied to whichever target is built.
  pub layers: Vec<ProfileLayer>,
  /// Proxy rules and host/port. Applied to the development target only.
  pub dev_server: Vec<ProfileLayer>,
}

impl ProjectConfig {
  pub fn from_args(project: &ProjectArgs, server: &ServerArgs) -> Result<Self> {
    let root = if project.root.is_absolute() {
      project.root.clone()
    } else {
      std::env::current_dir()
        .map_err(|source| StagehandError::LayerIo {
          path: project.root.clone(),
          source,
        })?
        .join(&project.root)
    };

    let layers = project
      .layers
      .iter()
      .map(|path| ProfileLayer::from_file(path))
      .collect::<Result<Vec<_>, _>>()?;

    let mut dev_server = Vec::new();
    if let Some(path) = &project.proxy_rules {
      dev_server.push(proxy_rules_layer(path)?);
    }
    if server.host.is_some() || server.port.is_some() {
      dev_server.push(ProfileLayer::with_dev_server(ServerLayer::address(server.host.clone(), server.port)));
    }

    tracing::debug!(root = %root.display(), layers = layers.len(), server_layers = dev_server.len(), "CLI configuration loaded.");
    Ok(Self {
      root,
      layers,
      dev_server,
    })
  }

  /// The default registry with this invocation's layers pushed onto `target`.
  pub fn registry_for(&self, target: BuildTarget) -> Result<TargetRegistry> {
    let registry = TargetRegistry::with_defaults(&self.root)?;
    if target == BuildTarget::Development {
      for layer in &self.dev_server {
        registry.push_override(target, layer.clone())?;
      }
    }
    for layer in &self.layers {
      registry.push_override(target, layer.clone())?;
    }
    Ok(registry)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn config(host: Option<&str>, port: Option<u16>) -> ProjectConfig {
    ProjectConfig::from_args(
      &ProjectArgs {
        root: PathBuf::from("/srv/site"),
        layers: Vec::new(),
        proxy_rules: None,
      },
      &ServerArgs {
        host: host.map(str::to_string),
        port,
      },
    )
    .unwrap()
  }

  #[test]
  fn host_and_port_override_the_development_preset() {
    let profile = config(None, Some(4000))
      .registry_for(BuildTarget::Development)
      .unwrap()
      .compose(BuildTarget::Development)
      .unwrap();
    assert_eq!(profile.dev_server.unwrap().address(), "localhost:4000");
  }

  #[test]
  fn server_flags_do_not_give_production_a_dev_server() {
    let profile = config(Some("0.0.0.0"), Some(4000))
      .registry_for(BuildTarget::Production)
      .unwrap()
      .compose(BuildTarget::Production)
      .unwrap();
    assert!(profile.dev_server.is_none());
    assert_eq!(profile.output_path, PathBuf::from("/srv/site/dist"));
  }

  #[test]
  fn port_zero_is_rejected_at_composition() {
    let err = config(None, Some(0))
      .registry_for(BuildTarget::Development)
      .unwrap()
      .compose(BuildTarget::Development)
      .unwrap_err();
    assert!(err.as_configuration().is_some());
  }
}
