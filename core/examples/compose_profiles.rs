// stagehand/examples/compose_profiles.rs

use stagehand::{BuildTarget, ProfileLayer, ProxyRule, ServerLayer, StagehandResult, TargetRegistry};
use std::path::Path;
use tracing::info;

fn main() -> StagehandResult<()> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Compose Profiles Example ---");

  // 1. Built-in development and production stacks for a project.
  let registry = TargetRegistry::with_defaults(Path::new("/srv/shop"))?;

  // 2. Proxy rules usually live outside the preset; add them as one more layer.
  registry.push_override(
    BuildTarget::Development,
    ProfileLayer::with_dev_server(ServerLayer::proxy_rules(vec![
      ProxyRule::new("/api/users", "http://localhost:9001"),
      ProxyRule::new("/api", "http://localhost:9000"),
    ])),
  )?;

  // 3. Compose both targets and look at what differs.
  for target in BuildTarget::ALL {
    let profile = registry.compose(target)?;
    info!(
      %target,
      output = %profile.output_path.display(),
      script = profile.file_names.script.as_str(),
      stages = profile.stages.len(),
      bail = profile.bail,
      "Composed."
    );
    if let Some(server) = &profile.dev_server {
      for path in ["/api/users/1", "/api/cart", "/about"] {
        let upstream = server.proxy_table().resolve(path).map(|rule| rule.target.as_str());
        info!(%path, upstream = upstream.unwrap_or("<local>"), "Proxy route.");
      }
    }
  }

  Ok(())
}
