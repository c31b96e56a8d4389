// stagehand/examples/overlay_build.rs

use stagehand::profile::options::HtmlPageOptions;
use stagehand::{BuildTarget, PipelineControl, StageInvocation, StageKind, StageRuntime, TargetRegistry};
use std::path::Path;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Overlay vs Bail Example ---");

  let registry = TargetRegistry::with_defaults(Path::new("/srv/shop"))?;

  // A toy runtime: html pages are "rendered", style linting always fails,
  // everything else is a no-op.
  let mut runtime = StageRuntime::new();
  runtime.on(StageKind::HtmlPage, |inv: StageInvocation| async move {
    let page: HtmlPageOptions = inv.options()?;
    inv.emit(&page.filename);
    Ok::<_, anyhow::Error>(PipelineControl::Continue)
  });
  runtime.on(StageKind::LintStyles, |_inv: StageInvocation| async move {
    Err::<PipelineControl, _>(anyhow::anyhow!("src/sass/main.scss:12 unexpected empty block"))
  });
  runtime.fallback(|_inv: StageInvocation| async move { Ok::<_, anyhow::Error>(PipelineControl::Continue) });

  // Development keeps going and reports to the overlay.
  let report = registry.build(BuildTarget::Development, &runtime).await?;
  info!(executed = report.executed.len(), emitted = report.emitted.len(), "Development build finished.");
  for message in report.overlay_messages() {
    warn!("overlay: {message}");
  }

  // Production bails on the same failure.
  match registry.build(BuildTarget::Production, &runtime).await {
    Ok(_) => info!("Production build finished."),
    Err(e) => warn!("Production build aborted: {e}"),
  }

  Ok(())
}
