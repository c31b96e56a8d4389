// tests/dev_server_tests.rs
mod common;

use common::*;
use serial_test::serial;
use stagehand::{
  proxy_rules_layer, BuildTarget, ConfigurationError, ProfileLayer, ProxyRule, ServerLayer, StagehandError,
};

const HTML: &str = "text/html,application/xhtml+xml,*/*;q=0.8";

fn with_rules(rules: Vec<ProxyRule>) -> ProfileLayer {
  ProfileLayer::with_dev_server(ServerLayer::proxy_rules(rules))
}

#[test]
#[serial]
fn test_first_matching_proxy_rule_wins() {
  setup_tracing();
  let profile = compose_preset(
    BuildTarget::Development,
    vec![with_rules(vec![
      ProxyRule::new("/api/users", "http://upstream-a:8080"),
      ProxyRule::new("/api", "http://upstream-b:8080"),
      ProxyRule::new("/", "http://upstream-b:8080"),
    ])],
  )
  .unwrap();
  let server = profile.dev_server.as_ref().unwrap();
  let table = server.proxy_table();
  assert_eq!(table.len(), 3);

  assert_eq!(table.resolve("/api/users/7").unwrap().target, "http://upstream-a:8080");
  assert_eq!(table.resolve("/api/orders").unwrap().target, "http://upstream-b:8080");
  assert_eq!(table.resolve("/other").unwrap().target, "http://upstream-b:8080");
}

#[test]
#[serial]
fn test_proxy_rules_from_separate_layers_keep_declaration_order() {
  setup_tracing();
  let profile = compose_preset(
    BuildTarget::Development,
    vec![
      with_rules(vec![ProxyRule::new("/api", "http://first:1")]),
      with_rules(vec![ProxyRule::new("/api/users", "http://second:2")]),
    ],
  )
  .unwrap();
  let table = profile.dev_server.as_ref().unwrap().proxy_table();
  // The earlier, broader rule shadows the later one.
  assert_eq!(table.resolve("/api/users").unwrap().target, "http://first:1");
  assert!(table.resolve("/static/app.js").is_none());
}

#[test]
#[serial]
fn test_malformed_proxy_rule_fails_composition() {
  setup_tracing();
  for rule in [
    ProxyRule::new("api", "http://upstream:1"),
    ProxyRule::new("/api", "upstream:1"),
    ProxyRule::new("/api", "ftp://upstream"),
  ] {
    let err = compose_preset(BuildTarget::Development, vec![with_rules(vec![rule])]).unwrap_err();
    assert!(matches!(
      err,
      StagehandError::Configuration(ConfigurationError::MalformedProxyRule { .. })
    ));
  }
}

#[test]
#[serial]
fn test_proxy_rules_load_from_file() {
  setup_tracing();
  let path = std::env::temp_dir().join(format!("stagehand-proxy-{}.toml", std::process::id()));
  std::fs::write(
    &path,
    r#"
      [[proxy_rules]]
      path_prefix = "/api"
      target = "http://localhost:9000"

      [[proxy_rules]]
      path_prefix = "/auth"
      target = "https://auth.example.com"
    "#,
  )
  .unwrap();
  let layer = proxy_rules_layer(&path);
  std::fs::remove_file(&path).ok();

  let profile = compose_preset(BuildTarget::Development, vec![layer.unwrap()]).unwrap();
  let table = profile.dev_server.as_ref().unwrap().proxy_table();
  assert_eq!(table.resolve("/auth/login").unwrap().target, "https://auth.example.com");
}

#[test]
#[serial]
fn test_history_fallback_of_development_preset() {
  setup_tracing();
  let profile = compose_preset(BuildTarget::Development, vec![]).unwrap();
  let fallback = profile.dev_server.unwrap().history_api_fallback.unwrap();

  assert!(fallback.disable_dot_rule);
  assert_eq!(fallback.rewrite("GET", "/some/route", HTML), Some("/index.html"));
  // Dot rule disabled: dotted paths are rewritten too.
  assert_eq!(fallback.rewrite("GET", "/users/jane.doe", HTML), Some("/index.html"));
  assert_eq!(fallback.rewrite("POST", "/some/route", HTML), None);
  assert_eq!(fallback.rewrite("GET", "/some/route", "application/json"), None);
}

#[test]
#[serial]
fn test_dev_server_address_override() {
  setup_tracing();
  let profile = compose_preset(
    BuildTarget::Development,
    vec![ProfileLayer::with_dev_server(ServerLayer::address(Some("0.0.0.0".into()), Some(8081)))],
  )
  .unwrap();
  let server = profile.dev_server.unwrap();
  assert_eq!(server.address(), "0.0.0.0:8081");
  // Untouched fields keep the preset values.
  assert!(server.hot_reload);
  assert!(server.watch_exclusions.contains("node_modules"));
}

#[test]
#[serial]
fn test_dev_server_layer_on_production_creates_a_server() {
  setup_tracing();
  let profile = compose_preset(
    BuildTarget::Production,
    vec![ProfileLayer::with_dev_server(ServerLayer::address(None, None))],
  )
  .unwrap();
  let server = profile.dev_server.unwrap();
  assert_eq!(server.address(), "localhost:3000");
  assert!(!server.hot_reload);
  assert!(server.history_api_fallback.is_none());
}
