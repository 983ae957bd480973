use adc_core::bundle::Configuration;
use adc_core::error::AdcError;
use adc_core::plugin::{NoDefaults, PluginRecord};
use adc_core::resource::{self, Resource, ResourceKind};
use adc_core::route::Route;
use adc_core::service::Service;
use adc_core::string_or_list::StringOrList;
use adc_core::upstream::Node;
use serde_json::json;

// =============================================================================
// Helper Functions
// =============================================================================

fn schema_defaults(name: &str, mut supplied: PluginRecord) -> PluginRecord {
    match name {
        "limit-count" => {
            supplied.entry("policy").or_insert(json!("local"));
            supplied.entry("rejected_code").or_insert(json!(503));
        }
        "key-auth" => {
            supplied.entry("header").or_insert(json!("apikey"));
        }
        _ => {}
    }
    supplied
}

const BUNDLE_YAML: &str = r#"
name: demo
version: 1.0.0
services:
  - id: svc1
    name: httpbin
    upstream:
      type: roundrobin
      nodes:
        "httpbin.org:80": 1
        "10.0.0.2": 2
routes:
  - id: r1
    name: get-anything
    uri: /anything/*
    service_id: svc1
    methods: [GET]
    vars:
      - ["arg_env", "==", "prod"]
      - ["http_x_region", "in", ["eu", "us"]]
    plugins:
      limit-count:
        count: 10
        time_window: 60
        rejected_code: 429
consumers:
  - username: jack
    plugins:
      key-auth:
        key: secret
global_rules:
  - id: g1
    plugins:
      limit-count:
        count: 1000
        time_window: 1
plugin_configs:
  - id: pc1
    plugins:
      key-auth: {}
consumer_groups:
  - id: cg1
    plugins:
      limit-count:
        count: 5
        time_window: 60
ssls:
  - id: ssl1
    snis: [example.com]
    cert: CERT
    key: KEY
plugin_metadatas:
  - id: http-logger
    log_format:
      host: "$host"
"#;

// =============================================================================
// Bundle decode
// =============================================================================

#[test]
fn test_yaml_bundle_decodes_every_kind() {
    let cfg = Configuration::from_yaml(BUNDLE_YAML, &schema_defaults).unwrap();
    assert_eq!(cfg.name, "demo");
    for kind in ResourceKind::all() {
        assert_eq!(cfg.count(*kind), 1, "kind {kind}");
    }
    assert!(!cfg.is_empty());
}

#[test]
fn test_bundle_applies_defaults_everywhere() {
    let cfg = Configuration::from_yaml(BUNDLE_YAML, &schema_defaults).unwrap();

    let lc = cfg.routes[0].plugins.get("limit-count").unwrap();
    assert_eq!(lc["policy"], "local");
    assert_eq!(lc["rejected_code"], 429, "supplied value must win");

    assert_eq!(cfg.consumers[0].plugins.get("key-auth").unwrap()["header"], "apikey");
    assert_eq!(cfg.global_rules[0].plugins.get("limit-count").unwrap()["rejected_code"], 503);
    assert_eq!(cfg.plugin_configs[0].plugins.get("key-auth").unwrap()["header"], "apikey");
    assert_eq!(cfg.consumer_groups[0].plugins.get("limit-count").unwrap()["policy"], "local");
}

#[test]
fn test_bundle_normalises_nested_codecs() {
    let cfg = Configuration::from_yaml(BUNDLE_YAML, &NoDefaults).unwrap();

    let nodes = &cfg.services[0].upstream.as_ref().unwrap().nodes;
    assert_eq!(nodes[0], Node::new("10.0.0.2", 80, 2));
    assert_eq!(nodes[1], Node::new("httpbin.org", 80, 1));

    let route: &Route = &cfg.routes[0];
    assert_eq!(route.vars[1][2], StringOrList::List(vec!["eu".into(), "us".into()]));

    let md = &cfg.plugin_metadatas[0];
    assert_eq!(md.id, "http-logger");
    assert!(!md.config.contains_key("id"));
    assert_eq!(md.config["log_format"]["host"], "$host");
}

#[test]
fn test_bundle_json_round_trip() {
    let cfg = Configuration::from_yaml(BUNDLE_YAML, &schema_defaults).unwrap();
    let json = cfg.to_json().unwrap();
    let back = Configuration::from_json(&json, &schema_defaults).unwrap();
    assert_eq!(back, cfg);

    let value: serde_json::Value = serde_json::from_slice(&json).unwrap();
    assert_eq!(value["plugin_metadatas"][0]["id"], "http-logger");
    assert!(value["services"][0]["upstream"]["nodes"].is_array());
}

#[test]
fn test_bundle_yaml_round_trip() {
    let cfg = Configuration::from_yaml(BUNDLE_YAML, &NoDefaults).unwrap();
    let yaml = cfg.to_yaml().unwrap();
    let back = Configuration::from_yaml(&yaml, &NoDefaults).unwrap();
    assert_eq!(back, cfg);
}

#[test]
fn test_defaults_are_idempotent() {
    let cfg = Configuration::from_yaml(BUNDLE_YAML, &schema_defaults).unwrap();
    let mut again = cfg.clone();
    again.apply_defaults(&schema_defaults);
    assert_eq!(again, cfg);
}

// =============================================================================
// Bundle errors
// =============================================================================

#[test]
fn test_bad_node_key_aborts_whole_bundle() {
    let yaml = r#"
name: broken
version: "1"
routes:
  - id: r1
    uri: /
services:
  - id: s1
    upstream:
      nodes:
        "a:b:c": 1
"#;
    let err = Configuration::from_yaml(yaml, &NoDefaults).unwrap_err();
    assert!(matches!(err, AdcError::Yaml(_)));
    assert!(err.to_string().contains("a:b:c"));
}

#[test]
fn test_non_string_metadata_id_aborts_bundle() {
    let json = br#"{"name":"n","version":"v","plugin_metadatas":[{"id":7}]}"#;
    let err = Configuration::from_json(json, &NoDefaults).unwrap_err();
    assert!(err.to_string().contains("Invalid identifier"));
}

#[test]
fn test_scalar_where_list_expected_in_vars() {
    let json = br#"{"id":"r1","vars":[["arg_a","==",1]]}"#;
    assert!(resource::decode::<Route>(json, &NoDefaults).is_err());
}

// =============================================================================
// Per-kind resource boundary
// =============================================================================

#[test]
fn test_admin_api_service_with_empty_node_object() {
    let body = br#"{"id":"s1","name":"empty","upstream":{"type":"roundrobin","nodes":{}}}"#;
    let svc: Service = resource::decode(body, &NoDefaults).unwrap();
    assert_eq!(svc.id(), "s1");
    assert!(svc.upstream.as_ref().unwrap().nodes.is_empty());

    let out: serde_json::Value = serde_json::from_slice(&resource::encode(&svc).unwrap()).unwrap();
    assert_eq!(out["upstream"]["nodes"], json!([]));
}

#[test]
fn test_concurrent_bundle_decodes() {
    let handles: Vec<_> = (0..4)
        .map(|_| std::thread::spawn(|| Configuration::from_yaml(BUNDLE_YAML, &schema_defaults)))
        .collect();
    let decoded: Vec<Configuration> = handles
        .into_iter()
        .map(|h| h.join().unwrap().unwrap())
        .collect();
    assert!(decoded.windows(2).all(|w| w[0] == w[1]));
}
