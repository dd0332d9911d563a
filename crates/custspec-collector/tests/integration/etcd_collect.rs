//! End-to-end collection against a mock etcd v2 server.

use std::sync::Arc;

use custspec_collector::{Pipeline, SpecCollector, SpecSerializer};
use custspec_core::{AbsencePolicy, CollectorConfig, CustomerSpec, Environment, Error, ReleaseChannel};
use custspec_etcd::{DEFAULT_TIMEOUT, EtcdAuth, EtcdStore};
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::PASSWORD_KEY;

async fn mount(server: &MockServer, key: &str, status: u16, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/etcd/v2/keys/{}", key.trim_start_matches('/'))))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

fn listing(key: &str, children: &[&str]) -> Value {
    let nodes: Vec<Value> = children
        .iter()
        .map(|c| json!({"key": format!("{key}/{c}"), "dir": true}))
        .collect();
    json!({"action": "get", "node": {"key": key, "dir": true, "nodes": nodes}})
}

fn acme_stable() -> Value {
    json!({
        "action": "get",
        "node": {
            "key": "/acme/stable",
            "dir": true,
            "nodes": [
                {"key": "/acme/stable/ecpr_a", "value": "a"},
                {"key": "/acme/stable/ecpr_b", "value": "b"},
                {"key": "/acme/stable/ecpr_c", "value": "c"},
                {"key": "/acme/stable/ecpr_d", "value": "d"},
                {"key": "/acme/stable/ecpr_e", "value": "e"},
                {"key": format!("/acme/stable/{PASSWORD_KEY}"), "value": "  secret123\n"},
                {"key": "/acme/stable/db_host", "value": "db"},
                {"key": "/acme/stable/ecpr_nested", "dir": true}
            ]
        }
    })
}

fn collector(server: &MockServer, name: &str, config: CollectorConfig) -> SpecCollector {
    let store = EtcdStore::new(
        Environment::new(name, format!("{}/etcd", server.uri())),
        EtcdAuth::new("envoy", "pw"),
        DEFAULT_TIMEOUT,
    )
    .unwrap();
    SpecCollector::new(Arc::new(store), config).unwrap()
}

#[tokio::test]
async fn test_acme_stable_example() {
    let server = MockServer::start().await;
    mount(&server, "customer", 200, listing("/customer", &["acme"])).await;
    mount(&server, "acme", 200, listing("/acme", &["stable"])).await;
    mount(&server, "acme/stable", 200, acme_stable()).await;

    let records = collector(&server, "production", CollectorConfig::default())
        .collect()
        .await
        .unwrap();

    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.customer_code(), "acme");
    assert_eq!(record.release_channel(), ReleaseChannel::Stable);
    assert_eq!(record.release_channel_code(), 'p');
    assert_eq!(
        record.config_endpoint(),
        "https://envoy.envoymobile.net/config/acmep/ecpr.json"
    );
    assert_eq!(record.config_credentials().username(), "ecpr");
    assert_eq!(record.config_credentials().password(), "secret123");
}

#[tokio::test]
async fn test_customer_without_channels_is_skipped() {
    let server = MockServer::start().await;
    mount(&server, "customer", 200, listing("/customer", &["acme", "ghost"])).await;
    mount(&server, "acme", 200, listing("/acme", &["stable"])).await;
    mount(&server, "acme/stable", 200, acme_stable()).await;
    mount(
        &server,
        "ghost",
        404,
        json!({"errorCode": 100, "message": "Key not found"}),
    )
    .await;

    let (records, report) = collector(&server, "production", CollectorConfig::default())
        .collect_with_report()
        .await
        .unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(report.customers, 2);
    assert_eq!(report.absent_skipped, 1);
}

#[tokio::test]
async fn test_root_listing_failure_yields_empty_environment() {
    let server = MockServer::start().await;
    mount(&server, "customer", 401, json!({"message": "unauthorized"})).await;

    let records = collector(&server, "development", CollectorConfig::default())
        .collect()
        .await
        .unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn test_strict_policy_surfaces_auth_failure() {
    let server = MockServer::start().await;
    mount(&server, "customer", 401, json!({"message": "unauthorized"})).await;

    let config = CollectorConfig::default().with_absence_policy(AbsencePolicy::Strict);
    let err = collector(&server, "development", config)
        .collect()
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Store { status: 401, ref key } if key == "customer"));
}

#[tokio::test]
async fn test_unknown_channel_aborts_run() {
    let server = MockServer::start().await;
    mount(&server, "customer", 200, listing("/customer", &["acme"])).await;
    mount(&server, "acme", 200, listing("/acme", &["nightly"])).await;
    let mut body = acme_stable();
    body["node"]["key"] = json!("/acme/nightly");
    mount(&server, "acme/nightly", 200, body).await;

    let err = collector(&server, "production", CollectorConfig::default())
        .collect()
        .await
        .unwrap_err();
    assert!(matches!(err, Error::UnknownReleaseChannel { .. }));
}

#[tokio::test]
async fn test_two_servers_write_production_first() {
    let prod = MockServer::start().await;
    mount(&prod, "customer", 200, listing("/customer", &["acme"])).await;
    mount(&prod, "acme", 200, listing("/acme", &["stable"])).await;
    mount(&prod, "acme/stable", 200, acme_stable()).await;

    let dev = MockServer::start().await;
    mount(&dev, "customer", 200, listing("/customer", &["acme"])).await;
    mount(&dev, "acme", 200, listing("/acme", &["unstable"])).await;
    let mut body = acme_stable();
    body["node"]["key"] = json!("/acme/unstable");
    mount(&dev, "acme/unstable", 200, body).await;

    let dir = tempfile::TempDir::new().unwrap();
    let out = dir.path().join("customers.yaml");
    Pipeline::new(vec![
        collector(&prod, "production", CollectorConfig::default()),
        collector(&dev, "development", CollectorConfig::default()),
    ])
    .run(&SpecSerializer::new(&out))
    .await
    .unwrap();

    let written: Vec<CustomerSpec> =
        serde_yaml::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    let codes: Vec<char> = written.iter().map(|r| r.release_channel_code()).collect();
    assert_eq!(codes, vec!['p', 'd']);
    assert_eq!(
        written[1].config_endpoint(),
        "https://envoy.envoymobile.net/config/acmed/ecpr.json"
    );
}
