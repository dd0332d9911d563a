//! Integration tests for multi-environment collection and persistence.

use custspec_collector::{Pipeline, SpecSerializer};
use custspec_core::{Error, ReleaseChannel};

use crate::common::StoreFixture;

fn production() -> StoreFixture {
    StoreFixture::new("production")
        .customer("acme", &[("stable", 6), ("demo", 5)])
        .customer("globex", &[("sandbox", 7)])
}

fn development() -> StoreFixture {
    StoreFixture::new("development").customer("initech", &[("unstable", 6), ("testing", 0)])
}

#[tokio::test]
async fn test_environments_concatenate_in_order() {
    let pipeline = Pipeline::new(vec![production().collector(), development().collector()]);
    let collected = pipeline.collect_all().await.unwrap();

    let keys: Vec<(&str, ReleaseChannel)> = collected
        .records
        .iter()
        .map(|r| (r.customer_code(), r.release_channel()))
        .collect();
    assert_eq!(
        keys,
        vec![
            ("acme", ReleaseChannel::Stable),
            ("globex", ReleaseChannel::Sandbox),
            ("initech", ReleaseChannel::Unstable),
        ]
    );

    let envs: Vec<&str> = collected
        .reports
        .iter()
        .map(|r| r.environment.as_str())
        .collect();
    assert_eq!(envs, vec!["production", "development"]);
    assert_eq!(pipeline.environments(), vec!["production", "development"]);
}

#[tokio::test]
async fn test_reversed_environments_reverse_blocks() {
    let pipeline = Pipeline::new(vec![development().collector(), production().collector()]);
    let collected = pipeline.collect_all().await.unwrap();
    let customers: Vec<&str> = collected
        .records
        .iter()
        .map(|r| r.customer_code())
        .collect();
    assert_eq!(customers, vec!["initech", "acme", "globex"]);
}

#[tokio::test]
async fn test_one_empty_environment_is_fine() {
    let empty = StoreFixture::new("development").customer("hooli", &[("stable", 2)]);
    let pipeline = Pipeline::new(vec![production().collector(), empty.collector()]);
    let collected = pipeline.collect_all().await.unwrap();
    assert_eq!(collected.records.len(), 2);
    assert_eq!(collected.reports[1].configured, 0);
    assert_eq!(collected.reports[1].incomplete_skipped, 1);
}

#[tokio::test]
async fn test_empty_aggregate_is_fatal_and_writes_nothing() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("customers.yaml");
    std::fs::write(&path, "previous").unwrap();

    let pipeline = Pipeline::new(vec![
        StoreFixture::new("production").collector(),
        StoreFixture::new("development")
            .customer("hooli", &[("stable", 5)])
            .collector(),
    ]);
    let err = pipeline.run(&SpecSerializer::new(&path)).await.unwrap_err();

    assert!(matches!(err, Error::EmptyResult { environments: 2 }));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "previous");
}

#[tokio::test]
async fn test_rerun_is_byte_identical() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("customers.yaml");
    let serializer = SpecSerializer::new(&path);

    Pipeline::new(vec![production().collector(), development().collector()])
        .run(&serializer)
        .await
        .unwrap();
    let first = std::fs::read(&path).unwrap();

    Pipeline::new(vec![production().collector(), development().collector()])
        .run(&serializer)
        .await
        .unwrap();
    let second = std::fs::read(&path).unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_artifact_carries_trimmed_passwords() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("customers.yaml");

    Pipeline::new(vec![production().collector()])
        .run(&SpecSerializer::new(&path))
        .await
        .unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("password: secret123\n"));
    assert!(!content.contains("  secret123\\n"));
    assert!(content.contains("username: ecpr"));
}
