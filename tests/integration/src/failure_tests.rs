//! Failure modes of an issuance run.

use crate::test_utils::*;
use allowlist_core::InputError;
use allowlist_publish::PublishError;
use httpmock::Method::POST;
use httpmock::MockServer;
use signature_issuer::{ErrorKind, PipelineError, PipelineSettings};
use tokio::sync::watch;

const CHUNKS_OF_TWO: PipelineSettings = PipelineSettings {
    chunk_size: 2,
    concurrency: 1,
};

#[tokio::test]
async fn test_publish_failure_stops_the_run() {
    init_tracing();

    let addresses = users(5);
    let failing = addresses[2];

    let server = MockServer::start_async().await;
    let mut accepted = Vec::new();
    for user in &addresses {
        let checksum = user.to_checksum(None);
        let mock = if *user == failing {
            server
                .mock_async(|when, then| {
                    when.method(POST).path(PIN_PATH).body_contains(checksum);
                    then.status(500).body("pinning backend unavailable");
                })
                .await
        } else {
            server
                .mock_async(|when, then| {
                    when.method(POST).path(PIN_PATH).body_contains(checksum);
                    then.status(200).json_body(receipt_body("bafkrei-ok"));
                })
                .await
        };
        accepted.push(mock);
    }

    let dir = tempfile::tempdir().unwrap();
    let err = pipeline(&server, dir.path(), CHUNKS_OF_TWO)
        .run(AUCTION_ID, &addresses)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Publish);
    assert_eq!(err.chunk(), Some(1));
    assert_eq!(err.address(), Some(failing));
    assert!(matches!(
        err,
        PipelineError::Publish {
            source: PublishError::Rejected { status: 500, .. },
            ..
        }
    ));

    // First chunk persisted, failing chunk and everything after it untouched.
    assert!(dir.path().join("signatures-0.json").exists());
    assert!(!dir.path().join("signatures-1.json").exists());
    assert!(!dir.path().join("signatures-2.json").exists());

    accepted[0].assert_hits_async(1).await;
    accepted[1].assert_hits_async(1).await;
    accepted[2].assert_hits_async(1).await;
    accepted[3].assert_hits_async(0).await;
    accepted[4].assert_hits_async(0).await;
}

#[tokio::test]
async fn test_rejected_credentials() {
    init_tracing();

    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(PIN_PATH);
            then.status(401).body("{\"error\":\"Invalid JWT\"}");
        })
        .await;

    let dir = tempfile::tempdir().unwrap();
    let err = pipeline(&server, dir.path(), CHUNKS_OF_TWO)
        .run(AUCTION_ID, &users(3))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Publish);
    assert_eq!(err.chunk(), Some(0));
    assert!(!dir.path().join("signatures-0.json").exists());
}

#[tokio::test]
async fn test_invalid_address_list_publishes_nothing() {
    init_tracing();

    let server = MockServer::start_async().await;
    let pin = server
        .mock_async(|when, then| {
            when.method(POST).path(PIN_PATH);
            then.status(200).json_body(receipt_body("bafkrei-never"));
        })
        .await;

    let dir = tempfile::tempdir().unwrap();
    let list = dir.path().join("addresses.txt");
    std::fs::write(
        &list,
        format!("{},0x1234,{}", users(1)[0], users(2)[1]),
    )
    .unwrap();

    let output = dir.path().join("out");
    let err = pipeline(&server, &output, CHUNKS_OF_TWO)
        .run_from_file(AUCTION_ID, &list)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert!(matches!(
        err,
        PipelineError::InvalidInput(InputError::InvalidAddress { position: 1, .. })
    ));
    pin.assert_hits_async(0).await;
    assert!(!output.exists());
}

#[tokio::test]
async fn test_empty_address_list() {
    init_tracing();

    let server = MockServer::start_async().await;
    let dir = tempfile::tempdir().unwrap();
    let list = write_address_file(dir.path(), &[]);

    let err = pipeline(&server, dir.path(), CHUNKS_OF_TWO)
        .run_from_file(AUCTION_ID, &list)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        PipelineError::InvalidInput(InputError::EmptyAddressList)
    ));
}

#[tokio::test]
async fn test_cancelled_before_first_chunk() {
    init_tracing();

    let server = MockServer::start_async().await;
    let pin = server
        .mock_async(|when, then| {
            when.method(POST).path(PIN_PATH);
            then.status(200).json_body(receipt_body("bafkrei-cancel"));
        })
        .await;

    let (cancel_tx, cancel_rx) = watch::channel(false);
    cancel_tx.send(true).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let err = pipeline(&server, dir.path(), CHUNKS_OF_TWO)
        .with_cancellation(cancel_rx)
        .run(AUCTION_ID, &users(3))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Cancelled);
    assert!(matches!(
        err,
        PipelineError::Cancelled {
            completed_chunks: 0
        }
    ));
    pin.assert_hits_async(0).await;
}
