//! Issuance runs against a mock pinning service.

use crate::test_utils::*;
use allowlist_core::{Address, CredentialSignature};
use allowlist_crypto::verify_credential;
use httpmock::Method::POST;
use httpmock::MockServer;
use signature_issuer::{read_batch_file, verify_batch_file, BatchWriter, PipelineSettings};

fn settings(chunk_size: usize, concurrency: usize) -> PipelineSettings {
    PipelineSettings {
        chunk_size,
        concurrency,
    }
}

#[tokio::test]
async fn test_three_addresses_in_chunks_of_two() {
    init_tracing();

    let server = MockServer::start_async().await;
    let pin = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(PIN_PATH)
                .header("Authorization", format!("Bearer {}", JWT))
                .header("Content-Type", "application/json")
                .body_contains("\"cidVersion\":1");
            then.status(200).json_body(receipt_body("bafkrei-test"));
        })
        .await;

    let dir = tempfile::tempdir().unwrap();
    let list = write_address_file(dir.path(), &users(3));
    let output = dir.path().join("signatures");

    let summary = pipeline(&server, &output, settings(2, 1))
        .run_from_file(AUCTION_ID, &list)
        .await
        .unwrap();

    pin.assert_hits_async(3).await;
    assert_eq!(summary.credentials, 3);
    assert_eq!(
        summary.files,
        vec![output.join("signatures-0.json"), output.join("signatures-1.json")]
    );

    let first = read_batch_file(&summary.files[0]).unwrap();
    let second = read_batch_file(&summary.files[1]).unwrap();
    assert_eq!(first.signatures.len(), 2);
    assert_eq!(second.signatures.len(), 1);

    let domain = domain();
    for (index, file) in [first, second].into_iter().enumerate() {
        assert_eq!(file.auction_id, AUCTION_ID);
        assert_eq!(file.chain_id, CHAIN_ID);
        assert_eq!(
            file.allow_list_contract,
            address(ALLOW_LIST_CONTRACT).to_checksum(None)
        );

        let batch = file.into_batch(index).unwrap();
        for credential in &batch.credentials {
            assert!(verify_credential(&domain, credential, issuer_address()).unwrap());
        }
    }
}

#[tokio::test]
async fn test_pinned_record_shape() {
    init_tracing();

    let user = users(1)[0];
    let expected_name = format!("{}-{}-{}", CHAIN_ID, AUCTION_ID, user.to_checksum(None));

    let server = MockServer::start_async().await;
    let pin = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(PIN_PATH)
                .body_contains(format!("\"name\":\"{}\"", expected_name))
                .body_contains(format!("\"auctionId\":\"{}\"", AUCTION_ID))
                .body_contains("\"pinataContent\":{\"signature\":\"0x");
            then.status(200).json_body(receipt_body("bafkrei-shape"));
        })
        .await;

    let dir = tempfile::tempdir().unwrap();
    let summary = pipeline(&server, dir.path(), settings(10, 1))
        .run(AUCTION_ID, &[user])
        .await
        .unwrap();
    pin.assert_hits_async(1).await;

    let file = read_batch_file(&summary.files[0]).unwrap();
    let entry = &file.signatures[0];
    assert_eq!(entry.user, user.to_checksum(None));
    assert_eq!(entry.signature.len(), 2 + 2 * 96);

    let signature = CredentialSignature::decode_hex(&entry.signature).unwrap();
    assert!(signature.v == 27 || signature.v == 28);
}

#[tokio::test]
async fn test_union_preserves_order_and_duplicates() {
    init_tracing();

    let server = MockServer::start_async().await;
    let pin = server
        .mock_async(|when, then| {
            when.method(POST).path(PIN_PATH);
            then.status(200).json_body(receipt_body("bafkrei-dup"));
        })
        .await;

    let mut addresses = users(5);
    addresses.insert(3, addresses[0]);
    addresses.push(addresses[1]);

    let dir = tempfile::tempdir().unwrap();
    let summary = pipeline(&server, dir.path(), settings(3, 2))
        .run(AUCTION_ID, &addresses)
        .await
        .unwrap();

    pin.assert_hits_async(addresses.len()).await;
    assert_eq!(summary.files.len(), 3);

    let writer = BatchWriter::new(dir.path());
    let mut persisted: Vec<Address> = Vec::new();
    for index in 0..summary.files.len() {
        let batch = writer.read(index).unwrap().into_batch(index).unwrap();
        assert!(batch.credentials.len() <= 3);
        persisted.extend(batch.credentials.iter().map(|c| c.address));
    }
    assert_eq!(persisted, addresses);
}

#[tokio::test]
async fn test_rerun_overwrites_batch_files() {
    init_tracing();

    let server = MockServer::start_async().await;
    let pin = server
        .mock_async(|when, then| {
            when.method(POST).path(PIN_PATH);
            then.status(200).json_body(receipt_body("bafkrei-rerun"));
        })
        .await;

    let dir = tempfile::tempdir().unwrap();
    let pipeline = pipeline(&server, dir.path(), settings(2, 1));

    let first = pipeline.run(AUCTION_ID, &users(4)).await.unwrap();
    let before: Vec<String> = first
        .files
        .iter()
        .map(|path| std::fs::read_to_string(path).unwrap())
        .collect();

    let second = pipeline.run(AUCTION_ID, &users(4)).await.unwrap();
    let after: Vec<String> = second
        .files
        .iter()
        .map(|path| std::fs::read_to_string(path).unwrap())
        .collect();

    pin.assert_hits_async(8).await;
    assert_eq!(first.files, second.files);
    // Signatures are deterministic, so a re-run reproduces the files.
    assert_eq!(before, after);

    let leftovers: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| !name.ends_with(".json"))
        .collect();
    assert!(leftovers.is_empty(), "unexpected files: {:?}", leftovers);
}

#[tokio::test]
async fn test_written_files_verify_offline() {
    init_tracing();

    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(PIN_PATH);
            then.status(200).json_body(receipt_body("bafkrei-verify"));
        })
        .await;

    let dir = tempfile::tempdir().unwrap();
    let summary = pipeline(&server, dir.path(), settings(4, 3))
        .run(AUCTION_ID, &users(9))
        .await
        .unwrap();
    assert_eq!(summary.files.len(), 3);

    for path in &summary.files {
        let report = verify_batch_file(path, issuer_address()).unwrap();
        assert!(report.is_valid());
        assert_eq!(report.auction_id, AUCTION_ID);
        assert_eq!(report.chain_id, CHAIN_ID);

        let foreign = verify_batch_file(path, Address::repeat_byte(0x42)).unwrap();
        assert_eq!(foreign.valid, 0);
    }
}
