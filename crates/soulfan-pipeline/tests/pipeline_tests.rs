// SPDX-FileCopyrightText: 2026 Soulfan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Creation pipeline scenarios over mock adapters.

use soulfan_config::Environment;
use soulfan_config::model::ReplicateConfig;
use soulfan_core::{BlobId, CreationRequest, ImagePurpose, SoulfanError, TokenId};
use soulfan_test_utils::mock_models::MOCK_IMAGE_BYTES;
use soulfan_test_utils::{
    MockBlobStore, MockImageModel, MockPublisher, MockRegistry, MockWallets, PipelineHarness,
};

fn cat_request() -> CreationRequest {
    request("a cat", "Whiskers", 7)
}

fn request(prompt: &str, name: &str, token_id: u64) -> CreationRequest {
    CreationRequest {
        prompt: prompt.into(),
        name: name.into(),
        token_id: TokenId(token_id),
    }
}

#[tokio::test]
async fn cat_scenario_registers_exact_arguments() {
    let harness = PipelineHarness::builder().build();

    let created = harness.pipeline.run(&cat_request()).await.unwrap();

    // Image step produced a non-empty URL that was downloaded.
    let downloads = harness.image_model.downloads().await;
    assert_eq!(downloads.len(), 1);
    assert!(!downloads[0].is_empty());

    // Upload of that image yielded a blob id.
    assert!(!created.blob_id.0.is_empty());
    assert_eq!(
        harness.blob_store.get(&created.blob_id.0).await.as_deref(),
        Some(MOCK_IMAGE_BYTES)
    );

    // Publish returned a walrus site URL.
    assert!(created.site.url.ends_with(".walrus.site"));

    // Registry write carried exactly [name, blobId, url, wallet].
    let writes = harness.registry.created().await;
    assert_eq!(writes.len(), 1);
    let bot = &writes[0];
    assert_eq!(bot.name(), "Whiskers");
    assert_eq!(bot.blob_id(), &created.blob_id);
    assert_eq!(bot.site_url(), created.site.url);
    assert_eq!(bot.wallet(), &MockWallets::expected(TokenId(7)));
    assert_eq!(created.wallet, MockWallets::expected(TokenId(7)));
    assert!(created.tx_hash.0.starts_with("0x"));
}

#[tokio::test]
async fn avatar_uses_creation_shape_and_environment_model() {
    let harness = PipelineHarness::builder()
        .with_replicate_config(ReplicateConfig {
            environment: Environment::Production,
            ..ReplicateConfig::default()
        })
        .build();

    harness
        .pipeline
        .create_avatar("a cat", TokenId(7))
        .await
        .unwrap();

    let requests = harness.image_model.requests().await;
    assert_eq!(requests[0].purpose, ImagePurpose::Avatar);
    assert_eq!(requests[0].model, "black-forest-labs/flux-1.1-pro");
    assert_eq!(requests[0].prompt, "a cat");
}

#[tokio::test]
async fn avatar_wallet_matches_derivation() {
    let harness = PipelineHarness::builder().build();
    let avatar = harness
        .pipeline
        .create_avatar("a dog", TokenId(3))
        .await
        .unwrap();
    assert_eq!(avatar.wallet, MockWallets::expected(TokenId(3)));
    assert_eq!(avatar.raw_bytes, MOCK_IMAGE_BYTES);
}

#[tokio::test]
async fn site_embeds_blob_wallet_and_name() {
    let harness = PipelineHarness::builder().build();
    let wallet = MockWallets::expected(TokenId(7));

    harness
        .pipeline
        .publish_site(&BlobId("blob-xyz".into()), &wallet, TokenId(7), "Whiskers")
        .await
        .unwrap();

    let bundles = harness.publisher.bundles().await;
    assert_eq!(bundles.len(), 1);
    assert!(bundles[0].index_html.contains("blob-xyz"));
    assert!(bundles[0].index_html.contains(wallet.as_str()));
    assert!(bundles[0].index_html.contains("Whiskers"));
}

#[tokio::test]
async fn image_failure_aborts_before_upload() {
    let harness = PipelineHarness::builder()
        .with_image_model(MockImageModel::failing("model overloaded"))
        .build();

    let err = harness.pipeline.run(&cat_request()).await.unwrap_err();
    assert!(matches!(err, SoulfanError::Provider { .. }));
    assert_eq!(harness.blob_store.upload_count().await, 0);
    assert!(harness.registry.created().await.is_empty());
}

#[tokio::test]
async fn upload_failure_aborts_before_publish() {
    let harness = PipelineHarness::builder()
        .with_blob_store(MockBlobStore::failing("publisher unavailable"))
        .build();

    let err = harness.pipeline.run(&cat_request()).await.unwrap_err();
    assert!(matches!(err, SoulfanError::BlobStore { .. }));
    assert!(harness.publisher.bundles().await.is_empty());
}

#[tokio::test]
async fn publish_failure_skips_registry_write() {
    let harness = PipelineHarness::builder()
        .with_publisher(MockPublisher::failing(2, "out of gas"))
        .build();

    let err = harness.pipeline.run(&cat_request()).await.unwrap_err();
    assert!(matches!(err, SoulfanError::Publish(_)));
    assert!(harness.registry.created().await.is_empty());
}

#[tokio::test]
async fn missing_site_url_is_invalid_url_error() {
    let harness = PipelineHarness::builder()
        .with_publisher(MockPublisher::without_url())
        .build();

    let err = harness.pipeline.run(&cat_request()).await.unwrap_err();
    assert!(err.to_string().contains("invalid URL"), "got: {err}");
    assert!(harness.registry.created().await.is_empty());
}

#[tokio::test]
async fn registry_failure_is_surfaced() {
    let harness = PipelineHarness::builder()
        .with_registry(MockRegistry::failing("execution reverted"))
        .build();

    let err = harness.pipeline.run(&cat_request()).await.unwrap_err();
    assert!(matches!(err, SoulfanError::Registry { .. }));
    // The write was still attempted with the full argument set.
    assert_eq!(harness.registry.created().await.len(), 1);
}

#[tokio::test]
async fn empty_prompt_and_name_are_rejected() {
    let harness = PipelineHarness::builder().build();

    let err = harness
        .pipeline
        .run(&request("  ", "Whiskers", 1))
        .await
        .unwrap_err();
    assert!(matches!(err, SoulfanError::Validation(_)));

    let err = harness
        .pipeline
        .run(&request("a cat", "", 1))
        .await
        .unwrap_err();
    assert!(matches!(err, SoulfanError::Validation(_)));
    assert!(harness.image_model.requests().await.is_empty());
}

#[tokio::test]
async fn repeated_image_reuses_certified_blob() {
    let harness = PipelineHarness::builder().build();

    let first = harness.pipeline.create_avatar("a cat", TokenId(1)).await.unwrap();
    let second = harness.pipeline.create_avatar("a cat", TokenId(2)).await.unwrap();
    assert_eq!(first.blob_id, second.blob_id);
    assert_ne!(first.wallet, second.wallet);
}
