// SPDX-FileCopyrightText: 2026 Soulfan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Soulfan bot service.
//!
//! This crate provides the error type, domain types, and adapter traits used
//! throughout the workspace. Every external collaborator (image model, blob
//! store, site publisher, registry contract, chat relay) is reached through a
//! trait defined here so it can be swapped for a mock in tests.

pub mod error;
pub mod traits;
pub mod types;

pub use error::{PublishError, SoulfanError};
pub use types::{
    AdapterType, BlobId, BlobRecord, BlobUpload, Bot, CreationRequest, HealthStatus,
    ImagePurpose, ImageRequest, InboundMessage, MessageContent, NewBot, OutboundMessage,
    PublishedSite, SiteBundle, TextRequest, TokenId, TxHash, WalletAddress,
};

pub use traits::{
    BlobStore, BotRegistry, ImageModel, PersonaWallets, PluginAdapter, ReplySink,
    SitePublisher, TextModel,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn wallet() -> WalletAddress {
        WalletAddress::parse("0x70997970C51812dc3A010C7d01b50e0d17dc79C8").unwrap()
    }

    #[test]
    fn token_id_accepts_number_and_numeric_string() {
        let from_number: TokenId = serde_json::from_str("7").unwrap();
        let from_string: TokenId = serde_json::from_str("\"7\"").unwrap();
        assert_eq!(from_number, TokenId(7));
        assert_eq!(from_string, TokenId(7));
    }

    #[test]
    fn token_id_rejects_non_numeric_string() {
        let result = serde_json::from_str::<TokenId>("\"seven\"");
        assert!(result.is_err());
    }

    #[test]
    fn creation_request_uses_camel_case() {
        let json = r#"{"prompt": "a cat", "name": "Whiskers", "tokenId": "7"}"#;
        let req: CreationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.prompt, "a cat");
        assert_eq!(req.token_id, TokenId(7));
    }

    #[test]
    fn wallet_address_equality_ignores_case() {
        let lower = WalletAddress::parse("0x70997970c51812dc3a010c7d01b50e0d17dc79c8").unwrap();
        assert_eq!(wallet(), lower);
    }

    #[test]
    fn wallet_address_deserializes_through_parse() {
        let parsed: WalletAddress =
            serde_json::from_str("\" 0x70997970C51812dc3A010C7d01b50e0d17dc79C8 \"").unwrap();
        assert_eq!(parsed.as_str(), "0x70997970C51812dc3A010C7d01b50e0d17dc79C8");

        assert!(serde_json::from_str::<WalletAddress>("\"0x1234\"").is_err());
        assert!(serde_json::from_str::<WalletAddress>("\"not-an-address\"").is_err());

        let inbound = serde_json::from_value::<InboundMessage>(serde_json::json!({
            "to": "0xshort",
            "from": "0xfan",
            "content": "gm"
        }));
        assert!(inbound.is_err());
    }

    #[test]
    fn wallet_address_rejects_bad_input() {
        assert!(WalletAddress::parse("70997970c51812dc3a010c7d01b50e0d17dc79c8").is_err());
        assert!(WalletAddress::parse("0x1234").is_err());
        assert!(WalletAddress::parse("0xZZ997970c51812dc3a010c7d01b50e0d17dc79c8").is_err());
    }

    #[test]
    fn new_bot_requires_blob_and_site() {
        let site = PublishedSite {
            url: "https://foo.walrus.site".into(),
        };
        assert!(NewBot::new("cat", BlobId("".into()), site.clone(), wallet()).is_err());
        assert!(
            NewBot::new(
                "cat",
                BlobId("blob".into()),
                PublishedSite { url: " ".into() },
                wallet()
            )
            .is_err()
        );
        assert!(NewBot::new("", BlobId("blob".into()), site.clone(), wallet()).is_err());

        let bot = NewBot::new("cat", BlobId("blob".into()), site, wallet()).unwrap();
        assert_eq!(bot.name(), "cat");
        assert_eq!(bot.site_url(), "https://foo.walrus.site");
    }

    #[test]
    fn blob_upload_exposes_id_for_both_outcomes() {
        let created = BlobUpload::NewlyCreated(BlobId("a".into()));
        let certified = BlobUpload::AlreadyCertified(BlobId("b".into()));
        assert_eq!(created.blob_id().0, "a");
        assert_eq!(certified.into_blob_id().0, "b");
    }

    #[test]
    fn message_content_variants_deserialize() {
        let plain: MessageContent = serde_json::from_str("\"hello\"").unwrap();
        assert_eq!(plain, MessageContent::Plain("hello".into()));

        let text: MessageContent = serde_json::from_str(r#"{"content": "hi"}"#).unwrap();
        assert_eq!(text, MessageContent::Text { content: "hi".into() });

        let command: MessageContent =
            serde_json::from_str(r#"{"command": "/tip", "params": {"amount": 1}}"#).unwrap();
        match command {
            MessageContent::Command { command, params } => {
                assert_eq!(command, "/tip");
                assert_eq!(params["amount"], 1);
            }
            other => panic!("expected command, got {other:?}"),
        }
    }

    #[test]
    fn adapter_type_round_trips_through_display() {
        use std::str::FromStr;

        let variants = [
            AdapterType::ImageModel,
            AdapterType::TextModel,
            AdapterType::BlobStore,
            AdapterType::SitePublisher,
            AdapterType::Registry,
            AdapterType::Transport,
        ];
        for variant in &variants {
            let parsed = AdapterType::from_str(&variant.to_string()).expect("should parse back");
            assert_eq!(*variant, parsed);
        }
    }

    #[test]
    fn publish_error_converts_into_soulfan_error() {
        let err: SoulfanError = PublishError::InvalidUrl {
            stdout: "nothing".into(),
        }
        .into();
        assert!(err.to_string().contains("invalid URL"));
    }

    #[test]
    fn all_traits_are_exported() {
        fn _assert_plugin_adapter<T: PluginAdapter>() {}
        fn _assert_image_model<T: ImageModel>() {}
        fn _assert_text_model<T: TextModel>() {}
        fn _assert_blob_store<T: BlobStore>() {}
        fn _assert_site_publisher<T: SitePublisher>() {}
        fn _assert_bot_registry<T: BotRegistry>() {}
        fn _assert_persona_wallets<T: PersonaWallets>() {}
        fn _assert_reply_sink<T: ReplySink>() {}
    }
}
