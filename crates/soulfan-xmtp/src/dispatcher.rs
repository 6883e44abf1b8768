// SPDX-FileCopyrightText: 2026 Soulfan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-message command dispatch.
//!
//! Each inbound message is handled on its own: classify, run the matching
//! handler, send at most one reply back through the [`ReplySink`].

use std::sync::Arc;

use soulfan_chain::payment_request;
use soulfan_config::model::ChainConfig;
use soulfan_core::{InboundMessage, OutboundMessage, ReplySink, SoulfanError, WalletAddress};
use soulfan_replicate::{ChatResponder, ImageSynthesizer};
use tracing::{debug, info, instrument};

use crate::command::{Classified, Command, Network, classify};

pub(crate) const IMAGE_USAGE: &str = "Tell me what to draw, e.g. /image a cat in a hat";
pub(crate) const IMAGE_FAILED: &str = "Sorry, I couldn't generate that image right now.";

/// Routes classified messages to their handlers.
pub struct Dispatcher {
    images: ImageSynthesizer,
    responder: ChatResponder,
    sink: Arc<dyn ReplySink>,
    chain_id: u64,
    usdc_address: String,
}

impl Dispatcher {
    pub fn new(
        images: ImageSynthesizer,
        responder: ChatResponder,
        sink: Arc<dyn ReplySink>,
        chain: &ChainConfig,
    ) -> Self {
        Self {
            images,
            responder,
            sink,
            chain_id: chain.chain_id,
            usdc_address: chain.usdc_address.clone(),
        }
    }

    /// Handles one message and sends the reply, if any.
    ///
    /// Returns the reply text that was sent.
    #[instrument(skip_all, fields(to = %msg.to, from = %msg.from))]
    pub async fn handle(&self, msg: InboundMessage) -> Result<Option<String>, SoulfanError> {
        let Some(reply) = self.reply_for(&msg.to, &classify(&msg.content)).await? else {
            return Ok(None);
        };
        self.sink
            .send(OutboundMessage {
                from: msg.to,
                to: msg.from,
                content: reply.clone(),
            })
            .await?;
        Ok(Some(reply))
    }

    /// Computes the reply for a classified message without sending it.
    pub async fn reply_for(
        &self,
        persona: &WalletAddress,
        classified: &Classified,
    ) -> Result<Option<String>, SoulfanError> {
        match classified {
            Classified::Text(text) if text.is_empty() => Ok(None),
            Classified::Text(text) => self.responder.reply(text).await.map(Some),
            Classified::Command(command) => self.run_command(persona, command).await,
        }
    }

    async fn run_command(
        &self,
        persona: &WalletAddress,
        command: &Command,
    ) -> Result<Option<String>, SoulfanError> {
        match command {
            Command::Image { prompt } if prompt.is_empty() => Ok(Some(IMAGE_USAGE.to_string())),
            Command::Image { prompt } => {
                let reply = self
                    .images
                    .synthesize(prompt, false)
                    .await
                    .unwrap_or_else(|| IMAGE_FAILED.to_string());
                Ok(Some(reply))
            }
            Command::Tip {
                amount,
                token,
                network,
            } => {
                let link = payment_request(
                    persona,
                    amount,
                    *token,
                    self.chain_id_for(*network),
                    &self.usdc_address,
                )?;
                info!(%persona, %amount, %token, %network, "tip request issued");
                let symbol = token.to_string().to_uppercase();
                Ok(Some(format!("Send {amount} {symbol} to tip me: {link}")))
            }
            Command::Unrecognized { trigger } => {
                debug!(%trigger, "ignoring unrecognized command");
                Ok(None)
            }
        }
    }

    fn chain_id_for(&self, network: Network) -> u64 {
        match network {
            Network::Sepolia => self.chain_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soulfan_config::model::ReplicateConfig;
    use soulfan_core::MessageContent;
    use soulfan_test_utils::{MockImageModel, MockReplySink, MockTextModel};

    const PERSONA: &str = "0x14dC79964da2C08b23698B3D3cc7Ca32193d9955";

    struct Fixture {
        dispatcher: Dispatcher,
        images: Arc<MockImageModel>,
        text: Arc<MockTextModel>,
        sink: Arc<MockReplySink>,
    }

    fn fixture_with(images: MockImageModel, text: MockTextModel) -> Fixture {
        let images = Arc::new(images);
        let text = Arc::new(text);
        let sink = Arc::new(MockReplySink::new());
        let config = ReplicateConfig::default();
        let dispatcher = Dispatcher::new(
            ImageSynthesizer::new(images.clone(), &config),
            ChatResponder::new(text.clone(), &config),
            sink.clone(),
            &ChainConfig::default(),
        );
        Fixture {
            dispatcher,
            images,
            text,
            sink,
        }
    }

    fn fixture() -> Fixture {
        fixture_with(MockImageModel::new(), MockTextModel::new())
    }

    fn inbound(content: &str) -> InboundMessage {
        InboundMessage {
            to: WalletAddress::parse(PERSONA).unwrap(),
            from: "0xfan".into(),
            content: MessageContent::Plain(content.into()),
        }
    }

    #[tokio::test]
    async fn text_is_answered_by_model() {
        let f = fixture_with(
            MockImageModel::new(),
            MockTextModel::with_replies(vec!["hey fan!".into()]),
        );

        let reply = f.dispatcher.handle(inbound("hello")).await.unwrap();
        assert_eq!(reply.as_deref(), Some("hey fan!"));

        let sent = f.sink.sent_messages().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "0xfan");
        assert_eq!(sent[0].from.as_str(), PERSONA);
        let requests = f.text.requests().await;
        assert!(requests[0].prompt.ends_with("Here's what they said: hello"));
    }

    #[tokio::test]
    async fn image_command_replies_with_url() {
        let f = fixture();
        f.images.add_url("https://replicate.delivery/x/cat.webp").await;

        let reply = f.dispatcher.handle(inbound("/image a cat")).await.unwrap();
        assert_eq!(reply.as_deref(), Some("https://replicate.delivery/x/cat.webp"));
        let requests = f.images.requests().await;
        assert_eq!(requests[0].prompt, "a cat");
        assert_eq!(requests[0].purpose, soulfan_core::ImagePurpose::Chat);
    }

    #[tokio::test]
    async fn image_failure_replies_with_apology() {
        let f = fixture_with(MockImageModel::failing("nsfw"), MockTextModel::new());
        let reply = f.dispatcher.handle(inbound("/image a cat")).await.unwrap();
        assert_eq!(reply.as_deref(), Some(IMAGE_FAILED));
    }

    #[tokio::test]
    async fn empty_image_prompt_gets_usage() {
        let f = fixture();
        let reply = f.dispatcher.handle(inbound("/image")).await.unwrap();
        assert_eq!(reply.as_deref(), Some(IMAGE_USAGE));
        assert!(f.images.requests().await.is_empty());
    }

    #[tokio::test]
    async fn tip_replies_with_payment_link() {
        let f = fixture();
        let reply = f
            .dispatcher
            .handle(inbound("/tip 0.5"))
            .await
            .unwrap()
            .unwrap();
        assert!(reply.contains(&format!(
            "ethereum:{PERSONA}@11155111?value=500000000000000000"
        )));
    }

    #[tokio::test]
    async fn usdc_tip_targets_token_contract() {
        let f = fixture();
        let reply = f
            .dispatcher
            .handle(inbound("/tip 3 usdc"))
            .await
            .unwrap()
            .unwrap();
        assert!(reply.contains("/transfer?address="));
        assert!(reply.contains("uint256=3000000"));
        assert!(reply.starts_with("Send 3 USDC"));
    }

    #[tokio::test]
    async fn unrecognized_command_sends_nothing() {
        let f = fixture();
        let reply = f.dispatcher.handle(inbound("/dance")).await.unwrap();
        assert!(reply.is_none());
        assert_eq!(f.sink.sent_count().await, 0);
        assert!(f.text.requests().await.is_empty());
    }

    #[tokio::test]
    async fn text_model_failure_is_returned() {
        let f = fixture_with(MockImageModel::new(), MockTextModel::failing("down"));
        let result = f.dispatcher.handle(inbound("hello")).await;
        assert!(matches!(result, Err(SoulfanError::Provider { .. })));
        assert_eq!(f.sink.sent_count().await, 0);
    }
}
