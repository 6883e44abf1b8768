// SPDX-FileCopyrightText: 2026 Soulfan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persona chat replies over a [`TextModel`].

use std::sync::Arc;

use soulfan_config::model::ReplicateConfig;
use soulfan_core::{SoulfanError, TextModel, TextRequest};
use tracing::debug;

/// Answers chat text in the persona's voice.
#[derive(Clone)]
pub struct ChatResponder {
    model: Arc<dyn TextModel>,
    model_id: String,
    persona_prompt: String,
}

impl ChatResponder {
    pub fn new(model: Arc<dyn TextModel>, config: &ReplicateConfig) -> Self {
        Self {
            model,
            model_id: config.text_model.clone(),
            persona_prompt: config.persona_prompt.clone(),
        }
    }

    /// The full prompt sent for `text`.
    pub fn build_prompt(&self, text: &str) -> String {
        format!(
            "{}\n\nHere's what they said: {}",
            self.persona_prompt.trim(),
            text.trim()
        )
    }

    /// Generates the persona's reply to `text`.
    pub async fn reply(&self, text: &str) -> Result<String, SoulfanError> {
        let request = TextRequest {
            model: self.model_id.clone(),
            prompt: self.build_prompt(text),
        };
        let reply = self.model.complete(request).await?;
        debug!(model = %self.model_id, chars = reply.len(), "chat reply generated");
        Ok(reply.trim().to_string())
    }
}
