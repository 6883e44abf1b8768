// SPDX-FileCopyrightText: 2026 Soulfan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Replicate predictions API.
//!
//! Provides [`ReplicateClient`] which handles authentication, prediction
//! creation with `Prefer: wait`, and polling until the prediction settles.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde_json::{Value, json};
use soulfan_core::SoulfanError;
use tracing::{debug, warn};

use crate::types::{ApiErrorResponse, Prediction, PredictionStatus};

/// HTTP client for Replicate API communication.
#[derive(Debug, Clone)]
pub struct ReplicateClient {
    client: reqwest::Client,
    /// Unauthenticated client for fetching generated assets from CDN hosts.
    download_client: reqwest::Client,
    base_url: String,
    poll_interval: Duration,
    timeout: Duration,
}

impl ReplicateClient {
    /// Creates a new Replicate client.
    ///
    /// `timeout` bounds one whole prediction, including every poll.
    pub fn new(
        api_token: &SecretString,
        base_url: &str,
        poll_interval: Duration,
        timeout: Duration,
    ) -> Result<Self, SoulfanError> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_token.expose_secret()))
            .map_err(|e| SoulfanError::Config(format!("invalid API token header value: {e}")))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(90))
            .build()
            .map_err(build_error)?;
        let download_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(build_error)?;

        Ok(Self {
            client,
            download_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            poll_interval,
            timeout,
        })
    }

    /// Runs a prediction to completion and returns it.
    ///
    /// `model` is `owner/name` for an official model or `owner/name:version`
    /// for a pinned version. Fails unless the prediction ends `succeeded`.
    pub async fn predict(&self, model: &str, input: Value) -> Result<Prediction, SoulfanError> {
        let prediction = tokio::time::timeout(self.timeout, async {
            let created = self.create(model, input).await?;
            self.wait(created).await
        })
        .await
        .map_err(|_| SoulfanError::Timeout {
            duration: self.timeout,
        })??;

        if prediction.status != PredictionStatus::Succeeded {
            let detail = prediction
                .error
                .as_ref()
                .map(|e| e.as_str().map_or_else(|| e.to_string(), str::to_string))
                .unwrap_or_else(|| "no error detail".to_string());
            return Err(SoulfanError::Provider {
                message: format!(
                    "prediction {} ended {:?}: {detail}",
                    prediction.id, prediction.status
                ),
                source: None,
            });
        }
        Ok(prediction)
    }

    async fn create(&self, model: &str, input: Value) -> Result<Prediction, SoulfanError> {
        let (url, body) = match model.split_once(':') {
            Some((_, version)) => (
                format!("{}/v1/predictions", self.base_url),
                json!({ "version": version, "input": input }),
            ),
            None => (
                format!("{}/v1/models/{model}/predictions", self.base_url),
                json!({ "input": input }),
            ),
        };

        let response = self
            .client
            .post(&url)
            .header("Prefer", "wait")
            .json(&body)
            .send()
            .await
            .map_err(request_error)?;
        debug!(status = %response.status(), model, "prediction created");
        parse_prediction(response).await
    }

    async fn wait(&self, mut prediction: Prediction) -> Result<Prediction, SoulfanError> {
        while !prediction.status.is_terminal() {
            let Some(poll_url) = prediction.urls.as_ref().map(|u| u.get.clone()) else {
                return Err(SoulfanError::Provider {
                    message: format!("prediction {} has no status URL", prediction.id),
                    source: None,
                });
            };
            tokio::time::sleep(self.poll_interval).await;
            let response = self
                .client
                .get(&poll_url)
                .send()
                .await
                .map_err(request_error)?;
            prediction = parse_prediction(response).await?;
            debug!(id = %prediction.id, status = ?prediction.status, "prediction polled");
        }
        Ok(prediction)
    }

    /// Fetches the bytes behind an output URL.
    pub async fn download(&self, url: &str) -> Result<Vec<u8>, SoulfanError> {
        let response = self
            .download_client
            .get(url)
            .send()
            .await
            .map_err(request_error)?;
        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, url, "image download failed");
            return Err(SoulfanError::Provider {
                message: format!("download of {url} returned {status}"),
                source: None,
            });
        }
        let bytes = response.bytes().await.map_err(|e| SoulfanError::Provider {
            message: format!("failed to read download body: {e}"),
            source: Some(Box::new(e)),
        })?;
        Ok(bytes.to_vec())
    }

    /// Checks that the token is accepted by the account endpoint.
    pub async fn verify_account(&self) -> Result<(), SoulfanError> {
        let response = self
            .client
            .get(format!("{}/v1/account", self.base_url))
            .send()
            .await
            .map_err(request_error)?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(SoulfanError::Provider {
                message: format!("account check returned {status}"),
                source: None,
            })
        }
    }
}

async fn parse_prediction(response: reqwest::Response) -> Result<Prediction, SoulfanError> {
    let status = response.status();
    let body = response.text().await.map_err(|e| SoulfanError::Provider {
        message: format!("failed to read response body: {e}"),
        source: Some(Box::new(e)),
    })?;

    if !status.is_success() {
        let message = match serde_json::from_str::<ApiErrorResponse>(&body) {
            Ok(api_err) => format!("Replicate API error ({status}): {}", api_err.message()),
            Err(_) => format!("API returned {status}: {body}"),
        };
        return Err(SoulfanError::Provider {
            message,
            source: None,
        });
    }

    serde_json::from_str(&body).map_err(|e| SoulfanError::Provider {
        message: format!("failed to parse prediction: {e}"),
        source: Some(Box::new(e)),
    })
}

fn request_error(e: reqwest::Error) -> SoulfanError {
    SoulfanError::Provider {
        message: format!("HTTP request failed: {e}"),
        source: Some(Box::new(e)),
    }
}

fn build_error(e: reqwest::Error) -> SoulfanError {
    SoulfanError::Provider {
        message: format!("failed to build HTTP client: {e}"),
        source: Some(Box::new(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> ReplicateClient {
        ReplicateClient::new(
            &SecretString::from("r8_test".to_string()),
            base_url,
            Duration::from_millis(10),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn predict_returns_immediate_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/models/black-forest-labs/flux-schnell/predictions"))
            .and(header("authorization", "Bearer r8_test"))
            .and(header("prefer", "wait"))
            .and(body_partial_json(json!({"input": {"prompt": "a cat"}})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": "p1",
                "status": "succeeded",
                "output": ["https://replicate.delivery/p1/out-0.png"]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let prediction = client
            .predict("black-forest-labs/flux-schnell", json!({"prompt": "a cat"}))
            .await
            .unwrap();
        assert_eq!(prediction.status, PredictionStatus::Succeeded);
    }

    #[tokio::test]
    async fn predict_polls_until_terminal() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/models/meta/meta-llama-3-8b-instruct/predictions"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": "p2",
                "status": "starting",
                "urls": {"get": format!("{}/v1/predictions/p2", server.uri())}
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/predictions/p2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "p2",
                "status": "succeeded",
                "output": ["Hi", " there"]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let prediction = client
            .predict("meta/meta-llama-3-8b-instruct", json!({"prompt": "hello"}))
            .await
            .unwrap();
        assert_eq!(prediction.output, Some(json!(["Hi", " there"])));
    }

    #[tokio::test]
    async fn pinned_version_uses_predictions_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/predictions"))
            .and(body_partial_json(json!({"version": "abc123"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": "p3",
                "status": "succeeded",
                "output": "https://replicate.delivery/p3.png"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        client
            .predict("someone/model:abc123", json!({"prompt": "x"}))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn failed_prediction_is_provider_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": "p4",
                "status": "failed",
                "error": "NSFW content detected"
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client
            .predict("black-forest-labs/flux-schnell", json!({"prompt": "x"}))
            .await
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("NSFW content detected"), "got: {msg}");
    }

    #[tokio::test]
    async fn api_error_body_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "title": "Unauthenticated",
                "detail": "You did not pass a valid authentication token"
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client
            .predict("black-forest-labs/flux-schnell", json!({"prompt": "x"}))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Unauthenticated"));
    }

    #[tokio::test]
    async fn slow_prediction_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": "p5",
                "status": "processing",
                "urls": {"get": format!("{}/v1/predictions/p5", server.uri())}
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/predictions/p5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "p5",
                "status": "processing",
                "urls": {"get": format!("{}/v1/predictions/p5", server.uri())}
            })))
            .mount(&server)
            .await;

        let client = ReplicateClient::new(
            &SecretString::from("r8_test".to_string()),
            &server.uri(),
            Duration::from_millis(10),
            Duration::from_millis(200),
        )
        .unwrap();
        let err = client
            .predict("black-forest-labs/flux-schnell", json!({"prompt": "x"}))
            .await
            .unwrap_err();
        assert!(matches!(err, SoulfanError::Timeout { .. }));
    }

    #[tokio::test]
    async fn download_returns_bytes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/p1/out-0.png"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0x89, b'P', b'N', b'G']))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let bytes = client
            .download(&format!("{}/p1/out-0.png", server.uri()))
            .await
            .unwrap();
        assert_eq!(bytes, vec![0x89, b'P', b'N', b'G']);
    }

    #[tokio::test]
    async fn download_failure_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        assert!(client.download(&format!("{}/gone.png", server.uri())).await.is_err());
    }
}
