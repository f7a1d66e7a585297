//! Gemini embedding provider.
//!
//! Calls the Generative Language API `embedContent` endpoint with
//! models like `text-embedding-004`. Failures are propagated as
//! `AppError::EmbeddingService` without internal retries; callers own
//! the retry/backoff policy.

use crate::embeddings::EmbeddingProvider;
use async_trait::async_trait;
use helpdesk_core::{AppError, AppResult};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default API base URL (overridable via GEMINI_API_URL)
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Request timeout in seconds
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Remote embedding provider backed by the Gemini API.
#[derive(Debug, Clone)]
pub struct GeminiProvider {
    /// HTTP client for API requests
    client: Client,
    /// API base URL
    base_url: String,
    /// Model name (e.g., "text-embedding-004")
    model: String,
    /// API key
    api_key: String,
}

/// Request payload for the embedContent endpoint.
#[derive(Debug, Clone, Serialize)]
struct EmbedContentRequest {
    content: Content,
}

#[derive(Debug, Clone, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize)]
struct Part {
    text: String,
}

/// Response from the embedContent endpoint.
#[derive(Debug, Clone, Deserialize)]
struct EmbedContentResponse {
    embedding: ContentEmbedding,
}

#[derive(Debug, Clone, Deserialize)]
struct ContentEmbedding {
    values: Vec<f32>,
}

/// Error body returned by the API.
#[derive(Debug, Clone, Deserialize)]
struct ApiErrorResponse {
    error: ApiError,
}

#[derive(Debug, Clone, Deserialize)]
struct ApiError {
    message: String,
}

impl GeminiProvider {
    /// Create a new Gemini provider.
    pub fn new(model: &str, api_key: &str) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| {
                AppError::EmbeddingService(format!("Failed to create HTTP client: {}", e))
            })?;

        let base_url =
            std::env::var("GEMINI_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            client,
            base_url,
            model: model.to_string(),
            api_key: api_key.to_string(),
        })
    }
}

#[async_trait]
impl EmbeddingProvider for GeminiProvider {
    fn provider_name(&self) -> &str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    async fn embed(&self, text: &str) -> AppResult<Vec<f32>> {
        if text.trim().is_empty() {
            return Err(AppError::InvalidDocument(
                "cannot embed empty text".to_string(),
            ));
        }

        let url = format!("{}/models/{}:embedContent", self.base_url, self.model);

        let request = EmbedContentRequest {
            content: Content {
                parts: vec![Part {
                    text: text.to_string(),
                }],
            },
        };

        debug!("Sending embedding request to {}", url);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                AppError::EmbeddingService(format!("Failed to reach embedding API: {}", e))
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            if let Ok(error_response) = serde_json::from_str::<ApiErrorResponse>(&error_text) {
                return Err(AppError::EmbeddingService(format!(
                    "Embedding API error ({}): {}",
                    status, error_response.error.message
                )));
            }

            return Err(AppError::EmbeddingService(format!(
                "Embedding API error ({}): {}",
                status, error_text
            )));
        }

        let body: EmbedContentResponse = response.json().await.map_err(|e| {
            AppError::EmbeddingService(format!("Failed to parse embedding response: {}", e))
        })?;

        if body.embedding.values.is_empty() {
            return Err(AppError::EmbeddingService(
                "Embedding API returned an empty vector".to_string(),
            ));
        }

        debug!(
            "Received {}-dimensional embedding from model '{}'",
            body.embedding.values.len(),
            self.model
        );

        Ok(body.embedding.values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_names() {
        let provider = GeminiProvider::new("text-embedding-004", "test-key").unwrap();
        assert_eq!(provider.provider_name(), "gemini");
        assert_eq!(provider.model_name(), "text-embedding-004");
    }

    #[tokio::test]
    async fn test_empty_text_rejected_before_network() {
        let provider = GeminiProvider::new("text-embedding-004", "test-key").unwrap();
        let result = provider.embed("   ").await;
        assert!(matches!(result, Err(AppError::InvalidDocument(_))));
    }

    #[test]
    fn test_request_serialization() {
        let request = EmbedContentRequest {
            content: Content {
                parts: vec![Part {
                    text: "VPN fails after update".to_string(),
                }],
            },
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["content"]["parts"][0]["text"], "VPN fails after update");
    }

    #[test]
    fn test_response_deserialization() {
        let body = r#"{"embedding": {"values": [0.1, -0.2, 0.3]}}"#;
        let parsed: EmbedContentResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.embedding.values, vec![0.1, -0.2, 0.3]);
    }

    #[test]
    fn test_error_body_deserialization() {
        let body = r#"{"error": {"message": "quota exceeded", "status": "RESOURCE_EXHAUSTED"}}"#;
        let parsed: ApiErrorResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.error.message, "quota exceeded");
    }
}
