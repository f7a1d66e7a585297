//! Embedding provider trait and factory.

use helpdesk_core::{AppConfig, AppError, AppResult};
use std::sync::Arc;

/// Trait for embedding providers.
///
/// The output dimension is determined by the remote model per call and
/// is not guaranteed stable across model versions; callers must not
/// assume a compile-time-fixed dimension.
#[async_trait::async_trait]
pub trait EmbeddingProvider: Send + Sync + std::fmt::Debug {
    /// Get provider name (e.g., "mock", "gemini")
    fn provider_name(&self) -> &str;

    /// Get model identifier
    fn model_name(&self) -> &str;

    /// Generate an embedding for a single text.
    ///
    /// Remote failures surface as `AppError::EmbeddingService` and are
    /// propagated, not retried — retry policy belongs to the caller.
    async fn embed(&self, text: &str) -> AppResult<Vec<f32>>;
}

/// Create an embedding provider based on configuration.
pub fn create_provider(config: &AppConfig) -> AppResult<Arc<dyn EmbeddingProvider>> {
    match config.provider.as_str() {
        "mock" => {
            let provider = super::providers::mock::MockProvider::new(384);
            Ok(Arc::new(provider))
        }

        "gemini" => {
            let api_key = config.api_key.as_deref().ok_or_else(|| {
                AppError::Config("Provider 'gemini' requires GEMINI_API_KEY".to_string())
            })?;
            let provider =
                super::providers::gemini::GeminiProvider::new(&config.model, api_key)?;
            Ok(Arc::new(provider))
        }

        _ => Err(AppError::Config(format!(
            "Unknown embedding provider: '{}'. Supported providers: mock, gemini",
            config.provider
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_mock_provider() {
        let config = AppConfig {
            provider: "mock".to_string(),
            ..AppConfig::default()
        };

        let provider = create_provider(&config).unwrap();
        assert_eq!(provider.provider_name(), "mock");
        assert_eq!(provider.model_name(), "feature-hash-v1");
    }

    #[test]
    fn test_create_gemini_without_key_fails() {
        let config = AppConfig {
            provider: "gemini".to_string(),
            api_key: None,
            ..AppConfig::default()
        };

        let result = create_provider(&config);
        assert!(result.is_err());
    }

    #[test]
    fn test_create_unknown_provider() {
        let config = AppConfig {
            provider: "unknown".to_string(),
            ..AppConfig::default()
        };

        let result = create_provider(&config);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Unknown embedding provider"));
    }

    #[tokio::test]
    async fn test_provider_embed_single() {
        let config = AppConfig {
            provider: "mock".to_string(),
            ..AppConfig::default()
        };
        let provider = create_provider(&config).unwrap();

        let embedding = provider.embed("test text").await.unwrap();
        assert_eq!(embedding.len(), 384);
    }
}
