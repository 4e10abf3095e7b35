use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use std::time::Duration;

use crate::config::Settings;
use crate::llm::gemini::GeminiAdapter;
use crate::llm::openai::OpenAiAdapter;
use crate::llm::types::{GenerationResult, ModelDescriptor, ProviderKind, Validation};
use crate::{Result, WriteWiseError};

pub const DEFAULT_OPENAI_ENDPOINT: &str = "https://api.openai.com/v1";
pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Completion request payload handed to an adapter.
pub struct CompletionRequest<'a> {
    pub api_key: &'a str,
    pub model: &'a str,
    /// Rendered prompt
    pub prompt: &'a str,
    /// Raw user context, empty when none
    pub context: &'a str,
}

#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    fn kind(&self) -> ProviderKind;

    /// Fetch the models this key may use, already filtered for the provider.
    async fn list_models(&self, api_key: &str) -> Result<Vec<ModelDescriptor>>;

    /// Issue one completion call and extract its text.
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String>;

    /// Check an API key. Never fails: any error means the key is invalid.
    async fn validate(&self, api_key: &str) -> Validation {
        match self.list_models(api_key).await {
            Ok(models) => {
                tracing::debug!(provider = %self.kind(), count = models.len(), "API key accepted");
                Validation::valid(models)
            }
            Err(e) => {
                tracing::warn!(provider = %self.kind(), "API key validation failed: {}", e);
                Validation::invalid()
            }
        }
    }

    /// Run a completion and fold any error into a displayable failure.
    async fn generate(&self, request: CompletionRequest<'_>) -> GenerationResult {
        match self.complete(request).await {
            Ok(text) => GenerationResult::success(text),
            Err(e) => {
                tracing::warn!(provider = %self.kind(), "Generation failed: {}", e);
                GenerationResult::failure(e.to_string())
            }
        }
    }
}

/// Base URLs of the provider APIs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderEndpoints {
    pub openai: String,
    pub gemini: String,
}

impl Default for ProviderEndpoints {
    fn default() -> Self {
        Self {
            openai: DEFAULT_OPENAI_ENDPOINT.to_string(),
            gemini: DEFAULT_GEMINI_ENDPOINT.to_string(),
        }
    }
}

impl ProviderEndpoints {
    /// Endpoints from settings, falling back to the public APIs.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            openai: normalize_endpoint(&settings.http.openai_endpoint, DEFAULT_OPENAI_ENDPOINT),
            gemini: normalize_endpoint(&settings.http.gemini_endpoint, DEFAULT_GEMINI_ENDPOINT),
        }
    }

    /// Point both providers at one base URL (used against local mock servers).
    pub fn single(base: &str) -> Self {
        let base = base.trim_end_matches('/').to_string();
        Self {
            openai: base.clone(),
            gemini: base,
        }
    }
}

fn normalize_endpoint(configured: &str, default: &str) -> String {
    let configured = configured.trim();
    if configured.is_empty() {
        default.to_string()
    } else {
        configured.trim_end_matches('/').to_string()
    }
}

/// Build the shared HTTP client.
pub fn build_http_client(timeout: Duration) -> Result<Client> {
    Ok(Client::builder().timeout(timeout).build()?)
}

/// Build the adapter for a provider.
pub fn build_adapter(
    kind: ProviderKind,
    http: Client,
    endpoints: &ProviderEndpoints,
) -> Box<dyn ProviderAdapter> {
    match kind {
        ProviderKind::Gpt => Box::new(OpenAiAdapter::new(http, &endpoints.openai)),
        ProviderKind::Gemini => Box::new(GeminiAdapter::new(http, &endpoints.gemini)),
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Turn a non-success response into an API error, keeping the provider's
/// message when the body carries one.
pub(crate) async fn status_error(response: Response) -> WriteWiseError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    let message = serde_json::from_str::<ErrorEnvelope>(&body)
        .ok()
        .and_then(|envelope| envelope.error.message)
        .filter(|m| !m.trim().is_empty());

    match message {
        Some(message) => WriteWiseError::Api(format!("{} ({})", message.trim(), status)),
        None => WriteWiseError::Api(status.to_string()),
    }
}
