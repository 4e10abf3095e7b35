//! Single entry point for a rewrite: render, resolve, dispatch, normalize.

use reqwest::Client;
use std::time::Duration;

use crate::config::Settings;
use crate::llm::provider::{
    build_adapter, build_http_client, CompletionRequest, ProviderAdapter, ProviderEndpoints,
};
use crate::llm::resolver::resolve_model;
use crate::llm::template::PromptTemplate;
use crate::llm::types::{
    GenerationRequest, GenerationResult, ModelDescriptor, ProviderConfig, ProviderKind,
    Validation,
};
use crate::{Result, WriteWiseError};

/// Stateless apart from the shared HTTP client, so calls are independent and
/// may run concurrently.
#[derive(Clone)]
pub struct Orchestrator {
    http: Client,
    endpoints: ProviderEndpoints,
}

impl Orchestrator {
    pub fn new(http: Client, endpoints: ProviderEndpoints) -> Self {
        Self { http, endpoints }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let http = build_http_client(Duration::from_secs(settings.http.timeout_secs))?;
        Ok(Self::new(http, ProviderEndpoints::from_settings(settings)))
    }

    pub fn adapter(&self, kind: ProviderKind) -> Box<dyn ProviderAdapter> {
        build_adapter(kind, self.http.clone(), &self.endpoints)
    }

    /// Check a key and fetch the provider's models. No provider means invalid.
    pub async fn validate(&self, provider: Option<ProviderKind>, api_key: &str) -> Validation {
        match provider {
            Some(kind) => self.adapter(kind).validate(api_key).await,
            None => Validation::invalid(),
        }
    }

    /// Rewrite `request` with the configured provider.
    ///
    /// Never fails: every error comes back as [`GenerationResult::Failure`].
    pub async fn orchestrate(
        &self,
        config: &ProviderConfig,
        template: &PromptTemplate,
        request: &GenerationRequest,
        available: &[ModelDescriptor],
    ) -> GenerationResult {
        let prompt = template.render(request);
        let model = resolve_model(&config.model, available);
        if model != config.model {
            tracing::info!(
                configured = %config.model,
                resolved = %model,
                "Configured model is not in the cached list; using the first available"
            );
        }

        let Some(kind) = config.provider else {
            tracing::warn!("Generation skipped: no provider configured");
            return GenerationResult::failure(WriteWiseError::NoProviderSelected.to_string());
        };

        tracing::debug!(provider = %kind, model, "Dispatching generation");
        self.adapter(kind)
            .generate(CompletionRequest {
                api_key: &config.api_key,
                model,
                prompt: &prompt,
                context: &request.context,
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn orchestrator(server: &mockito::ServerGuard) -> Orchestrator {
        Orchestrator::new(Client::new(), ProviderEndpoints::single(&server.url()))
    }

    fn request(context: &str) -> GenerationRequest {
        GenerationRequest {
            input_text: "hi there".to_string(),
            tone: "formal".to_string(),
            purpose: "email".to_string(),
            context: context.to_string(),
        }
    }

    #[tokio::test]
    async fn unknown_provider_fails_without_network() {
        let mut server = mockito::Server::new_async().await;
        let post = server
            .mock("POST", Matcher::Any)
            .expect(0)
            .create_async()
            .await;
        let get = server
            .mock("GET", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let config = ProviderConfig {
            provider: None,
            api_key: "k".to_string(),
            model: "gpt-4".to_string(),
        };
        let result = orchestrator(&server)
            .orchestrate(&config, &PromptTemplate::Default, &request(""), &[])
            .await;

        post.assert_async().await;
        get.assert_async().await;
        assert_eq!(result, GenerationResult::failure("No provider selected."));
    }

    #[tokio::test]
    async fn gpt_rewrite_with_default_template() {
        let expected_prompt = PromptTemplate::Default.render(&request(""));
        assert!(expected_prompt.contains("hi there"));
        assert!(expected_prompt.contains("formal"));
        assert!(expected_prompt.contains("email"));
        assert!(!expected_prompt.contains("[CONTEXT]"));

        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer k")
            .match_body(Matcher::Json(json!({
                "model": "gpt-4",
                "messages": [{ "role": "system", "content": expected_prompt }]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices":[{"message":{"content":"Hi there."}}]}"#)
            .create_async()
            .await;

        let config = ProviderConfig {
            provider: Some(ProviderKind::Gpt),
            api_key: "k".to_string(),
            model: "gpt-4".to_string(),
        };
        let result = orchestrator(&server)
            .orchestrate(&config, &PromptTemplate::Default, &request(""), &[])
            .await;

        mock.assert_async().await;
        assert_eq!(result, GenerationResult::success("Hi there."));
    }

    #[tokio::test]
    async fn gemini_uses_first_cached_model_when_configured_one_is_stale() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/models/gemini-pro:generateContent")
            .match_query(Matcher::UrlEncoded("key".into(), "k".into()))
            .match_body(Matcher::Json(json!({
                "contents": [{ "parts": [{ "text": "Polish hi there\nContext: for work" }] }]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"candidates":[{"content":{"parts":[{"text":"Hello there."}]}}]}"#)
            .create_async()
            .await;

        let config = ProviderConfig {
            provider: Some(ProviderKind::Gemini),
            api_key: "k".to_string(),
            model: "models/gemini-retired".to_string(),
        };
        let available = vec![
            ModelDescriptor::new("models/gemini-pro", "Gemini Pro"),
            ModelDescriptor::new("models/gemini-1.5-flash", "Gemini 1.5 Flash"),
        ];
        let template = PromptTemplate::Override("Polish [INPUT]".to_string());

        let result = orchestrator(&server)
            .orchestrate(&config, &template, &request("for work"), &available)
            .await;

        mock.assert_async().await;
        assert_eq!(result, GenerationResult::success("Hello there."));
    }

    #[tokio::test]
    async fn unreachable_provider_is_a_failure() {
        // Nothing listens on the discard port.
        let orchestrator = Orchestrator::new(
            Client::new(),
            ProviderEndpoints::single("http://127.0.0.1:9"),
        );
        let config = ProviderConfig {
            provider: Some(ProviderKind::Gpt),
            api_key: "k".to_string(),
            model: "gpt-4".to_string(),
        };

        let result = orchestrator
            .orchestrate(&config, &PromptTemplate::Default, &request(""), &[])
            .await;
        assert!(!result.is_success());
    }

    #[tokio::test]
    async fn validate_without_provider_is_invalid() {
        let orchestrator = Orchestrator::new(Client::new(), ProviderEndpoints::default());
        assert_eq!(orchestrator.validate(None, "k").await, Validation::invalid());
    }
}
