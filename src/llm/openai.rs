use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::llm::provider::{status_error, CompletionRequest, ProviderAdapter};
use crate::llm::types::{ModelDescriptor, ProviderKind, NO_RESPONSE};
use crate::Result;

/// OpenAI chat-completions adapter (the `gpt` provider).
pub struct OpenAiAdapter {
    http: Client,
    endpoint: String,
}

impl OpenAiAdapter {
    pub fn new(http: Client, endpoint: &str) -> Self {
        Self {
            http,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }

    fn models_url(&self) -> String {
        format!("{}/models", self.endpoint)
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.endpoint)
    }
}

#[async_trait]
impl ProviderAdapter for OpenAiAdapter {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Gpt
    }

    async fn list_models(&self, api_key: &str) -> Result<Vec<ModelDescriptor>> {
        let response = self
            .http
            .get(self.models_url())
            .bearer_auth(api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        let payload: OpenAiModelList = response.json().await?;
        Ok(chat_models(payload))
    }

    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String> {
        let body = build_chat_request(request.model, request.prompt, request.context);
        tracing::debug!(url = %self.completions_url(), model = request.model, "Sending chat completion");

        let response = self
            .http
            .post(self.completions_url())
            .bearer_auth(request.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        let payload: OpenAiChatResponse = response.json().await?;
        Ok(first_choice_text(payload))
    }
}

/// Keep only chat models; the label is the id itself.
fn chat_models(list: OpenAiModelList) -> Vec<ModelDescriptor> {
    list.data
        .into_iter()
        .filter(|m| m.id.contains("gpt"))
        .map(|m| ModelDescriptor::new(m.id.clone(), m.id))
        .collect()
}

fn build_chat_request<'a>(model: &'a str, prompt: &'a str, context: &'a str) -> OpenAiChatRequest<'a> {
    let mut messages = vec![OpenAiMessage {
        role: "system",
        content: prompt,
    }];
    if !context.is_empty() {
        messages.push(OpenAiMessage {
            role: "user",
            content: context,
        });
    }

    OpenAiChatRequest { model, messages }
}

fn first_choice_text(payload: OpenAiChatResponse) -> String {
    payload
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message)
        .and_then(|m| m.content)
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| NO_RESPONSE.to_string())
}

#[derive(Debug, Serialize)]
struct OpenAiChatRequest<'a> {
    model: &'a str,
    messages: Vec<OpenAiMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct OpenAiMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct OpenAiChatResponse {
    #[serde(default)]
    choices: Vec<OpenAiChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: Option<OpenAiChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiModelList {
    #[serde(default)]
    data: Vec<OpenAiModel>,
}

#[derive(Debug, Deserialize)]
struct OpenAiModel {
    id: String,
}
