use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::llm::provider::{status_error, CompletionRequest, ProviderAdapter};
use crate::llm::types::{ModelDescriptor, ProviderKind, NO_RESPONSE};
use crate::{Result, WriteWiseError};

const MODEL_PREFIX: &str = "models/";

/// Google Gemini adapter
pub struct GeminiAdapter {
    http: Client,
    endpoint: String,
}

impl GeminiAdapter {
    pub fn new(http: Client, endpoint: &str) -> Self {
        Self {
            http,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }

    fn models_url(&self) -> String {
        format!("{}/models", self.endpoint)
    }

    /// Generation URL; the API key goes in the `key` query parameter.
    fn generate_url(&self, model: &str) -> String {
        let model = model.strip_prefix(MODEL_PREFIX).unwrap_or(model);
        format!("{}/models/{}:generateContent", self.endpoint, model)
    }
}

#[async_trait]
impl ProviderAdapter for GeminiAdapter {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Gemini
    }

    async fn list_models(&self, api_key: &str) -> Result<Vec<ModelDescriptor>> {
        let response = self
            .http
            .get(self.models_url())
            .header("x-goog-api-key", api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        let payload: GeminiModelList = response.json().await?;
        named_models(payload)
    }

    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String> {
        let body = GeminiGenerateContentRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: prompt_with_context(request.prompt, request.context),
                }],
            }],
        };

        // The key travels in the query string; keep it out of logs and errors.
        tracing::debug!(url = %self.generate_url(request.model), "Sending Gemini generateContent");

        let response = self
            .http
            .post(self.generate_url(request.model))
            .query(&[("key", request.api_key)])
            .json(&body)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        let payload: GeminiGenerateContentResponse = response
            .json()
            .await
            .map_err(reqwest::Error::without_url)?;
        Ok(first_candidate_text(payload))
    }
}

fn prompt_with_context(prompt: &str, context: &str) -> String {
    if context.is_empty() {
        prompt.to_string()
    } else {
        format!("{}\nContext: {}", prompt, context)
    }
}

/// Keep models with a display name and a `models/` name.
///
/// A displayable entry without a name makes the whole list unusable.
fn named_models(list: GeminiModelList) -> Result<Vec<ModelDescriptor>> {
    let mut models = Vec::new();
    for model in list.models {
        let label = match model.display_name {
            Some(label) if !label.is_empty() => label,
            _ => continue,
        };
        let name = model.name.ok_or_else(|| {
            WriteWiseError::Api(format!("model '{}' has no name", label))
        })?;
        if name.contains(MODEL_PREFIX) {
            models.push(ModelDescriptor::new(name, label));
        }
    }
    Ok(models)
}

fn first_candidate_text(payload: GeminiGenerateContentResponse) -> String {
    payload
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text)
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| NO_RESPONSE.to_string())
}

#[derive(Debug, Serialize)]
struct GeminiGenerateContentRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GeminiGenerateContentResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContentResponse>,
}

#[derive(Debug, Deserialize)]
struct GeminiContentResponse {
    #[serde(default)]
    parts: Vec<GeminiPartResponse>,
}

#[derive(Debug, Deserialize)]
struct GeminiPartResponse {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiModelList {
    #[serde(default)]
    models: Vec<GeminiModel>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiModel {
    name: Option<String>,
    display_name: Option<String>,
}
