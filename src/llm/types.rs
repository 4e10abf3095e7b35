//! Data types shared by the generation pipeline

use serde::{Deserialize, Serialize};

/// Text returned when a provider answers successfully but without content.
pub const NO_RESPONSE: &str = "No response.";

/// Supported text-generation providers
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// OpenAI chat completions
    Gpt,
    /// Google Gemini generateContent
    Gemini,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gpt => "gpt",
            Self::Gemini => "gemini",
        }
    }

    /// Parse a stored provider tag. Unknown tags yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "gpt" => Some(Self::Gpt),
            "gemini" => Some(Self::Gemini),
            _ => None,
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Credentials and model choice for one provider.
///
/// `provider` is `None` when nothing (or an unrecognized tag) is stored, in
/// which case generation is skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderConfig {
    pub provider: Option<ProviderKind>,
    pub api_key: String,
    pub model: String,
}

/// A model advertised by a provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    /// Identifier sent back to the provider
    pub id: String,

    /// Human-readable name
    pub label: String,
}

impl ModelDescriptor {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// One rewrite request
#[derive(Debug, Clone, Default)]
pub struct GenerationRequest {
    pub input_text: String,
    pub tone: String,
    pub purpose: String,
    /// Extra context; empty when the user gave none
    pub context: String,
}

/// Outcome of a generation call, ready for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationResult {
    Success { text: String },
    Failure { reason: String },
}

impl GenerationResult {
    pub fn success(text: impl Into<String>) -> Self {
        Self::Success { text: text.into() }
    }

    pub fn failure(reason: impl Into<String>) -> Self {
        Self::Failure {
            reason: reason.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Result of checking an API key against the provider's model list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validation {
    pub valid: bool,
    pub models: Vec<ModelDescriptor>,
}

impl Validation {
    pub fn invalid() -> Self {
        Self::default()
    }

    pub fn valid(models: Vec<ModelDescriptor>) -> Self {
        Self {
            valid: true,
            models,
        }
    }
}
