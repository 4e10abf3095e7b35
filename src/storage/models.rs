//! Stored keys and the profile they make up

use crate::llm::{ModelDescriptor, ProviderConfig};

/// Keys written to the preference store
pub mod keys {
    pub const PROVIDER: &str = "provider";
    pub const API_KEY: &str = "apiKey";
    pub const MODEL: &str = "model";
    pub const TONE: &str = "tone";
    pub const PURPOSE: &str = "purpose";
    pub const AVAILABLE_MODELS: &str = "availableModels";
    pub const PROMPT_OVERRIDE: &str = "promptOverride";
    pub const DEFAULT_PROMPT: &str = "defaultPrompt";

    /// Keys making up a saved profile
    pub const PROFILE: [&str; 6] = [PROVIDER, API_KEY, MODEL, TONE, PURPOSE, AVAILABLE_MODELS];
}

/// Everything the settings form saves in one go
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    /// Provider, key and chosen model
    pub config: ProviderConfig,

    /// Preferred tone (empty when never saved)
    pub tone: String,

    /// Preferred purpose (empty when never saved)
    pub purpose: String,

    /// Models cached by the last successful validation
    pub available_models: Vec<ModelDescriptor>,
}
