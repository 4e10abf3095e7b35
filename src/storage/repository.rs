//! Typed access to the preference store
//!
//! Provides a higher-level interface over the raw keys.

use serde_json::{json, Value};

use crate::config::Settings;
use crate::llm::{ModelDescriptor, PromptTemplate, ProviderConfig, ProviderKind, DEFAULT_PROMPT};
use crate::storage::models::{keys, Profile};
use crate::storage::store::{Entries, KeyValueStore};
use crate::storage::SqliteStore;
use crate::Result;

/// Preferences backed by any key-value store
pub struct Preferences<S> {
    store: S,
}

impl Preferences<SqliteStore> {
    /// Open the on-disk preference store
    pub fn open(settings: &Settings) -> Result<Self> {
        Ok(Self::new(SqliteStore::open(settings)?))
    }
}

impl<S: KeyValueStore> Preferences<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load the saved profile; missing keys read as empty.
    pub fn load_profile(&self) -> Result<Profile> {
        let data = self.store.get(&keys::PROFILE)?;

        Ok(Profile {
            config: config_from(&data),
            tone: string_at(&data, keys::TONE),
            purpose: string_at(&data, keys::PURPOSE),
            available_models: models_from(&data),
        })
    }

    /// Save every profile field at once.
    pub fn save_profile(&self, profile: &Profile) -> Result<()> {
        let mut entries = Entries::new();
        if let Some(kind) = profile.config.provider {
            entries.insert(keys::PROVIDER.to_string(), json!(kind.as_str()));
        }
        entries.insert(keys::API_KEY.to_string(), json!(profile.config.api_key));
        entries.insert(keys::MODEL.to_string(), json!(profile.config.model));
        entries.insert(keys::TONE.to_string(), json!(profile.tone));
        entries.insert(keys::PURPOSE.to_string(), json!(profile.purpose));
        entries.insert(
            keys::AVAILABLE_MODELS.to_string(),
            serde_json::to_value(&profile.available_models)?,
        );
        self.store.set(entries)?;

        if profile.config.provider.is_none() {
            self.store.remove(keys::PROVIDER)?;
        }
        tracing::debug!(
            provider = ?profile.config.provider,
            model = %profile.config.model,
            "Profile saved"
        );
        Ok(())
    }

    /// Provider, key and model only
    pub fn provider_config(&self) -> Result<ProviderConfig> {
        let data = self.store.get(&[keys::PROVIDER, keys::API_KEY, keys::MODEL])?;
        Ok(config_from(&data))
    }

    pub fn available_models(&self) -> Result<Vec<ModelDescriptor>> {
        let data = self.store.get(&[keys::AVAILABLE_MODELS])?;
        Ok(models_from(&data))
    }

    /// Replace the cached model list.
    pub fn cache_models(&self, models: &[ModelDescriptor]) -> Result<()> {
        self.set_one(keys::AVAILABLE_MODELS, serde_json::to_value(models)?)
    }

    /// The override if one is stored, otherwise the default.
    pub fn prompt_template(&self) -> Result<PromptTemplate> {
        let data = self.store.get(&[keys::PROMPT_OVERRIDE])?;
        let text = data
            .get(keys::PROMPT_OVERRIDE)
            .and_then(Value::as_str)
            .map(str::to_string);
        Ok(PromptTemplate::from_override(text))
    }

    pub fn set_prompt_override(&self, text: &str) -> Result<()> {
        self.set_one(keys::PROMPT_OVERRIDE, json!(text))
    }

    /// Drop the override so the default applies again.
    pub fn reset_prompt_override(&self) -> Result<()> {
        self.store.remove(keys::PROMPT_OVERRIDE)
    }

    /// Publish the built-in template under `defaultPrompt`.
    pub fn record_default_prompt(&self) -> Result<()> {
        self.set_one(keys::DEFAULT_PROMPT, json!(DEFAULT_PROMPT))
    }

    /// True once both an API key and a model are stored.
    pub fn is_configured(&self) -> Result<bool> {
        let config = self.provider_config()?;
        Ok(!config.api_key.is_empty() && !config.model.is_empty())
    }

    /// Remove everything: key, settings and prompt override.
    pub fn clear(&self) -> Result<()> {
        tracing::info!("Clearing all stored preferences");
        self.store.clear()
    }

    fn set_one(&self, key: &str, value: Value) -> Result<()> {
        let mut entries = Entries::new();
        entries.insert(key.to_string(), value);
        self.store.set(entries)
    }
}

fn string_at(data: &Entries, key: &str) -> String {
    data.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn config_from(data: &Entries) -> ProviderConfig {
    let provider = data
        .get(keys::PROVIDER)
        .and_then(Value::as_str)
        .and_then(ProviderKind::parse);

    ProviderConfig {
        provider,
        api_key: string_at(data, keys::API_KEY),
        model: string_at(data, keys::MODEL),
    }
}

fn models_from(data: &Entries) -> Vec<ModelDescriptor> {
    match data.get(keys::AVAILABLE_MODELS) {
        Some(value) => serde_json::from_value(value.clone()).unwrap_or_else(|e| {
            tracing::warn!("Ignoring malformed cached model list: {}", e);
            Vec::new()
        }),
        None => Vec::new(),
    }
}
