//! CLI command implementations

use anyhow::{Context, Result};
use std::io::{IsTerminal, Read};
use std::path::Path;

use crate::cli::args::{ConfigCommand, PromptCommand};
use crate::config::Settings;
use crate::llm::{
    GenerationRequest, GenerationResult, ModelDescriptor, Orchestrator, ProviderConfig,
    ProviderKind, DEFAULT_PROMPT,
};
use crate::storage::{Preferences, Profile};
use crate::WriteWiseError;

const PLACEHOLDERS: [&str; 4] = ["[INPUT]", "[TONE]", "[PURPOSE]", "[CONTEXT]"];

/// Options accepted by `writewise setup`
#[derive(Debug)]
pub struct SetupOptions {
    pub provider: ProviderKind,
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub tone: Option<String>,
    pub purpose: Option<String>,
    pub offline: bool,
}

/// Validate the key, pick a model and save the profile
pub async fn setup(settings: &Settings, options: SetupOptions) -> Result<()> {
    let provider = options.provider;
    let prefs = Preferences::open(settings)?;
    let existing = prefs.load_profile()?;
    let same_provider = existing.config.provider == Some(provider);

    let api_key = non_empty(options.api_key)
        .or_else(|| settings.env_api_key.clone())
        .context("An API key is required. Pass --api-key or set WRITEWISE_API_KEY.")?;

    let available_models = if options.offline {
        if same_provider {
            existing.available_models.clone()
        } else {
            Vec::new()
        }
    } else {
        eprintln!("Testing...");
        let validation = Orchestrator::from_settings(settings)?
            .validate(Some(provider), &api_key)
            .await;
        if !validation.valid {
            return Err(WriteWiseError::InvalidCredential.into());
        }
        validation.models
    };

    let requested = non_empty(options.model).or_else(|| {
        if same_provider {
            non_empty(Some(existing.config.model.clone()))
        } else {
            None
        }
    });
    let model = choose_model(requested, &available_models)
        .context("No model available. Pass --model to choose one.")?;

    let profile = Profile {
        config: ProviderConfig {
            provider: Some(provider),
            api_key,
            model,
        },
        tone: non_empty(options.tone)
            .or_else(|| non_empty(Some(existing.tone)))
            .unwrap_or_else(|| settings.defaults.tone.clone()),
        purpose: non_empty(options.purpose)
            .or_else(|| non_empty(Some(existing.purpose)))
            .unwrap_or_else(|| settings.defaults.purpose.clone()),
        available_models,
    };
    prefs.save_profile(&profile)?;

    println!(
        "Saved {} profile (model: {}, {} models cached)",
        provider,
        profile.config.model,
        profile.available_models.len()
    );

    Ok(())
}

/// Test an API key and cache the models it can use
pub async fn validate(
    settings: &Settings,
    provider: Option<ProviderKind>,
    api_key: Option<String>,
) -> Result<()> {
    let prefs = Preferences::open(settings)?;
    let saved = prefs.provider_config()?;

    let Some(provider) = provider.or(saved.provider) else {
        return Err(WriteWiseError::NoProviderSelected.into());
    };
    let api_key = non_empty(api_key)
        .or_else(|| non_empty(Some(saved.api_key.clone())))
        .or_else(|| settings.env_api_key.clone())
        .unwrap_or_default();

    eprintln!("Testing...");
    let validation = Orchestrator::from_settings(settings)?
        .validate(Some(provider), &api_key)
        .await;

    if !validation.valid {
        return Err(WriteWiseError::InvalidCredential.into());
    }

    println!("Valid!");
    for model in &validation.models {
        println!("  {:<40} {}", model.id, model.label);
    }

    if saved.provider == Some(provider) {
        prefs.cache_models(&validation.models)?;
    } else {
        println!();
        println!("Models were not cached; run `writewise setup` to switch providers.");
    }

    Ok(())
}

/// List cached models, marking the configured one
pub fn list_models(settings: &Settings) -> Result<()> {
    let prefs = Preferences::open(settings)?;
    let profile = prefs.load_profile()?;

    if profile.available_models.is_empty() {
        println!("No cached models. Run `writewise validate` to fetch them.");
        return Ok(());
    }

    for model in &profile.available_models {
        let marker = if model.id == profile.config.model { "*" } else { " " };
        println!("{} {:<40} {}", marker, model.id, model.label);
    }

    Ok(())
}

/// Options accepted by `writewise generate`
#[derive(Debug, Default)]
pub struct GenerateOptions {
    pub text: Option<String>,
    pub tone: Option<String>,
    pub purpose: Option<String>,
    pub context: Option<String>,
}

/// Rewrite text with the saved provider and print the result
pub async fn generate(settings: &Settings, options: GenerateOptions) -> Result<()> {
    let input = match options.text {
        Some(text) => text,
        None => strip_line_ending(read_stdin()?),
    };
    if input.trim().is_empty() {
        anyhow::bail!("Please enter some text.");
    }

    let prefs = Preferences::open(settings)?;
    prefs.record_default_prompt()?;

    let profile = prefs.load_profile()?;
    let mut config = profile.config;
    if config.api_key.is_empty() {
        if let Some(key) = settings.env_api_key.clone() {
            config.api_key = key;
        }
    }

    let request = GenerationRequest {
        input_text: input,
        tone: non_empty(options.tone)
            .or_else(|| non_empty(Some(profile.tone)))
            .unwrap_or_else(|| settings.defaults.tone.clone()),
        purpose: non_empty(options.purpose)
            .or_else(|| non_empty(Some(profile.purpose)))
            .unwrap_or_else(|| settings.defaults.purpose.clone()),
        context: options.context.unwrap_or_default(),
    };
    let template = prefs.prompt_template()?;

    tracing::info!("Generating...");
    let result = Orchestrator::from_settings(settings)?
        .orchestrate(&config, &template, &request, &profile.available_models)
        .await;

    match result {
        GenerationResult::Success { text } => {
            println!("{}", text);
            Ok(())
        }
        GenerationResult::Failure { reason } => anyhow::bail!("{}", reason),
    }
}

/// Handle prompt subcommands
pub fn prompt_command(settings: &Settings, cmd: PromptCommand) -> Result<()> {
    let prefs = Preferences::open(settings)?;
    prefs.record_default_prompt()?;

    match cmd {
        PromptCommand::Show => {
            let template = prefs.prompt_template()?;
            let source = if template.is_override() { "override" } else { "default" };
            eprintln!("Prompt template ({}):", source);
            println!("{}", template.text());
        }
        PromptCommand::Set { text, file } => {
            let text = match (text, file) {
                (Some(text), _) => text,
                (None, Some(path)) => read_template_file(&path)?,
                (None, None) => anyhow::bail!("Pass the template text or --file"),
            };

            let missing = missing_placeholders(&text);
            if missing.len() == PLACEHOLDERS.len() {
                eprintln!("warning: template contains no placeholders; the input text will not be sent");
            } else if missing.contains(&"[INPUT]") {
                eprintln!("warning: template has no [INPUT] placeholder");
            }

            prefs.set_prompt_override(&text)?;
            println!("Prompt override saved");
        }
        PromptCommand::Reset => {
            prefs.reset_prompt_override()?;
            println!("Prompt reset to default");
        }
        PromptCommand::Default => {
            println!("{}", DEFAULT_PROMPT);
        }
    }

    Ok(())
}

/// Show the saved profile with the API key masked
pub fn show_status(settings: &Settings) -> Result<()> {
    let prefs = Preferences::open(settings)?;
    let profile = prefs.load_profile()?;
    let template = prefs.prompt_template()?;

    let provider = profile
        .config
        .provider
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "(none)".to_string());

    println!("Provider: {}", provider);
    println!("API key: {}", mask_key(&profile.config.api_key));
    println!("Model: {}", display_or_unset(&profile.config.model));
    println!("Tone: {}", display_or_unset(&profile.tone));
    println!("Purpose: {}", display_or_unset(&profile.purpose));
    println!("Cached models: {}", profile.available_models.len());
    println!(
        "Prompt: {}",
        if template.is_override() { "override" } else { "default" }
    );

    if !prefs.is_configured()? {
        println!();
        println!("Not configured yet. Run `writewise setup --provider <gpt|gemini> --api-key <KEY>`.");
    }

    Ok(())
}

/// Remove all stored data
pub fn clear_data(settings: &Settings, yes: bool) -> Result<()> {
    if !yes {
        anyhow::bail!(
            "This removes your API key, settings and prompt override. Re-run with --yes to confirm."
        );
    }

    let prefs = Preferences::open(settings)?;
    prefs.clear()?;
    println!("All data cleared!");

    Ok(())
}

/// Handle config subcommands
pub fn config_command(settings: &Settings, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show => {
            let toml = toml::to_string_pretty(settings)?;
            println!("{}", toml);
        }
        ConfigCommand::Path => {
            let path = Settings::config_path()?;
            println!("{}", path.display());
        }
        ConfigCommand::Init { force } => {
            let path = Settings::config_path()?;
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    path.display()
                );
            }
            Settings::write_default(&path)?;
            println!("Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}

// Helper functions

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Keep the requested model if it is offered, otherwise take the first available one.
fn choose_model(requested: Option<String>, available: &[ModelDescriptor]) -> Option<String> {
    match (requested, available.first()) {
        (Some(model), Some(first)) if !available.iter().any(|m| m.id == model) => {
            tracing::warn!(
                "Model '{}' is not offered for this key; using '{}'",
                model,
                first.id
            );
            Some(first.id.clone())
        }
        (Some(model), _) => Some(model),
        (None, first) => first.map(|m| m.id.clone()),
    }
}

fn read_stdin() -> Result<String> {
    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Ok(String::new());
    }

    let mut input = String::new();
    stdin
        .lock()
        .read_to_string(&mut input)
        .context("Failed to read text from stdin")?;
    Ok(input)
}

/// Drop the single line ending that piped input usually carries.
fn strip_line_ending(mut input: String) -> String {
    if input.ends_with('\n') {
        input.pop();
        if input.ends_with('\r') {
            input.pop();
        }
    }
    input
}

fn read_template_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read template file: {}", path.display()))
}

fn missing_placeholders(template: &str) -> Vec<&'static str> {
    PLACEHOLDERS
        .into_iter()
        .filter(|p| !template.contains(*p))
        .collect()
}

fn mask_key(key: &str) -> String {
    if key.is_empty() {
        return "(not set)".to_string();
    }

    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "****".to_string();
    }

    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{}", tail)
}

fn display_or_unset(value: &str) -> &str {
    if value.is_empty() {
        "(not set)"
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn models(ids: &[&str]) -> Vec<ModelDescriptor> {
        ids.iter().map(|id| ModelDescriptor::new(*id, *id)).collect()
    }

    #[test]
    fn choose_model_prefers_request_then_first_available() {
        let available = models(&["gpt-4o", "gpt-4"]);
        assert_eq!(
            choose_model(Some("gpt-4".to_string()), &available).as_deref(),
            Some("gpt-4")
        );
        assert_eq!(choose_model(None, &available).as_deref(), Some("gpt-4o"));
        assert_eq!(choose_model(None, &[]), None);
        assert_eq!(
            choose_model(Some("custom".to_string()), &[]).as_deref(),
            Some("custom")
        );
        assert_eq!(
            choose_model(Some("gpt-retired".to_string()), &available).as_deref(),
            Some("gpt-4o")
        );
    }

    #[test]
    fn api_keys_are_masked() {
        assert_eq!(mask_key(""), "(not set)");
        assert_eq!(mask_key("short"), "****");
        assert_eq!(mask_key("sk-abcdefgh1234"), "****1234");
    }

    #[test]
    fn missing_placeholders_are_reported() {
        assert_eq!(
            missing_placeholders("[INPUT] in [TONE]"),
            vec!["[PURPOSE]", "[CONTEXT]"]
        );
        assert!(missing_placeholders(DEFAULT_PROMPT).is_empty());
    }

    #[test]
    fn only_the_final_line_ending_is_stripped() {
        assert_eq!(strip_line_ending("fix this\n".to_string()), "fix this");
        assert_eq!(strip_line_ending("fix this\r\n".to_string()), "fix this");
        assert_eq!(strip_line_ending("  two\nlines\n\n".to_string()), "  two\nlines\n");
        assert_eq!(strip_line_ending(" keep ".to_string()), " keep ");
    }

    #[test]
    fn blank_values_count_as_missing() {
        assert_eq!(non_empty(Some("  ".to_string())), None);
        assert_eq!(non_empty(Some(" formal ".to_string())).as_deref(), Some("formal"));
        assert_eq!(non_empty(None), None);
    }
}
