//! CLI argument definitions using clap

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::llm::ProviderKind;

/// writewise - Rewrite text in the tone and purpose you choose
#[derive(Parser, Debug)]
#[command(name = "writewise")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Save provider, API key, model, tone and purpose
    Setup {
        /// Text-generation provider
        #[arg(short, long, value_enum)]
        provider: ProviderKind,

        /// API key (defaults to WRITEWISE_API_KEY)
        #[arg(long)]
        api_key: Option<String>,

        /// Model id (defaults to the first model the key can use)
        #[arg(short, long)]
        model: Option<String>,

        /// Preferred tone
        #[arg(long)]
        tone: Option<String>,

        /// Preferred purpose
        #[arg(long)]
        purpose: Option<String>,

        /// Save without checking the key against the provider
        #[arg(long)]
        offline: bool,
    },

    /// Test an API key and refresh the cached model list
    Validate {
        /// Provider to test (defaults to the saved one)
        #[arg(short, long, value_enum)]
        provider: Option<ProviderKind>,

        /// API key to test (defaults to the saved one)
        #[arg(long)]
        api_key: Option<String>,
    },

    /// List cached models
    Models,

    /// Rewrite text with the configured provider
    Generate {
        /// Text to rewrite (read from stdin when omitted)
        text: Option<String>,

        /// Tone for this rewrite (defaults to the saved tone)
        #[arg(short, long)]
        tone: Option<String>,

        /// Purpose for this rewrite (defaults to the saved purpose)
        #[arg(short, long)]
        purpose: Option<String>,

        /// Extra context passed to the model
        #[arg(short, long)]
        context: Option<String>,
    },

    /// Prompt template management
    #[command(subcommand)]
    Prompt(PromptCommand),

    /// Show the saved profile
    Status,

    /// Remove the API key, settings and prompt override
    Clear {
        /// Confirm removal of all stored data
        #[arg(long)]
        yes: bool,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum PromptCommand {
    /// Show the prompt template in use
    Show,

    /// Override the prompt template
    Set {
        /// Template text using [INPUT], [TONE], [PURPOSE] and [CONTEXT]
        #[arg(conflicts_with = "file", required_unless_present = "file")]
        text: Option<String>,

        /// Read the template from a file
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Remove the override and use the default template
    Reset,

    /// Print the built-in default template
    Default,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}
