//! writewise - Rewrite text in the tone and purpose you choose
//!
//! Entry point for the writewise CLI application.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use writewise::cli::commands::{GenerateOptions, SetupOptions};
use writewise::cli::{Cli, Commands};
use writewise::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.command {
        Commands::Completions { shell } => {
            writewise::cli::completions::print(shell);
        }
        command => {
            // Load configuration only for runtime commands.
            let settings = Settings::load()?;

            // Execute command
            match command {
                Commands::Setup {
                    provider,
                    api_key,
                    model,
                    tone,
                    purpose,
                    offline,
                } => {
                    writewise::cli::commands::setup(
                        &settings,
                        SetupOptions {
                            provider,
                            api_key,
                            model,
                            tone,
                            purpose,
                            offline,
                        },
                    )
                    .await?;
                }
                Commands::Validate { provider, api_key } => {
                    writewise::cli::commands::validate(&settings, provider, api_key).await?;
                }
                Commands::Models => {
                    writewise::cli::commands::list_models(&settings)?;
                }
                Commands::Generate {
                    text,
                    tone,
                    purpose,
                    context,
                } => {
                    writewise::cli::commands::generate(
                        &settings,
                        GenerateOptions {
                            text,
                            tone,
                            purpose,
                            context,
                        },
                    )
                    .await?;
                }
                Commands::Prompt(prompt_cmd) => {
                    writewise::cli::commands::prompt_command(&settings, prompt_cmd)?;
                }
                Commands::Status => {
                    writewise::cli::commands::show_status(&settings)?;
                }
                Commands::Clear { yes } => {
                    writewise::cli::commands::clear_data(&settings, yes)?;
                }
                Commands::Config(config_cmd) => {
                    writewise::cli::commands::config_command(&settings, config_cmd)?;
                }
                Commands::Completions { .. } => unreachable!(),
            }
        }
    }

    Ok(())
}
