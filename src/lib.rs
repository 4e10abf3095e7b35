//! writewise - Rewrite text in a chosen tone and purpose with OpenAI or Gemini
//!
//! The library holds the provider-agnostic request pipeline (prompt template,
//! provider adapters, model resolution, orchestration) and the key-value
//! persistence it reads its settings from. The binary is a thin CLI on top.

pub mod cli;
pub mod config;
pub mod llm;
pub mod storage;

use thiserror::Error;

/// Main error type for writewise
#[derive(Error, Debug)]
pub enum WriteWiseError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid key or unable to fetch models")]
    InvalidCredential,

    #[error("No provider selected.")]
    NoProviderSelected,

    #[error("API error: {0}")]
    Api(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, WriteWiseError>;

/// Application name
pub const APP_NAME: &str = "writewise";
