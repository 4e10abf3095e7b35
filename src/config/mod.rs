//! Configuration module for writewise
//!
//! Handles loading and managing application settings from TOML files.

mod settings;

pub use settings::{DefaultSettings, GeneralSettings, HttpSettings, Settings, API_KEY_ENV};
