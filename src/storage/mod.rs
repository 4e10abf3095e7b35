//! Storage module for writewise
//!
//! A small key-value persistence interface with SQLite and in-memory
//! backends, plus typed preference accessors on top.

mod database;
mod models;
mod repository;
mod store;

pub use database::SqliteStore;
pub use models::{keys, Profile};
pub use repository::Preferences;
pub use store::{Entries, KeyValueStore, MemoryStore};
