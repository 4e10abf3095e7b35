//! LLM module for writewise
//!
//! The provider-agnostic request pipeline: prompt templates, per-provider
//! adapters (OpenAI, Gemini), model resolution and the orchestrator that
//! ties them together.

mod gemini;
mod openai;
mod orchestrator;
mod provider;
mod resolver;
mod template;
mod types;

pub use gemini::GeminiAdapter;
pub use openai::OpenAiAdapter;
pub use orchestrator::Orchestrator;
pub use provider::{
    build_adapter, build_http_client, CompletionRequest, ProviderAdapter, ProviderEndpoints,
    DEFAULT_GEMINI_ENDPOINT, DEFAULT_OPENAI_ENDPOINT,
};
pub use resolver::resolve_model;
pub use template::{render, PromptTemplate, DEFAULT_PROMPT};
pub use types::{
    GenerationRequest, GenerationResult, ModelDescriptor, ProviderConfig, ProviderKind,
    Validation, NO_RESPONSE,
};
