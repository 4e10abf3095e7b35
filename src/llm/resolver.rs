//! Model selection against the cached model list

use crate::llm::types::ModelDescriptor;

/// Pick the model to call.
///
/// Keeps `configured` when the cache is empty or lists it; otherwise falls
/// back to the first cached model.
pub fn resolve_model<'a>(configured: &'a str, available: &'a [ModelDescriptor]) -> &'a str {
    match available.first() {
        None => configured,
        Some(_) if available.iter().any(|m| m.id == configured) => configured,
        Some(first) => &first.id,
    }
}
