//! Prompt templates and placeholder substitution

use crate::llm::types::GenerationRequest;

/// Built-in instruction template used when no override is stored.
pub const DEFAULT_PROMPT: &str = "You are WriteWise, an AI writing assistant. \
Rewrite the following text/sentence by polishing it. Format it according to the user's selected tone, purpose, and context.\n\
\n\
Instructions:\n\
- Carefully read the input text.\n\
- Rewrite it to match the specified tone and purpose.\n\
- Use simple words.\n\
- Do not add information not present in the input.\n\
- Output only the improved text.\n\
- Do not rewrite if the text or sentence if already correct.\n\
\n\
[INPUT]\n\
\n\
Tone: [TONE]\n\
Purpose: [PURPOSE]\n\
Context: [CONTEXT]";

const INPUT: &str = "[INPUT]";
const TONE: &str = "[TONE]";
const PURPOSE: &str = "[PURPOSE]";
const CONTEXT: &str = "[CONTEXT]";

/// A prompt template, either the default or a user override
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptTemplate {
    Default,
    Override(String),
}

impl PromptTemplate {
    /// Treat an empty override as no override.
    pub fn from_override(text: Option<String>) -> Self {
        match text {
            Some(text) if !text.is_empty() => Self::Override(text),
            _ => Self::Default,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Default => DEFAULT_PROMPT,
            Self::Override(text) => text,
        }
    }

    pub fn is_override(&self) -> bool {
        matches!(self, Self::Override(_))
    }

    /// Substitute the request values into the template.
    pub fn render(&self, request: &GenerationRequest) -> String {
        render(self.text(), request)
    }
}

/// Replace every `[INPUT]`, `[TONE]`, `[PURPOSE]` and `[CONTEXT]` token in
/// `template`. All other text is copied through untouched, and substituted
/// values are never scanned for tokens themselves.
pub fn render(template: &str, request: &GenerationRequest) -> String {
    let mut out = String::with_capacity(template.len() + request.input_text.len());
    let mut rest = template;

    while let Some(start) = rest.find('[') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];

        let substitution = [
            (INPUT, request.input_text.as_str()),
            (TONE, request.tone.as_str()),
            (PURPOSE, request.purpose.as_str()),
            (CONTEXT, request.context.as_str()),
        ]
        .into_iter()
        .find(|(token, _)| tail.starts_with(token));

        match substitution {
            Some((token, value)) => {
                out.push_str(value);
                rest = &tail[token.len()..];
            }
            None => {
                out.push('[');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}
