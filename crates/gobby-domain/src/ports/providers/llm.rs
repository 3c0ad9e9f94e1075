//! LLM provider port, used by the workflow engine's `generate_summary`,
//! `generate_handoff`, `synthesize_title`, and `call_llm` actions.

use async_trait::async_trait;

use crate::error::Result;

/// Port for a single text-completion call against a configured LLM provider.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Provider identifier, e.g. `"anthropic"`, `"openai"`.
    fn name(&self) -> &str;

    /// Generates free text for `prompt`.
    async fn generate_text(&self, prompt: &str) -> Result<String>;
}
