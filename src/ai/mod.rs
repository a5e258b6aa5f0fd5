use colored::*;
use tracing::debug;

mod backend;
mod error;
mod fallback;

pub use backend::{ChatBackend, OpenAiBackend};
pub use error::{AIError, GenerationError};
pub use fallback::{first_success, Exhausted};

pub const TEMPERATURE: f32 = 0.7;
pub const CHAT_MAX_TOKENS: u32 = 1024;

/// Substrings identifying text-generation model families.
const TEXT_MODEL_FAMILIES: &[&str] = &["llama", "qwen", "mixtral", "gemma"];

/// Prefix of the string returned by [`GenerationClient::generate`] when
/// no model could answer.
pub const FAILURE_PREFIX: &str = "Error: ";

/// Generates text by trying candidate models until one answers.
pub struct GenerationClient<B> {
    backend: B,
    fallback_models: Vec<String>,
}

impl<B: ChatBackend> GenerationClient<B> {
    pub fn new(backend: B, fallback_models: Vec<String>) -> Self {
        Self {
            backend,
            fallback_models,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Text-model identifiers currently served, or an empty list if the
    /// service could not be reached.
    pub async fn discover_models(&self) -> Vec<String> {
        match self.backend.list_models().await {
            Ok(models) => filter_text_models(models),
            Err(e) => {
                debug!(error = %e, "model listing failed");
                eprintln!("{} {}", "Failed to fetch models:".red(), e);
                Vec::new()
            }
        }
    }

    /// Discovered models, or the configured fallback sequence.
    pub async fn candidates(&self) -> Vec<String> {
        let discovered = self.discover_models().await;
        if discovered.is_empty() {
            self.fallback_models.clone()
        } else {
            discovered
        }
    }

    pub async fn try_generate(
        &self,
        prompt: &str,
        max_tokens: u32,
    ) -> Result<String, GenerationError> {
        let candidates = self.candidates().await;

        first_success(&candidates, move |model| async move {
            let answer = self
                .backend
                .complete(model, prompt, max_tokens, TEMPERATURE)
                .await
                .and_then(|text| {
                    let text = text.trim();
                    if text.is_empty() {
                        Err(AIError::ParseError("Empty completion".to_string()))
                    } else {
                        Ok(text.to_string())
                    }
                });

            match &answer {
                Ok(_) => debug!(model = %model, "completion succeeded"),
                Err(e) => {
                    debug!(model = %model, error = %e, "completion failed");
                    eprintln!(
                        "{}",
                        format!("Model {} failed, trying next...", model)
                            .yellow()
                            .dimmed()
                    );
                }
            }
            answer
        })
        .await
        .map_err(|exhausted| GenerationError::Exhausted {
            attempts: exhausted.attempts,
            last_error: exhausted.last_error,
        })
    }

    /// Like [`try_generate`](Self::try_generate), but total failure comes
    /// back as a printable `Error: ...` string instead of an error.
    pub async fn generate(&self, prompt: &str, max_tokens: u32) -> String {
        match self.try_generate(prompt, max_tokens).await {
            Ok(text) => text,
            Err(e) => {
                debug!(error = %e, "generation failed");
                format!("{}{}", FAILURE_PREFIX, e)
            }
        }
    }

    pub async fn chat(&self, prompt: &str) -> String {
        self.generate(prompt, CHAT_MAX_TOKENS).await
    }
}

/// Keeps the known text-model families; falls back to everything when
/// none match.
pub fn filter_text_models(models: Vec<String>) -> Vec<String> {
    let text_models: Vec<String> = models
        .iter()
        .filter(|id| {
            let id = id.to_lowercase();
            TEXT_MODEL_FAMILIES.iter().any(|family| id.contains(family))
        })
        .cloned()
        .collect();

    if text_models.is_empty() {
        models
    } else {
        text_models
    }
}
