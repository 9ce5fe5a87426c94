use async_trait::async_trait;
use genai::Client;
use genai::chat::{ChatMessage, ChatOptions, ChatRequest};
use tracing::{debug, instrument};

use super::error::GenerationError;

/// Free-text completion from a language model.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;

    /// Model identifier, for logs and readiness output.
    fn model(&self) -> &str;
}

#[async_trait]
impl<G: TextGenerator + ?Sized> TextGenerator for std::sync::Arc<G> {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        (**self).generate(prompt).await
    }

    fn model(&self) -> &str {
        (**self).model()
    }
}

/// [`TextGenerator`] backed by a `genai` client.
///
/// Model names without a provider prefix (e.g. `qwen3:0.6b`) resolve to the local
/// Ollama adapter.
#[derive(Clone)]
pub struct GenaiGenerator {
    client: Client,
    model: String,
    max_tokens: u32,
}

impl std::fmt::Debug for GenaiGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenaiGenerator")
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .finish_non_exhaustive()
    }
}

impl GenaiGenerator {
    pub fn new(model: impl Into<String>, max_tokens: u32) -> Self {
        Self::with_client(Client::default(), model, max_tokens)
    }

    pub fn with_client(client: Client, model: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            client,
            model: model.into(),
            max_tokens,
        }
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }
}

#[async_trait]
impl TextGenerator for GenaiGenerator {
    #[instrument(skip(self, prompt), fields(model = %self.model))]
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let request = ChatRequest::new(vec![ChatMessage::user(prompt)]);
        let options = ChatOptions::default().with_max_tokens(self.max_tokens);

        let response = self
            .client
            .exec_chat(&self.model, request, Some(&options))
            .await?;

        let text = response
            .first_text()
            .map(str::to_string)
            .filter(|t| !t.trim().is_empty())
            .ok_or(GenerationError::EmptyResponse)?;

        debug!(chars = text.len(), "Generator answered");
        Ok(text)
    }

    fn model(&self) -> &str {
        &self.model
    }
}
