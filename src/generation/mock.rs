use std::sync::Mutex;

use async_trait::async_trait;

use super::error::GenerationError;
use super::generator::TextGenerator;

/// Generator that replays a fixed answer and records the prompts it saw.
#[derive(Debug)]
pub struct StaticGenerator {
    answer: Result<String, String>,
    prompts: Mutex<Vec<String>>,
}

impl StaticGenerator {
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: Ok(answer.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Every call fails with [`GenerationError::RequestFailed`].
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            answer: Err(reason.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl TextGenerator for StaticGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
        self.answer
            .clone()
            .map_err(|reason| GenerationError::RequestFailed { reason })
    }

    fn model(&self) -> &str {
        "static"
    }
}
