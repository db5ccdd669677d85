use anyhow::Result;

/// Trait for generative-text services (Gemini, or a fake in tests)
#[async_trait::async_trait]
pub trait TextGenerator: Send + Sync {
    /// Sends one prompt and returns the raw text the model produced.
    async fn generate_json(&self, prompt: &str) -> Result<String>;
}
