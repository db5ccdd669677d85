use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::TextGenerator;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

pub struct GeminiService {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl GeminiService {
    pub fn new(api_key: String, model: String, base_url: String) -> Self {
        Self {
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn api_url(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }

    fn build_request(prompt: &str) -> GenerateRequest {
        GenerateRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
            },
        }
    }

    /// Joins the text parts of the first candidate.
    fn extract_text(response_text: &str) -> Result<String> {
        let response: GenerateResponse = serde_json::from_str(response_text)?;

        let candidate = response
            .candidates
            .first()
            .ok_or_else(|| anyhow::anyhow!("Gemini returned no candidates"))?;

        let text: String = candidate
            .content
            .parts
            .iter()
            .map(|part| part.text.as_str())
            .collect();

        Ok(text)
    }
}

#[async_trait::async_trait]
impl TextGenerator for GeminiService {
    async fn generate_json(&self, prompt: &str) -> Result<String> {
        let request = Self::build_request(prompt);

        log::info!("🤖 Sending request to Gemini with model: {}", self.model);
        log::debug!("📤 Prompt size: {} bytes", prompt.len());

        let response = self
            .client
            .post(self.api_url())
            .query(&[("key", self.api_key.as_str())])
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        log::debug!("📥 Gemini response status: {}", status);

        if !status.is_success() {
            let error_text = response.text().await?;
            log::error!("❌ Gemini API error ({}): {}", status, error_text);
            anyhow::bail!("Gemini API error ({}): {}", status, error_text);
        }

        let response_text = response.text().await?;
        log::debug!("📄 Raw Gemini response size: {} bytes", response_text.len());

        let text = Self::extract_text(&response_text)?;
        log::info!("✅ Received {} bytes of generated text", text.len());
        Ok(text)
    }
}
