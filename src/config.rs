use anyhow::{Context, Result};

use crate::services::classifier::DEFAULT_CLASSIFIER_URL;
use crate::services::gemini::DEFAULT_BASE_URL;

const DEFAULT_GEMINI_MODEL: &str = "gemini-1.0-pro";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_STATIC_DIR: &str = "static";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub classifier_url: String,
    pub bind_addr: String,
    pub static_dir: String,
    pub max_upload_bytes: usize,
}

impl AppConfig {
    /// Reads configuration from the process environment (after `.env`).
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get_or = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let gemini_api_key = lookup("GEMINI_API_KEY")
            .filter(|v| !v.trim().is_empty())
            .context("GEMINI_API_KEY environment variable is not set")?;

        let max_upload_bytes = match lookup("MAX_UPLOAD_BYTES") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .with_context(|| format!("MAX_UPLOAD_BYTES is not a byte count: {}", raw))?,
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };

        Ok(Self {
            gemini_api_key,
            gemini_model: get_or("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
            gemini_base_url: get_or("GEMINI_BASE_URL", DEFAULT_BASE_URL),
            classifier_url: get_or("CLASSIFIER_URL", DEFAULT_CLASSIFIER_URL),
            bind_addr: get_or("BIND_ADDR", DEFAULT_BIND_ADDR),
            static_dir: get_or("STATIC_DIR", DEFAULT_STATIC_DIR),
            max_upload_bytes,
        })
    }
}
