use reqwest::multipart::{Form, Part};

use crate::error::WorkflowError;
use crate::models::{ImageUpload, RawPrediction};

pub const DEFAULT_CLASSIFIER_URL: &str = "https://priyanshu631-bovine-breed-api.hf.space";

/// The remote model that names a breed from a photo.
#[async_trait::async_trait]
pub trait BreedClassifier: Send + Sync {
    async fn classify(&self, image: &ImageUpload) -> Result<RawPrediction, WorkflowError>;
}

/// Client for the classifier's `POST /predict` multipart endpoint.
pub struct HttpClassifier {
    base_url: String,
    client: reqwest::Client,
}

impl HttpClassifier {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn predict_url(&self) -> String {
        format!("{}/predict", self.base_url)
    }
}

#[async_trait::async_trait]
impl BreedClassifier for HttpClassifier {
    async fn classify(&self, image: &ImageUpload) -> Result<RawPrediction, WorkflowError> {
        log::info!(
            "📸 Sending {} ({} bytes) to classifier at {}",
            image.file_name,
            image.bytes.len(),
            self.predict_url()
        );

        let part = Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.content_type)?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(self.predict_url())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        log::debug!("📥 Classifier response status: {}", status);

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            log::error!("❌ Classifier error ({}): {}", status, error_text);
            return Err(WorkflowError::RequestFailed(format!("classifier returned {}", status)));
        }

        let response_text = response.text().await?;
        let prediction: RawPrediction = serde_json::from_str(&response_text)?;
        log::info!(
            "✅ Classifier answered: breed={}, confidence={}",
            prediction.breed,
            prediction.confidence
        );

        Ok(prediction)
    }
}
