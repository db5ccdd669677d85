pub mod breeds;
pub mod diagnosis_form;
pub mod recommendation_query;
pub mod upload_task;

use serde::{Deserialize, Serialize};

pub use diagnosis_form::DiagnosisForm;
pub use recommendation_query::RecommendationQuery;
pub use upload_task::{PredictionOutcome, UploadTask};

/// Where a screen's single submission currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmitStatus {
    #[default]
    Idle,
    Pending,
    Success,
    Error,
}

/// An image picked by the user, held in memory for the lifetime of a screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}

/// Body returned by the classification endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPrediction {
    pub breed: String,
    /// Percentage text such as `"87.30%"`.
    pub confidence: String,
}

/// A prediction that passed the confidence policy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub breed: String,
    pub confidence: f64,
    pub confidence_text: String,
}

/// Icon tags the generative prompt is allowed to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecommendationIcon {
    Dog,
    Bone,
    Leaf,
    Droplet,
    Star,
}

impl RecommendationIcon {
    pub fn glyph(&self) -> &'static str {
        match self {
            RecommendationIcon::Dog => "🐄",
            RecommendationIcon::Bone => "🦴",
            RecommendationIcon::Leaf => "🌿",
            RecommendationIcon::Droplet => "💧",
            RecommendationIcon::Star => "⭐",
        }
    }
}

impl std::fmt::Display for RecommendationIcon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RecommendationIcon::Dog => "Dog",
            RecommendationIcon::Bone => "Bone",
            RecommendationIcon::Leaf => "Leaf",
            RecommendationIcon::Droplet => "Droplet",
            RecommendationIcon::Star => "Star",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub icon: RecommendationIcon,
    pub heading: String,
    pub text: String,
}
