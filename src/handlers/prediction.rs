use std::sync::Arc;

use super::Liveness;
use crate::error::WorkflowError;
use crate::models::{Prediction, PredictionOutcome, RawPrediction, UploadTask};
use crate::services::BreedClassifier;

/// Predictions below this percentage are replaced by the advisory.
pub const CONFIDENCE_THRESHOLD: f64 = 25.0;

pub const REQUEST_FAILED_MESSAGE: &str = "Prediction request failed. Is the backend server running?";
pub const PARSE_FAILED_MESSAGE: &str = "Unexpected response from the prediction service.";
pub const UPLOAD_TOO_LARGE_MESSAGE: &str = "The image is too large to upload.";
pub const UPLOAD_UNREADABLE_MESSAGE: &str = "Could not read the uploaded image.";
pub const LOW_CONFIDENCE_LINES: [&str; 2] = [
    "Confidence Is Too Low,",
    "Please Provide A Valid Indian Bovine Breed Image",
];

/// Reads the number at the start of `text`, ignoring anything after it.
///
/// `"87.3%"` gives 87.3, `"  -4e1 pct"` gives -40. `None` if no digits lead.
pub fn parse_leading_float(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

/// Applies the low-confidence policy to a classifier answer.
pub fn apply_confidence_policy(raw: RawPrediction) -> Result<PredictionOutcome, WorkflowError> {
    let confidence = parse_leading_float(&raw.confidence).ok_or_else(|| {
        WorkflowError::Parse(format!("confidence is not a number: {:?}", raw.confidence))
    })?;

    if confidence < CONFIDENCE_THRESHOLD {
        log::info!("⚠️ Confidence {} below {}, showing advisory", confidence, CONFIDENCE_THRESHOLD);
        return Ok(PredictionOutcome::LowConfidence { confidence });
    }

    Ok(PredictionOutcome::Identified(Prediction {
        breed: raw.breed,
        confidence,
        confidence_text: raw.confidence,
    }))
}

/// Drives one classification request for an `UploadTask`.
pub struct PredictionController {
    classifier: Arc<dyn BreedClassifier>,
}

impl PredictionController {
    pub fn new(classifier: Arc<dyn BreedClassifier>) -> Self {
        Self { classifier }
    }

    /// Sends the selected file once and records the result on `task`.
    ///
    /// Failures are also written to the task as a display message. If the
    /// screen is gone by the time the answer arrives, the task is left alone.
    pub async fn submit(&self, task: &mut UploadTask, liveness: &Liveness) -> Result<(), WorkflowError> {
        let file = task.begin()?;

        let result = self
            .classifier
            .classify(&file)
            .await
            .and_then(apply_confidence_policy);

        if !liveness.is_mounted() {
            log::debug!("🔕 Dropping classifier answer for {}: screen gone", file.file_name);
            return Err(WorkflowError::Cancelled);
        }

        match result {
            Ok(outcome) => {
                task.succeed(outcome);
                Ok(())
            }
            Err(e) => {
                log::error!("❌ Prediction failed: {}", e);
                let message = match &e {
                    WorkflowError::Parse(_) => PARSE_FAILED_MESSAGE,
                    _ => REQUEST_FAILED_MESSAGE,
                };
                task.fail(message);
                Err(e)
            }
        }
    }
}
