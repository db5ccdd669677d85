use base64::{engine::general_purpose, Engine};

use super::{ImageUpload, Prediction, SubmitStatus};
use crate::error::WorkflowError;

pub const MISSING_FILE_MESSAGE: &str = "Please select a file first.";

/// How a completed classification request ended.
///
/// A result and the low-confidence advisory are alternatives of the same
/// request, so they live in one enum.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionOutcome {
    Identified(Prediction),
    LowConfidence { confidence: f64 },
}

/// State of the image prediction screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadTask {
    selected_file: Option<ImageUpload>,
    preview_data_uri: Option<String>,
    status: SubmitStatus,
    outcome: Option<PredictionOutcome>,
    error: Option<String>,
}

impl UploadTask {
    pub fn new() -> Self {
        Self::default()
    }

    /// Picking a file drops whatever the previous request produced.
    pub fn select_file(&mut self, file: ImageUpload) {
        let preview = format!(
            "data:{};base64,{}",
            file.content_type,
            general_purpose::STANDARD.encode(&file.bytes)
        );

        self.selected_file = Some(file);
        self.preview_data_uri = Some(preview);
        self.status = SubmitStatus::Idle;
        self.outcome = None;
        self.error = None;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Moves the task to `Pending` and hands out the file to send.
    pub fn begin(&mut self) -> Result<ImageUpload, WorkflowError> {
        if self.status == SubmitStatus::Pending {
            return Err(WorkflowError::Busy);
        }

        let Some(file) = self.selected_file.clone() else {
            self.error = Some(MISSING_FILE_MESSAGE.to_string());
            return Err(WorkflowError::MissingInput(MISSING_FILE_MESSAGE));
        };

        self.status = SubmitStatus::Pending;
        self.outcome = None;
        self.error = None;
        Ok(file)
    }

    pub fn succeed(&mut self, outcome: PredictionOutcome) {
        self.status = SubmitStatus::Success;
        self.outcome = Some(outcome);
        self.error = None;
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.status = SubmitStatus::Error;
        self.outcome = None;
        self.error = Some(message.into());
    }

    pub fn selected_file(&self) -> Option<&ImageUpload> {
        self.selected_file.as_ref()
    }

    pub fn preview_data_uri(&self) -> Option<&str> {
        self.preview_data_uri.as_deref()
    }

    pub fn status(&self) -> SubmitStatus {
        self.status
    }

    pub fn can_submit(&self) -> bool {
        self.selected_file.is_some() && self.status != SubmitStatus::Pending
    }

    pub fn outcome(&self) -> Option<&PredictionOutcome> {
        self.outcome.as_ref()
    }

    pub fn prediction(&self) -> Option<&Prediction> {
        match &self.outcome {
            Some(PredictionOutcome::Identified(prediction)) => Some(prediction),
            _ => None,
        }
    }

    pub fn result_breed(&self) -> Option<&str> {
        self.prediction().map(|p| p.breed.as_str())
    }

    pub fn result_confidence(&self) -> Option<f64> {
        self.prediction().map(|p| p.confidence)
    }

    pub fn low_confidence_flag(&self) -> bool {
        matches!(self.outcome, Some(PredictionOutcome::LowConfidence { .. }))
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jpeg() -> ImageUpload {
        ImageUpload::new("cow.jpg", "image/jpeg", vec![0xFF, 0xD8, 0xFF])
    }

    fn gir() -> Prediction {
        Prediction {
            breed: "Gir".to_string(),
            confidence: 87.3,
            confidence_text: "87.30%".to_string(),
        }
    }

    #[test]
    fn test_select_file_builds_preview() {
        let mut task = UploadTask::new();
        task.select_file(jpeg());

        assert_eq!(task.preview_data_uri(), Some("data:image/jpeg;base64,/9j/"));
        assert!(task.can_submit());
        assert_eq!(task.status(), SubmitStatus::Idle);
    }

    #[test]
    fn test_begin_without_file_is_missing_input() {
        let mut task = UploadTask::new();
        let err = task.begin().unwrap_err();

        assert!(matches!(err, WorkflowError::MissingInput(_)));
        assert_eq!(task.error(), Some(MISSING_FILE_MESSAGE));
        assert_eq!(task.status(), SubmitStatus::Idle);
    }

    #[test]
    fn test_begin_twice_is_busy() {
        let mut task = UploadTask::new();
        task.select_file(jpeg());
        task.begin().unwrap();

        assert!(!task.can_submit());
        assert!(matches!(task.begin(), Err(WorkflowError::Busy)));
    }

    #[test]
    fn test_begin_clears_previous_result() {
        let mut task = UploadTask::new();
        task.select_file(jpeg());
        task.begin().unwrap();
        task.succeed(PredictionOutcome::Identified(gir()));

        task.begin().unwrap();
        assert_eq!(task.status(), SubmitStatus::Pending);
        assert!(task.outcome().is_none());
    }

    #[test]
    fn test_breed_and_advisory_are_exclusive() {
        let mut task = UploadTask::new();
        task.select_file(jpeg());
        task.begin().unwrap();
        task.succeed(PredictionOutcome::LowConfidence { confidence: 12.0 });

        assert!(task.low_confidence_flag());
        assert_eq!(task.result_breed(), None);

        task.begin().unwrap();
        task.succeed(PredictionOutcome::Identified(gir()));
        assert!(!task.low_confidence_flag());
        assert_eq!(task.result_breed(), Some("Gir"));
        assert_eq!(task.result_confidence(), Some(87.3));
    }

    #[test]
    fn test_reset_after_prediction_restores_initial_state() {
        let mut task = UploadTask::new();
        task.select_file(jpeg());
        task.begin().unwrap();
        task.succeed(PredictionOutcome::LowConfidence { confidence: 3.0 });

        task.reset();
        assert_eq!(task, UploadTask::default());
        assert!(task.selected_file().is_none());
        assert!(task.preview_data_uri().is_none());
        assert!(!task.low_confidence_flag());
    }

    #[test]
    fn test_new_file_drops_old_error() {
        let mut task = UploadTask::new();
        task.select_file(jpeg());
        task.begin().unwrap();
        task.fail("boom");
        assert_eq!(task.status(), SubmitStatus::Error);

        task.select_file(jpeg());
        assert!(task.error().is_none());
        assert_eq!(task.status(), SubmitStatus::Idle);
    }
}
