use thiserror::Error;

/// Failures a screen's submission can end in.
///
/// The payloads of `RequestFailed` and `Parse` are for logs only; pages show
/// their own fixed message for these.
#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("{0}")]
    MissingInput(&'static str),

    #[error("request failed: {0}")]
    RequestFailed(String),

    #[error("unexpected response: {0}")]
    Parse(String),

    #[error("a submission is already in flight")]
    Busy,

    #[error("screen is no longer mounted")]
    Cancelled,
}

impl From<reqwest::Error> for WorkflowError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            WorkflowError::Parse(err.to_string())
        } else {
            WorkflowError::RequestFailed(err.to_string())
        }
    }
}

impl From<serde_json::Error> for WorkflowError {
    fn from(err: serde_json::Error) -> Self {
        WorkflowError::Parse(err.to_string())
    }
}
