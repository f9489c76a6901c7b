use std::path::PathBuf;

use thiserror::Error;

pub type RequestId = u64;

/// Events the engine reports back to the front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    UploadProgress {
        request_id: RequestId,
        percent: u8,
    },
    UploadCompleted {
        request_id: RequestId,
        file_name: String,
        result: Result<(), BackendError>,
    },
    AskCompleted {
        request_id: RequestId,
        result: Result<String, BackendError>,
    },
    ClearCompleted {
        request_id: RequestId,
        result: Result<(), BackendError>,
    },
}

/// Why a backend call did not succeed.
///
/// `Display` is the text shown to the user after the operation prefix, so a
/// backend-reported message is rendered verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    #[error("{0}")]
    Rejected(String),
    #[error("request failed with status code {0}")]
    HttpStatus(u16),
    #[error("request timed out")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
    #[error("invalid backend url: {0}")]
    InvalidUrl(String),
    #[error("could not encode request: {0}")]
    Encode(String),
    #[error("response did not include an answer")]
    MissingAnswer,
    #[error("could not read {}: {message}", path.display())]
    File { path: PathBuf, message: String },
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            BackendError::Timeout
        } else {
            BackendError::Network(err.to_string())
        }
    }
}
