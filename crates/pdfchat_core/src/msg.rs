use std::path::PathBuf;

use crate::RequestId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the question box.
    InputChanged(String),
    /// User submitted the current question.
    QuestionSubmitted,
    /// User picked a file to upload.
    FileChosen { path: PathBuf },
    /// Engine progress for an upload, already expressed as a percentage.
    UploadProgress { request_id: RequestId, percent: u8 },
    /// Engine completion for an upload.
    UploadFinished {
        request_id: RequestId,
        file_name: String,
        result: Result<(), String>,
    },
    /// Engine completion for a question.
    AnswerReceived {
        request_id: RequestId,
        result: Result<String, String>,
    },
    /// User clicked Clear.
    ClearClicked,
    /// Engine completion for a clear.
    ClearFinished {
        request_id: RequestId,
        result: Result<(), String>,
    },
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
