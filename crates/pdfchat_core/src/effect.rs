use std::path::PathBuf;

use crate::RequestId;

/// Work the front end must hand to the engine after an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send the file at `path` to the backend under `file_name`.
    Upload {
        request_id: RequestId,
        path: PathBuf,
        file_name: String,
    },
    /// Ask a question, scoped to `context` when a document is active.
    Ask {
        request_id: RequestId,
        question: String,
        context: Option<String>,
    },
    /// Drop the backend's state for `context`.
    Clear {
        request_id: RequestId,
        context: String,
    },
}

impl Effect {
    pub fn request_id(&self) -> RequestId {
        match self {
            Effect::Upload { request_id, .. }
            | Effect::Ask { request_id, .. }
            | Effect::Clear { request_id, .. } => *request_id,
        }
    }
}
