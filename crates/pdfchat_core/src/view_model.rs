use crate::Message;

/// Snapshot of everything the front end needs to draw the chat.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChatViewModel {
    pub messages: Vec<Message>,
    pub draft_input: String,
    pub busy: bool,
    /// 0–100; non-zero only while an upload is outstanding.
    pub upload_progress: u8,
    pub active_document: Option<String>,
    pub input_enabled: bool,
    pub upload_enabled: bool,
    /// Clearing only makes sense once a document has been uploaded.
    pub clear_available: bool,
    pub dirty: bool,
}
