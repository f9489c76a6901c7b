/// Who a transcript entry is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    User,
    Bot,
    System,
    Error,
}

/// A single transcript entry. Never edited after it is appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub kind: MessageKind,
    pub text: String,
}

impl Message {
    pub fn new(kind: MessageKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(MessageKind::User, text)
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(MessageKind::Bot, text)
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self::new(MessageKind::System, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(MessageKind::Error, text)
    }
}

pub(crate) const UPLOAD_ERROR_PREFIX: &str = "Error uploading PDF";
pub(crate) const ASK_ERROR_PREFIX: &str = "Error getting response";
pub(crate) const CLEAR_ERROR_PREFIX: &str = "Error clearing chat";
const GENERIC_FAILURE: &str = "Please try again.";

pub(crate) fn upload_success_text(file_name: &str) -> String {
    format!("PDF \"{file_name}\" uploaded successfully. You can now ask questions about it!")
}

/// Builds `"<prefix>: <message>"`, substituting a generic hint for an empty message.
pub(crate) fn failure_text(prefix: &str, message: &str) -> String {
    let message = message.trim();
    if message.is_empty() {
        format!("{prefix}: {GENERIC_FAILURE}")
    } else {
        format!("{prefix}: {message}")
    }
}
