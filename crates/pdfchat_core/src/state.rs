use crate::message::Message;
use crate::view_model::ChatViewModel;

pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChatState {
    messages: Vec<Message>,
    draft_input: String,
    busy: bool,
    upload_progress: u8,
    active_document: Option<String>,
    /// Upload whose progress events are currently shown.
    current_upload: Option<RequestId>,
    next_request_id: RequestId,
    dirty: bool,
}

impl ChatState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> ChatViewModel {
        ChatViewModel {
            messages: self.messages.clone(),
            draft_input: self.draft_input.clone(),
            busy: self.busy,
            upload_progress: self.upload_progress,
            active_document: self.active_document.clone(),
            input_enabled: !self.busy,
            upload_enabled: !self.busy,
            clear_available: self.active_document.is_some(),
            dirty: self.dirty,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn active_document(&self) -> Option<&str> {
        self.active_document.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn upload_progress(&self) -> u8 {
        self.upload_progress
    }

    /// Returns whether anything visible changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn allocate_request_id(&mut self) -> RequestId {
        self.next_request_id += 1;
        self.next_request_id
    }

    pub(crate) fn set_draft(&mut self, text: String) {
        if self.draft_input != text {
            self.draft_input = text;
            self.mark_dirty();
        }
    }

    /// Takes the trimmed draft and clears the box. A blank draft is left as-is.
    pub(crate) fn take_trimmed_draft(&mut self) -> Option<String> {
        let trimmed = self.draft_input.trim();
        if trimmed.is_empty() {
            return None;
        }
        let question = trimmed.to_string();
        self.draft_input.clear();
        self.mark_dirty();
        Some(question)
    }

    pub(crate) fn push_message(&mut self, message: Message) {
        self.messages.push(message);
        self.mark_dirty();
    }

    pub(crate) fn set_busy(&mut self, busy: bool) {
        if self.busy != busy {
            self.busy = busy;
            self.mark_dirty();
        }
    }

    pub(crate) fn begin_upload(&mut self, request_id: RequestId) {
        self.current_upload = Some(request_id);
        self.upload_progress = 0;
        self.set_busy(true);
        self.mark_dirty();
    }

    pub(crate) fn apply_upload_progress(&mut self, request_id: RequestId, percent: u8) -> bool {
        if self.current_upload != Some(request_id) {
            return false;
        }
        let percent = percent.min(100);
        if percent <= self.upload_progress {
            return false;
        }
        self.upload_progress = percent;
        self.mark_dirty();
        true
    }

    /// Progress belongs to the current upload, so a superseded one leaves it alone.
    pub(crate) fn end_upload(&mut self, request_id: RequestId) {
        if self.current_upload == Some(request_id) {
            self.current_upload = None;
            self.upload_progress = 0;
        }
        self.set_busy(false);
        self.mark_dirty();
    }

    pub(crate) fn set_active_document(&mut self, document: Option<String>) {
        self.active_document = document;
        self.mark_dirty();
    }

    pub(crate) fn clear_transcript(&mut self) {
        self.messages.clear();
        self.mark_dirty();
    }
}
