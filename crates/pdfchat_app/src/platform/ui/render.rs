use pdfchat_core::{ChatViewModel, MessageKind};

use super::constants::*;

fn label(kind: MessageKind) -> &'static str {
    match kind {
        MessageKind::User => "you",
        MessageKind::Bot => "bot",
        MessageKind::System => "system",
        MessageKind::Error => "error",
    }
}

pub fn header(view: &ChatViewModel) -> String {
    let mut out = format!("{APP_TITLE}\n{APP_SUBTITLE}\n");
    out.push_str(&document_line(view));
    out.push_str(&format!("Type {CMD_HELP} for commands.\n"));
    out
}

fn document_line(view: &ChatViewModel) -> String {
    match &view.active_document {
        Some(name) => format!("Document: {name} ({CMD_CLEAR} to clear)\n"),
        None => "No document uploaded.\n".to_string(),
    }
}

pub fn progress_bar(percent: u8) -> String {
    let percent = percent.min(100) as usize;
    let filled = percent * PROGRESS_BAR_WIDTH / 100;
    format!(
        "[{}{}] {percent}%",
        "#".repeat(filled),
        ".".repeat(PROGRESS_BAR_WIDTH - filled)
    )
}

/// Turns successive view models into terminal output, printing only what changed.
#[derive(Debug, Default)]
pub struct Renderer {
    rendered_messages: usize,
    last_progress: u8,
    last_busy: bool,
    last_document: Option<String>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, view: &ChatViewModel) -> String {
        let mut out = String::new();

        if view.messages.len() < self.rendered_messages {
            out.push_str("-- chat cleared --\n");
            self.rendered_messages = 0;
        }
        for message in &view.messages[self.rendered_messages..] {
            out.push_str(&format!("{}: {}\n", label(message.kind), message.text));
        }
        self.rendered_messages = view.messages.len();

        if view.active_document != self.last_document {
            out.push_str(&document_line(view));
            self.last_document = view.active_document.clone();
        }

        if view.upload_progress > 0 && view.upload_progress != self.last_progress {
            out.push_str(&format!("uploading {}\n", progress_bar(view.upload_progress)));
        }
        self.last_progress = view.upload_progress;

        if view.busy && !self.last_busy {
            out.push_str("...\n");
        }
        self.last_busy = view.busy;

        out
    }
}
