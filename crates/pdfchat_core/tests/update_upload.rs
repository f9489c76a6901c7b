use std::path::PathBuf;

use pdfchat_core::{update, ChatState, Effect, MessageKind, Msg};
use pretty_assertions::assert_eq;

fn init_logging() {
    pdfchat_logging::initialize_for_tests();
}

fn choose(state: ChatState, path: &str) -> (ChatState, Vec<Effect>) {
    update(
        state,
        Msg::FileChosen {
            path: PathBuf::from(path),
        },
    )
}

fn progress(state: ChatState, request_id: u64, percent: u8) -> ChatState {
    update(
        state,
        Msg::UploadProgress {
            request_id,
            percent,
        },
    )
    .0
}

#[test]
fn choosing_file_starts_upload() {
    init_logging();
    let (state, effects) = choose(ChatState::new(), "/home/me/papers/doc.pdf");
    let view = state.view();

    assert!(view.busy);
    assert!(!view.upload_enabled);
    assert_eq!(view.upload_progress, 0);
    assert!(view.messages.is_empty());
    assert_eq!(
        effects,
        vec![Effect::Upload {
            request_id: 1,
            path: PathBuf::from("/home/me/papers/doc.pdf"),
            file_name: "doc.pdf".to_string(),
        }]
    );
}

#[test]
fn path_without_file_name_is_ignored() {
    init_logging();
    let (state, effects) = choose(ChatState::new(), "/");
    assert!(effects.is_empty());
    assert!(!state.is_busy());
}

#[test]
fn successful_upload_sets_active_document() {
    init_logging();
    let (state, effects) = choose(ChatState::new(), "doc.pdf");
    let request_id = effects[0].request_id();
    let state = progress(state, request_id, 40);

    let (state, _) = update(
        state,
        Msg::UploadFinished {
            request_id,
            file_name: "doc.pdf".to_string(),
            result: Ok(()),
        },
    );
    let view = state.view();

    assert_eq!(view.active_document.as_deref(), Some("doc.pdf"));
    assert!(view.clear_available);
    assert!(!view.busy);
    assert_eq!(view.upload_progress, 0);
    assert_eq!(view.messages.len(), 1);
    assert_eq!(view.messages[0].kind, MessageKind::System);
    assert_eq!(
        view.messages[0].text,
        "PDF \"doc.pdf\" uploaded successfully. You can now ask questions about it!"
    );
}

#[test]
fn failed_upload_keeps_previous_document() {
    init_logging();
    let (state, effects) = choose(ChatState::new(), "first.pdf");
    let (state, _) = update(
        state,
        Msg::UploadFinished {
            request_id: effects[0].request_id(),
            file_name: "first.pdf".to_string(),
            result: Ok(()),
        },
    );

    let (state, effects) = choose(state, "second.pdf");
    let request_id = effects[0].request_id();
    let state = progress(state, request_id, 75);
    let (state, _) = update(
        state,
        Msg::UploadFinished {
            request_id,
            file_name: "second.pdf".to_string(),
            result: Err("bad format".to_string()),
        },
    );

    assert_eq!(state.active_document(), Some("first.pdf"));
    assert_eq!(state.upload_progress(), 0);
    assert!(!state.is_busy());
    let errors: Vec<_> = state
        .messages()
        .iter()
        .filter(|m| m.kind == MessageKind::Error)
        .collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].text, "Error uploading PDF: bad format");
}

#[test]
fn progress_is_monotonic_and_clamped() {
    init_logging();
    let (state, effects) = choose(ChatState::new(), "doc.pdf");
    let request_id = effects[0].request_id();

    let mut seen = Vec::new();
    let mut state = state;
    for percent in [10, 35, 20, 35, 90, 250] {
        state = progress(state, request_id, percent);
        seen.push(state.upload_progress());
    }

    assert_eq!(seen, vec![10, 35, 35, 35, 90, 100]);
}

#[test]
fn progress_for_stale_upload_is_ignored() {
    init_logging();
    let (state, first) = choose(ChatState::new(), "a.pdf");
    let (state, second) = choose(state, "b.pdf");
    let stale = first[0].request_id();
    let current = second[0].request_id();

    let mut state = progress(state, stale, 50);
    assert_eq!(state.upload_progress(), 0);
    state.consume_dirty();

    let mut state = progress(state, current, 30);
    assert_eq!(state.upload_progress(), 30);
    assert!(state.consume_dirty());

    let (state, _) = update(
        state,
        Msg::UploadFinished {
            request_id: current,
            file_name: "b.pdf".to_string(),
            result: Ok(()),
        },
    );
    // No upload is tracked any more, so late progress from either request is dropped.
    let state = progress(state, current, 60);
    let state = progress(state, stale, 60);
    assert_eq!(state.upload_progress(), 0);
}

#[test]
fn superseded_upload_finishing_keeps_current_progress() {
    init_logging();
    let (state, first) = choose(ChatState::new(), "a.pdf");
    let (state, second) = choose(state, "b.pdf");
    let stale = first[0].request_id();
    let current = second[0].request_id();
    let state = progress(state, current, 60);

    let (state, _) = update(
        state,
        Msg::UploadFinished {
            request_id: stale,
            file_name: "a.pdf".to_string(),
            result: Err("bad format".to_string()),
        },
    );
    assert_eq!(state.upload_progress(), 60);
    assert!(!state.is_busy());

    let state = progress(state, current, 30);
    assert_eq!(state.upload_progress(), 60);
    let state = progress(state, current, 80);
    assert_eq!(state.upload_progress(), 80);

    let (state, _) = update(
        state,
        Msg::UploadFinished {
            request_id: current,
            file_name: "b.pdf".to_string(),
            result: Ok(()),
        },
    );
    assert_eq!(state.upload_progress(), 0);
    assert_eq!(state.active_document(), Some("b.pdf"));
}
