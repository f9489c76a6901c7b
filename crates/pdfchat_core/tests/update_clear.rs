use pdfchat_core::{update, ChatState, Effect, Message, MessageKind, Msg};
use pretty_assertions::assert_eq;

fn init_logging() {
    pdfchat_logging::initialize_for_tests();
}

fn session_with_history() -> ChatState {
    let (state, effects) = update(
        ChatState::new(),
        Msg::FileChosen {
            path: "report.pdf".into(),
        },
    );
    let (state, _) = update(
        state,
        Msg::UploadFinished {
            request_id: effects[0].request_id(),
            file_name: "report.pdf".to_string(),
            result: Ok(()),
        },
    );
    let (state, _) = update(state, Msg::InputChanged("who wrote it?".to_string()));
    let (state, effects) = update(state, Msg::QuestionSubmitted);
    let (mut state, _) = update(
        state,
        Msg::AnswerReceived {
            request_id: effects[0].request_id(),
            result: Ok("Someone.".to_string()),
        },
    );
    state.consume_dirty();
    state
}

#[test]
fn clear_without_document_is_noop() {
    init_logging();
    let (state, _) = update(ChatState::new(), Msg::InputChanged("hi".to_string()));
    let (state, ask) = update(state, Msg::QuestionSubmitted);
    let (mut state, _) = update(
        state,
        Msg::AnswerReceived {
            request_id: ask[0].request_id(),
            result: Ok("hello".to_string()),
        },
    );
    state.consume_dirty();
    let before = state.clone();

    let (mut state, effects) = update(state, Msg::ClearClicked);

    assert!(effects.is_empty());
    assert!(!state.consume_dirty());
    assert_eq!(state, before);
    assert_eq!(
        state.messages(),
        &[Message::user("hi"), Message::bot("hello")]
    );
}

#[test]
fn clear_emits_effect_without_touching_state() {
    init_logging();
    let state = session_with_history();
    let before = state.view();

    let (state, effects) = update(state, Msg::ClearClicked);

    assert_eq!(state.view().messages, before.messages);
    assert!(!state.is_busy());
    assert_eq!(
        effects,
        vec![Effect::Clear {
            request_id: 3,
            context: "report.pdf".to_string(),
        }]
    );
}

#[test]
fn clear_success_empties_transcript_and_document() {
    init_logging();
    let state = session_with_history();
    let (state, effects) = update(state, Msg::ClearClicked);

    let (mut state, _) = update(
        state,
        Msg::ClearFinished {
            request_id: effects[0].request_id(),
            result: Ok(()),
        },
    );

    assert!(state.messages().is_empty());
    assert_eq!(state.active_document(), None);
    assert!(!state.view().clear_available);
    assert!(state.consume_dirty());

    // Questions after a clear go out without context.
    let (state, _) = update(state, Msg::InputChanged("next".to_string()));
    let (_state, effects) = update(state, Msg::QuestionSubmitted);
    assert!(matches!(
        effects.as_slice(),
        [Effect::Ask { context: None, .. }]
    ));
}

#[test]
fn clear_failure_keeps_transcript_and_document() {
    init_logging();
    let state = session_with_history();
    let history = state.messages().to_vec();
    let (state, effects) = update(state, Msg::ClearClicked);

    let (state, _) = update(
        state,
        Msg::ClearFinished {
            request_id: effects[0].request_id(),
            result: Err("unknown context".to_string()),
        },
    );

    assert_eq!(state.active_document(), Some("report.pdf"));
    assert_eq!(&state.messages()[..history.len()], history.as_slice());
    assert_eq!(state.messages().len(), history.len() + 1);
    let last = state.messages().last().unwrap();
    assert_eq!(last.kind, MessageKind::Error);
    assert_eq!(last.text, "Error clearing chat: unknown context");
}
