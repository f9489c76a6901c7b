use pdfchat_core::{update, ChatState, Effect, Message, MessageKind, Msg};
use pretty_assertions::assert_eq;

fn init_logging() {
    pdfchat_logging::initialize_for_tests();
}

fn submit_question(state: ChatState, input: &str) -> (ChatState, Vec<Effect>) {
    let (state, _) = update(state, Msg::InputChanged(input.to_string()));
    update(state, Msg::QuestionSubmitted)
}

fn with_document(name: &str) -> ChatState {
    let (state, effects) = update(
        ChatState::new(),
        Msg::FileChosen {
            path: format!("/tmp/{name}").into(),
        },
    );
    let request_id = effects[0].request_id();
    let (mut state, _) = update(
        state,
        Msg::UploadFinished {
            request_id,
            file_name: name.to_string(),
            result: Ok(()),
        },
    );
    state.consume_dirty();
    state
}

#[test]
fn blank_question_is_ignored() {
    init_logging();
    for input in ["", "   ", "\n\t  "] {
        let (mut state, effects) = submit_question(ChatState::new(), input);
        assert!(effects.is_empty());
        assert!(state.messages().is_empty());
        assert!(!state.is_busy());
        // The draft itself is left alone.
        assert_eq!(state.view().draft_input, input);
        state.consume_dirty();
        let (mut state, effects) = update(state, Msg::QuestionSubmitted);
        assert!(effects.is_empty());
        assert!(!state.consume_dirty());
    }
}

#[test]
fn question_is_trimmed_echoed_and_draft_cleared() {
    init_logging();
    let (state, effects) = submit_question(ChatState::new(), "  what is this about?  ");
    let view = state.view();

    assert_eq!(view.messages, vec![Message::user("what is this about?")]);
    assert_eq!(view.draft_input, "");
    assert!(view.busy);
    assert!(!view.input_enabled);
    assert_eq!(
        effects,
        vec![Effect::Ask {
            request_id: 1,
            question: "what is this about?".to_string(),
            context: None,
        }]
    );
}

#[test]
fn question_carries_active_document_as_context() {
    init_logging();
    let state = with_document("doc.pdf");
    let (_state, effects) = submit_question(state, "summary?");

    match effects.as_slice() {
        [Effect::Ask {
            question, context, ..
        }] => {
            assert_eq!(question, "summary?");
            assert_eq!(context.as_deref(), Some("doc.pdf"));
        }
        other => panic!("unexpected effects: {other:?}"),
    }
}

#[test]
fn answer_follows_question_and_releases_busy() {
    init_logging();
    let (state, effects) = submit_question(ChatState::new(), "hello");
    let request_id = effects[0].request_id();

    let (mut state, effects) = update(
        state,
        Msg::AnswerReceived {
            request_id,
            result: Ok("  Hi there.\n".to_string()),
        },
    );

    assert!(effects.is_empty());
    assert!(!state.is_busy());
    assert_eq!(
        state.messages(),
        &[Message::user("hello"), Message::bot("  Hi there.\n")]
    );
    assert!(state.consume_dirty());
}

#[test]
fn failed_answer_appends_prefixed_error() {
    init_logging();
    let (state, effects) = submit_question(ChatState::new(), "hello");
    let request_id = effects[0].request_id();

    let (state, _) = update(
        state,
        Msg::AnswerReceived {
            request_id,
            result: Err("model overloaded".to_string()),
        },
    );
    let last = state.messages().last().unwrap();
    assert_eq!(last.kind, MessageKind::Error);
    assert_eq!(last.text, "Error getting response: model overloaded");
    assert!(!state.is_busy());

    let (state, effects) = submit_question(state, "again");
    let (state, _) = update(
        state,
        Msg::AnswerReceived {
            request_id: effects[0].request_id(),
            result: Err(String::new()),
        },
    );
    assert_eq!(
        state.messages().last().unwrap().text,
        "Error getting response: Please try again."
    );
}

#[test]
fn busy_does_not_block_further_questions() {
    init_logging();
    let (state, first) = submit_question(ChatState::new(), "one");
    let (state, second) = submit_question(state, "two");

    assert!(state.is_busy());
    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), 1);
    assert_ne!(first[0].request_id(), second[0].request_id());
    assert_eq!(state.messages().len(), 2);
}
