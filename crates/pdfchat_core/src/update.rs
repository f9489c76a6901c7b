use pdfchat_logging::{chat_debug, chat_warn};

use crate::message::{
    failure_text, upload_success_text, ASK_ERROR_PREFIX, CLEAR_ERROR_PREFIX, UPLOAD_ERROR_PREFIX,
};
use crate::{ChatState, Effect, Message, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: ChatState, msg: Msg) -> (ChatState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_draft(text);
            Vec::new()
        }
        Msg::QuestionSubmitted => {
            // The box is cleared before the answer arrives.
            let Some(question) = state.take_trimmed_draft() else {
                return (state, Vec::new());
            };
            state.push_message(Message::user(question.clone()));
            state.set_busy(true);
            let request_id = state.allocate_request_id();
            vec![Effect::Ask {
                request_id,
                question,
                context: state.active_document().map(ToOwned::to_owned),
            }]
        }
        Msg::FileChosen { path } => {
            let Some(file_name) = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .filter(|name| !name.is_empty())
            else {
                return (state, Vec::new());
            };
            let request_id = state.allocate_request_id();
            state.begin_upload(request_id);
            vec![Effect::Upload {
                request_id,
                path,
                file_name,
            }]
        }
        Msg::UploadProgress {
            request_id,
            percent,
        } => {
            if !state.apply_upload_progress(request_id, percent) {
                chat_debug!(
                    "Ignoring upload progress request_id={} percent={}",
                    request_id,
                    percent
                );
            }
            Vec::new()
        }
        Msg::UploadFinished {
            request_id,
            file_name,
            result,
        } => {
            match result {
                Ok(()) => {
                    state.push_message(Message::system(upload_success_text(&file_name)));
                    state.set_active_document(Some(file_name));
                }
                Err(message) => {
                    chat_warn!("Upload {} failed: {}", request_id, message);
                    state.push_message(Message::error(failure_text(
                        UPLOAD_ERROR_PREFIX,
                        &message,
                    )));
                }
            }
            state.end_upload(request_id);
            Vec::new()
        }
        Msg::AnswerReceived { request_id, result } => {
            match result {
                Ok(answer) => state.push_message(Message::bot(answer)),
                Err(message) => {
                    chat_warn!("Question {} failed: {}", request_id, message);
                    state.push_message(Message::error(failure_text(ASK_ERROR_PREFIX, &message)));
                }
            }
            state.set_busy(false);
            Vec::new()
        }
        Msg::ClearClicked => {
            let Some(context) = state.active_document().map(ToOwned::to_owned) else {
                return (state, Vec::new());
            };
            let request_id = state.allocate_request_id();
            vec![Effect::Clear {
                request_id,
                context,
            }]
        }
        Msg::ClearFinished { request_id, result } => {
            match result {
                Ok(()) => {
                    state.clear_transcript();
                    state.set_active_document(None);
                }
                Err(message) => {
                    chat_warn!("Clear {} failed: {}", request_id, message);
                    state.push_message(Message::error(failure_text(
                        CLEAR_ERROR_PREFIX,
                        &message,
                    )));
                }
            }
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
