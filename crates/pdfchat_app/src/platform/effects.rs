use std::sync::mpsc;
use std::thread;

use pdfchat_core::{Effect, Msg};
use pdfchat_engine::{BackendError, BackendSettings, EngineEvent, EngineEvents, EngineHandle};
use pdfchat_logging::{chat_info, chat_warn};

use super::app::AppEvent;

/// Hands effects from `update` to the engine and feeds engine events back as `Msg`s.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(
        settings: BackendSettings,
        event_tx: mpsc::Sender<AppEvent>,
    ) -> Result<Self, BackendError> {
        let (engine, events) = EngineHandle::new(settings)?;
        spawn_event_pump(events, event_tx);
        Ok(Self { engine })
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Upload {
                    request_id,
                    path,
                    file_name,
                } => {
                    chat_info!(
                        "Upload request_id={} file={} path={:?}",
                        request_id,
                        file_name,
                        path
                    );
                    self.engine.upload(request_id, path, file_name);
                }
                Effect::Ask {
                    request_id,
                    question,
                    context,
                } => {
                    chat_info!(
                        "Ask request_id={} question_len={} context={:?}",
                        request_id,
                        question.len(),
                        context
                    );
                    self.engine.ask(request_id, question, context);
                }
                Effect::Clear {
                    request_id,
                    context,
                } => {
                    chat_info!("Clear request_id={} context={}", request_id, context);
                    self.engine.clear(request_id, context);
                }
            }
        }
    }
}

fn spawn_event_pump(events: EngineEvents, event_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        while let Some(event) = events.recv() {
            if event_tx.send(AppEvent::Msg(map_event(event))).is_err() {
                break;
            }
        }
    });
}

fn describe(err: BackendError) -> String {
    chat_warn!("Backend call failed: {:?}", err);
    err.to_string()
}

pub(crate) fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::UploadProgress {
            request_id,
            percent,
        } => Msg::UploadProgress {
            request_id,
            percent,
        },
        EngineEvent::UploadCompleted {
            request_id,
            file_name,
            result,
        } => Msg::UploadFinished {
            request_id,
            file_name,
            result: result.map_err(describe),
        },
        EngineEvent::AskCompleted { request_id, result } => Msg::AnswerReceived {
            request_id,
            result: result.map_err(describe),
        },
        EngineEvent::ClearCompleted { request_id, result } => Msg::ClearFinished {
            request_id,
            result: result.map_err(describe),
        },
    }
}
