use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;

use pdfchat_logging::{chat_error, chat_info};

use crate::backend::{Backend, BackendSettings, ChannelProgressSink, ReqwestBackend};
use crate::{BackendError, EngineEvent, RequestId, UploadFile};

enum EngineCommand {
    Upload {
        request_id: RequestId,
        path: PathBuf,
        file_name: String,
    },
    Ask {
        request_id: RequestId,
        question: String,
        context: Option<String>,
    },
    Clear {
        request_id: RequestId,
        context: String,
    },
}

/// Sends work to the engine thread. Every command runs as its own task, so
/// a new command never waits for or cancels an earlier one.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

/// Receiving side for [`EngineEvent`]s.
pub struct EngineEvents {
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineEvents {
    /// Blocks until the next event; `None` once the engine thread has gone away.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }
}

impl EngineHandle {
    pub fn new(settings: BackendSettings) -> Result<(Self, EngineEvents), BackendError> {
        let backend = ReqwestBackend::new(settings)?;
        Ok(Self::with_backend(Arc::new(backend)))
    }

    pub fn with_backend(backend: Arc<dyn Backend>) -> (Self, EngineEvents) {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    chat_error!("Failed to start engine runtime: {}", err);
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let backend = backend.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(backend.as_ref(), command, event_tx).await;
                });
            }
            chat_info!("Engine command channel closed; shutting down");
        });

        (Self { cmd_tx }, EngineEvents { event_rx })
    }

    pub fn upload(&self, request_id: RequestId, path: impl Into<PathBuf>, file_name: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Upload {
            request_id,
            path: path.into(),
            file_name: file_name.into(),
        });
    }

    pub fn ask(&self, request_id: RequestId, question: impl Into<String>, context: Option<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Ask {
            request_id,
            question: question.into(),
            context,
        });
    }

    pub fn clear(&self, request_id: RequestId, context: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Clear {
            request_id,
            context: context.into(),
        });
    }
}

async fn handle_command(
    backend: &dyn Backend,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let event = match command {
        EngineCommand::Upload {
            request_id,
            path,
            file_name,
        } => {
            let sink = Arc::new(ChannelProgressSink::new(event_tx.clone()));
            let result = match UploadFile::read(&path, file_name.clone()).await {
                Ok(file) => backend.upload(request_id, file, sink).await,
                Err(err) => Err(err),
            };
            EngineEvent::UploadCompleted {
                request_id,
                file_name,
                result,
            }
        }
        EngineCommand::Ask {
            request_id,
            question,
            context,
        } => EngineEvent::AskCompleted {
            request_id,
            result: backend.ask(&question, context.as_deref()).await,
        },
        EngineCommand::Clear {
            request_id,
            context,
        } => EngineEvent::ClearCompleted {
            request_id,
            result: backend.clear(&context).await,
        },
    };
    let _ = event_tx.send(event);
}
