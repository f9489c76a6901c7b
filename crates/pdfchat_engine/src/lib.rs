//! PDF chat engine: backend protocol and effect execution.
mod backend;
mod engine;
mod types;
mod upload;
mod wire;

pub use backend::{
    Backend, BackendSettings, ChannelProgressSink, ProgressSink, ReqwestBackend, DEFAULT_BASE_URL,
};
pub use engine::{EngineEvents, EngineHandle};
pub use types::{BackendError, EngineEvent, RequestId};
pub use upload::{upload_percent, UploadFile};
