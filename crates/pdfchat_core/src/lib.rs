//! PDF chat core: pure state machine and view-model helpers.
mod effect;
mod message;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use message::{Message, MessageKind};
pub use msg::Msg;
pub use state::{ChatState, RequestId};
pub use update::update;
pub use view_model::ChatViewModel;
