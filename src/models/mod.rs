pub mod action;
pub mod conversation;
pub mod event;
pub mod message;
pub mod notice;
pub mod request;
pub mod upload;

pub use action::Action;
pub use conversation::ConversationState;
pub use event::{ArcEventTx, Event, EventTx};
pub use message::{Message, Sender};
pub use notice::*;
pub use request::*;
pub use upload::{UploadFile, UploadStaging};
