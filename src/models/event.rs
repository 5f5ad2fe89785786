use std::sync::Arc;

use crossterm::event::MouseButton;
use tokio::sync::mpsc;
use tui_textarea::Input;

use super::{ChatReply, NoticeMessage, UploadFile, UploadReply};

#[derive(Debug)]
pub enum Event {
    Notice(NoticeMessage),

    ChatReply(ChatReply),
    UploadReply(UploadReply),
    FileSelected(UploadFile),

    KeyboardCharInput(Input),
    KeyboardEsc,
    KeyboardEnter,
    KeyboardNewLine,
    KeyboardCtrlC,
    KeyboardCtrlN,
    KeyboardCtrlO,
    KeyboardCtrlY,
    KeyboardPaste(String),

    Quit,

    UiTick,
    UiScrollUp,
    UiScrollDown,
    UiScrollPageUp,
    UiScrollPageDown,
    UiMouseDrag { button: MouseButton, x: u16, y: u16 },
    UiMouseUp { button: MouseButton, x: u16, y: u16 },
}

#[macro_export]
macro_rules! notice_error {
    ($msg:expr) => {
        $crate::models::Event::Notice($crate::models::NoticeMessage::error($msg))
    };
    ($msg:expr, $duration:expr) => {
        $crate::models::Event::Notice(
            $crate::models::NoticeMessage::error($msg).with_duration($duration),
        )
    };
}

#[async_trait::async_trait]
pub trait EventTx {
    async fn send(&self, event: Event) -> Result<(), mpsc::error::SendError<Event>>;
}

#[async_trait::async_trait]
impl EventTx for mpsc::Sender<Event> {
    async fn send(&self, event: Event) -> Result<(), mpsc::error::SendError<Event>> {
        self.send(event).await
    }
}

#[async_trait::async_trait]
impl EventTx for mpsc::UnboundedSender<Event> {
    async fn send(&self, event: Event) -> Result<(), mpsc::error::SendError<Event>> {
        self.send(event)
    }
}

pub type ArcEventTx = Arc<dyn EventTx + Send + Sync>;
