use std::{pin::Pin, sync::Arc};

use crossterm::event::MouseButton;
use tokio::sync::mpsc::UnboundedReceiver;

use super::*;
use crate::{
    app::services::CrosstermStream,
    backend::MockBackend,
    config::constants::FALLBACK_MESSAGE,
    models::{ChatReply, Sender},
};

struct Idle;

impl CrosstermStream for Idle {
    fn next(
        &mut self,
    ) -> Pin<
        Box<dyn Future<Output = Option<Result<crossterm::event::Event, io::Error>>> + Send + '_>,
    > {
        Box::pin(std::future::pending())
    }
}

fn new_client() -> ChatClient {
    ChatClient::new(Arc::new(MockBackend::new())).with_greeting("Hello!")
}

fn new_app(events: &mut EventService, client: ChatClient) -> (App<'_>, UnboundedReceiver<Action>) {
    let (action_tx, action_rx) = mpsc::unbounded_channel();
    let app = App::new(
        Theme::default(),
        client,
        action_tx,
        events,
        CancellationToken::new(),
    );
    (app, action_rx)
}

fn last_text(app: &App) -> String {
    app.app_state
        .client
        .state()
        .last_message()
        .map(|m| m.text().to_string())
        .unwrap_or_default()
}

#[test]
fn test_enter_sends_chat_request() {
    let mut events = EventService::new(Box::new(Idle));
    let (mut app, mut action_rx) = new_app(&mut events, new_client());

    app.handle_event(Event::KeyboardPaste("what is rust".to_string()));
    assert!(!app.handle_event(Event::KeyboardEnter));

    let request = match action_rx.try_recv() {
        Ok(Action::SendChat(request)) => request,
        _ => panic!("expected a chat request"),
    };
    assert_eq!(request.message, "what is rust");
    assert!(app.app_state.client.is_loading());
    assert_eq!(app.input.lines().join(""), "");

    app.handle_event(Event::ChatReply(ChatReply {
        id: request.id,
        result: Ok("  A language.  ".to_string()),
    }));
    assert!(!app.app_state.client.is_loading());
    assert_eq!(last_text(&app), "A language.");
    assert_eq!(app.app_state.client.state().len(), 3);
}

#[test]
fn test_enter_while_waiting_warns() {
    let mut events = EventService::new(Box::new(Idle));
    let (mut app, mut action_rx) = new_app(&mut events, new_client());

    app.handle_event(Event::KeyboardPaste("first".to_string()));
    app.handle_event(Event::KeyboardEnter);
    assert!(action_rx.try_recv().is_ok());

    app.handle_event(Event::KeyboardEnter);
    assert!(action_rx.try_recv().is_err());
    assert_eq!(app.notice.len(), 1);
    assert_eq!(app.app_state.client.state().len(), 2);
}

#[test]
fn test_blank_input_is_ignored() {
    let mut events = EventService::new(Box::new(Idle));
    let (mut app, mut action_rx) = new_app(&mut events, new_client());

    app.handle_event(Event::KeyboardPaste("   ".to_string()));
    app.handle_event(Event::KeyboardEnter);

    assert!(action_rx.try_recv().is_err());
    assert!(!app.app_state.client.is_loading());
    assert_eq!(app.app_state.client.state().len(), 1);
}

#[test]
fn test_ctrl_c_aborts_pending_request() {
    let mut events = EventService::new(Box::new(Idle));
    let (mut app, mut action_rx) = new_app(&mut events, new_client());

    app.handle_event(Event::KeyboardPaste("slow question".to_string()));
    app.handle_event(Event::KeyboardEnter);
    let Ok(Action::SendChat(request)) = action_rx.try_recv() else {
        panic!("expected a chat request");
    };

    app.handle_event(Event::KeyboardCtrlC);
    assert!(request.token.is_cancelled());

    app.handle_event(Event::ChatReply(ChatReply {
        id: request.id,
        result: Err(eyre::eyre!("cancelled")),
    }));
    assert_eq!(last_text(&app), FALLBACK_MESSAGE);
}

#[test]
fn test_ctrl_n_discards_stale_reply() {
    let mut events = EventService::new(Box::new(Idle));
    let (mut app, mut action_rx) = new_app(&mut events, new_client());

    app.handle_event(Event::KeyboardPaste("question".to_string()));
    app.handle_event(Event::KeyboardEnter);
    let Ok(Action::SendChat(request)) = action_rx.try_recv() else {
        panic!("expected a chat request");
    };

    app.handle_event(Event::KeyboardCtrlN);
    assert!(request.token.is_cancelled());
    assert!(!app.app_state.client.is_loading());

    app.handle_event(Event::ChatReply(ChatReply {
        id: request.id,
        result: Ok("late".to_string()),
    }));
    assert_eq!(app.app_state.client.state().len(), 1);
    assert_eq!(last_text(&app), "Hello!");
}

#[test]
fn test_paste_of_file_path_is_a_drop() {
    let path = std::env::temp_dir().join(format!("ragchat-drop-{}.txt", uuid::Uuid::new_v4()));
    std::fs::write(&path, "notes").unwrap();
    let path_str = path.to_string_lossy().to_string();

    let mut events = EventService::new(Box::new(Idle));
    let (mut app, mut action_rx) = new_app(&mut events, new_client());

    app.handle_event(Event::UiMouseDrag {
        button: MouseButton::Left,
        x: 1,
        y: 1,
    });
    assert!(app.app_state.client.staging().is_drag_over());

    app.handle_event(Event::KeyboardPaste(format!("'{}'", path_str)));
    match action_rx.try_recv() {
        Ok(Action::LoadFile(loaded)) => assert_eq!(loaded, path_str),
        _ => panic!("expected a load file action"),
    }
    assert_eq!(app.input.lines().join(""), "");

    app.handle_event(Event::FileSelected(UploadFile::new("notes.txt", "notes")));
    let staging = app.app_state.client.staging();
    assert!(!staging.is_drag_over());
    assert_eq!(staging.selected().map(|f| f.name()), Some("notes.txt"));

    app.handle_event(Event::KeyboardEsc);
    assert!(app.app_state.client.staging().selected().is_none());

    std::fs::remove_file(path).ok();
}

#[test]
fn test_file_picker_loads_typed_path() {
    let mut events = EventService::new(Box::new(Idle));
    let (mut app, mut action_rx) = new_app(&mut events, new_client());

    app.handle_event(Event::KeyboardCtrlO);
    assert!(app.file_picker.showing());

    app.handle_event(Event::KeyboardPaste("/tmp/report.pdf".to_string()));
    app.handle_event(Event::KeyboardEnter);
    assert!(!app.file_picker.showing());

    match action_rx.try_recv() {
        Ok(Action::LoadFile(loaded)) => assert_eq!(loaded, "/tmp/report.pdf"),
        _ => panic!("expected a load file action"),
    }
    assert!(!app.app_state.pending_drop);
}

#[test]
fn test_confirm_upload_flow() {
    let mut events = EventService::new(Box::new(Idle));
    let (mut app, mut action_rx) = new_app(&mut events, new_client());

    app.handle_event(Event::FileSelected(UploadFile::new("a[1].txt", "data")));
    app.handle_event(Event::KeyboardCtrlY);

    let request = match action_rx.try_recv() {
        Ok(Action::SendFile(request)) => request,
        _ => panic!("expected an upload request"),
    };
    assert_eq!(request.file.name(), "a[1].txt");
    assert!(app.app_state.client.staging().selected().is_none());
    assert_eq!(app.app_state.uploading, Some(request.id));

    app.handle_event(Event::UploadReply(UploadReply {
        id: request.id,
        file_name: "a[1].txt".to_string(),
        result: Ok(()),
    }));
    assert_eq!(app.app_state.uploading, None);
    assert_eq!(last_text(&app), "[a\\[1\\].txt](#)");
    assert_eq!(
        app.app_state.client.state().last_message().map(|m| m.sender()),
        Some(Sender::User)
    );
    assert_eq!(app.notice.len(), 1);
}

#[test]
fn test_upload_failure_is_noticed() {
    let mut events = EventService::new(Box::new(Idle));
    let (mut app, mut action_rx) = new_app(&mut events, new_client());

    app.handle_event(Event::FileSelected(UploadFile::new("big.bin", "data")));
    app.handle_event(Event::KeyboardCtrlY);
    let Ok(Action::SendFile(request)) = action_rx.try_recv() else {
        panic!("expected an upload request");
    };

    app.handle_event(Event::UploadReply(UploadReply {
        id: request.id,
        file_name: "big.bin".to_string(),
        result: Err(eyre::eyre!("status 413")),
    }));
    assert_eq!(last_text(&app), "[big.bin](#)");
    assert_eq!(app.notice.len(), 1);
}

#[test]
fn test_upload_disabled() {
    let mut events = EventService::new(Box::new(Idle));
    let client = new_client().with_upload_enabled(false);
    let (mut app, mut action_rx) = new_app(&mut events, client);

    app.handle_event(Event::KeyboardCtrlO);
    assert!(!app.file_picker.showing());

    app.handle_event(Event::UiMouseDrag {
        button: MouseButton::Left,
        x: 1,
        y: 1,
    });
    assert!(!app.app_state.client.staging().is_drag_over());

    app.handle_event(Event::FileSelected(UploadFile::new("a.txt", "data")));
    app.handle_event(Event::KeyboardCtrlY);
    assert!(action_rx.try_recv().is_err());
}

#[test]
fn test_quit() {
    let mut events = EventService::new(Box::new(Idle));
    let (mut app, _action_rx) = new_app(&mut events, new_client());

    assert!(!app.handle_event(Event::UiTick));
    assert!(app.handle_event(Event::Quit));
}
