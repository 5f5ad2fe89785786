use std::time::Duration;

use tokio::sync::mpsc::UnboundedReceiver;

use super::*;
use crate::backend::MockBackend;
use crate::models::{ChatRequest, UploadRequest};

#[tokio::test]
async fn test_chat_action() {
    let mut backend = MockBackend::new();
    backend
        .expect_chat()
        .times(1)
        .returning(|message| Box::pin(async move { Ok(format!("re: {message}")) }));

    let (action_tx, mut event_rx, token) = start_service(backend);
    action_tx
        .send(Action::SendChat(ChatRequest {
            id: 7,
            message: "Hello".to_string(),
            token: token.child_token(),
        }))
        .expect("failed to send action");

    match next_event(&mut event_rx).await {
        Event::ChatReply(reply) => {
            assert_eq!(reply.id, 7);
            assert_eq!(reply.result.expect("reply"), "re: Hello");
        }
        event => panic!("Unexpected event: {:?}", event),
    }
    token.cancel();
}

#[tokio::test]
async fn test_upload_action_reports_failure() {
    let mut backend = MockBackend::new();
    backend
        .expect_upload()
        .times(1)
        .returning(|_| Box::pin(async move { Err(eyre::eyre!("connection reset")) }));

    let (action_tx, mut event_rx, token) = start_service(backend);
    action_tx
        .send(Action::SendFile(UploadRequest {
            id: 3,
            file: UploadFile::new("notes.txt", "notes"),
            token: token.child_token(),
        }))
        .expect("failed to send action");

    match next_event(&mut event_rx).await {
        Event::UploadReply(reply) => {
            assert_eq!(reply.id, 3);
            assert_eq!(reply.file_name, "notes.txt");
            assert!(reply.result.is_err());
        }
        event => panic!("Unexpected event: {:?}", event),
    }
    token.cancel();
}

#[tokio::test]
async fn test_load_file_action() {
    let path = std::env::temp_dir().join(format!("ragchat-{}.txt", uuid::Uuid::new_v4()));
    std::fs::write(&path, "hello").expect("failed to write temp file");

    let (action_tx, mut event_rx, token) = start_service(MockBackend::new());
    action_tx
        .send(Action::LoadFile(path.to_string_lossy().to_string()))
        .expect("failed to send action");

    match next_event(&mut event_rx).await {
        Event::FileSelected(file) => {
            assert_eq!(file.content(), b"hello");
            assert_eq!(file.mime_type(), "text/plain");
        }
        event => panic!("Unexpected event: {:?}", event),
    }
    std::fs::remove_file(&path).ok();

    action_tx
        .send(Action::LoadFile("/definitely/not/here.txt".to_string()))
        .expect("failed to send action");
    assert!(matches!(next_event(&mut event_rx).await, Event::Notice(_)));
    token.cancel();
}

fn start_service(
    backend: MockBackend,
) -> (
    mpsc::UnboundedSender<Action>,
    UnboundedReceiver<Event>,
    CancellationToken,
) {
    let (action_tx, action_rx) = mpsc::unbounded_channel::<Action>();
    let (event_tx, event_rx) = mpsc::unbounded_channel::<Event>();
    let token = CancellationToken::new();

    let mut service = ActionService::new(
        Arc::new(backend),
        action_rx,
        Arc::new(event_tx),
        token.clone(),
        Duration::from_secs(5),
    );
    tokio::spawn(async move { service.run().await });
    (action_tx, event_rx, token)
}

async fn next_event(rx: &mut UnboundedReceiver<Event>) -> Event {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("timed out waiting for event")
        .expect("event channel closed")
}
