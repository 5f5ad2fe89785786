#[cfg(test)]
#[path = "action_test.rs"]
mod tests;

use std::sync::Arc;
use std::time::Duration;

use crate::backend::ArcBackend;
use crate::client::{dispatch_chat, dispatch_upload};
use crate::models::{Action, ArcEventTx, ChatReply, Event, UploadFile, UploadReply};
use crate::notice_error;
use eyre::Result;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Runs backend work off the UI loop. Every action is handled on its own
/// task and reports back through the event channel.
pub struct ActionService {
    event_tx: ArcEventTx,
    action_rx: mpsc::UnboundedReceiver<Action>,
    cancel_token: CancellationToken,
    backend: ArcBackend,
    timeout: Duration,
}

impl ActionService {
    pub fn new(
        backend: ArcBackend,
        action_rx: mpsc::UnboundedReceiver<Action>,
        event_tx: ArcEventTx,
        cancel_token: CancellationToken,
        timeout: Duration,
    ) -> ActionService {
        ActionService {
            event_tx,
            action_rx,
            cancel_token,
            backend,
            timeout,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        loop {
            tokio::select! {
                _ = self.cancel_token.cancelled() => {
                    log::debug!("Action service cancelled");
                    return Ok(());
                }

                action = self.action_rx.recv() => {
                    let Some(action) = action else {
                        log::debug!("Action channel closed");
                        return Ok(());
                    };
                    self.handle_action(action);
                }
            }
        }
    }

    fn handle_action(&self, action: Action) {
        let worker_tx = Arc::clone(&self.event_tx);
        let backend = Arc::clone(&self.backend);
        let timeout = self.timeout;

        match action {
            Action::SendChat(request) => {
                tokio::spawn(async move {
                    let result = dispatch_chat(&backend, &request, timeout).await;
                    let reply = ChatReply {
                        id: request.id,
                        result,
                    };
                    send_event(worker_tx, Event::ChatReply(reply)).await;
                });
            }

            Action::SendFile(request) => {
                tokio::spawn(async move {
                    let id = request.id;
                    let file_name = request.file.name().to_string();
                    let result = dispatch_upload(&backend, request, timeout).await;
                    let reply = UploadReply {
                        id,
                        file_name,
                        result,
                    };
                    send_event(worker_tx, Event::UploadReply(reply)).await;
                });
            }

            Action::LoadFile(path) => {
                tokio::spawn(async move {
                    let event = match UploadFile::from_path(&path).await {
                        Ok(file) => Event::FileSelected(file),
                        Err(err) => {
                            log::error!("Failed to load {}: {:?}", path, err);
                            notice_error!(format!("Failed to load {}: {}", path, err))
                        }
                    };
                    send_event(worker_tx, event).await;
                });
            }
        }
    }
}

async fn send_event(event_tx: ArcEventTx, event: Event) {
    if let Err(err) = event_tx.send(event).await {
        log::error!("Failed to send event: {}", err);
    }
}
