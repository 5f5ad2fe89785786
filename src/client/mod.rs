#[cfg(test)]
#[path = "client_test.rs"]
mod tests;

pub mod dispatch;

pub use dispatch::{dispatch_chat, dispatch_upload};

use std::{sync::Arc, time::Duration};

use eyre::Result;
use tokio_util::sync::CancellationToken;

use crate::backend::ArcBackend;
use crate::config::{
    Configuration,
    constants::{FALLBACK_MESSAGE, REQUEST_TIMEOUT_SECS},
};
use crate::models::{
    ChatReply, ChatRequest, ConversationState, Sender, UploadFile, UploadReply, UploadRequest,
    UploadStaging, upload::file_placeholder,
};

struct PendingChat {
    id: u64,
    token: CancellationToken,
}

/// Owns the conversation and the upload staging, and turns user intents
/// into backend requests.
///
/// Every exchange goes through a `begin_*` step that mutates the local state
/// and hands back a request, and a `finish_*` step that applies the result.
/// The terminal app runs the request in between on a worker task; `send_text`
/// and `confirm_upload` do all three steps inline.
pub struct ChatClient {
    state: ConversationState,
    staging: UploadStaging,
    backend: ArcBackend,

    greeting: String,
    timeout: Duration,
    upload_enabled: bool,
    cancel_token: CancellationToken,

    next_request_id: u64,
    // Replies for ids below this belong to a discarded session
    session_start_id: u64,
    pending: Option<PendingChat>,
}

impl ChatClient {
    pub fn new(backend: ArcBackend) -> Self {
        Self {
            state: ConversationState::default(),
            staging: UploadStaging::default(),
            backend,
            greeting: String::new(),
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            upload_enabled: true,
            cancel_token: CancellationToken::new(),
            next_request_id: 1,
            session_start_id: 1,
            pending: None,
        }
    }

    pub fn from_config(backend: ArcBackend, config: &Configuration) -> Self {
        Self::new(backend)
            .with_greeting(config.general.hello_message.as_deref().unwrap_or_default())
            .with_timeout(config.backend.timeout())
            .with_upload_enabled(config.upload.enabled)
    }

    pub fn with_greeting(mut self, greeting: impl Into<String>) -> Self {
        self.greeting = greeting.into();
        self.state = ConversationState::new_hello(&self.greeting);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_upload_enabled(mut self, enabled: bool) -> Self {
        self.upload_enabled = enabled;
        self
    }

    /// Request tokens are children of this token, cancelling it aborts
    /// everything in flight.
    pub fn with_cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel_token = token;
        self
    }

    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    pub fn staging(&self) -> &UploadStaging {
        &self.staging
    }

    pub fn backend(&self) -> ArcBackend {
        Arc::clone(&self.backend)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn upload_enabled(&self) -> bool {
        self.upload_enabled
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub async fn send_text(&mut self, input: &str) {
        let Some(request) = self.begin_text(input) else {
            return;
        };
        let backend = self.backend();
        let result = dispatch_chat(&backend, &request, self.timeout).await;
        self.finish_text(ChatReply {
            id: request.id,
            result,
        });
    }

    /// Records the user message and marks the conversation as loading.
    /// Returns `None` for blank input, or while another exchange is still
    /// outstanding.
    pub fn begin_text(&mut self, input: &str) -> Option<ChatRequest> {
        if input.trim().is_empty() {
            return None;
        }

        if let Some(pending) = self.pending.as_ref() {
            log::warn!(
                "Refusing to send while request {} is outstanding",
                pending.id
            );
            return None;
        }

        self.state.append_message(Sender::User, input);
        self.state.set_loading(true);

        let id = self.next_id();
        let token = self.cancel_token.child_token();
        self.pending = Some(PendingChat {
            id,
            token: token.clone(),
        });
        log::debug!("Sending chat request {}", id);

        Some(ChatRequest {
            id,
            message: input.to_string(),
            token,
        })
    }

    /// Applies a chat result. Returns false when the reply does not match the
    /// outstanding request and was dropped.
    pub fn finish_text(&mut self, reply: ChatReply) -> bool {
        match self.pending.as_ref() {
            Some(pending) if pending.id == reply.id => {}
            _ => {
                log::debug!("Discarding stale chat reply {}", reply.id);
                return false;
            }
        }
        self.pending = None;

        match reply.result {
            Ok(text) => {
                log::debug!("Chat request {} succeeded", reply.id);
                self.state.append_message(Sender::Assistant, text.trim());
            }
            Err(err) => {
                log::error!("Chat request {} failed: {:?}", reply.id, err);
                self.state.append_message(Sender::Assistant, FALLBACK_MESSAGE);
            }
        }
        self.state.set_loading(false);
        true
    }

    /// Cancels the outstanding chat request, if any. The request then
    /// completes through the normal failure path.
    pub fn abort(&mut self) -> bool {
        match self.pending.as_ref() {
            Some(pending) => {
                log::info!("Aborting chat request {}", pending.id);
                pending.token.cancel();
                true
            }
            None => false,
        }
    }

    /// Stages a file. Ignored when upload is disabled.
    pub fn select_file(&mut self, file: UploadFile) {
        if !self.upload_enabled {
            log::warn!("Upload is disabled, ignoring {}", file.name());
            return;
        }
        self.staging.select(file);
    }

    pub fn drop_file(&mut self, file: UploadFile) {
        if !self.upload_enabled {
            log::warn!("Upload is disabled, ignoring dropped {}", file.name());
            self.staging.drag_leave();
            return;
        }
        self.staging.drop_file(file);
    }

    pub fn cancel_upload(&mut self) {
        self.staging.cancel();
    }

    pub fn drag_enter(&mut self) {
        self.staging.drag_enter();
    }

    pub fn drag_leave(&mut self) {
        self.staging.drag_leave();
    }

    /// Uploads the staged file and records it in the conversation. The
    /// placeholder message is appended whether or not the upload succeeded;
    /// the failure, if any, is returned. Fails when upload is disabled.
    pub async fn confirm_upload(&mut self) -> Result<()> {
        if !self.upload_enabled {
            eyre::bail!("upload is disabled");
        }
        let Some(request) = self.begin_upload() else {
            return Ok(());
        };
        let id = request.id;
        let file_name = request.file.name().to_string();
        let backend = self.backend();
        let result = dispatch_upload(&backend, request, self.timeout).await;
        self.finish_upload(UploadReply {
            id,
            file_name,
            result,
        })
    }

    /// Takes the staged file out of the staging area. No-op when nothing is
    /// staged.
    pub fn begin_upload(&mut self) -> Option<UploadRequest> {
        if !self.upload_enabled {
            log::warn!("Upload is disabled, ignoring confirmation");
            return None;
        }

        let file = self.staging.take()?;
        let id = self.next_id();
        log::debug!("Sending upload request {} for {}", id, file.name());
        Some(UploadRequest {
            id,
            file,
            token: self.cancel_token.child_token(),
        })
    }

    pub fn finish_upload(&mut self, reply: UploadReply) -> Result<()> {
        if reply.id < self.session_start_id {
            log::debug!("Discarding stale upload reply {}", reply.id);
            return Ok(());
        }

        self.state
            .append_message(Sender::User, file_placeholder(&reply.file_name));

        if let Err(err) = reply.result {
            log::error!(
                "Upload request {} for {} failed: {:?}",
                reply.id,
                reply.file_name,
                err
            );
            return Err(err.wrap_err(format!("uploading {}", reply.file_name)));
        }
        Ok(())
    }

    /// Drops the current conversation and staged file and starts over.
    /// Replies for requests sent before the reset are discarded.
    pub fn reset(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.token.cancel();
        }
        self.state = ConversationState::new_hello(&self.greeting);
        self.staging = UploadStaging::default();
        self.session_start_id = self.next_request_id;
    }

    fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }
}
