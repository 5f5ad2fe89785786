use std::time::Duration;

use eyre::Result;
use tokio_util::sync::CancellationToken;

use crate::backend::{ArcBackend, BackendError};
use crate::models::{ChatRequest, UploadRequest};

pub async fn dispatch_chat(
    backend: &ArcBackend,
    request: &ChatRequest,
    timeout: Duration,
) -> Result<String> {
    with_deadline(
        backend.chat(request.message.clone()),
        &request.token,
        timeout,
    )
    .await
}

pub async fn dispatch_upload(
    backend: &ArcBackend,
    request: UploadRequest,
    timeout: Duration,
) -> Result<()> {
    let UploadRequest { file, token, .. } = request;
    with_deadline(backend.upload(file), &token, timeout).await
}

async fn with_deadline<T>(
    fut: impl Future<Output = Result<T>>,
    token: &CancellationToken,
    timeout: Duration,
) -> Result<T> {
    tokio::select! {
        _ = token.cancelled() => Err(BackendError::Cancelled.into()),
        res = tokio::time::timeout(timeout, fut) => match res {
            Ok(res) => res,
            Err(_) => Err(BackendError::Timeout(timeout).into()),
        },
    }
}
