pub mod http;

pub use http::HttpBackend;

#[cfg(test)]
use mockall::automock;

use crate::{config::BackendConfig, models::UploadFile};
use async_trait::async_trait;
use eyre::{Context, Result};
use std::{sync::Arc, time::Duration};
use thiserror::Error;

#[async_trait]
#[cfg_attr(test, automock)]
pub trait Backend {
    /// Send one chat message and return the raw `reply` field.
    async fn chat(&self, message: String) -> Result<String>;
    async fn upload(&self, file: UploadFile) -> Result<()>;
}

pub type ArcBackend = Arc<dyn Backend + Send + Sync>;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("backend returned status {code}: {body}")]
    Status { code: u16, body: String },

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("request cancelled")]
    Cancelled,
}

pub fn new_backend(config: &BackendConfig) -> Result<ArcBackend> {
    reqwest::Url::parse(&config.endpoint)
        .wrap_err(format!("parsing backend endpoint {}", config.endpoint))?;

    let backend = HttpBackend::default()
        .with_endpoint(&config.endpoint)
        .with_chat_path(&config.chat_path)
        .with_upload_path(&config.upload_path)
        .with_timeout(config.timeout());
    log::debug!(
        "Backend endpoint: {} (chat: {}, upload: {})",
        backend.endpoint(),
        backend.chat_url(),
        backend.upload_url()
    );
    Ok(backend.into())
}
