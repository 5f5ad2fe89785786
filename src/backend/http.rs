#[cfg(test)]
#[path = "http_test.rs"]
mod tests;

use crate::backend::{ArcBackend, Backend, BackendError};
use crate::config::constants::{CHAT_PATH, DEFAULT_ENDPOINT, UPLOAD_PATH};
use crate::config::user_agent;
use crate::models::UploadFile;
use async_trait::async_trait;
use eyre::{Context, Result};
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time;

pub struct HttpBackend {
    endpoint: String,
    chat_path: String,
    upload_path: String,
    timeout: Option<time::Duration>,
}

#[async_trait]
impl Backend for HttpBackend {
    async fn chat(&self, message: String) -> Result<String> {
        let mut req = reqwest::Client::new()
            .post(self.chat_url())
            .header("Content-Type", "application/json")
            .header("User-Agent", user_agent());

        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }

        let body = ChatRequestBody { message };
        log::trace!("Sending chat request: {:?}", body);

        let res = req
            .json(&body)
            .send()
            .await
            .wrap_err("sending chat request")?;

        let status = res.status();
        let text = res.text().await.wrap_err("reading chat response")?;
        if !status.is_success() {
            log::error!("Chat error response ({}): {}", status.as_u16(), text);
            return Err(BackendError::Status {
                code: status.as_u16(),
                body: text,
            }
            .into());
        }

        let res = serde_json::from_str::<ChatResponseBody>(&text)
            .wrap_err(format!("parsing chat response: {}", text))?;
        Ok(res.reply)
    }

    async fn upload(&self, file: UploadFile) -> Result<()> {
        log::debug!("Uploading {} ({} bytes)", file.name(), file.size());
        let (name, content, mime_type) = file.into_parts();
        let part = Part::bytes(content)
            .file_name(name)
            .mime_str(&mime_type)
            .wrap_err(format!("invalid mime type {}", mime_type))?;
        let form = Form::new().part("file", part);

        let mut req = reqwest::Client::new()
            .post(self.upload_url())
            .header("User-Agent", user_agent());

        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }

        let res = req
            .multipart(form)
            .send()
            .await
            .wrap_err("sending upload request")?;

        let status = res.status();
        let text = res.text().await.wrap_err("reading upload response")?;
        if !status.is_success() {
            log::error!("Upload error response ({}): {}", status.as_u16(), text);
            return Err(BackendError::Status {
                code: status.as_u16(),
                body: text,
            }
            .into());
        }

        log::debug!("Upload response: {}", text);
        Ok(())
    }
}

impl From<HttpBackend> for ArcBackend {
    fn from(value: HttpBackend) -> Self {
        Arc::new(value)
    }
}

impl HttpBackend {
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.trim_end_matches('/').to_string();
        self
    }

    pub fn with_chat_path(mut self, path: &str) -> Self {
        self.chat_path = path.to_string();
        self
    }

    pub fn with_upload_path(mut self, path: &str) -> Self {
        self.upload_path = path.to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: time::Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn timeout(&self) -> Option<time::Duration> {
        self.timeout
    }

    pub fn chat_url(&self) -> String {
        join_url(&self.endpoint, &self.chat_path)
    }

    pub fn upload_url(&self) -> String {
        join_url(&self.endpoint, &self.upload_path)
    }
}

impl Default for HttpBackend {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            chat_path: CHAT_PATH.to_string(),
            upload_path: UPLOAD_PATH.to_string(),
            timeout: None,
        }
    }
}

fn join_url(endpoint: &str, path: &str) -> String {
    format!("{}/{}", endpoint, path.trim_start_matches('/'))
}

#[derive(Default, Debug, Serialize, Deserialize)]
struct ChatRequestBody {
    message: String,
}

#[derive(Default, Debug, Serialize, Deserialize)]
struct ChatResponseBody {
    reply: String,
}
