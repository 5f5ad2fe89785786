#[cfg(test)]
#[path = "upload_test.rs"]
mod tests;

use std::path::Path;

use eyre::{Context, Result};

const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    name: String,
    content: Vec<u8>,
    mime_type: String,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        let name = name.into();
        let mime_type = guess_mime_type(&name).to_string();
        Self {
            name,
            content: content.into(),
            mime_type,
        }
    }

    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .ok_or_else(|| eyre::eyre!("{} is not a file", path.display()))?;
        let content = tokio::fs::read(path)
            .await
            .wrap_err(format!("reading {}", path.display()))?;
        Ok(Self::new(name, content))
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = mime_type.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Splits the file into name, content and mime type without copying.
    pub fn into_parts(self) -> (String, Vec<u8>, String) {
        (self.name, self.content, self.mime_type)
    }

    pub fn size(&self) -> usize {
        self.content.len()
    }
}

/// Holds at most one file waiting for the user to confirm or cancel it.
/// The confirmation affordance is visible exactly when a file is staged.
#[derive(Debug, Default)]
pub struct UploadStaging {
    selected: Option<UploadFile>,
    drag_over: bool,
}

impl UploadStaging {
    pub fn select(&mut self, file: UploadFile) {
        if let Some(prev) = self.selected.as_ref() {
            log::debug!("replacing staged file {} with {}", prev.name(), file.name());
        }
        self.selected = Some(file);
    }

    pub fn drop_file(&mut self, file: UploadFile) {
        self.drag_over = false;
        self.select(file);
    }

    pub fn cancel(&mut self) {
        self.selected = None;
    }

    pub fn take(&mut self) -> Option<UploadFile> {
        self.selected.take()
    }

    pub fn selected(&self) -> Option<&UploadFile> {
        self.selected.as_ref()
    }

    pub fn confirmation_visible(&self) -> bool {
        self.selected.is_some()
    }

    pub fn drag_enter(&mut self) {
        self.drag_over = true;
    }

    pub fn drag_leave(&mut self) {
        self.drag_over = false;
    }

    pub fn is_drag_over(&self) -> bool {
        self.drag_over
    }
}

pub fn guess_mime_type(name: &str) -> &'static str {
    mime_guess::from_path(name)
        .first_raw()
        .unwrap_or(DEFAULT_MIME_TYPE)
}

/// Markdown link shown in the conversation for an uploaded file.
pub fn file_placeholder(name: &str) -> String {
    let escaped = name.replace('[', "\\[").replace(']', "\\]");
    format!("[{}](#)", escaped)
}
