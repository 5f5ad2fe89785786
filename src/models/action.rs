use super::{ChatRequest, UploadRequest};

#[derive(Debug)]
pub enum Action {
    SendChat(ChatRequest),
    SendFile(UploadRequest),
    LoadFile(String), // File path
}
