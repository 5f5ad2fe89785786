use tokio_util::sync::CancellationToken;

use super::UploadFile;

/// One outstanding chat exchange. The token is cancelled on abort or
/// session reset.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub id: u64,
    pub message: String,
    pub token: CancellationToken,
}

#[derive(Debug)]
pub struct ChatReply {
    pub id: u64,
    pub result: eyre::Result<String>,
}

#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub id: u64,
    pub file: UploadFile,
    pub token: CancellationToken,
}

#[derive(Debug)]
pub struct UploadReply {
    pub id: u64,
    pub file_name: String,
    pub result: eyre::Result<()>,
}
