pub const HELLO_MESSAGE: &str = "Hello! How can I assist you today?";

/// Shown in place of an assistant reply whenever the chat request fails
pub const FALLBACK_MESSAGE: &str = "Sorry, I am unable to process your request at the moment.";

pub const TYPING_MESSAGE: &str = "Assistant is typing...";

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080";

pub const CHAT_PATH: &str = "/api/chat";

pub const UPLOAD_PATH: &str = "/api/upload";

pub const REQUEST_TIMEOUT_SECS: u64 = 60;

pub const MIN_REQUEST_TIMEOUT_SECS: u64 = 1;

pub const LOG_FILE_PATH: &str = "/tmp/ragchat.log";

pub const BUBBLE_WIDTH_PERCENT: usize = 60; // 60% of the screen width

pub const MAX_BUBBLE_WIDTH_PERCENT: usize = 95;

pub const MIN_BUBBLE_WIDTH_PERCENT: usize = 50;

pub const FRAME_DURATION: std::time::Duration = std::time::Duration::from_millis(1000 / 30);
