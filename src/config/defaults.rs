use super::constants::*;

pub(crate) fn hello_message() -> Option<String> {
    Some(HELLO_MESSAGE.to_string())
}

pub(crate) fn log_level() -> Option<String> {
    Some("info".to_string())
}

pub(crate) fn log_file_path() -> String {
    LOG_FILE_PATH.to_string()
}

pub(crate) fn bubble_width_percent() -> usize {
    BUBBLE_WIDTH_PERCENT
}

pub(crate) fn endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

pub(crate) fn chat_path() -> String {
    CHAT_PATH.to_string()
}

pub(crate) fn upload_path() -> String {
    UPLOAD_PATH.to_string()
}

pub(crate) fn timeout_secs() -> u64 {
    REQUEST_TIMEOUT_SECS
}

pub(crate) fn default_true() -> bool {
    true
}
