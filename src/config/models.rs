use eyre::Result;
use serde::{Deserialize, Serialize};

#[allow(unused_imports)]
use super::CONFIG;

use super::constants::{
    BUBBLE_WIDTH_PERCENT, CHAT_PATH, DEFAULT_ENDPOINT, HELLO_MESSAGE, LOG_FILE_PATH,
    MAX_BUBBLE_WIDTH_PERCENT, MIN_BUBBLE_WIDTH_PERCENT, MIN_REQUEST_TIMEOUT_SECS,
    REQUEST_TIMEOUT_SECS, UPLOAD_PATH,
};
use super::defaults::*;

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct Configuration {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub log: LogConfig,

    #[serde(default)]
    pub theme: ThemeConfig,

    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub upload: UploadConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct GeneralConfig {
    #[serde(default = "hello_message")]
    pub hello_message: Option<String>,

    #[serde(default)]
    pub verbose: bool,

    #[serde(default = "bubble_width_percent")]
    pub bubble_width_percent: usize,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LogConfig {
    #[serde(default = "log_level")]
    pub level: Option<String>,

    #[serde(default)]
    pub filters: Option<Vec<LogFilter>>,

    #[serde(default)]
    pub file: LogFile,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LogFilter {
    #[serde(default)]
    pub module: Option<String>,

    #[serde(default)]
    pub level: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LogFile {
    #[serde(default = "log_file_path")]
    pub path: String,

    #[serde(default)]
    pub append: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ThemeConfig {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub folder_path: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct BackendConfig {
    /// Base URL of the chat server, without a trailing path
    #[serde(default = "endpoint")]
    pub endpoint: String,

    #[serde(default = "chat_path")]
    pub chat_path: String,

    #[serde(default = "upload_path")]
    pub upload_path: String,

    #[serde(default = "timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct UploadConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Configuration {
    #[cfg(not(test))]
    pub fn instance() -> &'static Configuration {
        CONFIG.get().expect("Config not initialized")
    }

    #[cfg(not(test))]
    pub fn init(config: Configuration) -> Result<()> {
        CONFIG
            .set(config)
            .map_err(|_| eyre::eyre!("Config already initialized"))?;
        Ok(())
    }

    #[cfg(test)]
    pub fn instance() -> &'static Configuration {
        use super::TEST_CONFIG;
        TEST_CONFIG.with(|config| *config.borrow())
    }

    #[cfg(test)]
    pub fn init(config: Configuration) -> Result<()> {
        use super::TEST_CONFIG;
        TEST_CONFIG.with(|test_config| {
            *test_config.borrow_mut() = Box::leak(Box::new(config));
        });
        Ok(())
    }
}

impl GeneralConfig {
    pub fn get_bubble_width_percent(&self) -> usize {
        self.bubble_width_percent
            .clamp(MIN_BUBBLE_WIDTH_PERCENT, MAX_BUBBLE_WIDTH_PERCENT)
    }
}

impl BackendConfig {
    /// Request timeout, never shorter than one second.
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs.max(MIN_REQUEST_TIMEOUT_SECS))
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            hello_message: Some(HELLO_MESSAGE.to_string()),
            verbose: false,
            bubble_width_percent: BUBBLE_WIDTH_PERCENT,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Some("info".to_string()),
            file: LogFile::default(),
            filters: None,
        }
    }
}

impl Default for LogFile {
    fn default() -> Self {
        Self {
            path: LOG_FILE_PATH.to_string(),
            append: false,
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: Some("base16-ocean.dark".to_string()),
            folder_path: None,
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            chat_path: CHAT_PATH.to_string(),
            upload_path: UPLOAD_PATH.to_string(),
            timeout_secs: REQUEST_TIMEOUT_SECS,
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}
