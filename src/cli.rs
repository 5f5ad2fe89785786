#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;

use std::io::Write;

use clap::Parser;
use eyre::{Context, Result};

use crate::client::ChatClient;
use crate::config::{self, Configuration, load_configuration, lookup_config_path};
use crate::models::UploadFile;

#[derive(Debug, Parser)]
#[command(
    version,
    about,
    long_about = r#"A terminal chat client for a chat/upload backend

Default configuration file location looks up in the following order:
    * $XDG_CONFIG_HOME/ragchat/config.toml
    * $HOME/.config/ragchat/config.toml
    * $HOME/.ragchat.toml
"#,
    disable_version_flag = true
)]
pub struct Command {
    /// Configuration file path
    #[arg(short, long, value_name = "PATH")]
    config: Option<String>,

    /// Show the version
    #[arg(short, long)]
    version: bool,

    /// Backend base URL, overrides the configuration
    #[arg(short, long, value_name = "URL")]
    endpoint: Option<String>,

    /// Send a single message, print the reply and exit
    #[arg(short, long, value_name = "TEXT")]
    message: Option<String>,

    /// Upload a single file and exit. Runs before --message when both are set
    #[arg(short, long, value_name = "PATH")]
    upload: Option<String>,
}

impl Command {
    pub fn new() -> Command {
        Self::parse()
    }

    pub fn get_config(&self) -> Result<Configuration> {
        let config_path = self
            .config
            .clone()
            .unwrap_or_else(|| lookup_config_path().unwrap_or_default());

        let mut config = if config_path.is_empty() {
            // No config path is specified just use the default config
            Configuration::default()
        } else {
            load_configuration(config_path.as_str()).wrap_err("loading configuration")?
        };

        if let Some(endpoint) = &self.endpoint {
            config.backend.endpoint = endpoint.clone();
        }
        Ok(config)
    }

    pub fn version(&self) -> bool {
        self.version
    }

    pub fn print_version(&self) {
        println!("{}", config::version())
    }

    pub fn is_one_shot(&self) -> bool {
        self.message.is_some() || self.upload.is_some()
    }

    /// Runs the upload and/or message given on the command line against the
    /// client and writes the outcome to `out`.
    pub async fn run_one_shot(&self, client: &mut ChatClient, out: &mut impl Write) -> Result<()> {
        if let Some(path) = &self.upload {
            if !client.upload_enabled() {
                eyre::bail!("upload is disabled, cannot upload {}", path);
            }
            let file = UploadFile::from_path(path).await?;
            let name = file.name().to_string();
            client.select_file(file);
            client.confirm_upload().await?;
            writeln!(out, "Uploaded {}", name)?;
        }

        if let Some(message) = &self.message {
            let before = client.state().len();
            client.send_text(message).await;
            if client.state().len() == before {
                eyre::bail!("nothing to send");
            }
            if let Some(reply) = client.state().last_message() {
                writeln!(out, "{}", reply.text())?;
            }
        }
        Ok(())
    }
}

impl Default for Command {
    fn default() -> Self {
        Self::new()
    }
}
