use anyhow::Result;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: Option<ServerConfig>,
    pub mail: Option<MailConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    /// Ceiling for inbound request bodies, in bytes.
    pub max_body_bytes: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MailConfig {
    /// Send endpoint of the transactional email provider.
    pub api_url: Option<String>,
    /// Sender address for every outbound alert email.
    pub from: Option<String>,
    /// Name of the environment variable holding the provider credential.
    pub api_key_env: Option<String>,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let cfg: Self = toml::from_str(&raw)?;
        Ok(cfg)
    }
}
