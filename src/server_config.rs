use crate::config;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8787;
pub const DEFAULT_MAX_BODY_BYTES: usize = 100 * 1024;
pub const DEFAULT_MAIL_API_URL: &str = "https://api.resend.com/emails";
pub const DEFAULT_MAIL_FROM: &str = "alerts@signic.email";
pub const DEFAULT_API_KEY_ENV: &str = "MAIL_API_KEY";

#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub max_body_bytes: Option<usize>,
    pub mail_from: Option<String>,
}

#[derive(Debug, Clone)]
pub struct EffectiveSettings {
    pub host: String,
    pub port: u16,
    pub max_body_bytes: usize,
    pub mail_api_url: String,
    pub mail_from: String,
    pub api_key_env: String,
}

/// Layered settings: CLI flag, then config file, then (for the sender
/// address) the MAIL_FROM environment variable, then the default.
pub fn effective_settings(cli: &CliOverrides, cfg: Option<&config::Config>) -> EffectiveSettings {
    let cfg_server = cfg.and_then(|c| c.server.as_ref());
    let cfg_mail = cfg.and_then(|c| c.mail.as_ref());

    let host = cli
        .host
        .clone()
        .or_else(|| cfg_server.and_then(|s| s.host.clone()))
        .unwrap_or_else(|| DEFAULT_HOST.to_string());

    let port = cli
        .port
        .or_else(|| cfg_server.and_then(|s| s.port))
        .unwrap_or(DEFAULT_PORT);

    let max_body_bytes = cli
        .max_body_bytes
        .or_else(|| cfg_server.and_then(|s| s.max_body_bytes))
        .unwrap_or(DEFAULT_MAX_BODY_BYTES);

    let mail_api_url = cfg_mail
        .and_then(|m| m.api_url.clone())
        .unwrap_or_else(|| DEFAULT_MAIL_API_URL.to_string());

    let mail_from = cli
        .mail_from
        .clone()
        .or_else(|| cfg_mail.and_then(|m| m.from.clone()))
        .or_else(|| std::env::var("MAIL_FROM").ok().filter(|v| !v.is_empty()))
        .unwrap_or_else(|| DEFAULT_MAIL_FROM.to_string());

    let api_key_env = cfg_mail
        .and_then(|m| m.api_key_env.clone())
        .unwrap_or_else(|| DEFAULT_API_KEY_ENV.to_string());

    EffectiveSettings {
        host,
        port,
        max_body_bytes,
        mail_api_url,
        mail_from,
        api_key_env,
    }
}
