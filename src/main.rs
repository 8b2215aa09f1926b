use clap::Parser;
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tracing::{info, warn};

use alert_relay::{app, app_state_builder, config, mailer, registry, server_config};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Bind host (default: 127.0.0.1)
    #[arg(long)]
    host: Option<String>,

    /// Bind port (default: 8787)
    #[arg(long)]
    port: Option<u16>,

    /// Max request body size in bytes (default: 102400)
    #[arg(long)]
    max_body_bytes: Option<usize>,

    /// Sender address for outbound alert email
    #[arg(long)]
    from: Option<String>,

    /// Config TOML file (default: /etc/alert-relay/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config_path = args
        .config
        .unwrap_or_else(|| PathBuf::from("/etc/alert-relay/config.toml"));
    let config = match config::Config::load(&config_path) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            if let Some(ioe) = e.downcast_ref::<std::io::Error>() {
                if ioe.kind() == std::io::ErrorKind::NotFound {
                    info!(
                        "config file not found at {}; continuing",
                        config_path.display()
                    );
                    None
                } else {
                    return Err(e);
                }
            } else {
                return Err(e);
            }
        }
    };

    let cli = server_config::CliOverrides {
        host: args.host,
        port: args.port,
        max_body_bytes: args.max_body_bytes,
        mail_from: args.from,
    };
    let eff = server_config::effective_settings(&cli, config.as_ref());

    let registry = registry::AppRegistry::from_env();
    if registry.is_empty() {
        warn!("no APP_<NAME>_EMAIL entries in the environment; every report will be dropped as unknown");
    } else {
        info!("app registry loaded with {} entries", registry.len());
    }

    let api_key = std::env::var(&eff.api_key_env)
        .ok()
        .filter(|k| !k.trim().is_empty());
    if api_key.is_none() {
        warn!(
            "{} not set; email delivery will fail until it is provided",
            eff.api_key_env
        );
    }

    let http = app_state_builder::build_http_client()?;
    let mailer: Arc<dyn mailer::EmailTransport> = Arc::new(mailer::HttpMailer::new(
        http,
        eff.mail_api_url.clone(),
        eff.mail_from.clone(),
        api_key,
    ));

    let state = app_state_builder::build_app_state(registry, mailer);
    let app = app::build_router(state, eff.max_body_bytes);

    let addr: SocketAddr = format!("{}:{}", eff.host, eff.port).parse()?;
    info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
