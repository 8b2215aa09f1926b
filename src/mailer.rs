use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::{info, warn};

/// A rendered alert ready for hand-off to the email provider.
#[derive(Debug, Clone)]
pub struct OutboundEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Outbound delivery seam. Tests inject a recording double here.
#[async_trait]
pub trait EmailTransport: Send + Sync {
    /// True only when the provider accepted the message. Rejection,
    /// network failure and a missing credential are all reported
    /// uniformly as false and logged; there are no retries.
    async fn send(&self, email: &OutboundEmail) -> bool;
}

/// Client for a transactional email API: one bearer-authenticated POST
/// to the provider's send endpoint per alert.
pub struct HttpMailer {
    http: Client,
    api_url: String,
    from: String,
    api_key: Option<String>,
}

impl HttpMailer {
    pub fn new(http: Client, api_url: String, from: String, api_key: Option<String>) -> Self {
        Self {
            http,
            api_url,
            from,
            api_key,
        }
    }
}

#[async_trait]
impl EmailTransport for HttpMailer {
    async fn send(&self, email: &OutboundEmail) -> bool {
        let Some(key) = self.api_key.as_deref() else {
            warn!(to = %email.to, "mail API key not configured; dropping email");
            return false;
        };

        let body = json!({
            "from": self.from,
            "to": email.to,
            "subject": email.subject,
            "html": email.html,
        });

        match self
            .http
            .post(&self.api_url)
            .bearer_auth(key)
            .json(&body)
            .send()
            .await
        {
            Ok(resp) if resp.status().is_success() => {
                info!(to = %email.to, "alert email accepted by provider");
                true
            }
            Ok(resp) => {
                warn!(to = %email.to, status = %resp.status(), "mail provider rejected send");
                false
            }
            Err(e) => {
                warn!(to = %email.to, "mail request failed: {e}");
                false
            }
        }
    }
}

impl std::fmt::Debug for HttpMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The credential must never reach logs.
        f.debug_struct("HttpMailer")
            .field("api_url", &self.api_url)
            .field("from", &self.from)
            .field("api_key_set", &self.api_key.is_some())
            .finish()
    }
}
