use alert_relay::{
    app, app_state_builder,
    mailer::{EmailTransport, OutboundEmail},
    registry::AppRegistry,
};
use async_trait::async_trait;
use axum::Router;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};

/// Recording transport double: captures every outbound email and can be
/// flipped to refuse delivery.
pub struct MockMailer {
    sent: Mutex<Vec<OutboundEmail>>,
    succeed: AtomicBool,
}

impl MockMailer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            succeed: AtomicBool::new(true),
        })
    }

    pub fn failing() -> Arc<Self> {
        let mock = Self::new();
        mock.succeed.store(false, Ordering::SeqCst);
        mock
    }

    pub fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().unwrap().clone()
    }

    pub fn send_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl EmailTransport for MockMailer {
    async fn send(&self, email: &OutboundEmail) -> bool {
        self.sent.lock().unwrap().push(email.clone());
        self.succeed.load(Ordering::SeqCst)
    }
}

pub fn test_registry() -> AppRegistry {
    AppRegistry::new([
        (
            "APP_MAIL_BOX_EMAIL".to_string(),
            "security@mailbox.test".to_string(),
        ),
        (
            "APP_MAIL_GUARD_EMAIL".to_string(),
            "guard@mailbox.test".to_string(),
        ),
    ])
}

pub fn app_with(mailer: Arc<MockMailer>) -> Router {
    let state = app_state_builder::build_app_state(test_registry(), mailer);
    app::build_router(state, 100 * 1024)
}
