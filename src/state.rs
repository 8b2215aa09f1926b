use crate::{mailer, registry};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub registry: registry::AppRegistry,
    pub mailer: Arc<dyn mailer::EmailTransport>,
}
