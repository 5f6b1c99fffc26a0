//! Shared application state for the UI server.

use std::sync::Arc;

use roster::app::AppState;
use roster::io::config::RosterConfig;
use tokio::sync::Mutex;

/// State shared by all request handlers.
///
/// One lock guards the whole registry: a handler holds it for the full
/// check-then-act sequence of an action (duplicate check + append, or
/// credential match + session transition).
#[derive(Clone)]
pub struct SharedState {
    pub app: Arc<Mutex<AppState>>,
}

impl SharedState {
    pub fn new(config: &RosterConfig) -> Self {
        Self::from_app(AppState::new(config.registry.duplicate_emails))
    }

    pub fn from_app(app: AppState) -> Self {
        Self {
            app: Arc::new(Mutex::new(app)),
        }
    }
}
