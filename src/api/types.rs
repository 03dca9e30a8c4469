//! Shared state for the web front end router.

use std::sync::Arc;

use crate::backend::RiskBackend;
use crate::config::FrontendConfig;
use crate::flow::PredictionFlow;
use crate::sessions::SessionStore;

/// Shared context for all routes.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<FrontendConfig>,
    pub flow: Arc<PredictionFlow>,
    pub sessions: Arc<SessionStore>,
}

impl AppContext {
    pub fn new(config: FrontendConfig, backend: Arc<dyn RiskBackend>) -> Self {
        let flow = PredictionFlow::from_config(backend, &config);
        let sessions = SessionStore::new(config.session_ttl);
        Self {
            config: Arc::new(config),
            flow: Arc::new(flow),
            sessions: Arc::new(sessions),
        }
    }

    pub fn backend(&self) -> &Arc<dyn RiskBackend> {
        self.flow.backend()
    }

    /// Backend base URL as shown in user-facing error messages.
    pub fn backend_url(&self) -> &str {
        self.flow.backend_url()
    }
}
