use std::sync::Arc;

use crate::agents::registry::AgentRegistry;
use crate::scraper::ProfileSource;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Assistants keyed by OpenAI credential; all share `sessions`.
    pub agents: Arc<AgentRegistry>,
    pub sessions: Arc<dyn SessionStore>,
    pub profiles: Arc<dyn ProfileSource>,
}
