use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::ChatModel;
use crate::questions::QuestionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub questions: QuestionStore,
    /// Model that labels incoming queries.
    pub classifier: Arc<dyn ChatModel>,
    /// Model that writes the mentoring reply. May be the same endpoint as `classifier`.
    pub mentor: Arc<dyn ChatModel>,
}
