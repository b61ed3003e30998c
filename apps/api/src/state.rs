use std::sync::Arc;

use sqlx::PgPool;

use crate::analysis::formations::FormationSearch;
use crate::llm_client::gemini::VisionClient;
use crate::llm_client::LlmClient;
use crate::search_client::SearchClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub llm: LlmClient,
    pub vision: VisionClient,
    pub search: SearchClient,
    /// Formation lookups for skill-gap analysis. Production: the same `SearchClient`.
    pub formation_search: Arc<dyn FormationSearch>,
}
