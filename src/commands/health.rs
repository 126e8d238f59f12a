//! Health Check Commands

use crate::models::response::{CommandResponse, HealthResponse};
use crate::state::AppState;

/// Health of the configuration, the Bible data and the semantic provider
pub async fn get_health(state: &AppState) -> CommandResponse<HealthResponse> {
    let mut health = HealthResponse::default();

    health.config = state.is_config_healthy();
    health.bible_data = state.is_bible_available();
    health.semantic_search = state.has_semantic_search();

    // Semantic search is optional.
    health.status = if health.config && health.bible_data {
        "healthy".to_string()
    } else {
        "degraded".to_string()
    };

    CommandResponse::ok(health)
}
