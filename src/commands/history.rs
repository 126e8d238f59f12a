//! History Commands

use crate::models::bible::VerseReference;
use crate::models::response::CommandResponse;
use crate::state::AppState;
use crate::utils::error::AppResult;

/// Verses looked up so far, oldest first
pub async fn get_history(state: &AppState) -> CommandResponse<Vec<VerseReference>> {
    get_history_inner(state).await.into()
}

async fn get_history_inner(state: &AppState) -> AppResult<Vec<VerseReference>> {
    let history = state.history_service().await?;
    state
        .with_preferences(|store| Ok(history.get_history(store)))
        .await
}

/// Forget all looked-up verses
pub async fn clear_history(state: &AppState) -> CommandResponse<bool> {
    clear_history_inner(state).await.into()
}

async fn clear_history_inner(state: &AppState) -> AppResult<bool> {
    let history = state.history_service().await?;
    state
        .with_preferences_mut(|store| {
            history.clear(store);
            Ok(true)
        })
        .await
}
