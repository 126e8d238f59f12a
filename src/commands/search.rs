//! Search Commands

use crate::models::bible::SearchOutcome;
use crate::models::response::CommandResponse;
use crate::models::settings::BibleVersion;
use crate::services::history::passage_entries;
use crate::state::AppState;
use crate::utils::error::AppResult;

/// Search by reference or theme and record the verses found in the history.
/// `version` defaults to the configured translation.
pub async fn search(
    state: &AppState,
    query: &str,
    version: Option<BibleVersion>,
) -> CommandResponse<SearchOutcome> {
    search_inner(state, query, version).await.into()
}

async fn search_inner(
    state: &AppState,
    query: &str,
    version: Option<BibleVersion>,
) -> AppResult<SearchOutcome> {
    let version = match version {
        Some(version) => version,
        None => state.get_config().await?.translation,
    };

    let outcome = state.search_service().await?.search(query, version).await?;

    let verses = match &outcome {
        SearchOutcome::Direct { passage, .. } => passage_entries(passage),
        SearchOutcome::Semantic { matches, .. } => matches.clone(),
    };
    let history = state.history_service().await?;
    state
        .with_preferences_mut(|store| {
            history.record(store, verses);
            Ok(())
        })
        .await?;

    Ok(outcome)
}
