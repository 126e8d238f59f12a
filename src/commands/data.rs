//! Data Commands

use std::path::{Path, PathBuf};

use crate::models::response::CommandResponse;
use crate::services::splitter::{split_bible as split, SplitReport};
use crate::state::AppState;
use crate::utils::error::AppResult;

/// Split a whole-Bible JSON file into the data directory. Without `out_dir`
/// the configured Bible directory is used.
pub async fn split_bible(
    state: &AppState,
    source: &Path,
    out_dir: Option<PathBuf>,
) -> CommandResponse<SplitReport> {
    split_bible_inner(state, source, out_dir).await.into()
}

async fn split_bible_inner(
    state: &AppState,
    source: &Path,
    out_dir: Option<PathBuf>,
) -> AppResult<SplitReport> {
    let out_dir = match out_dir {
        Some(dir) => dir,
        None => state.bible().await?.data_dir().to_path_buf(),
    };
    let source = source.to_path_buf();
    tokio::task::spawn_blocking(move || split(&source, &out_dir))
        .await
        .map_err(|e| crate::utils::error::AppError::internal(e.to_string()))?
}
