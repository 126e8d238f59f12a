//! Reader Commands
//!
//! Chapter-by-chapter reading of the local Bible data.

use crate::models::bible::Passage;
use crate::models::response::CommandResponse;
use crate::state::AppState;
use crate::utils::error::AppResult;

/// Whole chapter of a book. Reading a book's last chapter starts a detached
/// load of the following book into the shared cache; a host that drops the
/// state right after the command (the CLI) simply abandons it.
pub async fn read_chapter(state: &AppState, book: &str, chapter: u32) -> CommandResponse<Passage> {
    read_chapter_inner(state, book, chapter).await.into()
}

async fn read_chapter_inner(state: &AppState, book: &str, chapter: u32) -> AppResult<Passage> {
    let bible = state.bible().await?;
    let passage = bible.read_chapter(book, chapter).await?;
    if chapter == passage.chapter_count {
        let preload = bible.preload_next_book(book).await;
        tracing::debug!(
            "[Reader] End of {}; next book preload started: {}",
            passage.name,
            preload.is_some()
        );
    }
    Ok(passage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::settings::SettingsUpdate;
    use std::fs;

    async fn state_with_two_books(dir: &std::path::Path) -> AppState {
        let data = dir.join("bible");
        fs::create_dir_all(&data).unwrap();
        fs::write(
            data.join("index.json"),
            r#"[{"name":"Rute","abbrev":"rt","chapters":2},{"name":"Ester","abbrev":"et","chapters":1}]"#,
        )
        .unwrap();
        fs::write(
            data.join("rt.json"),
            r#"{"abbrev":"rt","name":"Rute","chapters":[["a"],["b"]]}"#,
        )
        .unwrap();
        fs::write(
            data.join("et.json"),
            r#"{"abbrev":"et","name":"Ester","chapters":[["c"]]}"#,
        )
        .unwrap();

        let state = AppState::new();
        state
            .initialize_with(dir.join("config.json"), dir.join("preferences.json"))
            .await
            .unwrap();
        state
            .update_config(SettingsUpdate {
                data_dir: Some(data),
                ..Default::default()
            })
            .await
            .unwrap();
        state
    }

    #[tokio::test]
    async fn test_only_last_chapter_preloads_next_book() {
        let temp = tempfile::tempdir().unwrap();
        let state = state_with_two_books(temp.path()).await;
        let bible = state.bible().await.unwrap();

        assert!(read_chapter(&state, "rt", 1).await.success);
        tokio::task::yield_now().await;
        assert_eq!(bible.cached_books().await, vec!["rt".to_string()]);

        assert!(read_chapter(&state, "rt", 2).await.success);
        for _ in 0..50 {
            if bible.cached_books().await.len() == 2 {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        assert_eq!(bible.cached_books().await, vec!["et".to_string(), "rt".to_string()]);
    }

    #[tokio::test]
    async fn test_read_chapter_uninitialized() {
        let state = AppState::new();
        let response = read_chapter(&state, "gn", 1).await;
        assert!(!response.success);
        assert!(response.error.is_some());
    }
}
