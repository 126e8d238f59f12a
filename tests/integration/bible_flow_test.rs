//! Reader, Search and History Integration Tests

use std::fs;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use bible_crentech::commands;
use bible_crentech::models::bible::{SearchOutcome, VerseReference};
use bible_crentech::models::settings::{BibleVersion, SettingsUpdate};
use bible_crentech::services::SemanticSearch;
use bible_crentech::utils::error::AppResult;
use bible_crentech::AppState;
use tempfile::TempDir;

const SOURCE_BIBLE: &str = r#"[
    {"abbrev": "rt", "name": "Rute", "chapters": [["r1v1", "r1v2", "r1v3"], ["r2v1", "r2v2"]]},
    {"abbrev": "jo", "name": "João", "chapters": [["j1v1"], ["j2v1"], ["j3v1", "j3v2"]]}
]"#;

struct ThemeProvider;

#[async_trait]
impl SemanticSearch for ThemeProvider {
    fn name(&self) -> &str {
        "theme-fixture"
    }

    async fn search(&self, query: &str, version: BibleVersion) -> AppResult<Vec<VerseReference>> {
        Ok(vec![VerseReference {
            book: "Salmos".to_string(),
            chapter: 23,
            verse: 1,
            text: format!("{} ({})", query, version),
        }])
    }
}

async fn setup() -> (TempDir, AppState) {
    let temp = tempfile::tempdir().unwrap();
    let state = AppState::new();
    state
        .initialize_with(
            temp.path().join("config.json"),
            temp.path().join("preferences.json"),
        )
        .await
        .unwrap();

    let source = temp.path().join("acf.json");
    fs::write(&source, format!("\u{feff}{}", SOURCE_BIBLE)).unwrap();
    let data_dir = temp.path().join("bible");

    let report = commands::split_bible(&state, &source, Some(data_dir.clone())).await;
    assert!(report.success, "{:?}", report.error);
    assert_eq!(report.data.unwrap().books, 2);

    let updated = commands::update_settings(
        &state,
        SettingsUpdate {
            data_dir: Some(data_dir),
            history_limit: Some(4),
            ..Default::default()
        },
    )
    .await;
    assert!(updated.success, "{:?}", updated.error);

    (temp, state)
}

fn history_labels(history: &[VerseReference]) -> Vec<String> {
    history
        .iter()
        .map(|v| format!("{} {}:{}", v.book, v.chapter, v.verse))
        .collect()
}

#[tokio::test]
async fn test_split_then_read() {
    let (_temp, state) = setup().await;

    let passage = commands::read_chapter(&state, "rt", 2).await.data.unwrap();
    assert_eq!(passage.name, "Rute");
    assert_eq!(passage.chapter_count, 2);
    assert_eq!(passage.verses[1].reference, "Rute 2:2");

    // Reading the last chapter of Rute starts loading João.
    let bible = state.bible().await.unwrap();
    for _ in 0..50 {
        if bible.cached_books().await.len() == 2 {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    assert_eq!(bible.cached_books().await, vec!["jo".to_string(), "rt".to_string()]);

    let missing = commands::read_chapter(&state, "rt", 3).await;
    assert!(!missing.success);

    let health = commands::get_health(&state).await.data.unwrap();
    assert!(health.bible_data);
    assert_eq!(health.status, "healthy");
}

#[tokio::test]
async fn test_reference_search_records_history() {
    let (_temp, state) = setup().await;

    let outcome = commands::search(&state, "joão 3:1-2", None).await.data.unwrap();
    match outcome {
        SearchOutcome::Direct { reference, passage } => {
            assert_eq!(reference.to_string(), "jo 3:1-2");
            assert_eq!(passage.verses.len(), 2);
        }
        other => panic!("unexpected outcome: {:?}", other),
    }

    commands::search(&state, "rt1", None).await.data.unwrap();
    commands::search(&state, "rt 1:2-9", None).await.data.unwrap();

    // The limit of four keeps only the most recent verses.
    let history = commands::get_history(&state).await.data.unwrap();
    assert_eq!(
        history_labels(&history),
        vec!["João 3:2", "Rute 1:1", "Rute 1:2", "Rute 1:3"]
    );

    assert!(commands::clear_history(&state).await.success);
    assert!(commands::get_history(&state).await.data.unwrap().is_empty());
}

#[tokio::test]
async fn test_theme_search_needs_provider() {
    let (_temp, state) = setup().await;

    let without = commands::search(&state, "bom pastor", None).await;
    assert!(!without.success);
    assert!(without.error.unwrap().contains("Not found"));

    state.set_semantic_search(Arc::new(ThemeProvider)).await;
    let outcome = commands::search(&state, "bom pastor", Some(BibleVersion::Nvi))
        .await
        .data
        .unwrap();
    match outcome {
        SearchOutcome::Semantic { matches, version, .. } => {
            assert_eq!(version, BibleVersion::Nvi);
            assert_eq!(matches[0].text, "bom pastor (NVI)");
        }
        other => panic!("unexpected outcome: {:?}", other),
    }

    let history = commands::get_history(&state).await.data.unwrap();
    assert_eq!(history_labels(&history), vec!["Salmos 23:1"]);
}

#[tokio::test]
async fn test_settings_survive_restart() {
    let (temp, state) = setup().await;
    let before = commands::get_settings(&state).await.data.unwrap();
    assert_eq!(before.history_limit, 4);

    let restarted = AppState::new();
    restarted
        .initialize_with(
            temp.path().join("config.json"),
            temp.path().join("preferences.json"),
        )
        .await
        .unwrap();
    let after = commands::get_settings(&restarted).await.data.unwrap();
    assert_eq!(after.history_limit, 4);
    assert_eq!(after.data_dir.as_deref(), Some(Path::new(&temp.path().join("bible"))));

    let invalid = commands::update_settings(
        &restarted,
        SettingsUpdate {
            history_limit: Some(0),
            ..Default::default()
        },
    )
    .await;
    assert!(!invalid.success);
    assert_eq!(commands::get_settings(&restarted).await.data.unwrap().history_limit, 4);
}
