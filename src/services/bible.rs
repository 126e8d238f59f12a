//! Bible Data Service
//!
//! Reads the bundled Bible: `index.json` plus one `<abbrev>.json` per book.
//! Books are loaded on first use and cached for the lifetime of the service.
//! The service is created once by the composition root and shared through an
//! `Arc`; all caching state belongs to the instance.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use bible_crentech_core::{BibleReference, BookCatalog};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use crate::models::bible::{BookData, BookIndexEntry, Passage, VerseText};
use crate::utils::error::{AppError, AppResult};

/// Name of the index file inside the data directory
pub const INDEX_FILE: &str = "index.json";

/// Lazy, caching reader over a Bible data directory
pub struct BibleService {
    data_dir: PathBuf,
    catalog: &'static BookCatalog,
    index: RwLock<Option<Arc<Vec<BookIndexEntry>>>>,
    books: RwLock<HashMap<String, Arc<BookData>>>,
}

impl BibleService {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            catalog: BookCatalog::standard(),
            index: RwLock::new(None),
            books: RwLock::new(HashMap::new()),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// True when the data directory has an index file
    pub fn has_data(&self) -> bool {
        self.data_dir.join(INDEX_FILE).is_file()
    }

    /// List of books, loaded once
    pub async fn get_index(&self) -> AppResult<Arc<Vec<BookIndexEntry>>> {
        self.load_index().await.map_err(|e| {
            tracing::warn!("[BibleService] Error loading Bible index: {}", e);
            e
        })
    }

    /// Failures are not cached: an index written later (e.g. by the
    /// splitter) is picked up on the next call.
    async fn load_index(&self) -> AppResult<Arc<Vec<BookIndexEntry>>> {
        if let Some(index) = self.index.read().await.as_ref() {
            return Ok(Arc::clone(index));
        }

        let path = self.data_dir.join(INDEX_FILE);
        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| AppError::not_found(format!("Bible index at {}: {}", path.display(), e)))?;
        let index: Vec<BookIndexEntry> = serde_json::from_str(strip_bom(&content))?;
        tracing::debug!("[BibleService] Loaded index with {} books", index.len());

        let index = Arc::new(index);
        *self.index.write().await = Some(Arc::clone(&index));
        Ok(index)
    }

    /// Book data by any alias, loaded once
    pub async fn get_book(&self, abbrev: &str) -> AppResult<Arc<BookData>> {
        let key = abbrev.trim().to_lowercase();
        if key.is_empty() || !key.chars().all(char::is_alphanumeric) {
            return Err(AppError::not_found(format!("Book not found: {}", abbrev)));
        }

        let file_key = self.resolve_file_key(&key).await;
        if let Some(book) = self.books.read().await.get(&file_key) {
            return Ok(Arc::clone(book));
        }

        let path = self.data_dir.join(format!("{}.json", file_key));
        let content = tokio::fs::read_to_string(&path).await.map_err(|e| {
            tracing::warn!("[BibleService] Error loading book {}: {}", file_key, e);
            AppError::not_found(format!("Book not found: {}", key))
        })?;
        let book: BookData = serde_json::from_str(strip_bom(&content)).map_err(|e| {
            tracing::warn!("[BibleService] Book file {} is corrupt: {}", path.display(), e);
            AppError::not_found(format!("Book not found: {}", key))
        })?;
        tracing::debug!(
            "[BibleService] Loaded {} ({} chapters)",
            book.name,
            book.chapters.len()
        );

        let mut books = self.books.write().await;
        let cached = books
            .entry(file_key)
            .or_insert_with(|| Arc::new(book));
        Ok(Arc::clone(cached))
    }

    /// Verses of a 1-based chapter
    pub async fn get_chapter(&self, abbrev: &str, chapter: u32) -> AppResult<Vec<String>> {
        let book = self.get_book(abbrev).await?;
        chapter_verses(&book, chapter)
            .map(<[String]>::to_vec)
            .ok_or_else(|| AppError::not_found(format!("Chapter not found: {} {}", abbrev, chapter)))
    }

    /// Whole chapter as a labelled passage
    pub async fn read_chapter(&self, abbrev: &str, chapter: u32) -> AppResult<Passage> {
        let reference = BibleReference::chapter(abbrev, chapter)?;
        self.get_verses(&reference).await
    }

    /// Text for a reference: one verse, a range clamped to the chapter end, or
    /// the whole chapter.
    pub async fn get_verses(&self, reference: &BibleReference) -> AppResult<Passage> {
        let book = self.get_book(reference.book()).await?;
        let chapter = reference.chapter_number();
        let verses = chapter_verses(&book, chapter).ok_or_else(|| {
            AppError::not_found(format!("Chapter not found: {} {}", reference.book(), chapter))
        })?;

        let (first, selected) = match reference.verse_span() {
            Some((start, end)) => {
                let start_idx = (start - 1) as usize;
                if start_idx >= verses.len() {
                    return Err(AppError::not_found(format!("Verse not found: {}", reference)));
                }
                let end_idx = (end as usize).min(verses.len());
                (start, &verses[start_idx..end_idx])
            }
            None => (1, verses),
        };

        let verses = selected
            .iter()
            .zip(first..)
            .map(|(text, number)| VerseText {
                reference: format!("{} {}:{}", book.name, chapter, number),
                number,
                text: text.clone(),
            })
            .collect();

        Ok(Passage {
            book: reference.book().to_string(),
            name: book.name.clone(),
            chapter,
            chapter_count: book.chapters.len() as u32,
            verses,
        })
    }

    /// Key of the book after `abbrev`, by index order, falling back to the
    /// catalog when no index is available.
    pub async fn next_book_key(&self, abbrev: &str) -> Option<String> {
        let key = abbrev.trim().to_lowercase();
        if let Ok(index) = self.load_index().await {
            if let Some(pos) = index.iter().position(|b| b.abbrev.contains(&key)) {
                return index.get(pos + 1).and_then(BookIndexEntry::file_key);
            }
        }
        self.catalog
            .next_after(&key)
            .map(|b| b.primary_alias().to_string())
    }

    /// Start loading the book after `abbrev` in the background.
    pub async fn preload_next_book(self: &Arc<Self>, abbrev: &str) -> Option<JoinHandle<()>> {
        let next = self.next_book_key(abbrev).await?;
        let service = Arc::clone(self);
        Some(tokio::spawn(async move {
            if let Err(e) = service.get_book(&next).await {
                tracing::debug!("[BibleService] Preload of {} failed: {}", next, e);
            }
        }))
    }

    /// Keys of the books currently cached
    pub async fn cached_books(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.books.read().await.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Map a requested alias onto the file name used by the data directory.
    ///
    /// The data files may be keyed by a different alias than the catalog's
    /// primary one (e.g. `atos` instead of `at`), so every alias of the
    /// catalog book is tried against the index.
    async fn resolve_file_key(&self, key: &str) -> String {
        let index = match self.load_index().await {
            Ok(index) => index,
            Err(e) => {
                tracing::debug!("[BibleService] No index to resolve {}: {}", key, e);
                return key.to_string();
            }
        };

        let mut candidates = vec![key.to_string()];
        if let Some(entry) = self.catalog.find_by_alias(key) {
            candidates.extend(entry.abbreviations.iter().cloned());
        }

        candidates
            .iter()
            .find_map(|candidate| {
                index
                    .iter()
                    .find(|b| b.abbrev.contains(candidate))
                    .and_then(BookIndexEntry::file_key)
            })
            .unwrap_or_else(|| key.to_string())
    }
}

fn chapter_verses(book: &BookData, chapter: u32) -> Option<&[String]> {
    let idx = (chapter as usize).checked_sub(1)?;
    book.chapters.get(idx).map(Vec::as_slice)
}

fn strip_bom(content: &str) -> &str {
    content.strip_prefix('\u{feff}').unwrap_or(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_fixture(dir: &Path) {
        fs::write(
            dir.join(INDEX_FILE),
            r#"[{"name":"Rute","abbrev":"rt","chapters":2},{"name":"Atos","abbrev":"atos","chapters":1}]"#,
        )
        .unwrap();
        fs::write(
            dir.join("rt.json"),
            r#"{"abbrev":"rt","name":"Rute","chapters":[["r1v1","r1v2","r1v3"],["r2v1"]]}"#,
        )
        .unwrap();
        fs::write(
            dir.join("atos.json"),
            "\u{feff}{\"abbrev\":\"atos\",\"name\":\"Atos\",\"chapters\":[[\"a1v1\"]]}",
        )
        .unwrap();
    }

    #[tokio::test]
    async fn test_get_verses_single_and_range() {
        let temp = tempfile::tempdir().unwrap();
        write_fixture(temp.path());
        let service = BibleService::new(temp.path());

        let single = service
            .get_verses(&BibleReference::verse("rt", 1, 2).unwrap())
            .await
            .unwrap();
        assert_eq!(single.verses.len(), 1);
        assert_eq!(single.verses[0].reference, "Rute 1:2");
        assert_eq!(single.verses[0].text, "r1v2");

        // Range past the chapter end is clamped.
        let range = service
            .get_verses(&BibleReference::range("rt", 1, 2, 9).unwrap())
            .await
            .unwrap();
        let numbers: Vec<u32> = range.verses.iter().map(|v| v.number).collect();
        assert_eq!(numbers, vec![2, 3]);
        assert_eq!(range.chapter_count, 2);
    }

    #[tokio::test]
    async fn test_whole_chapter() {
        let temp = tempfile::tempdir().unwrap();
        write_fixture(temp.path());
        let service = BibleService::new(temp.path());

        let passage = service.read_chapter("rt", 1).await.unwrap();
        assert_eq!(passage.verses.len(), 3);
        assert_eq!(passage.verses[2].reference, "Rute 1:3");
    }

    #[tokio::test]
    async fn test_out_of_range_is_not_found() {
        let temp = tempfile::tempdir().unwrap();
        write_fixture(temp.path());
        let service = BibleService::new(temp.path());

        let missing_chapter = service.get_verses(&BibleReference::chapter("rt", 3).unwrap()).await;
        assert!(matches!(missing_chapter, Err(AppError::NotFound(_))));

        let missing_verse = service
            .get_verses(&BibleReference::verse("rt", 2, 2).unwrap())
            .await;
        assert!(matches!(missing_verse, Err(AppError::NotFound(_))));

        let missing_book = service.get_book("gn").await;
        assert!(matches!(missing_book, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_alias_resolved_through_catalog() {
        let temp = tempfile::tempdir().unwrap();
        write_fixture(temp.path());
        let service = BibleService::new(temp.path());

        // The catalog's primary key for Atos is "at", the data file is atos.json.
        let book = service.get_book("at").await.unwrap();
        assert_eq!(book.name, "Atos");
        service.get_book("ATOS").await.unwrap();
        assert_eq!(service.cached_books().await, vec!["atos".to_string()]);
    }

    #[tokio::test]
    async fn test_rejects_path_like_keys() {
        let temp = tempfile::tempdir().unwrap();
        write_fixture(temp.path());
        let service = BibleService::new(temp.path());
        assert!(service.get_book("../rt").await.is_err());
        assert!(service.get_book("").await.is_err());
    }

    #[tokio::test]
    async fn test_next_book_and_preload() {
        let temp = tempfile::tempdir().unwrap();
        write_fixture(temp.path());
        let service = Arc::new(BibleService::new(temp.path()));

        assert_eq!(service.next_book_key("rt").await.as_deref(), Some("atos"));
        assert_eq!(service.next_book_key("atos").await, None);

        let handle = service.preload_next_book("rt").await.unwrap();
        handle.await.unwrap();
        assert_eq!(service.cached_books().await, vec!["atos".to_string()]);
    }

    #[tokio::test]
    async fn test_missing_index_is_retried() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(
            temp.path().join("rt.json"),
            r#"{"abbrev":"rt","name":"Rute","chapters":[["um"]]}"#,
        )
        .unwrap();
        let service = BibleService::new(temp.path());

        // Without an index the key is used as the file name.
        assert_eq!(service.get_book("rt").await.unwrap().name, "Rute");
        assert!(service.get_index().await.is_err());

        write_fixture(temp.path());
        assert_eq!(service.get_index().await.unwrap().len(), 2);
        assert_eq!(service.get_book("at").await.unwrap().name, "Atos");
    }

    #[tokio::test]
    async fn test_next_book_without_index_uses_catalog() {
        let temp = tempfile::tempdir().unwrap();
        let service = BibleService::new(temp.path());
        assert!(!service.has_data());
        assert_eq!(service.next_book_key("gn").await.as_deref(), Some("ex"));
    }
}
