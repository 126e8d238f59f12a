//! Bible Splitter
//!
//! Offline preparation of the data directory: a whole-Bible JSON array
//! becomes one `<abbrev>.json` per book plus `index.json`.

use std::fs;
use std::path::Path;

use serde::Serialize;

use super::bible::INDEX_FILE;
use crate::models::bible::{Abbreviations, BookData, BookIndexEntry};
use crate::utils::error::{AppError, AppResult};
use crate::utils::paths::ensure_dir;

/// Summary of a split run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitReport {
    pub books: usize,
    pub chapters: usize,
    pub index: Vec<BookIndexEntry>,
}

/// Split `source` into per-book files under `out_dir`.
pub fn split_bible(source: &Path, out_dir: &Path) -> AppResult<SplitReport> {
    if !source.is_file() {
        return Err(AppError::not_found(format!("File not found: {}", source.display())));
    }

    let content = fs::read_to_string(source)?;
    let content = content.strip_prefix('\u{feff}').unwrap_or(&content);
    let bible: Vec<BookData> = serde_json::from_str(content)?;
    ensure_dir(out_dir)?;

    let mut index = Vec::with_capacity(bible.len());
    for book in &bible {
        let abbrev = book.abbrev.trim().to_lowercase();
        if abbrev.is_empty() || !abbrev.chars().all(char::is_alphanumeric) {
            return Err(AppError::validation(format!(
                "Invalid abbreviation \"{}\" for {}",
                book.abbrev, book.name
            )));
        }

        let book_path = out_dir.join(format!("{}.json", abbrev));
        fs::write(&book_path, serde_json::to_string_pretty(book)?)?;
        tracing::info!("[Splitter] Saved: {} -> {}.json", book.name, abbrev);

        index.push(BookIndexEntry {
            name: book.name.clone(),
            abbrev: Abbreviations::One(abbrev),
            chapters: book.chapters.len() as u32,
        });
    }

    fs::write(out_dir.join(INDEX_FILE), serde_json::to_string_pretty(&index)?)?;
    tracing::info!("[Splitter] Saved: {} ({} books)", INDEX_FILE, index.len());

    Ok(SplitReport {
        books: index.len(),
        chapters: index.iter().map(|b| b.chapters as usize).sum(),
        index,
    })
}
