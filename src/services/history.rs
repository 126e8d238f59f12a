//! Verse History
//!
//! Verses the user has looked up, oldest first, persisted in the preference
//! store under a single key.

use crate::models::bible::{Passage, VerseReference};
use crate::storage::preferences::PreferenceStore;

/// Preference key holding the history list
pub const HISTORY_KEY: &str = "bible_crentech_history";

/// Default number of entries kept
pub const MAX_HISTORY_SIZE: usize = 50;

/// History operations over a preference store
#[derive(Debug, Clone, Copy)]
pub struct HistoryService {
    limit: usize,
}

impl Default for HistoryService {
    fn default() -> Self {
        Self::new(MAX_HISTORY_SIZE)
    }
}

impl HistoryService {
    pub fn new(limit: usize) -> Self {
        Self {
            limit: limit.max(1),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Stored history, empty when nothing was saved yet
    pub fn get_history(&self, store: &PreferenceStore) -> Vec<VerseReference> {
        store.load(HISTORY_KEY, Vec::new())
    }

    /// New history with `verse` appended, keeping only the most recent entries
    pub fn add_to_history(
        &self,
        history: &[VerseReference],
        verse: VerseReference,
    ) -> Vec<VerseReference> {
        self.extend_history(history, std::iter::once(verse))
    }

    /// New history with all `verses` appended in order
    pub fn extend_history(
        &self,
        history: &[VerseReference],
        verses: impl IntoIterator<Item = VerseReference>,
    ) -> Vec<VerseReference> {
        let mut updated = history.to_vec();
        updated.extend(verses);
        if updated.len() > self.limit {
            updated.drain(..updated.len() - self.limit);
        }
        updated
    }

    pub fn save_history(&self, store: &mut PreferenceStore, history: &[VerseReference]) {
        store.save(HISTORY_KEY, &history);
    }

    /// Append `verses` to the stored history and persist the result
    pub fn record(
        &self,
        store: &mut PreferenceStore,
        verses: impl IntoIterator<Item = VerseReference>,
    ) -> Vec<VerseReference> {
        let current = self.get_history(store);
        let updated = self.extend_history(&current, verses);
        self.save_history(store, &updated);
        tracing::debug!("[HistoryService] History now holds {} verses", updated.len());
        updated
    }

    pub fn clear(&self, store: &mut PreferenceStore) {
        store.clear(HISTORY_KEY);
    }
}

/// History entries for each verse of a passage
pub fn passage_entries(passage: &Passage) -> Vec<VerseReference> {
    passage
        .verses
        .iter()
        .map(|v| VerseReference {
            book: passage.name.clone(),
            chapter: passage.chapter,
            verse: v.number,
            text: v.text.clone(),
        })
        .collect()
}
