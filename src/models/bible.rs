//! Bible Data Models
//!
//! Shapes of the bundled Bible files and of the verses handed to the UI.

use bible_crentech_core::{BibleReference, BookCatalogEntry};
use serde::{Deserialize, Serialize};

use super::settings::BibleVersion;

/// Book aliases in index.json: either a single string or a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Abbreviations {
    One(String),
    Many(Vec<String>),
}

impl Abbreviations {
    /// First alias, used as the book's file name
    pub fn primary(&self) -> Option<&str> {
        match self {
            Abbreviations::One(abbrev) => Some(abbrev.as_str()),
            Abbreviations::Many(list) => list.first().map(String::as_str),
        }
    }

    /// Case-insensitive membership test
    pub fn contains(&self, abbrev: &str) -> bool {
        match self {
            Abbreviations::One(own) => own.to_lowercase() == abbrev,
            Abbreviations::Many(list) => list.iter().any(|a| a.to_lowercase() == abbrev),
        }
    }
}

/// One line of index.json
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookIndexEntry {
    pub name: String,
    pub abbrev: Abbreviations,
    pub chapters: u32,
}

impl BookIndexEntry {
    /// Lower-cased key of the book's JSON file
    pub fn file_key(&self) -> Option<String> {
        self.abbrev.primary().map(|a| a.to_lowercase())
    }
}

/// Contents of `<abbrev>.json`: chapters in order, each a list of verses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookData {
    pub abbrev: String,
    pub name: String,
    pub chapters: Vec<Vec<String>>,
}

/// A verse ready for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseText {
    /// Label such as "João 3:16"
    pub reference: String,
    pub number: u32,
    pub text: String,
}

/// A verse as remembered in the history and returned by semantic search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseReference {
    pub book: String,
    pub chapter: u32,
    pub verse: u32,
    pub text: String,
}

/// Verses of one chapter: the whole chapter in the reader, or the verses a
/// reference selected
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Passage {
    pub book: String,
    pub name: String,
    pub chapter: u32,
    pub chapter_count: u32,
    pub verses: Vec<VerseText>,
}

/// Catalog entry as listed to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookSummary {
    pub name: String,
    pub abbrev: String,
    pub chapter_count: u32,
}

impl From<&BookCatalogEntry> for BookSummary {
    fn from(entry: &BookCatalogEntry) -> Self {
        Self {
            name: entry.canonical_name.clone(),
            abbrev: entry.primary_alias().to_string(),
            chapter_count: entry.chapter_count,
        }
    }
}

/// Result of a search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SearchOutcome {
    /// The query was a reference and the verses came from local data
    Direct {
        reference: BibleReference,
        passage: Passage,
    },
    /// The query was thematic and was answered by the semantic provider
    Semantic {
        query: String,
        version: BibleVersion,
        matches: Vec<VerseReference>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_accepts_string_or_list() {
        let json = r#"[
            {"name": "Gênesis", "abbrev": "gn", "chapters": 50},
            {"name": "Atos", "abbrev": ["Atos", "at"], "chapters": 28}
        ]"#;
        let index: Vec<BookIndexEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(index[0].file_key().as_deref(), Some("gn"));
        assert_eq!(index[1].file_key().as_deref(), Some("atos"));
        assert!(index[1].abbrev.contains("at"));
        assert!(!index[0].abbrev.contains("ex"));
    }

    #[test]
    fn test_search_outcome_tagging() {
        let outcome = SearchOutcome::Semantic {
            query: "ansiedade".to_string(),
            version: BibleVersion::Acf,
            matches: Vec::new(),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["kind"], "semantic");
        assert_eq!(json["version"], "ACF");
    }
}
