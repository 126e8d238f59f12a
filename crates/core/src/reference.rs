//! Scripture Reference
//!
//! `BibleReference` is the structured output of the reference parser: a book
//! key (the catalog's primary alias), a chapter, and an optional verse or
//! inclusive verse range.
//!
//! The invariants are enforced by the constructors and on deserialization:
//! - chapter and verse numbers are at least 1
//! - `end_verse` is only present together with `verse`, and `end_verse >= verse`

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// A resolved pointer to Scripture text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "ReferenceWire")]
pub struct BibleReference {
    book: String,
    chapter: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    verse: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end_verse: Option<u32>,
}

impl BibleReference {
    /// Whole-chapter reference.
    pub fn chapter(book: impl Into<String>, chapter: u32) -> CoreResult<Self> {
        Self::build(book.into(), chapter, None, None)
    }

    /// Single-verse reference.
    pub fn verse(book: impl Into<String>, chapter: u32, verse: u32) -> CoreResult<Self> {
        Self::build(book.into(), chapter, Some(verse), None)
    }

    /// Inclusive verse range `verse..=end_verse` within one chapter.
    pub fn range(
        book: impl Into<String>,
        chapter: u32,
        verse: u32,
        end_verse: u32,
    ) -> CoreResult<Self> {
        Self::build(book.into(), chapter, Some(verse), Some(end_verse))
    }

    fn build(
        book: String,
        chapter: u32,
        verse: Option<u32>,
        end_verse: Option<u32>,
    ) -> CoreResult<Self> {
        if book.trim().is_empty() {
            return Err(CoreError::validation("reference book key is empty"));
        }
        if chapter == 0 {
            return Err(CoreError::validation("chapter numbers start at 1"));
        }
        match (verse, end_verse) {
            (Some(0), _) => return Err(CoreError::validation("verse numbers start at 1")),
            (None, Some(_)) => {
                return Err(CoreError::validation("end verse given without a start verse"))
            }
            (Some(start), Some(end)) if end < start => {
                return Err(CoreError::validation(format!(
                    "verse range {}-{} ends before it starts",
                    start, end
                )))
            }
            _ => {}
        }
        Ok(Self {
            book,
            chapter,
            verse,
            end_verse,
        })
    }

    /// Catalog key of the book (its primary alias).
    pub fn book(&self) -> &str {
        &self.book
    }

    pub fn chapter_number(&self) -> u32 {
        self.chapter
    }

    pub fn verse_number(&self) -> Option<u32> {
        self.verse
    }

    pub fn end_verse(&self) -> Option<u32> {
        self.end_verse
    }

    /// True when no verse was given.
    pub fn is_whole_chapter(&self) -> bool {
        self.verse.is_none()
    }

    /// First and last verse covered, when the reference names verses.
    pub fn verse_span(&self) -> Option<(u32, u32)> {
        self.verse
            .map(|start| (start, self.end_verse.unwrap_or(start)))
    }
}

/// Renders as `<book> <chapter>[:<verse>[-<end>]]`, which the parser reads back
/// to an equal reference.
impl fmt::Display for BibleReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.book, self.chapter)?;
        if let Some(verse) = self.verse {
            write!(f, ":{}", verse)?;
            if let Some(end) = self.end_verse {
                write!(f, "-{}", end)?;
            }
        }
        Ok(())
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReferenceWire {
    book: String,
    chapter: u32,
    #[serde(default)]
    verse: Option<u32>,
    #[serde(default)]
    end_verse: Option<u32>,
}

impl TryFrom<ReferenceWire> for BibleReference {
    type Error = CoreError;

    fn try_from(wire: ReferenceWire) -> Result<Self, Self::Error> {
        Self::build(wire.book, wire.chapter, wire.verse, wire.end_verse)
    }
}
