//! Reference Parser
//!
//! Turns free text ("jo3", "ap 11.4", "1 Samuel 2:5-9", "sl 23") into a
//! [`BibleReference`], or reports that the text is not a reference at all so
//! the caller can fall back to a thematic search.
//!
//! ## Forms
//!
//! Three independent matchers are tried in order, first match wins:
//!
//! 1. [`ReferenceForm::Compact`]: alias glued to digits (`ap11`, `jo3`).
//!    One digit means verse N of chapter 1; two or more digits mean chapter N,
//!    verse 1. `jo3` is John 1:3 while `jo31` is John 31:1. This asymmetry is
//!    kept as-is; it cannot express "chapter 3" in compact form.
//! 2. [`ReferenceForm::Full`]: book, chapter, separator (space, `.` or `:`),
//!    verse, optional `-`/`–` end verse (`ap 11.4`, `1 Samuel 2:5-9`).
//! 3. [`ReferenceForm::ChapterOnly`]: book followed by a chapter (`ap 11`).
//!
//! The parser never fails: unknown books, zero or oversized numbers and
//! backwards ranges all yield `None`. Checking that a chapter or verse exists
//! in the book is left to the verse lookup.

use std::sync::OnceLock;

use regex::Regex;

use crate::catalog::BookCatalog;
use crate::reference::BibleReference;

const COMPACT_PATTERN: &str = r"(?i)^([a-zà-ÿ]+)([0-9]+)$";
const FULL_PATTERN: &str =
    r"(?i)^([0-9]?\s?[a-zà-ÿ]+)\s*([0-9]+)\s*[.:\s]\s*([0-9]+)(?:\s*[-–]\s*([0-9]+))?$";
const CHAPTER_ONLY_PATTERN: &str = r"(?i)^([0-9]?\s?[a-zà-ÿ]+)\s+([0-9]+)$";

/// The syntactic shapes a reference may take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceForm {
    /// `ap11`, `jo3`
    Compact,
    /// `ap 11.4`, `jó 11:4`, `1 Samuel 2:5-9`
    Full,
    /// `ap 11`
    ChapterOnly,
}

/// Result of running one matcher over a normalized query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    /// The text does not have this shape; try the next form.
    NotApplicable,
    /// The text has this shape and names a known book.
    Resolved(BibleReference),
    /// The text has this shape but cannot be a valid reference; stop.
    Rejected,
}

impl ReferenceForm {
    /// Priority order in which the forms are tried.
    pub const ORDER: [ReferenceForm; 3] = [
        ReferenceForm::Compact,
        ReferenceForm::Full,
        ReferenceForm::ChapterOnly,
    ];

    fn pattern(self) -> Option<&'static Regex> {
        static COMPACT: OnceLock<Option<Regex>> = OnceLock::new();
        static FULL: OnceLock<Option<Regex>> = OnceLock::new();
        static CHAPTER_ONLY: OnceLock<Option<Regex>> = OnceLock::new();
        let (cell, pattern) = match self {
            ReferenceForm::Compact => (&COMPACT, COMPACT_PATTERN),
            ReferenceForm::Full => (&FULL, FULL_PATTERN),
            ReferenceForm::ChapterOnly => (&CHAPTER_ONLY, CHAPTER_ONLY_PATTERN),
        };
        cell.get_or_init(|| Regex::new(pattern).ok()).as_ref()
    }

    /// Run this matcher alone over an already normalized query.
    pub fn try_match(self, input: &str, catalog: &BookCatalog) -> MatchOutcome {
        let Some(caps) = self.pattern().and_then(|re| re.captures(input)) else {
            return MatchOutcome::NotApplicable;
        };

        match self {
            ReferenceForm::Compact => {
                // An unknown compact token may still be a full-form book name.
                let Some(book) = catalog.find_by_alias(&caps[1]) else {
                    return MatchOutcome::NotApplicable;
                };
                let digits = &caps[2];
                let Some(number) = parse_number(digits) else {
                    return MatchOutcome::Rejected;
                };
                let reference = if digits.len() == 1 {
                    BibleReference::verse(book.primary_alias(), 1, number)
                } else {
                    BibleReference::verse(book.primary_alias(), number, 1)
                };
                resolved(reference.ok())
            }
            ReferenceForm::Full => {
                let Some(book) = catalog.find_by_name_or_alias(&caps[1]) else {
                    return MatchOutcome::Rejected;
                };
                let (Some(chapter), Some(verse)) = (parse_number(&caps[2]), parse_number(&caps[3]))
                else {
                    return MatchOutcome::Rejected;
                };
                let reference = match caps.get(4) {
                    Some(end) => match parse_number(end.as_str()) {
                        Some(end) => {
                            BibleReference::range(book.primary_alias(), chapter, verse, end).ok()
                        }
                        None => None,
                    },
                    None => BibleReference::verse(book.primary_alias(), chapter, verse).ok(),
                };
                resolved(reference)
            }
            ReferenceForm::ChapterOnly => {
                let Some(book) = catalog.find_by_name_or_alias(&caps[1]) else {
                    return MatchOutcome::Rejected;
                };
                let chapter = parse_number(&caps[2]);
                resolved(chapter.and_then(|c| BibleReference::chapter(book.primary_alias(), c).ok()))
            }
        }
    }
}

fn resolved(reference: Option<BibleReference>) -> MatchOutcome {
    match reference {
        Some(reference) => MatchOutcome::Resolved(reference),
        None => MatchOutcome::Rejected,
    }
}

/// Positive `u32`, or `None` for zero and overflow.
fn parse_number(digits: &str) -> Option<u32> {
    digits.parse::<u32>().ok().filter(|n| *n > 0)
}

/// Trim the ends and collapse internal whitespace runs to one space.
/// Case and accents are left untouched.
pub fn normalize_query(query: &str) -> String {
    query.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parser bound to a book catalog.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceParser<'a> {
    catalog: &'a BookCatalog,
}

impl<'a> ReferenceParser<'a> {
    pub fn new(catalog: &'a BookCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &'a BookCatalog {
        self.catalog
    }

    /// Parse a query; `None` means "not a reference".
    pub fn parse(&self, query: &str) -> Option<BibleReference> {
        self.parse_with_form(query).map(|(_, reference)| reference)
    }

    /// Like [`parse`](Self::parse), also reporting which form matched.
    pub fn parse_with_form(&self, query: &str) -> Option<(ReferenceForm, BibleReference)> {
        let normalized = normalize_query(query);
        if normalized.is_empty() {
            return None;
        }

        for form in ReferenceForm::ORDER {
            match form.try_match(&normalized, self.catalog) {
                MatchOutcome::NotApplicable => continue,
                MatchOutcome::Resolved(reference) => {
                    tracing::debug!(
                        "[ReferenceParser] '{}' matched {:?} form as {}",
                        normalized,
                        form,
                        reference
                    );
                    return Some((form, reference));
                }
                MatchOutcome::Rejected => {
                    tracing::debug!(
                        "[ReferenceParser] '{}' has {:?} shape but is not a reference",
                        normalized,
                        form
                    );
                    return None;
                }
            }
        }
        None
    }
}

impl Default for ReferenceParser<'static> {
    fn default() -> Self {
        Self::new(BookCatalog::standard())
    }
}

/// Parse against the standard catalog.
pub fn parse_reference(query: &str) -> Option<BibleReference> {
    ReferenceParser::default().parse(query)
}
