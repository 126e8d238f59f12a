//! Reference Commands
//!
//! Parsing and book lookup. These need no state: the catalog is static.

use bible_crentech_core::{normalize_query, BibleReference, BookCatalog, ReferenceParser};
use serde::{Deserialize, Serialize};

use crate::models::bible::BookSummary;
use crate::models::response::CommandResponse;

/// A parsed reference together with its canonical rendering
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedReference {
    pub reference: BibleReference,
    /// Display name of the book, e.g. "João"
    pub book_name: String,
    /// e.g. "jo 3:16"
    pub display: String,
}

/// Parse a query; `data` is `None` when the text is not a reference
pub async fn parse_reference(query: &str) -> CommandResponse<Option<ParsedReference>> {
    let parser = ReferenceParser::default();
    let parsed = parser.parse(query).map(|reference| {
        let book_name = parser
            .catalog()
            .find_by_alias(reference.book())
            .map(|b| b.canonical_name.clone())
            .unwrap_or_else(|| reference.book().to_string());
        ParsedReference {
            display: reference.to_string(),
            book_name,
            reference,
        }
    });
    CommandResponse::ok(parsed)
}

/// Book suggestions for the search box
pub async fn suggest_books(query: &str) -> CommandResponse<Vec<BookSummary>> {
    let query = normalize_query(query);
    let suggestions = BookCatalog::standard()
        .suggest(&query)
        .into_iter()
        .map(BookSummary::from)
        .collect();
    CommandResponse::ok(suggestions)
}

/// All 66 books in canonical order
pub async fn list_books() -> CommandResponse<Vec<BookSummary>> {
    CommandResponse::ok(BookCatalog::standard().iter().map(BookSummary::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_parse_reference_command() {
        let response = parse_reference("João 3:16").await;
        let parsed = response.data.flatten().unwrap();
        assert_eq!(parsed.book_name, "João");
        assert_eq!(parsed.display, "jo 3:16");

        let theme = parse_reference("amor de Deus").await;
        assert!(theme.success);
        assert!(theme.data.flatten().is_none());
    }

    #[tokio::test]
    async fn test_suggest_and_list() {
        let suggestions = suggest_books("  apo ").await.data.unwrap();
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].name, "Apocalipse");

        let books = list_books().await.data.unwrap();
        assert_eq!(books.len(), 66);
        assert_eq!(books[0].abbrev, "gn");
    }
}
