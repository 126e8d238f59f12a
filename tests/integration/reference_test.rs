//! Reference Parser Integration Tests

use bible_crentech_core::{parse_reference, BibleReference, BookCatalog, ReferenceForm, ReferenceParser};

#[test]
fn test_every_alias_and_chapter_resolves() {
    let catalog = BookCatalog::standard();
    let parser = ReferenceParser::new(catalog);

    for book in catalog.iter() {
        for alias in &book.abbreviations {
            for chapter in 1..=book.chapter_count {
                let expected = BibleReference::chapter(book.primary_alias(), chapter).unwrap();
                let query = format!("{} {}", alias, chapter);
                assert_eq!(
                    parser.parse_with_form(&query),
                    Some((ReferenceForm::ChapterOnly, expected)),
                    "query {:?}",
                    query
                );

                let upper = format!("{} {}:1", alias.to_uppercase(), chapter);
                let verse = parser.parse(&upper).unwrap_or_else(|| panic!("query {:?}", upper));
                assert_eq!(verse.book(), book.primary_alias());
                assert_eq!(verse.chapter_number(), chapter);
                assert_eq!(verse.verse_number(), Some(1));
            }
        }
    }
}

#[test]
fn test_canonical_names_resolve() {
    for book in BookCatalog::standard().iter() {
        let query = format!("{} 1:2-3", book.canonical_name);
        let reference = parse_reference(&query).unwrap_or_else(|| panic!("query {:?}", query));
        assert_eq!(reference.book(), book.primary_alias());
        assert_eq!(reference.verse_span(), Some((2, 3)));
    }
}

#[test]
fn test_display_reparses_to_same_reference() {
    let queries = [
        "jo3",
        "jo31",
        "ap 11.4",
        "ap 11",
        "1 Samuel 2:5-9",
        "sl 23",
        "Jó 11:4",
        "  Gênesis   1 : 1 ",
        "1co 13:4–7",
    ];
    for query in queries {
        let reference = parse_reference(query).unwrap_or_else(|| panic!("query {:?}", query));
        let rendered = reference.to_string();
        assert_eq!(parse_reference(&rendered), Some(reference), "rendered {:?}", rendered);
    }
}

#[test]
fn test_compact_digit_heuristic() {
    let one = parse_reference("gn5").unwrap();
    assert_eq!((one.chapter_number(), one.verse_number()), (1, Some(5)));

    let two = parse_reference("gn50").unwrap();
    assert_eq!((two.chapter_number(), two.verse_number()), (50, Some(1)));
}

#[test]
fn test_non_references() {
    for query in ["", "   ", "amor", "paz de Deus", "xyz 3:16", "jo 0:1", "jo 3:5-2", "jo0"] {
        assert_eq!(parse_reference(query), None, "query {:?}", query);
    }
}
