//! Book Catalog
//!
//! Static reference data for the 66 books: display name, accepted aliases and
//! chapter count. The standard catalog is built once per process and only
//! read afterwards, so it can be shared freely between threads.
//!
//! Alias matching is case-insensitive but accent-sensitive: `jó` (Jó) and
//! `jo` (João) are different keys.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Maximum number of suggestions returned by [`BookCatalog::suggest`].
pub const MAX_SUGGESTIONS: usize = 5;

/// One book of the canon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookCatalogEntry {
    /// Display name, accented (e.g. "Gênesis")
    pub canonical_name: String,
    /// Lower-cased aliases; the first one is the stable book key
    pub abbreviations: Vec<String>,
    /// Number of chapters in the book
    pub chapter_count: u32,
}

impl BookCatalogEntry {
    pub fn new(canonical_name: &str, abbreviations: &[&str], chapter_count: u32) -> Self {
        Self {
            canonical_name: canonical_name.to_string(),
            abbreviations: abbreviations.iter().map(|a| a.to_string()).collect(),
            chapter_count,
        }
    }

    /// The canonical short key used by every downstream lookup.
    pub fn primary_alias(&self) -> &str {
        self.abbreviations.first().map(String::as_str).unwrap_or("")
    }

    /// Case-insensitive alias check. `token` must already be lower-cased.
    fn has_alias(&self, token: &str) -> bool {
        self.abbreviations.iter().any(|a| a == token)
    }

    fn name_matches(&self, token: &str) -> bool {
        self.canonical_name.to_lowercase() == token
    }
}

/// Ordered, validated collection of books.
#[derive(Debug, Clone)]
pub struct BookCatalog {
    entries: Vec<BookCatalogEntry>,
}

impl BookCatalog {
    /// Build a catalog, rejecting data that would make alias lookup ambiguous.
    pub fn new(entries: Vec<BookCatalogEntry>) -> CoreResult<Self> {
        let mut owners: HashMap<&str, &str> = HashMap::new();
        for entry in &entries {
            if entry.canonical_name.trim().is_empty() {
                return Err(CoreError::validation("book with an empty name"));
            }
            if entry.abbreviations.is_empty() {
                return Err(CoreError::validation(format!(
                    "{} has no aliases",
                    entry.canonical_name
                )));
            }
            if entry.chapter_count == 0 {
                return Err(CoreError::validation(format!(
                    "{} has no chapters",
                    entry.canonical_name
                )));
            }
            for alias in &entry.abbreviations {
                if alias.is_empty() || *alias != alias.to_lowercase() {
                    return Err(CoreError::validation(format!(
                        "alias '{}' of {} must be non-empty and lower-case",
                        alias, entry.canonical_name
                    )));
                }
                if let Some(owner) = owners.insert(alias.as_str(), entry.canonical_name.as_str()) {
                    return Err(CoreError::validation(format!(
                        "alias '{}' is used by both {} and {}",
                        alias, owner, entry.canonical_name
                    )));
                }
            }
        }
        Ok(Self { entries })
    }

    /// The process-wide Portuguese catalog.
    pub fn standard() -> &'static BookCatalog {
        static STANDARD: OnceLock<BookCatalog> = OnceLock::new();
        STANDARD.get_or_init(|| BookCatalog {
            entries: standard_entries(),
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BookCatalogEntry> {
        self.entries.iter()
    }

    /// Look up a book by alias only (used by the compact `ap11` form).
    pub fn find_by_alias(&self, token: &str) -> Option<&BookCatalogEntry> {
        let token = token.trim().to_lowercase();
        self.entries.iter().find(|b| b.has_alias(&token))
    }

    /// Look up a book by display name or alias; first match wins.
    pub fn find_by_name_or_alias(&self, token: &str) -> Option<&BookCatalogEntry> {
        let token = token.trim().to_lowercase();
        self.entries
            .iter()
            .find(|b| b.name_matches(&token) || b.has_alias(&token))
    }

    /// Catalog position of the book owning `alias`.
    pub fn position(&self, alias: &str) -> Option<usize> {
        let token = alias.trim().to_lowercase();
        self.entries.iter().position(|b| b.has_alias(&token))
    }

    /// The book following the one owning `alias`, if any.
    pub fn next_after(&self, alias: &str) -> Option<&BookCatalogEntry> {
        self.position(alias).and_then(|i| self.entries.get(i + 1))
    }

    /// Autocomplete: books whose name contains the query or whose alias
    /// starts with it, in canon order.
    pub fn suggest(&self, query: &str) -> Vec<&BookCatalogEntry> {
        let clean = query.trim().to_lowercase();
        if clean.chars().count() < 2 {
            return Vec::new();
        }
        self.entries
            .iter()
            .filter(|b| {
                b.canonical_name.to_lowercase().contains(&clean)
                    || b.abbreviations.iter().any(|a| a.starts_with(&clean))
            })
            .take(MAX_SUGGESTIONS)
            .collect()
    }
}

fn standard_entries() -> Vec<BookCatalogEntry> {
    STANDARD_BOOKS
        .iter()
        .map(|(name, aliases, chapters)| BookCatalogEntry::new(name, aliases, *chapters))
        .collect()
}

const STANDARD_BOOKS: &[(&str, &[&str], u32)] = &[
    // Old Testament
    ("Gênesis", &["gn", "gen"], 50),
    ("Êxodo", &["ex", "exo"], 40),
    ("Levítico", &["lv", "lev"], 27),
    ("Números", &["nm", "num"], 36),
    ("Deuteronômio", &["dt", "deut"], 34),
    ("Josué", &["js", "jos"], 24),
    ("Juízes", &["jz", "juiz"], 21),
    ("Rute", &["rt", "rut"], 4),
    ("1 Samuel", &["1sm", "1sam"], 31),
    ("2 Samuel", &["2sm", "2sam"], 24),
    ("1 Reis", &["1rs", "1reis"], 22),
    ("2 Reis", &["2rs", "2reis"], 25),
    ("1 Crônicas", &["1cr", "1cron"], 29),
    ("2 Crônicas", &["2cr", "2cron"], 36),
    ("Esdras", &["ed", "esd"], 10),
    ("Neemias", &["ne", "neem"], 13),
    ("Ester", &["et", "est"], 10),
    ("Jó", &["job", "jó"], 42),
    ("Salmos", &["sl", "sal", "salmo"], 150),
    ("Provérbios", &["pv", "prov"], 31),
    ("Eclesiastes", &["ec", "ecl"], 12),
    ("Cânticos", &["ct", "cant"], 8),
    ("Isaías", &["is", "isa"], 66),
    ("Jeremias", &["jr", "jer"], 52),
    ("Lamentações", &["lm", "lam"], 5),
    ("Ezequiel", &["ez", "eze"], 48),
    ("Daniel", &["dn", "dan"], 12),
    ("Oseias", &["os", "ose"], 14),
    ("Joel", &["jl", "joe"], 3),
    ("Amós", &["am", "amo"], 9),
    ("Obadias", &["ob", "oba"], 1),
    ("Jonas", &["jn", "jon"], 4),
    ("Miqueias", &["mq", "miq"], 7),
    ("Naum", &["na", "nau"], 3),
    ("Habacuque", &["hc", "hab"], 3),
    ("Sofonias", &["sf", "sof"], 3),
    ("Ageu", &["ag", "age"], 2),
    ("Zacarias", &["zc", "zac"], 14),
    ("Malaquias", &["ml", "mal"], 4),
    // New Testament
    ("Mateus", &["mt", "mat"], 28),
    ("Marcos", &["mc", "mar"], 16),
    ("Lucas", &["lc", "luc"], 24),
    ("João", &["jo", "joao"], 21),
    ("Atos", &["at", "atos"], 28),
    ("Romanos", &["rm", "rom"], 16),
    ("1 Coríntios", &["1co", "1cor"], 16),
    ("2 Coríntios", &["2co", "2cor"], 13),
    ("Gálatas", &["gl", "gal"], 6),
    ("Efésios", &["ef", "efe"], 6),
    ("Filipenses", &["fp", "fil"], 4),
    ("Colossenses", &["cl", "col"], 4),
    ("1 Tessalonicenses", &["1ts", "1tes"], 5),
    ("2 Tessalonicenses", &["2ts", "2tes"], 3),
    ("1 Timóteo", &["1tm", "1tim"], 6),
    ("2 Timóteo", &["2tm", "2tim"], 4),
    ("Tito", &["tt", "tit"], 3),
    ("Filemom", &["fm", "file"], 1),
    ("Hebreus", &["hb", "heb"], 13),
    ("Tiago", &["tg", "tia"], 5),
    ("1 Pedro", &["1pe", "1ped"], 5),
    ("2 Pedro", &["2pe", "2ped"], 3),
    ("1 João", &["1jo", "1joa"], 5),
    ("2 João", &["2jo", "2joa"], 1),
    ("3 João", &["3jo", "3joa"], 1),
    ("Judas", &["jd", "jud"], 1),
    ("Apocalipse", &["ap", "apo", "apoc"], 22),
];
