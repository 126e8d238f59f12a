//! Search
//!
//! A query is first tried as a Scripture reference against the local data.
//! Anything else (or a reference the data cannot answer) goes to the
//! semantic provider, when one is configured.

use std::sync::Arc;

use async_trait::async_trait;
use bible_crentech_core::ReferenceParser;

use super::bible::BibleService;
use crate::models::bible::{SearchOutcome, VerseReference};
use crate::models::settings::BibleVersion;
use crate::utils::error::{AppError, AppResult};

/// Thematic verse search backed by an external service.
#[async_trait]
pub trait SemanticSearch: Send + Sync {
    /// Provider name for logs and health reporting.
    fn name(&self) -> &str;

    /// Verses matching a free-text theme, in the requested translation.
    async fn search(&self, query: &str, version: BibleVersion) -> AppResult<Vec<VerseReference>>;
}

/// Combines the reference parser, local lookup and semantic search
pub struct SearchService {
    bible: Arc<BibleService>,
    semantic: Option<Arc<dyn SemanticSearch>>,
    parser: ReferenceParser<'static>,
}

impl SearchService {
    pub fn new(bible: Arc<BibleService>) -> Self {
        Self {
            bible,
            semantic: None,
            parser: ReferenceParser::default(),
        }
    }

    pub fn with_semantic(mut self, provider: Arc<dyn SemanticSearch>) -> Self {
        self.semantic = Some(provider);
        self
    }

    pub fn has_semantic(&self) -> bool {
        self.semantic.is_some()
    }

    pub async fn search(&self, query: &str, version: BibleVersion) -> AppResult<SearchOutcome> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::validation("Search query cannot be empty"));
        }

        if let Some(reference) = self.parser.parse(query) {
            match self.bible.get_verses(&reference).await {
                Ok(passage) if !passage.verses.is_empty() => {
                    tracing::info!("[SearchService] Resolved \"{}\" as {}", query, reference);
                    return Ok(SearchOutcome::Direct { reference, passage });
                }
                Ok(_) => {
                    tracing::debug!("[SearchService] {} has no verses locally", reference);
                }
                Err(e) => {
                    tracing::debug!("[SearchService] Local lookup of {} failed: {}", reference, e);
                }
            }
        }

        let Some(provider) = &self.semantic else {
            return Err(AppError::not_found(format!(
                "No verses found for \"{}\" and no semantic search provider is configured",
                query
            )));
        };

        tracing::info!(
            "[SearchService] Sending \"{}\" to {} ({})",
            query,
            provider.name(),
            version.code()
        );
        let matches = provider.search(query, version).await?;
        if matches.is_empty() {
            return Err(AppError::not_found(format!("No verses found for \"{}\"", query)));
        }

        Ok(SearchOutcome::Semantic {
            query: query.to_string(),
            version,
            matches,
        })
    }
}
