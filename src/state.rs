//! Application State
//!
//! Shared state handed to every command, containing all services.

use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::models::settings::{AppConfig, SettingsUpdate};
use crate::services::{BibleService, HistoryService, SearchService, SemanticSearch};
use crate::storage::{ConfigService, PreferenceStore};
use crate::utils::error::{AppError, AppResult};
use crate::utils::paths::{config_path, ensure_app_dir, preferences_path};

/// Application state shared by the command layer
pub struct AppState {
    /// Configuration service for app settings
    config: Arc<RwLock<Option<ConfigService>>>,
    /// Preference store holding the verse history
    preferences: Arc<RwLock<Option<PreferenceStore>>>,
    /// Bible data reader for the configured data directory
    bible: Arc<RwLock<Option<Arc<BibleService>>>>,
    /// Optional thematic search provider
    semantic: Arc<RwLock<Option<Arc<dyn SemanticSearch>>>>,
    /// Whether the state has been initialized
    initialized: Arc<RwLock<bool>>,
}

impl AppState {
    /// Create a new uninitialized app state
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(None)),
            preferences: Arc::new(RwLock::new(None)),
            bible: Arc::new(RwLock::new(None)),
            semantic: Arc::new(RwLock::new(None)),
            initialized: Arc::new(RwLock::new(false)),
        }
    }

    /// Initialize all services from the files under ~/.bible-crentech
    pub async fn initialize(&self) -> AppResult<()> {
        ensure_app_dir()?;
        self.initialize_with(config_path()?, preferences_path()?).await
    }

    /// Initialize all services from explicit file locations
    pub async fn initialize_with(
        &self,
        config_file: PathBuf,
        preferences_file: PathBuf,
    ) -> AppResult<()> {
        let mut initialized = self.initialized.write().await;
        if *initialized {
            return Ok(());
        }

        let config = ConfigService::open(config_file)?;
        let bible_dir = config.bible_dir()?;
        tracing::info!("[AppState] Bible data directory: {}", bible_dir.display());

        *self.bible.write().await = Some(Arc::new(BibleService::new(bible_dir)));
        *self.config.write().await = Some(config);
        *self.preferences.write().await = Some(PreferenceStore::open(preferences_file));

        *initialized = true;
        Ok(())
    }

    /// Install the thematic search provider
    pub async fn set_semantic_search(&self, provider: Arc<dyn SemanticSearch>) {
        tracing::info!("[AppState] Semantic search provider: {}", provider.name());
        *self.semantic.write().await = Some(provider);
    }

    /// Check if config is healthy
    pub fn is_config_healthy(&self) -> bool {
        if let Ok(guard) = self.config.try_read() {
            if let Some(ref config) = *guard {
                return config.is_healthy();
            }
        }
        false
    }

    /// Check if the Bible data directory has an index
    pub fn is_bible_available(&self) -> bool {
        if let Ok(guard) = self.bible.try_read() {
            if let Some(ref bible) = *guard {
                return bible.has_data();
            }
        }
        false
    }

    /// Check if a semantic provider is installed
    pub fn has_semantic_search(&self) -> bool {
        self.semantic
            .try_read()
            .map(|guard| guard.is_some())
            .unwrap_or(false)
    }

    /// Get the current configuration
    pub async fn get_config(&self) -> AppResult<AppConfig> {
        let guard = self.config.read().await;
        match &*guard {
            Some(config) => Ok(config.get_config_clone()),
            None => Err(AppError::config("Config service not initialized")),
        }
    }

    /// Update the configuration. A new data directory replaces the Bible
    /// reader and drops its cache.
    pub async fn update_config(&self, update: SettingsUpdate) -> AppResult<AppConfig> {
        let (updated, bible_dir) = {
            let mut guard = self.config.write().await;
            match &mut *guard {
                Some(config) => {
                    let updated = config.update_config(update)?;
                    (updated, config.bible_dir()?)
                }
                None => return Err(AppError::config("Config service not initialized")),
            }
        };

        let mut bible = self.bible.write().await;
        let changed = bible
            .as_ref()
            .map_or(true, |current| current.data_dir() != bible_dir.as_path());
        if changed {
            tracing::info!("[AppState] Switching Bible data to {}", bible_dir.display());
            *bible = Some(Arc::new(BibleService::new(bible_dir)));
        }

        Ok(updated)
    }

    /// Shared Bible data reader
    pub async fn bible(&self) -> AppResult<Arc<BibleService>> {
        let guard = self.bible.read().await;
        match &*guard {
            Some(bible) => Ok(Arc::clone(bible)),
            None => Err(AppError::internal("Bible service not initialized")),
        }
    }

    /// Search service over the current Bible data and provider
    pub async fn search_service(&self) -> AppResult<SearchService> {
        let service = SearchService::new(self.bible().await?);
        Ok(match &*self.semantic.read().await {
            Some(provider) => service.with_semantic(Arc::clone(provider)),
            None => service,
        })
    }

    /// History service sized by the configured limit
    pub async fn history_service(&self) -> AppResult<HistoryService> {
        let config = self.get_config().await?;
        Ok(HistoryService::new(config.history_limit))
    }

    /// Get mutable preference store access
    pub async fn with_preferences_mut<F, T>(&self, f: F) -> AppResult<T>
    where
        F: FnOnce(&mut PreferenceStore) -> AppResult<T>,
    {
        let mut guard = self.preferences.write().await;
        match &mut *guard {
            Some(store) => f(store),
            None => Err(AppError::internal("Preference store not initialized")),
        }
    }

    /// Get preference store access
    pub async fn with_preferences<F, T>(&self, f: F) -> AppResult<T>
    where
        F: FnOnce(&PreferenceStore) -> AppResult<T>,
    {
        let guard = self.preferences.read().await;
        match &*guard {
            Some(store) => f(store),
            None => Err(AppError::internal("Preference store not initialized")),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("initialized", &self.initialized)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::settings::AppTheme;

    #[tokio::test]
    async fn test_uninitialized_state_reports_errors() {
        let state = AppState::new();
        assert!(state.get_config().await.is_err());
        assert!(state.bible().await.is_err());
        assert!(!state.is_config_healthy());
        assert!(!state.is_bible_available());
    }

    #[tokio::test]
    async fn test_update_data_dir_replaces_reader() {
        let temp = tempfile::tempdir().unwrap();
        let state = AppState::new();
        state
            .initialize_with(
                temp.path().join("config.json"),
                temp.path().join("preferences.json"),
            )
            .await
            .unwrap();
        assert!(state.is_config_healthy());

        let data_dir = temp.path().join("bible");
        let updated = state
            .update_config(SettingsUpdate {
                theme: Some(AppTheme::Kids),
                data_dir: Some(data_dir.clone()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(updated.theme, AppTheme::Kids);
        assert_eq!(state.bible().await.unwrap().data_dir(), data_dir.as_path());
    }
}
