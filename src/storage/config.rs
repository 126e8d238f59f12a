//! JSON Configuration Management
//!
//! Handles reading and writing the application configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use crate::models::settings::{AppConfig, SettingsUpdate};
use crate::utils::error::{AppError, AppResult};
use crate::utils::paths::{config_path, default_bible_dir, ensure_app_dir, ensure_dir};

/// Configuration service for managing app settings
#[derive(Debug)]
pub struct ConfigService {
    config_path: PathBuf,
    config: AppConfig,
}

impl ConfigService {
    /// Create a new config service at the default location, loading existing
    /// config or creating defaults
    pub fn new() -> AppResult<Self> {
        ensure_app_dir()?;
        Self::open(config_path()?)
    }

    /// Open (or create) the configuration file at `config_path`
    pub fn open(config_path: PathBuf) -> AppResult<Self> {
        let config = if config_path.exists() {
            Self::load_from_file(&config_path)?
        } else {
            if let Some(parent) = config_path.parent() {
                ensure_dir(parent)?;
            }
            let default_config = AppConfig::default();
            Self::save_to_file(&config_path, &default_config)?;
            tracing::info!("[ConfigService] Created default config at {}", config_path.display());
            default_config
        };

        Ok(Self {
            config_path,
            config,
        })
    }

    /// Load configuration from a file
    fn load_from_file(path: &Path) -> AppResult<AppConfig> {
        let content = fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        config.validate().map_err(AppError::config)?;
        Ok(config)
    }

    /// Save configuration to a file with pretty formatting
    fn save_to_file(path: &Path, config: &AppConfig) -> AppResult<()> {
        config.validate().map_err(AppError::validation)?;
        let content = serde_json::to_string_pretty(config)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Get the current configuration
    pub fn get_config(&self) -> &AppConfig {
        &self.config
    }

    /// Get a clone of the current configuration
    pub fn get_config_clone(&self) -> AppConfig {
        self.config.clone()
    }

    /// Update the configuration with a partial update. Nothing changes if the
    /// result would be invalid.
    pub fn update_config(&mut self, update: SettingsUpdate) -> AppResult<AppConfig> {
        let mut candidate = self.config.clone();
        candidate.apply_update(update);
        Self::save_to_file(&self.config_path, &candidate)?;
        self.config = candidate;
        Ok(self.config.clone())
    }

    /// Save the current configuration to disk
    pub fn save(&self) -> AppResult<()> {
        Self::save_to_file(&self.config_path, &self.config)
    }

    /// Reload configuration from disk
    pub fn reload(&mut self) -> AppResult<()> {
        self.config = Self::load_from_file(&self.config_path)?;
        Ok(())
    }

    /// Reset configuration to defaults
    pub fn reset(&mut self) -> AppResult<()> {
        self.config = AppConfig::default();
        self.save()?;
        Ok(())
    }

    /// Directory holding the Bible JSON files
    pub fn bible_dir(&self) -> AppResult<PathBuf> {
        match &self.config.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => default_bible_dir(),
        }
    }

    /// Check if the config service is healthy
    pub fn is_healthy(&self) -> bool {
        self.config_path.exists() && self.config.validate().is_ok()
    }
}
