//! Cross-Platform Path Utilities
//!
//! Functions for resolving application directories across platforms.
//! Everything lives under `~/.bible-crentech/`.

use std::path::{Path, PathBuf};

use crate::utils::error::{AppError, AppResult};

/// Name of the application directory inside the home directory
pub const APP_DIR_NAME: &str = ".bible-crentech";

/// Get the user's home directory
pub fn home_dir() -> AppResult<PathBuf> {
    dirs::home_dir().ok_or_else(|| AppError::config("Could not determine home directory"))
}

/// Get the application directory (~/.bible-crentech/)
pub fn app_dir() -> AppResult<PathBuf> {
    Ok(home_dir()?.join(APP_DIR_NAME))
}

/// Get the config file path (~/.bible-crentech/config.json)
pub fn config_path() -> AppResult<PathBuf> {
    Ok(app_dir()?.join("config.json"))
}

/// Get the preference store path (~/.bible-crentech/preferences.json)
pub fn preferences_path() -> AppResult<PathBuf> {
    Ok(app_dir()?.join("preferences.json"))
}

/// Get the default Bible data directory (~/.bible-crentech/bible/)
pub fn default_bible_dir() -> AppResult<PathBuf> {
    Ok(app_dir()?.join("bible"))
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> AppResult<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Get the application directory, creating it if it doesn't exist
pub fn ensure_app_dir() -> AppResult<PathBuf> {
    let path = app_dir()?;
    ensure_dir(&path)?;
    Ok(path)
}
