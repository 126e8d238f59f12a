//! Settings Models
//!
//! Application configuration and settings data structures.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Visual theme selected by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppTheme {
    #[default]
    Hitech,
    Jesus,
    Kids,
    Catholic,
    Pentecostal,
    Medieval,
}

/// Bible translation used for display and semantic search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BibleVersion {
    Nvi,
    #[default]
    Acf,
    Arc,
    Nbv,
    Bam,
    Tnm,
    Ntlh,
}

impl BibleVersion {
    pub const ALL: [BibleVersion; 7] = [
        BibleVersion::Nvi,
        BibleVersion::Acf,
        BibleVersion::Arc,
        BibleVersion::Nbv,
        BibleVersion::Bam,
        BibleVersion::Tnm,
        BibleVersion::Ntlh,
    ];

    /// Short code, e.g. `ACF`
    pub fn code(&self) -> &'static str {
        match self {
            BibleVersion::Nvi => "NVI",
            BibleVersion::Acf => "ACF",
            BibleVersion::Arc => "ARC",
            BibleVersion::Nbv => "NBV",
            BibleVersion::Bam => "BAM",
            BibleVersion::Tnm => "TNM",
            BibleVersion::Ntlh => "NTLH",
        }
    }

    /// Human readable translation name
    pub fn full_name(&self) -> &'static str {
        match self {
            BibleVersion::Nvi => "Nova Versão Internacional (NVI)",
            BibleVersion::Acf => "Almeida Corrigida Fiel (ACF)",
            BibleVersion::Arc => "João Ferreira de Almeida Revista e Corrigida (ARC)",
            BibleVersion::Nbv => "Nova Bíblia Viva (NBV)",
            BibleVersion::Bam => "Bíblia Ave Maria (Católica)",
            BibleVersion::Tnm => "Tradução do Novo Mundo (Testemunhas de Jeová)",
            BibleVersion::Ntlh => "Nova Tradução na Linguagem de Hoje (NTLH)",
        }
    }

    /// Case-insensitive lookup by code
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|v| v.code().eq_ignore_ascii_case(code.trim()))
    }
}

impl fmt::Display for BibleVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Receiving account for donations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixSettings {
    /// PIX key (e-mail, phone, CPF/CNPJ or random key)
    pub key: String,
    /// Receiver name shown by the payer's bank
    pub name: String,
    /// Receiver city
    pub city: String,
    /// Transaction id; `***` when unset
    #[serde(default)]
    pub transaction_id: Option<String>,
}

impl Default for PixSettings {
    fn default() -> Self {
        Self {
            key: "doacoes@example.com".to_string(),
            name: "Bible Crentech".to_string(),
            city: "Sao Paulo".to_string(),
            transaction_id: None,
        }
    }
}

/// Application configuration stored in config.json
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// UI theme
    pub theme: AppTheme,
    /// Preferred translation
    pub translation: BibleVersion,
    /// Directory holding index.json and one JSON file per book.
    /// `None` means ~/.bible-crentech/bible
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    /// Maximum history entries kept
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
    /// Donation account
    #[serde(default)]
    pub pix: PixSettings,
}

fn default_history_limit() -> usize {
    50
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            theme: AppTheme::default(),
            translation: BibleVersion::default(),
            data_dir: None,
            history_limit: default_history_limit(),
            pix: PixSettings::default(),
        }
    }
}

/// Settings update request (partial update)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SettingsUpdate {
    pub theme: Option<AppTheme>,
    pub translation: Option<BibleVersion>,
    pub data_dir: Option<PathBuf>,
    pub history_limit: Option<usize>,
    pub pix: Option<PixSettings>,
}

impl AppConfig {
    /// Apply a partial update to the configuration
    pub fn apply_update(&mut self, update: SettingsUpdate) {
        if let Some(theme) = update.theme {
            self.theme = theme;
        }
        if let Some(translation) = update.translation {
            self.translation = translation;
        }
        if let Some(data_dir) = update.data_dir {
            self.data_dir = Some(data_dir);
        }
        if let Some(limit) = update.history_limit {
            self.history_limit = limit;
        }
        if let Some(pix) = update.pix {
            self.pix = pix;
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.history_limit == 0 || self.history_limit > 500 {
            return Err(format!(
                "history_limit must be between 1 and 500, got {}",
                self.history_limit
            ));
        }

        if self.pix.key.trim().is_empty() {
            return Err("pix.key cannot be empty".to_string());
        }
        if self.pix.name.trim().is_empty() || self.pix.city.trim().is_empty() {
            return Err("pix.name and pix.city cannot be empty".to_string());
        }

        Ok(())
    }
}
