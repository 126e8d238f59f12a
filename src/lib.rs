//! Bible Crentech - Rust Backend Library
//!
//! Backend for the Bible Crentech reader. It includes:
//! - Command handlers used by the CLI
//! - Services for local Bible data, search, history and data preparation
//! - Storage layer (JSON config and preference store)
//! - Data models and utilities
//!
//! Reference parsing lives in `bible-crentech-core`, PIX payload generation in
//! `bible-crentech-pix`.

pub mod commands;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;
pub mod utils;

pub use commands::{
    // Reference commands
    list_books, parse_reference, suggest_books,
    // Reader and search commands
    read_chapter, search,
    // History commands
    clear_history, get_history,
    // Donation commands
    generate_pix, verify_pix,
    // Settings and health commands
    get_health, get_settings, update_settings,
    // Data commands
    split_bible,
};
pub use models::response::*;
pub use models::settings::{AppConfig, SettingsUpdate};
pub use state::AppState;
