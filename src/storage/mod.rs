//! Storage Layer
//!
//! Handles all data persistence: the JSON config and the preference store.

pub mod config;
pub mod preferences;

pub use config::*;
pub use preferences::*;
