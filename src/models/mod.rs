//! Data Models
//!
//! Contains all data structures used throughout the application.

pub mod bible;
pub mod response;
pub mod settings;

pub use bible::*;
pub use response::*;
pub use settings::*;
