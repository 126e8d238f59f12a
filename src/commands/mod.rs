//! Commands
//!
//! Entry points used by the CLI. Every command takes the shared state (when
//! it needs one) and returns a `CommandResponse`.

pub mod data;
pub mod donate;
pub mod health;
pub mod history;
pub mod reader;
pub mod reference;
pub mod search;
pub mod settings;

pub use data::*;
pub use donate::*;
pub use health::*;
pub use history::*;
pub use reader::*;
pub use reference::*;
pub use search::*;
pub use settings::*;
