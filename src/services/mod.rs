//! Services
//!
//! Bible data access, search, history and offline data preparation.

pub mod bible;
pub mod history;
pub mod search;
pub mod splitter;

pub use bible::BibleService;
pub use history::HistoryService;
pub use search::{SearchService, SemanticSearch};
pub use splitter::{split_bible, SplitReport};
