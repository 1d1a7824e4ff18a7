pub mod config;
pub mod error;
pub mod index;
pub mod persist;
pub mod search;
pub mod tokenizer;

pub use config::Config;
pub use error::StoreError;
pub use index::{DocumentTermProfile, Index, SearchResult, Term, TermFrequency};
pub use persist::IndexStore;
pub use search::{SearchEngine, SearchOutcome};
