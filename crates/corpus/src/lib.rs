//! Parallel corpora of German source text and its Leichte Sprache rendering.
//!
//! Loading and cleaning, the scored table with one column group per model
//! run, train/test splitting, prompt rendering and the fine-tuning export
//! formats all live here. Nothing in this crate talks to the network.

pub mod error;
pub mod export;
pub mod loader;
pub mod paths;
pub mod prompts;
pub mod schema;
pub mod split;
pub mod table;

pub use error::{CorpusError, Result};
pub use loader::{load, save_cleaned, Cleaned, CleaningReport};
pub use paths::derived_path;
pub use schema::*;
pub use split::{load_and_split, split, Split};
