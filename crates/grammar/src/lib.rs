//! TextMate grammar management for codesh.

mod document;
mod error;
mod manager;

pub use document::{GrammarDocument, GrammarMetadata, GENERATOR};
pub use error::{GrammarError, Result};
pub use manager::{GrammarManager, GrammarSource, GrammarSummary};
