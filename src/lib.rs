//! English ⇄ Afaan Oromo dictionary core.
//!
//! Lookups run through [`TranslationResolver`] (phrase, then word, then
//! token-by-token fallback), with [`DirectionDetector`] picking the direction
//! when the caller asks for `auto` and [`SuggestionEngine`] offering
//! "did you mean" candidates for inexact single words. Word lists enter the
//! dictionary through [`BulkImportPipeline`] as pending entries awaiting
//! approval.
//!
//! ```
//! use std::sync::Arc;
//! use gadaoromo::{Direction, EntryKind, MemoryLexiconStore, TranslationResolver};
//!
//! let store = Arc::new(MemoryLexiconStore::new());
//! store.insert_approved(EntryKind::Word, "water", "bishaan").unwrap();
//!
//! let resolver = TranslationResolver::new(store);
//! let result = resolver.resolve("Bishaan", Direction::OmEn);
//! assert_eq!(result.translated, "water");
//! assert!(result.is_exact);
//! ```

pub mod analytics;
pub mod config;
pub mod detector;
pub mod error;
pub mod import;
pub mod language;
pub mod memory_store;
pub mod mt;
pub mod normalize;
pub mod persistence;
pub mod resolver;
pub mod service;
pub mod store;
pub mod suggest;


pub use analytics::{SearchAnalytics, SearchCount, SearchLogEntry};
pub use config::{DetectorConfig, ImportConfig, LexiconConfig, SuggestConfig};
pub use detector::DirectionDetector;
pub use error::{LexiconError, LexiconResult};
pub use import::{
    BulkImportPipeline, ImportMode, ImportPayload, ImportReport, ImportRequest, ImportRow,
};
pub use language::{Direction, DirectionRequest, LanguageField};
pub use memory_store::MemoryLexiconStore;
pub use normalize::{dedup_preserve_order, normalize};
pub use resolver::{Resolution, TranslationResolver};
pub use service::{Lexicon, ResolveRequest, ResolveResponse};
pub use store::{Entry, EntryId, EntryKind, EntryStatus, LexiconStore, StatusFilter};
pub use suggest::{SuggestionEngine, Suggestions};
