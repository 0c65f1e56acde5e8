//! Lexicon storage interface
//!
//! The read-side algorithms (resolver, detector, suggestions) and the import
//! pipeline talk to storage only through [`LexiconStore`]. Column selection
//! is expressed with [`LanguageField`]; implementations own their connection
//! or lock lifecycle.
//!
//! # Ordering
//!
//! Entries are not unique. When several rows match, implementations must be
//! deterministic: the bundled [`MemoryLexiconStore`](crate::MemoryLexiconStore)
//! returns the lowest id for exact lookups and lists values in ascending id
//! order (descending when asked for newest first).

use serde::{Deserialize, Serialize};

use crate::error::LexiconResult;
use crate::language::LanguageField;

pub type EntryId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Word,
    Phrase,
}

impl EntryKind {
    /// Phrase when either side has more than one token, Word otherwise.
    ///
    /// Both values are expected to be normalized.
    pub fn infer(english: &str, oromo: &str) -> Self {
        if english.contains(' ') || oromo.contains(' ') {
            EntryKind::Phrase
        } else {
            EntryKind::Word
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    Pending,
    Approved,
}

/// Which statuses an exact lookup may return
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    Only(EntryStatus),
    Any,
}

impl StatusFilter {
    pub fn accepts(self, status: EntryStatus) -> bool {
        match self {
            StatusFilter::Only(wanted) => wanted == status,
            StatusFilter::Any => true,
        }
    }
}

/// A bilingual dictionary entry. Both sides are stored normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: EntryId,
    pub kind: EntryKind,
    pub english: String,
    pub oromo: String,
    pub status: EntryStatus,
}

impl Entry {
    pub fn field(&self, field: LanguageField) -> &str {
        match field {
            LanguageField::English => &self.english,
            LanguageField::Oromo => &self.oromo,
        }
    }

    pub fn is_approved(&self) -> bool {
        self.status == EntryStatus::Approved
    }
}

/// Persistent set of bilingual entries.
///
/// Prefix, substring and listing queries only ever see approved entries.
pub trait LexiconStore: Send + Sync {
    /// Exact match of `value` on `field` among entries of `kind`
    fn find_exact(
        &self,
        kind: EntryKind,
        field: LanguageField,
        value: &str,
        status: StatusFilter,
    ) -> Option<Entry>;

    /// Distinct approved values of `field` starting with `prefix`, at most
    /// `limit`, oldest first
    fn find_prefix(&self, field: LanguageField, prefix: &str, limit: usize) -> Vec<String>;

    /// Distinct approved values of `field` containing `needle`, at most `limit`
    fn find_substring(&self, field: LanguageField, needle: &str, limit: usize) -> Vec<String>;

    /// Approved values of `field`, newest first when `newest_first` is set
    fn list_approved(&self, field: LanguageField, newest_first: bool, limit: usize)
    -> Vec<String>;

    /// True if either value matches the corresponding field of any entry,
    /// whatever its status
    fn exists(&self, english: &str, oromo: &str) -> bool;

    fn insert_pending(&self, kind: EntryKind, english: &str, oromo: &str)
    -> LexiconResult<Entry>;

    fn get(&self, id: EntryId) -> Option<Entry>;

    fn set_status(&self, id: EntryId, status: EntryStatus) -> LexiconResult<Entry>;

    fn delete(&self, id: EntryId) -> LexiconResult<Entry>;

    /// All entries with `status`, oldest first
    fn list_by_status(&self, status: EntryStatus) -> Vec<Entry>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
