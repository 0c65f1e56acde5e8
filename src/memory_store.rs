//! In-memory [`LexiconStore`] with optional JSON file persistence

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{LexiconError, LexiconResult};
use crate::language::LanguageField;
use crate::normalize::normalize;
use crate::persistence::{read_json, write_json_atomic};
use crate::store::{Entry, EntryId, EntryKind, EntryStatus, LexiconStore, StatusFilter};

/// On-disk and in-memory layout. `entries` is kept in ascending id order.
#[derive(Debug, Default, Serialize, Deserialize)]
struct Table {
    next_id: EntryId,
    entries: Vec<Entry>,
}

impl Table {
    fn position(&self, id: EntryId) -> Option<usize> {
        self.entries.binary_search_by_key(&id, |e| e.id).ok()
    }

    fn approved_values(&self, field: LanguageField) -> impl DoubleEndedIterator<Item = &str> {
        self.entries
            .iter()
            .filter(|e| e.is_approved())
            .map(move |e| e.field(field))
    }
}

/// Lock-protected table of entries.
///
/// Reads take a shared lock, writes an exclusive one. Nothing is written to
/// disk until [`save`](Self::save) is called.
#[derive(Debug, Default)]
pub struct MemoryLexiconStore {
    table: RwLock<Table>,
    path: Option<PathBuf>,
}

impl MemoryLexiconStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the store from `path`, starting empty when the file is absent.
    pub fn open(path: impl AsRef<Path>) -> LexiconResult<Self> {
        let path = path.as_ref().to_path_buf();
        let table = match read_json::<Table>(&path)? {
            Some(mut table) => {
                table.entries.sort_by_key(|e| e.id);
                let max_id = table.entries.last().map(|e| e.id).unwrap_or(0);
                table.next_id = table.next_id.max(max_id);
                info!(
                    "Loaded {} lexicon entries from {}",
                    table.entries.len(),
                    path.display()
                );
                table
            }
            None => {
                debug!("No lexicon file at {}, starting empty", path.display());
                Table::default()
            }
        };
        Ok(Self {
            table: RwLock::new(table),
            path: Some(path),
        })
    }

    /// Persist to the file given to [`open`](Self::open). No-op for a purely
    /// in-memory store.
    pub fn save(&self) -> LexiconResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let table = self.table.read();
        write_json_atomic(path, &*table)?;
        debug!("Persisted {} lexicon entries to {}", table.entries.len(), path.display());
        Ok(())
    }

    /// Insert an entry that is approved straight away (seeding, fixtures).
    pub fn insert_approved(
        &self,
        kind: EntryKind,
        english: &str,
        oromo: &str,
    ) -> LexiconResult<Entry> {
        self.insert(kind, english, oromo, EntryStatus::Approved)
    }

    fn insert(
        &self,
        kind: EntryKind,
        english: &str,
        oromo: &str,
        status: EntryStatus,
    ) -> LexiconResult<Entry> {
        let english = normalize(english);
        let oromo = normalize(oromo);
        if english.is_empty() || oromo.is_empty() {
            return Err(LexiconError::Validation(
                "Both English and Oromo values are required".to_string(),
            ));
        }

        let mut table = self.table.write();
        table.next_id += 1;
        let entry = Entry {
            id: table.next_id,
            kind,
            english,
            oromo,
            status,
        };
        table.entries.push(entry.clone());
        Ok(entry)
    }

    fn collect_approved<F>(&self, field: LanguageField, limit: usize, pred: F) -> Vec<String>
    where
        F: Fn(&str) -> bool,
    {
        let table = self.table.read();
        let mut seen = HashSet::new();
        table
            .approved_values(field)
            .filter(|&value| pred(value) && seen.insert(value))
            .take(limit)
            .map(str::to_string)
            .collect()
    }
}

impl LexiconStore for MemoryLexiconStore {
    fn find_exact(
        &self,
        kind: EntryKind,
        field: LanguageField,
        value: &str,
        status: StatusFilter,
    ) -> Option<Entry> {
        self.table
            .read()
            .entries
            .iter()
            .find(|e| e.kind == kind && status.accepts(e.status) && e.field(field) == value)
            .cloned()
    }

    fn find_prefix(&self, field: LanguageField, prefix: &str, limit: usize) -> Vec<String> {
        self.collect_approved(field, limit, |value| value.starts_with(prefix))
    }

    fn find_substring(&self, field: LanguageField, needle: &str, limit: usize) -> Vec<String> {
        self.collect_approved(field, limit, |value| value.contains(needle))
    }

    fn list_approved(
        &self,
        field: LanguageField,
        newest_first: bool,
        limit: usize,
    ) -> Vec<String> {
        let table = self.table.read();
        let values = table.approved_values(field);
        if newest_first {
            values.rev().take(limit).map(str::to_string).collect()
        } else {
            values.take(limit).map(str::to_string).collect()
        }
    }

    fn exists(&self, english: &str, oromo: &str) -> bool {
        self.table
            .read()
            .entries
            .iter()
            .any(|e| e.english == english || e.oromo == oromo)
    }

    fn insert_pending(
        &self,
        kind: EntryKind,
        english: &str,
        oromo: &str,
    ) -> LexiconResult<Entry> {
        self.insert(kind, english, oromo, EntryStatus::Pending)
    }

    fn get(&self, id: EntryId) -> Option<Entry> {
        let table = self.table.read();
        table.position(id).map(|pos| table.entries[pos].clone())
    }

    fn set_status(&self, id: EntryId, status: EntryStatus) -> LexiconResult<Entry> {
        let mut table = self.table.write();
        let pos = table.position(id).ok_or(LexiconError::NotFound(id))?;
        table.entries[pos].status = status;
        Ok(table.entries[pos].clone())
    }

    fn delete(&self, id: EntryId) -> LexiconResult<Entry> {
        let mut table = self.table.write();
        let pos = table.position(id).ok_or(LexiconError::NotFound(id))?;
        Ok(table.entries.remove(pos))
    }

    fn list_by_status(&self, status: EntryStatus) -> Vec<Entry> {
        self.table
            .read()
            .entries
            .iter()
            .filter(|e| e.status == status)
            .cloned()
            .collect()
    }

    fn len(&self) -> usize {
        self.table.read().entries.len()
    }
}
