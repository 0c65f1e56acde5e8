//! JSON snapshot files shared by the lexicon store and search analytics

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tempfile::NamedTempFile;

use crate::error::{LexiconError, LexiconResult};

/// Read a JSON snapshot, returning `None` when the file does not exist yet.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> LexiconResult<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }
    let file = File::open(path).map_err(|e| {
        LexiconError::Storage(format!("Failed to open '{}': {}", path.display(), e))
    })?;
    let value = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        LexiconError::Storage(format!("Failed to parse JSON from '{}': {}", path.display(), e))
    })?;
    Ok(Some(value))
}

/// Write a JSON snapshot atomically (temp file in the same directory + rename).
pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> LexiconResult<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(|e| {
        LexiconError::Storage(format!("Failed to create '{}': {}", parent.display(), e))
    })?;

    let temp_file = NamedTempFile::new_in(parent)
        .map_err(|e| LexiconError::Storage(format!("Failed to create temp file: {}", e)))?;
    {
        let mut writer = BufWriter::new(&temp_file);
        serde_json::to_writer_pretty(&mut writer, value)
            .map_err(|e| LexiconError::Storage(format!("Failed to serialize: {}", e)))?;
        writer
            .flush()
            .map_err(|e| LexiconError::Storage(format!("Failed to write: {}", e)))?;
    }
    temp_file.persist(path).map_err(|e| {
        LexiconError::Storage(format!("Failed to replace '{}': {}", path.display(), e))
    })?;
    Ok(())
}
