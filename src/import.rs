//! Bulk import of word lists as pending entries
//!
//! Two modes share one entry point:
//!
//! - [`ImportMode::Community`]: every row carries both languages, nothing is
//!   translated.
//! - [`ImportMode::Admin`]: rows carrying English only get their Oromo side
//!   from a [`MachineTranslator`], one call per batch. Rows that already
//!   carry both sides, as `english<sep>oromo` lines or structured rows, are
//!   stored as they are.
//!
//! Imports are best-effort. Each batch stands alone: a failed translation
//! call marks that batch's remaining words as failed and the import moves
//! on, keeping whatever earlier batches inserted. Two imports running at the
//! same time can both pass the existence check for the same word and insert
//! it twice.

use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::ImportConfig;
use crate::error::{LexiconError, LexiconResult};
use crate::language::LanguageField;
use crate::mt::translator::check_batch_len;
use crate::mt::{MachineTranslator, MtError, MtResult};
use crate::normalize::{dedup_preserve_order, normalize};
use crate::store::{EntryKind, LexiconStore};

/// Separators accepted between the English and Oromo halves of a line
pub const PAIR_SEPARATORS: [char; 5] = ['\t', '=', ',', ';', '|'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportMode {
    /// Both languages required on every row, no external calls
    Community,
    /// English only, Oromo produced by the translation provider
    Admin,
}

impl FromStr for ImportMode {
    type Err = LexiconError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "community" => Ok(ImportMode::Community),
            "admin" => Ok(ImportMode::Admin),
            other => Err(LexiconError::Validation(format!(
                "Unsupported import mode '{}' (expected community or admin)",
                other
            ))),
        }
    }
}

/// A structured import row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRow {
    pub english: String,
    #[serde(default)]
    pub oromo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportPayload {
    /// Raw lines: `english`, or `english<sep>oromo` in community mode
    Lines(Vec<String>),
    Rows(Vec<ImportRow>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRequest {
    pub mode: ImportMode,
    pub payload: ImportPayload,
}

/// Outcome counters of one import invocation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    /// Words that reached a verdict: inserted + skipped + failed
    pub processed: usize,
    pub inserted: usize,
    /// Already present in the store
    pub skipped: usize,
    /// Translation failed or came back empty
    pub failed: usize,
    /// External translation calls made
    pub calls_used: usize,
    /// Dropped by the word limit
    pub truncated: usize,
    /// Left for a later invocation by the batch limit
    pub deferred: usize,
    pub message: String,
}

impl ImportReport {
    fn finish(mut self) -> Self {
        self.processed = self.inserted + self.skipped + self.failed;
        let mut message = format!(
            "Processed {} words: {} inserted, {} skipped, {} failed ({} translation calls)",
            self.processed, self.inserted, self.skipped, self.failed, self.calls_used
        );
        if self.truncated > 0 {
            message.push_str(&format!(
                "; {} words over the import limit were ignored",
                self.truncated
            ));
        }
        if self.deferred > 0 {
            message.push_str(&format!(
                "; {} words were not processed (batch limit reached)",
                self.deferred
            ));
        }
        self.message = message;
        self
    }
}

/// One normalized, validated row. `oromo` is `None` when it still has to be
/// translated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ImportItem {
    english: String,
    oromo: Option<String>,
}

/// Split a raw line on the first pair separator.
pub fn split_pair(line: &str) -> (&str, Option<&str>) {
    match line.split_once(&PAIR_SEPARATORS[..]) {
        Some((english, oromo)) => (english, Some(oromo)),
        None => (line, None),
    }
}

/// Normalize and validate a payload. Blank rows are dropped; community rows
/// without both sides reject the whole request.
fn collect_items(request: &ImportRequest) -> LexiconResult<Vec<ImportItem>> {
    let community = request.mode == ImportMode::Community;
    let raw: Vec<(usize, String, Option<String>)> = match &request.payload {
        ImportPayload::Lines(lines) => lines
            .iter()
            .enumerate()
            .map(|(i, line)| {
                let (english, oromo) = split_pair(line);
                (i + 1, normalize(english), oromo.map(normalize))
            })
            .collect(),
        ImportPayload::Rows(rows) => rows
            .iter()
            .enumerate()
            .map(|(i, row)| (i + 1, normalize(&row.english), row.oromo.as_deref().map(normalize)))
            .collect(),
    };

    let mut items = Vec::with_capacity(raw.len());
    for (line, english, oromo) in raw {
        let oromo = oromo.filter(|o| !o.is_empty());
        if english.is_empty() && oromo.is_none() {
            continue;
        }
        if community && (english.is_empty() || oromo.is_none()) {
            return Err(LexiconError::Validation(format!(
                "Row {}: both English and Oromo are required (use 'english{}oromo')",
                line,
                PAIR_SEPARATORS[2]
            )));
        }
        if english.is_empty() {
            return Err(LexiconError::Validation(format!("Row {}: English value is missing", line)));
        }
        items.push(ImportItem { english, oromo });
    }
    Ok(dedup_preserve_order(items))
}

pub struct BulkImportPipeline {
    store: Arc<dyn LexiconStore>,
    translator: Option<Arc<dyn MachineTranslator>>,
    config: ImportConfig,
}

impl BulkImportPipeline {
    pub fn new(store: Arc<dyn LexiconStore>, config: ImportConfig) -> Self {
        Self {
            store,
            translator: None,
            config,
        }
    }

    pub fn with_translator(mut self, translator: Arc<dyn MachineTranslator>) -> Self {
        self.translator = Some(translator);
        self
    }

    pub async fn import(&self, request: &ImportRequest) -> LexiconResult<ImportReport> {
        let mut items = collect_items(request)?;
        let mut report = ImportReport::default();

        if items.len() > self.config.max_words {
            report.truncated = items.len() - self.config.max_words;
            items.truncate(self.config.max_words);
            info!(
                "Import truncated to {} words ({} dropped)",
                self.config.max_words, report.truncated
            );
        }

        let (provided, to_translate): (Vec<ImportItem>, Vec<ImportItem>) =
            items.into_iter().partition(|item| item.oromo.is_some());

        for item in provided {
            let oromo = item.oromo.unwrap_or_default();
            self.store_pair(&item.english, &oromo, &mut report);
        }

        if !to_translate.is_empty() {
            let words: Vec<String> = to_translate.into_iter().map(|item| item.english).collect();
            self.translate_and_store(&words, &mut report).await?;
        }

        let report = report.finish();
        info!("{}", report.message);
        Ok(report)
    }

    async fn translate_and_store(
        &self,
        words: &[String],
        report: &mut ImportReport,
    ) -> LexiconResult<()> {
        let translator = self.translator.as_ref().ok_or_else(|| {
            LexiconError::Config("Admin import requires a translation provider".to_string())
        })?;

        let batch_size = self.config.batch_size.max(1);
        let batches: Vec<&[String]> = words.chunks(batch_size).collect();
        let allowed = batches.len().min(self.config.max_batches);
        report.deferred = batches[allowed..].iter().map(|b| b.len()).sum();

        for (index, batch) in batches[..allowed].iter().enumerate() {
            self.process_batch(translator.as_ref(), index + 1, batch, report)
                .await;
        }
        Ok(())
    }

    async fn process_batch(
        &self,
        translator: &dyn MachineTranslator,
        number: usize,
        batch: &[String],
        report: &mut ImportReport,
    ) {
        let (fresh, existing): (Vec<String>, Vec<String>) = batch
            .iter()
            .cloned()
            .partition(|word| !self.store.exists(word, word));
        report.skipped += existing.len();

        if fresh.is_empty() {
            debug!("Batch {}: every word already present", number);
            return;
        }

        report.calls_used += 1;
        let translations = match self.call_translator(translator, &fresh).await {
            Ok(translations) => translations,
            Err(e) => {
                warn!(
                    "Batch {}: {} failed, marking {} words as failed: {}",
                    number,
                    translator.provider_name(),
                    fresh.len(),
                    e
                );
                report.failed += fresh.len();
                return;
            }
        };

        for (english, translated) in fresh.iter().zip(translations) {
            let oromo = normalize(&translated);
            if oromo.is_empty() {
                report.failed += 1;
                continue;
            }
            self.store_pair(english, &oromo, report);
        }
        debug!(
            "Batch {} done: {} inserted, {} skipped, {} failed so far",
            number, report.inserted, report.skipped, report.failed
        );
    }

    /// One time-bounded batch call. Timeouts and broken length contracts are
    /// errors like any other.
    async fn call_translator(
        &self,
        translator: &dyn MachineTranslator,
        words: &[String],
    ) -> MtResult<Vec<String>> {
        let timeout = self.config.call_timeout();
        let call = translator.translate_batch(
            words,
            LanguageField::English.code(),
            LanguageField::Oromo.code(),
        );
        let translations = tokio::time::timeout(timeout, call)
            .await
            .map_err(|_| MtError::Timeout(timeout))??;
        check_batch_len(words.len(), &translations)?;
        Ok(translations)
    }

    fn store_pair(&self, english: &str, oromo: &str, report: &mut ImportReport) {
        if self.store.exists(english, oromo) {
            report.skipped += 1;
            return;
        }
        match self
            .store
            .insert_pending(EntryKind::infer(english, oromo), english, oromo)
        {
            Ok(_) => report.inserted += 1,
            Err(e) => {
                warn!("Failed to store '{}' / '{}': {}", english, oromo, e);
                report.failed += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::memory_store::MemoryLexiconStore;
    use crate::mt::{MockMode, MockTranslator};
    use crate::store::{EntryStatus, StatusFilter};

    fn words(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("word{}", i)).collect()
    }

    fn admin_lines(lines: Vec<String>) -> ImportRequest {
        ImportRequest {
            mode: ImportMode::Admin,
            payload: ImportPayload::Lines(lines),
        }
    }

    fn community_lines(lines: &[&str]) -> ImportRequest {
        ImportRequest {
            mode: ImportMode::Community,
            payload: ImportPayload::Lines(lines.iter().map(|s| s.to_string()).collect()),
        }
    }

    fn pipeline(
        store: Arc<MemoryLexiconStore>,
        mock: &MockTranslator,
        config: ImportConfig,
    ) -> BulkImportPipeline {
        BulkImportPipeline::new(store, config).with_translator(Arc::new(mock.clone()))
    }

    #[test]
    fn test_split_pair() {
        assert_eq!(split_pair("water\tbishaan"), ("water", Some("bishaan")));
        assert_eq!(split_pair("water=bishaan"), ("water", Some("bishaan")));
        assert_eq!(split_pair("good morning, akkam bulte"), ("good morning", Some(" akkam bulte")));
        assert_eq!(split_pair("water"), ("water", None));
    }

    #[test]
    fn test_import_mode_parse() {
        assert_eq!("Admin".parse::<ImportMode>().unwrap(), ImportMode::Admin);
        assert!("bulk".parse::<ImportMode>().is_err());
    }

    #[tokio::test]
    async fn test_two_batches_two_calls() {
        let store = Arc::new(MemoryLexiconStore::new());
        let mock = MockTranslator::new(MockMode::Suffix);
        let pipeline = pipeline(store.clone(), &mock, ImportConfig::default());

        let report = pipeline.import(&admin_lines(words(250))).await.unwrap();
        assert_eq!(report.calls_used, 2);
        assert_eq!(mock.calls(), 2);
        assert_eq!(report.inserted, 250);
        assert_eq!(report.processed, 250);
        assert_eq!(report.failed, 0);
        assert_eq!(store.list_by_status(EntryStatus::Pending).len(), 250);
    }

    #[tokio::test]
    async fn test_second_batch_failure_keeps_first() {
        let store = Arc::new(MemoryLexiconStore::new());
        store.insert_approved(EntryKind::Word, "word210", "jecha").unwrap();
        let mock = MockTranslator::new(MockMode::Suffix).failing_on_call(2);
        let pipeline = pipeline(store.clone(), &mock, ImportConfig::default());

        let report = pipeline.import(&admin_lines(words(250))).await.unwrap();
        assert_eq!(report.calls_used, 2);
        assert_eq!(report.inserted, 200);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.failed, 49);
        assert!(
            store
                .find_exact(EntryKind::Word, LanguageField::English, "word0", StatusFilter::Any)
                .is_some()
        );
        assert_eq!(store.len(), 201);
    }

    #[tokio::test]
    async fn test_dedup_and_normalization() {
        let store = Arc::new(MemoryLexiconStore::new());
        let mock = MockTranslator::new(MockMode::Suffix);
        let pipeline = pipeline(store.clone(), &mock, ImportConfig::default());

        let lines = vec!["Water".to_string(), "  ".to_string(), "water!".to_string(), "House".to_string()];
        let report = pipeline.import(&admin_lines(lines)).await.unwrap();
        assert_eq!(report.inserted, 2);
        assert_eq!(report.processed, 2);
        let pending = store.list_by_status(EntryStatus::Pending);
        assert_eq!(pending[0].english, "water");
        assert_eq!(pending[0].oromo, "water_om");
        assert_eq!(pending[1].english, "house");
    }

    #[tokio::test]
    async fn test_existing_words_skip_the_call() {
        let store = Arc::new(MemoryLexiconStore::new());
        store.insert_approved(EntryKind::Word, "water", "bishaan").unwrap();
        store.insert_pending(EntryKind::Word, "house", "mana").unwrap();
        let mock = MockTranslator::new(MockMode::Suffix);
        let pipeline = pipeline(store.clone(), &mock, ImportConfig::default());

        let report = pipeline
            .import(&admin_lines(vec!["water".to_string(), "house".to_string()]))
            .await
            .unwrap();
        assert_eq!(report.skipped, 2);
        assert_eq!(report.calls_used, 0);
        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test]
    async fn test_translation_collision_is_skipped_and_empty_is_failed() {
        let store = Arc::new(MemoryLexiconStore::new());
        store.insert_approved(EntryKind::Word, "river", "laga").unwrap();
        let map = HashMap::from([
            ("stream".to_string(), "laga".to_string()),
            ("sky".to_string(), "  ".to_string()),
            ("sun".to_string(), "Aduu".to_string()),
        ]);
        let mock = MockTranslator::new(MockMode::Mappings(map));
        let pipeline = pipeline(store.clone(), &mock, ImportConfig::default());

        let lines = vec!["stream".to_string(), "sky".to_string(), "sun".to_string()];
        let report = pipeline.import(&admin_lines(lines)).await.unwrap();
        assert_eq!(report.skipped, 1);
        assert_eq!(report.failed, 1);
        assert_eq!(report.inserted, 1);
        assert_eq!(report.calls_used, 1);
        let sun = store
            .find_exact(EntryKind::Word, LanguageField::English, "sun", StatusFilter::Any)
            .unwrap();
        assert_eq!(sun.oromo, "aduu");
        assert_eq!(sun.status, EntryStatus::Pending);
    }

    #[tokio::test]
    async fn test_length_mismatch_fails_whole_batch() {
        let store = Arc::new(MemoryLexiconStore::new());
        let mock = MockTranslator::new(MockMode::ShortResponse);
        let pipeline = pipeline(store.clone(), &mock, ImportConfig::default());

        let report = pipeline.import(&admin_lines(words(5))).await.unwrap();
        assert_eq!(report.failed, 5);
        assert_eq!(report.inserted, 0);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_timeout_counts_as_failure() {
        let store = Arc::new(MemoryLexiconStore::new());
        let mock = MockTranslator::with_delay(MockMode::Suffix, 2_000);
        let config = ImportConfig {
            call_timeout_secs: 1,
            ..ImportConfig::default()
        };
        let pipeline = pipeline(store.clone(), &mock, config);

        let report = pipeline.import(&admin_lines(words(3))).await.unwrap();
        assert_eq!(report.failed, 3);
        assert_eq!(report.calls_used, 1);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_truncation_and_batch_cap() {
        let store = Arc::new(MemoryLexiconStore::new());
        let mock = MockTranslator::new(MockMode::Suffix);
        let config = ImportConfig {
            max_words: 25,
            batch_size: 5,
            max_batches: 3,
            ..ImportConfig::default()
        };
        let pipeline = pipeline(store.clone(), &mock, config);

        let report = pipeline.import(&admin_lines(words(30))).await.unwrap();
        assert_eq!(report.truncated, 5);
        assert_eq!(report.calls_used, 3);
        assert_eq!(report.inserted, 15);
        assert_eq!(report.deferred, 10);
        assert!(report.message.contains("batch limit"));
        assert!(report.message.contains("import limit"));
    }

    #[tokio::test]
    async fn test_admin_without_translator_is_config_error() {
        let store = Arc::new(MemoryLexiconStore::new());
        let pipeline = BulkImportPipeline::new(store, ImportConfig::default());
        let result = pipeline.import(&admin_lines(words(1))).await;
        assert!(matches!(result, Err(LexiconError::Config(_))));
    }

    #[tokio::test]
    async fn test_admin_rows_with_oromo_bypass_translation() {
        let store = Arc::new(MemoryLexiconStore::new());
        let mock = MockTranslator::new(MockMode::Suffix);
        let pipeline = pipeline(store.clone(), &mock, ImportConfig::default());
        let request = ImportRequest {
            mode: ImportMode::Admin,
            payload: ImportPayload::Rows(vec![
                ImportRow {
                    english: "Water".to_string(),
                    oromo: Some("Bishaan".to_string()),
                },
                ImportRow {
                    english: "house".to_string(),
                    oromo: None,
                },
            ]),
        };
        let report = pipeline.import(&request).await.unwrap();
        assert_eq!(report.inserted, 2);
        assert_eq!(report.calls_used, 1);
        let water = store
            .find_exact(EntryKind::Word, LanguageField::English, "water", StatusFilter::Any)
            .unwrap();
        assert_eq!(water.oromo, "bishaan");
    }

    #[tokio::test]
    async fn test_admin_lines_with_pairs_bypass_translation() {
        let store = Arc::new(MemoryLexiconStore::new());
        let mock = MockTranslator::new(MockMode::Suffix);
        let pipeline = pipeline(store.clone(), &mock, ImportConfig::default());
        let request = admin_lines(vec![
            "water=bishaan".to_string(),
            "fire\tibidda".to_string(),
            "house".to_string(),
        ]);
        let report = pipeline.import(&request).await.unwrap();
        assert_eq!(report.inserted, 3);
        assert_eq!(report.calls_used, 1);
        assert_eq!(mock.calls(), 1);

        let water = store
            .find_exact(EntryKind::Word, LanguageField::English, "water", StatusFilter::Any)
            .unwrap();
        assert_eq!(water.oromo, "bishaan");
        let fire = store
            .find_exact(EntryKind::Word, LanguageField::English, "fire", StatusFilter::Any)
            .unwrap();
        assert_eq!(fire.oromo, "ibidda");
        let house = store
            .find_exact(EntryKind::Word, LanguageField::English, "house", StatusFilter::Any)
            .unwrap();
        assert_eq!(house.oromo, "house_om");
    }

    #[tokio::test]
    async fn test_admin_line_without_english_is_rejected() {
        let store = Arc::new(MemoryLexiconStore::new());
        let mock = MockTranslator::new(MockMode::Suffix);
        let pipeline = pipeline(store.clone(), &mock, ImportConfig::default());
        let request = admin_lines(vec!["fire".to_string(), "=bishaan".to_string()]);
        match pipeline.import(&request).await {
            Err(LexiconError::Validation(msg)) => assert!(msg.contains("Row 2")),
            other => panic!("Expected Validation error, got {:?}", other),
        }
        assert!(store.is_empty());
        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test]
    async fn test_community_import() {
        let store = Arc::new(MemoryLexiconStore::new());
        store.insert_approved(EntryKind::Word, "water", "bishaan").unwrap();
        let pipeline = BulkImportPipeline::new(store.clone(), ImportConfig::default());

        let request = community_lines(&[
            "water\tbishaan",
            "",
            "good morning = Akkam bulte",
            "good morning = akkam bulte",
            "fire, ibidda",
        ]);
        let report = pipeline.import(&request).await.unwrap();
        assert_eq!(report.inserted, 2);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.calls_used, 0);
        let phrase = store
            .find_exact(EntryKind::Phrase, LanguageField::Oromo, "akkam bulte", StatusFilter::Any)
            .unwrap();
        assert_eq!(phrase.english, "good morning");
    }

    #[tokio::test]
    async fn test_community_rejects_malformed_row_without_writing() {
        let store = Arc::new(MemoryLexiconStore::new());
        let pipeline = BulkImportPipeline::new(store.clone(), ImportConfig::default());

        let request = community_lines(&["fire, ibidda", "water"]);
        match pipeline.import(&request).await {
            Err(LexiconError::Validation(msg)) => assert!(msg.contains("Row 2")),
            other => panic!("Expected Validation error, got {:?}", other),
        }
        assert!(store.is_empty());
    }
}
