//! Tunable parameters for the detector, suggestion engine and import pipeline.
//!
//! Every field has a default; a JSON config file only needs to name what it
//! overrides:
//!
//! ```json
//! { "import": { "batch_size": 100 }, "suggest": { "cutoff": 0.8 } }
//! ```

use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{LexiconError, LexiconResult};
use crate::language::LanguageField;

const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "an", "the", "is", "are", "am", "was", "were", "be", "been", "to", "of", "in", "on",
    "at", "by", "for", "with", "and", "or", "but", "not", "do", "does", "did", "it", "this",
    "that", "i", "you", "he", "she", "we", "they", "my", "your", "his", "her", "our", "their",
];

const OROMO_STOP_WORDS: &[&str] = &[
    "fi", "kan", "kana", "isa", "kun", "ani", "ati", "inni", "isheen", "nuti", "isin", "isaan",
    "irra", "keessa", "akka", "yoo", "garuu", "illee", "ni", "hin", "moo", "ykn", "waan", "bira",
    "gara", "irraa", "keessatti", "malee",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    pub english_stop_words: HashSet<String>,
    pub oromo_stop_words: HashSet<String>,
    /// Score added when the whole text is a known phrase
    pub phrase_bonus: f64,
    /// How far one score must exceed the other to win
    pub margin: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            english_stop_words: ENGLISH_STOP_WORDS.iter().map(|s| s.to_string()).collect(),
            oromo_stop_words: OROMO_STOP_WORDS.iter().map(|s| s.to_string()).collect(),
            phrase_bonus: 4.0,
            margin: 0.5,
        }
    }
}

impl DetectorConfig {
    pub fn is_stop_word(&self, token: &str) -> bool {
        self.english_stop_words.contains(token) || self.oromo_stop_words.contains(token)
    }

    pub fn stop_words(&self, field: LanguageField) -> &HashSet<String> {
        match field {
            LanguageField::English => &self.english_stop_words,
            LanguageField::Oromo => &self.oromo_stop_words,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestConfig {
    /// Maximum length of each suggestion list
    pub limit: usize,
    /// Number of most recent approved values considered for fuzzy ranking
    pub pool_cap: usize,
    /// Minimum similarity (0.0..=1.0) for a fuzzy candidate
    pub cutoff: f64,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            limit: 8,
            pool_cap: 3000,
            cutoff: 0.75,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Words kept after deduplication, the rest is reported as truncated
    pub max_words: usize,
    pub batch_size: usize,
    /// Batches processed per invocation
    pub max_batches: usize,
    /// Upper bound for one external translation call
    pub call_timeout_secs: u64,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            max_words: 2000,
            batch_size: 200,
            max_batches: 10,
            call_timeout_secs: 30,
        }
    }
}

impl ImportConfig {
    pub fn call_timeout(&self) -> Duration {
        Duration::from_secs(self.call_timeout_secs)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexiconConfig {
    pub detector: DetectorConfig,
    pub suggest: SuggestConfig,
    pub import: ImportConfig,
}

impl LexiconConfig {
    pub fn from_file(path: &Path) -> LexiconResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            LexiconError::Config(format!("Failed to read '{}': {}", path.display(), e))
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            LexiconError::Config(format!("Failed to parse '{}': {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> LexiconResult<()> {
        if self.import.batch_size == 0 {
            return Err(LexiconError::Config("import.batch_size must be positive".to_string()));
        }
        if self.import.call_timeout_secs == 0 {
            return Err(LexiconError::Config(
                "import.call_timeout_secs must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.suggest.cutoff) {
            return Err(LexiconError::Config(
                "suggest.cutoff must be between 0 and 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LexiconConfig::default();
        assert_eq!(config.import.batch_size, 200);
        assert_eq!(config.import.max_batches, 10);
        assert_eq!(config.import.max_words, 2000);
        assert_eq!(config.import.call_timeout(), Duration::from_secs(30));
        assert_eq!(config.suggest.limit, 8);
        assert_eq!(config.suggest.pool_cap, 3000);
        assert_eq!(config.suggest.cutoff, 0.75);
        assert_eq!(config.detector.phrase_bonus, 4.0);
        assert!(config.detector.stop_words(LanguageField::English).contains("the"));
        assert!(config.detector.stop_words(LanguageField::Oromo).contains("fi"));
    }

    #[test]
    fn test_partial_override() {
        let config: LexiconConfig =
            serde_json::from_str(r#"{ "import": { "batch_size": 50 } }"#).unwrap();
        assert_eq!(config.import.batch_size, 50);
        assert_eq!(config.import.max_batches, 10);
        assert_eq!(config.suggest, SuggestConfig::default());
    }

    #[test]
    fn test_validate_rejects_zero_batch() {
        let mut config = LexiconConfig::default();
        config.import.batch_size = 0;
        assert!(matches!(config.validate(), Err(LexiconError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = LexiconConfig::default();
        config.import.call_timeout_secs = 0;
        match config.validate() {
            Err(LexiconError::Config(msg)) => assert!(msg.contains("call_timeout_secs")),
            other => panic!("Expected Config error, got {:?}", other),
        }

        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "import": { "call_timeout_secs": 0 } }"#).unwrap();
        assert!(matches!(LexiconConfig::from_file(&path), Err(LexiconError::Config(_))));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "suggest": { "limit": 3 } }"#).unwrap();
        let config = LexiconConfig::from_file(&path).unwrap();
        assert_eq!(config.suggest.limit, 3);
    }
}
