//! Mock Machine Translator for testing
//!
//! A deterministic, API-free translator for exercising the import pipeline
//! without API keys or network access. Every batch call is counted, and
//! individual calls can be made to fail.
//!
//! # Example
//!
//! ```ignore
//! use gadaoromo::mt::{MachineTranslator, MockMode, MockTranslator};
//!
//! #[tokio::test]
//! async fn test_translation() {
//!     let mock = MockTranslator::new(MockMode::Suffix);
//!     let result = mock.translate("water", "en", "om").await.unwrap();
//!     assert_eq!(result, "water_om");
//! }
//! ```

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::mt::error::{MtError, MtResult};
use crate::mt::translator::MachineTranslator;

/// Mock translation modes for testing different scenarios
#[derive(Debug, Clone)]
pub enum MockMode {
    /// Append locale suffix: "water" → "water_om"
    Suffix,

    /// Predefined source → translation mappings, suffix for anything else
    Mappings(HashMap<String, String>),

    /// Simulate API errors on every call
    Error(String),

    /// Drop the last result of every batch, breaking the length contract
    ShortResponse,

    /// No-op: return input unchanged
    NoOp,
}

/// Mock translator that simulates various translation scenarios
#[derive(Debug, Clone)]
pub struct MockTranslator {
    mode: MockMode,
    /// Optional simulated network delay (in milliseconds)
    delay_ms: u64,
    /// 1-based batch calls that fail regardless of mode
    failing_calls: HashSet<usize>,
    calls: Arc<AtomicUsize>,
}

impl MockTranslator {
    pub fn new(mode: MockMode) -> Self {
        Self {
            mode,
            delay_ms: 0,
            failing_calls: HashSet::new(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a MockTranslator with simulated network delay
    pub fn with_delay(mode: MockMode, delay_ms: u64) -> Self {
        Self {
            delay_ms,
            ..Self::new(mode)
        }
    }

    /// Make the `n`-th batch call (1-based) fail with a translation error
    pub fn failing_on_call(mut self, n: usize) -> Self {
        self.failing_calls.insert(n);
        self
    }

    /// Number of batch calls made so far, shared between clones
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn apply_delay(&self) {
        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }
    }

    fn apply_translation(&self, text: &str, target: &str) -> MtResult<String> {
        match &self.mode {
            MockMode::Suffix | MockMode::ShortResponse => Ok(format!("{}_{}", text, target)),
            MockMode::Mappings(map) => Ok(map
                .get(text)
                .cloned()
                .unwrap_or_else(|| format!("{}_{}", text, target))),
            MockMode::Error(msg) => Err(MtError::TranslationError(msg.clone())),
            MockMode::NoOp => Ok(text.to_string()),
        }
    }
}

#[async_trait]
impl MachineTranslator for MockTranslator {
    async fn translate(
        &self,
        text: &str,
        _source_locale: &str,
        target_locale: &str,
    ) -> MtResult<String> {
        self.apply_delay().await;
        self.apply_translation(text, target_locale)
    }

    async fn translate_batch(
        &self,
        texts: &[String],
        _source_locale: &str,
        target_locale: &str,
    ) -> MtResult<Vec<String>> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;

        // Simulated delay (per batch, not per string)
        self.apply_delay().await;

        if self.failing_calls.contains(&call) {
            return Err(MtError::TranslationError(format!("Simulated failure on call {}", call)));
        }

        let mut results = texts
            .iter()
            .map(|text| self.apply_translation(text, target_locale))
            .collect::<MtResult<Vec<_>>>()?;
        if matches!(self.mode, MockMode::ShortResponse) {
            results.pop();
        }
        Ok(results)
    }

    fn provider_name(&self) -> &str {
        "Mock Translator"
    }
}
