//! Machine Translation trait and utilities
//!
//! The import pipeline only needs batch translation from English into
//! Oromo, but the trait stays provider-agnostic so tests can swap in
//! [`MockTranslator`](crate::mt::MockTranslator).
//!
//! # Example
//!
//! ```ignore
//! use gadaoromo::mt::{GoogleTranslateProvider, MachineTranslator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = GoogleTranslateProvider::from_env()?;
//!     let words = vec!["water".to_string(), "house".to_string()];
//!     let results = provider.translate_batch(&words, "en", "om").await?;
//!     println!("{:?}", results); // ["bishaan", "mana"]
//!     Ok(())
//! }
//! ```

use crate::mt::error::{MtError, MtResult};
use async_trait::async_trait;

/// Generic trait for machine translation providers
///
/// All methods are async to support I/O-bound operations like network requests.
#[async_trait]
pub trait MachineTranslator: Send + Sync {
    /// Translate a single text string from source to target locale
    async fn translate(
        &self,
        text: &str,
        source_locale: &str,
        target_locale: &str,
    ) -> MtResult<String>;

    /// Translate multiple strings in a single batch operation
    ///
    /// # Guarantees
    ///
    /// - Output order matches input order
    /// - Output length equals input length
    ///
    /// Callers must still check the length: a provider that breaks the
    /// contract is treated as a failed call.
    async fn translate_batch(
        &self,
        texts: &[String],
        source_locale: &str,
        target_locale: &str,
    ) -> MtResult<Vec<String>>;

    /// Name used in logs
    fn provider_name(&self) -> &str;
}

/// Normalize a locale code by stripping region information
///
/// `om-ET` → `om`, `en-US` → `en`, `en` → `en`
pub fn normalize_locale(locale: &str) -> String {
    locale.split('-').next().unwrap_or(locale).to_lowercase()
}

/// Check that a locale code contains only alphanumerics, `-` and `_`
pub fn validate_locale(locale: &str) -> MtResult<()> {
    if locale.is_empty() {
        return Err(MtError::InvalidLocale("Locale code is empty".to_string()));
    }

    if !locale
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(MtError::InvalidLocale(format!(
            "Invalid characters in locale code: {}",
            locale
        )));
    }

    Ok(())
}

/// Ensure a provider honoured the batch length contract
pub fn check_batch_len(expected: usize, results: &[String]) -> MtResult<()> {
    if results.len() != expected {
        return Err(MtError::LengthMismatch {
            expected,
            actual: results.len(),
        });
    }
    Ok(())
}
