//! Google Translate API provider for machine translation
//!
//! Integrates with Google Translate API v2, which supports Afaan Oromo
//! (`om`) as a target language.
//!
//! # Authentication
//!
//! The provider loads the API key from the `GOOGLE_TRANSLATE_API_KEY`
//! environment variable.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use crate::mt::error::{MtError, MtResult};
use crate::mt::translator::{
    MachineTranslator, check_batch_len, normalize_locale, validate_locale,
};

/// Google Translate API v2 provider
#[derive(Clone)]
pub struct GoogleTranslateProvider {
    /// API key for authentication
    api_key: String,
    /// HTTP client for async requests
    client: reqwest::Client,
    /// Base URL for Google Translate API
    base_url: String,
}

impl GoogleTranslateProvider {
    /// Google Translate v2 API accepts up to 128 texts per request
    const MAX_BATCH_SIZE: usize = 128;

    /// Maximum characters per string (30KB per Google Translate API limits)
    const MAX_CHARS_PER_STRING: usize = 30_000;

    const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Create a new GoogleTranslateProvider with an explicit API key
    pub fn new(api_key: String) -> MtResult<Self> {
        Self::with_timeout(api_key, Self::DEFAULT_TIMEOUT)
    }

    /// Like [`new`](Self::new) with a custom HTTP timeout
    pub fn with_timeout(api_key: String, timeout: Duration) -> MtResult<Self> {
        if api_key.trim().is_empty() {
            return Err(MtError::ConfigError("API key cannot be empty".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MtError::NetworkError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_key,
            client,
            base_url: "https://translation.googleapis.com/language/translate/v2".to_string(),
        })
    }

    /// Create a provider from the `GOOGLE_TRANSLATE_API_KEY` environment variable
    pub fn from_env() -> MtResult<Self> {
        let api_key = std::env::var("GOOGLE_TRANSLATE_API_KEY").map_err(|_| {
            MtError::ConfigError(
                "GOOGLE_TRANSLATE_API_KEY environment variable not set".to_string(),
            )
        })?;

        Self::new(api_key)
    }

    /// Chunk a batch of texts into API-safe sizes
    fn chunk_batch(texts: &[String]) -> Vec<&[String]> {
        texts.chunks(Self::MAX_BATCH_SIZE).collect()
    }

    /// Pull `data.translations[*].translatedText` out of a response body.
    ///
    /// A body carrying an `error` object is a failure even with a success
    /// status.
    fn parse_response(json: &serde_json::Value) -> MtResult<Vec<String>> {
        if let Some(error) = json.get("error") {
            let message = error["message"].as_str().unwrap_or("unknown error");
            return Err(MtError::TranslationError(format!(
                "API returned an error payload: {}",
                message
            )));
        }

        let translations = json["data"]["translations"].as_array().ok_or_else(|| {
            MtError::TranslationError(
                "Invalid API response: missing 'data.translations' array".to_string(),
            )
        })?;

        translations
            .iter()
            .map(|t| {
                t["translatedText"]
                    .as_str()
                    .map(|s| s.to_string())
                    .ok_or_else(|| {
                        MtError::TranslationError(
                            "Invalid API response: missing 'translatedText' field".to_string(),
                        )
                    })
            })
            .collect()
    }

    /// Translate a single chunk of texts via the API
    async fn translate_chunk(
        &self,
        texts: &[String],
        source_locale: &str,
        target_locale: &str,
    ) -> MtResult<Vec<String>> {
        let url = format!("{}?key={}", self.base_url, self.api_key);

        let body = json!({
            "q": texts,
            "source": normalize_locale(source_locale),
            "target": normalize_locale(target_locale),
            "format": "text"
        });

        debug!("Sending {} texts to Google Translate", texts.len());
        let response = self.client.post(&url).json(&body).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            return Err(if status.is_client_error() {
                MtError::ConfigError(format!("API client error ({}): {}", status, error_text))
            } else {
                MtError::TranslationError(format!("API server error ({}): {}", status, error_text))
            });
        }

        let json: serde_json::Value = response.json().await.map_err(|e| {
            MtError::TranslationError(format!("Failed to parse API response: {}", e))
        })?;

        let results = Self::parse_response(&json)?;
        check_batch_len(texts.len(), &results)?;
        Ok(results)
    }
}

impl std::fmt::Debug for GoogleTranslateProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleTranslateProvider")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl MachineTranslator for GoogleTranslateProvider {
    async fn translate(
        &self,
        text: &str,
        source_locale: &str,
        target_locale: &str,
    ) -> MtResult<String> {
        validate_locale(source_locale)?;
        validate_locale(target_locale)?;

        if text.is_empty() {
            return Ok(String::new());
        }

        if text.len() > Self::MAX_CHARS_PER_STRING {
            return Err(MtError::TranslationError(format!(
                "Text exceeds maximum length of {} characters",
                Self::MAX_CHARS_PER_STRING
            )));
        }

        let results = self
            .translate_chunk(&[text.to_string()], source_locale, target_locale)
            .await?;

        Ok(results.into_iter().next().unwrap_or_default())
    }

    async fn translate_batch(
        &self,
        texts: &[String],
        source_locale: &str,
        target_locale: &str,
    ) -> MtResult<Vec<String>> {
        validate_locale(source_locale)?;
        validate_locale(target_locale)?;

        if texts.is_empty() {
            return Ok(Vec::new());
        }

        for (i, text) in texts.iter().enumerate() {
            if text.len() > Self::MAX_CHARS_PER_STRING {
                return Err(MtError::TranslationError(format!(
                    "Text at index {} exceeds maximum length of {} characters",
                    i,
                    Self::MAX_CHARS_PER_STRING
                )));
            }
        }

        let mut all_results = Vec::with_capacity(texts.len());
        for chunk in Self::chunk_batch(texts) {
            let chunk_results = self
                .translate_chunk(chunk, source_locale, target_locale)
                .await?;
            all_results.extend(chunk_results);
        }

        check_batch_len(texts.len(), &all_results)?;
        Ok(all_results)
    }

    fn provider_name(&self) -> &str {
        "Google Translate"
    }
}
