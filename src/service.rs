//! The lexicon service: resolution, import, submission and moderation
//! surfaces composed from the individual components.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analytics::{SearchAnalytics, SearchCount};
use crate::config::LexiconConfig;
use crate::detector::DirectionDetector;
use crate::error::{LexiconError, LexiconResult};
use crate::import::{BulkImportPipeline, ImportReport, ImportRequest};
use crate::language::{Direction, DirectionRequest};
use crate::mt::MachineTranslator;
use crate::normalize::{is_single_token, normalize};
use crate::resolver::TranslationResolver;
use crate::store::{Entry, EntryId, EntryKind, EntryStatus, LexiconStore};
use crate::suggest::{SuggestionEngine, Suggestions};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveRequest {
    pub text: String,
    /// `om_en`, `en_om` or `auto`
    pub direction: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolveResponse {
    pub translated: String,
    pub is_exact: bool,
    pub is_phrase: bool,
    /// Direction actually used, after detection for `auto`
    pub direction: Direction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Suggestions>,
}

pub struct Lexicon {
    store: Arc<dyn LexiconStore>,
    analytics: Arc<SearchAnalytics>,
    resolver: TranslationResolver,
    detector: DirectionDetector,
    suggestions: SuggestionEngine,
    importer: BulkImportPipeline,
}

impl Lexicon {
    pub fn new(
        store: Arc<dyn LexiconStore>,
        analytics: Arc<SearchAnalytics>,
        config: LexiconConfig,
    ) -> Self {
        Self {
            resolver: TranslationResolver::new(store.clone()),
            detector: DirectionDetector::new(store.clone(), config.detector),
            suggestions: SuggestionEngine::new(store.clone(), config.suggest),
            importer: BulkImportPipeline::new(store.clone(), config.import),
            store,
            analytics,
        }
    }

    /// Enable admin imports through `translator`
    pub fn with_translator(mut self, translator: Arc<dyn MachineTranslator>) -> Self {
        self.importer = self.importer.with_translator(translator);
        self
    }

    pub fn store(&self) -> &Arc<dyn LexiconStore> {
        &self.store
    }

    pub fn analytics(&self) -> &Arc<SearchAnalytics> {
        &self.analytics
    }

    pub fn detect(&self, text: &str) -> Direction {
        self.detector.detect(text)
    }

    pub fn suggest(&self, term: &str, direction: Direction) -> Suggestions {
        self.suggestions.suggest(term, direction)
    }

    /// Resolve a lookup request and record it.
    ///
    /// Suggestions are attached only to inexact single-word lookups.
    pub fn resolve(&self, request: &ResolveRequest) -> LexiconResult<ResolveResponse> {
        let direction = match request.direction.parse::<DirectionRequest>()? {
            DirectionRequest::Fixed(direction) => direction,
            DirectionRequest::Auto => self.detector.detect(&request.text),
        };

        let resolution = self.resolver.resolve(&request.text, direction);
        self.analytics.record(
            &request.text,
            direction,
            resolution.is_phrase,
            resolution.is_exact,
        );

        let query = normalize(&request.text);
        let suggestions = (!resolution.is_exact && is_single_token(&query))
            .then(|| self.suggestions.suggest(&query, direction));

        Ok(ResolveResponse {
            translated: resolution.translated,
            is_exact: resolution.is_exact,
            is_phrase: resolution.is_phrase,
            direction,
            suggestions,
        })
    }

    pub async fn import(&self, request: &ImportRequest) -> LexiconResult<ImportReport> {
        self.importer.import(request).await
    }

    /// Public submission, stored as pending until approved
    pub fn submit(&self, english: &str, oromo: &str) -> LexiconResult<Entry> {
        let english = normalize(english);
        let oromo = normalize(oromo);
        if english.is_empty() || oromo.is_empty() {
            return Err(LexiconError::Validation(
                "Both English and Oromo are required".to_string(),
            ));
        }
        let entry = self
            .store
            .insert_pending(EntryKind::infer(&english, &oromo), &english, &oromo)?;
        info!("New submission #{}: {} / {}", entry.id, entry.english, entry.oromo);
        Ok(entry)
    }

    pub fn pending(&self) -> Vec<Entry> {
        self.store.list_by_status(EntryStatus::Pending)
    }

    pub fn approve(&self, id: EntryId) -> LexiconResult<Entry> {
        let entry = self.store.set_status(id, EntryStatus::Approved)?;
        info!("Approved entry #{}", id);
        Ok(entry)
    }

    /// Reject a pending entry, deleting it
    pub fn reject(&self, id: EntryId) -> LexiconResult<Entry> {
        let entry = self.store.get(id).ok_or(LexiconError::NotFound(id))?;
        if entry.status != EntryStatus::Pending {
            return Err(LexiconError::Validation(format!(
                "Entry #{} is already approved and cannot be rejected",
                id
            )));
        }
        let removed = self.store.delete(id)?;
        info!("Rejected entry #{}", id);
        Ok(removed)
    }

    pub fn trending(&self, limit: usize) -> Vec<SearchCount> {
        self.analytics.trending(limit)
    }
}
