//! Tiered translation lookup
//!
//! 1. the whole text as an approved phrase
//! 2. a single token as an approved word
//! 3. token-by-token word substitution, unknown tokens kept as-is
//!
//! The first tier that hits wins; only the first two count as exact.

use std::sync::Arc;

use serde::Serialize;

use crate::language::{Direction, LanguageField};
use crate::normalize::{is_single_token, normalize, tokenize};
use crate::store::{EntryKind, EntryStatus, LexiconStore, StatusFilter};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub translated: String,
    pub is_exact: bool,
    pub is_phrase: bool,
}

impl Resolution {
    fn exact(translated: String, is_phrase: bool) -> Self {
        Self {
            translated,
            is_exact: true,
            is_phrase,
        }
    }

    fn fallback(translated: String) -> Self {
        Self {
            translated,
            is_exact: false,
            is_phrase: false,
        }
    }
}

pub struct TranslationResolver {
    store: Arc<dyn LexiconStore>,
}

impl TranslationResolver {
    pub fn new(store: Arc<dyn LexiconStore>) -> Self {
        Self { store }
    }

    pub fn resolve(&self, raw: &str, direction: Direction) -> Resolution {
        let text = normalize(raw);
        if text.is_empty() {
            return Resolution::default();
        }
        let (source, target) = (direction.source(), direction.target());

        if let Some(translated) = self.lookup(EntryKind::Phrase, source, target, &text) {
            return Resolution::exact(translated, true);
        }

        if is_single_token(&text)
            && let Some(translated) = self.lookup(EntryKind::Word, source, target, &text)
        {
            return Resolution::exact(translated, false);
        }

        let composed = tokenize(&text)
            .into_iter()
            .map(|token| {
                self.lookup(EntryKind::Word, source, target, token)
                    .unwrap_or_else(|| token.to_string())
            })
            .collect::<Vec<_>>()
            .join(" ");
        Resolution::fallback(composed)
    }

    fn lookup(
        &self,
        kind: EntryKind,
        source: LanguageField,
        target: LanguageField,
        value: &str,
    ) -> Option<String> {
        self.store
            .find_exact(kind, source, value, StatusFilter::Only(EntryStatus::Approved))
            .map(|entry| entry.field(target).to_string())
    }
}
