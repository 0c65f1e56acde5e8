//! Heuristic language-direction detection
//!
//! Counts how many content tokens are known Oromo words versus known English
//! words, with a bonus when the whole text is a known phrase. Ties, including
//! text with no known tokens at all, resolve to English → Oromo.

use std::sync::Arc;

use tracing::debug;

use crate::config::DetectorConfig;
use crate::language::{Direction, LanguageField};
use crate::normalize::{normalize, tokenize};
use crate::store::{EntryKind, EntryStatus, LexiconStore, StatusFilter};

/// Both language scores for a piece of text
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DirectionScores {
    pub oromo: f64,
    pub english: f64,
}

pub struct DirectionDetector {
    store: Arc<dyn LexiconStore>,
    config: DetectorConfig,
}

impl DirectionDetector {
    pub fn new(store: Arc<dyn LexiconStore>, config: DetectorConfig) -> Self {
        Self { store, config }
    }

    pub fn detect(&self, raw: &str) -> Direction {
        let scores = self.score(raw);
        let direction = if scores.oromo > scores.english + self.config.margin {
            Direction::OmEn
        } else {
            // English either wins outright or takes the tie
            Direction::EnOm
        };
        debug!(
            "Detected {} for {:?} (oromo={}, english={})",
            direction, raw, scores.oromo, scores.english
        );
        direction
    }

    pub fn score(&self, raw: &str) -> DirectionScores {
        let text = normalize(raw);
        let mut scores = DirectionScores::default();
        if text.is_empty() {
            return scores;
        }

        let tokens = tokenize(&text);
        let mut content: Vec<&str> = tokens
            .iter()
            .copied()
            .filter(|token| !self.config.is_stop_word(token))
            .collect();
        if content.is_empty() {
            content = tokens;
        }

        for token in content {
            if self.is_known(EntryKind::Word, LanguageField::Oromo, token) {
                scores.oromo += 1.0;
            }
            if self.is_known(EntryKind::Word, LanguageField::English, token) {
                scores.english += 1.0;
            }
        }

        if self.is_known(EntryKind::Phrase, LanguageField::Oromo, &text) {
            scores.oromo += self.config.phrase_bonus;
        }
        if self.is_known(EntryKind::Phrase, LanguageField::English, &text) {
            scores.english += self.config.phrase_bonus;
        }
        scores
    }

    fn is_known(&self, kind: EntryKind, field: LanguageField, value: &str) -> bool {
        self.store
            .find_exact(kind, field, value, StatusFilter::Only(EntryStatus::Approved))
            .is_some()
    }
}
