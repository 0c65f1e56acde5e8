//! "Did you mean" candidates for inexact single-word lookups

use std::sync::Arc;

use serde::Serialize;
use strsim::normalized_levenshtein;

use crate::config::SuggestConfig;
use crate::language::Direction;
use crate::normalize::{dedup_preserve_order, normalize};
use crate::store::LexiconStore;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Suggestions {
    /// Approved values starting with the term
    pub prefix: Vec<String>,
    /// Approved values containing the term anywhere
    pub partial: Vec<String>,
    /// Approved values closest to the term by edit distance, best first
    pub closest: Vec<String>,
}

impl Suggestions {
    pub fn is_empty(&self) -> bool {
        self.prefix.is_empty() && self.partial.is_empty() && self.closest.is_empty()
    }
}

pub struct SuggestionEngine {
    store: Arc<dyn LexiconStore>,
    config: SuggestConfig,
}

impl SuggestionEngine {
    pub fn new(store: Arc<dyn LexiconStore>, config: SuggestConfig) -> Self {
        Self { store, config }
    }

    /// Suggestions for `term` in the source language of `direction`, using
    /// the configured list limit.
    pub fn suggest(&self, term: &str, direction: Direction) -> Suggestions {
        self.suggest_with_limit(term, direction, self.config.limit)
    }

    pub fn suggest_with_limit(&self, term: &str, direction: Direction, limit: usize) -> Suggestions {
        let term = normalize(term);
        if term.is_empty() || limit == 0 {
            return Suggestions::default();
        }
        let field = direction.source();

        let mut prefix = dedup_preserve_order(self.store.find_prefix(field, &term, limit));
        prefix.truncate(limit);
        let mut partial = dedup_preserve_order(self.store.find_substring(field, &term, limit));
        partial.truncate(limit);

        let pool = dedup_preserve_order(self.store.list_approved(field, true, self.config.pool_cap));
        let closest = self.rank_closest(&term, pool, limit);

        Suggestions {
            prefix,
            partial,
            closest,
        }
    }

    /// Candidates scoring at least the cutoff, best first. Equal scores keep
    /// pool order, so newer values win ties.
    fn rank_closest(&self, term: &str, pool: Vec<String>, limit: usize) -> Vec<String> {
        let mut scored: Vec<(String, f64)> = pool
            .into_iter()
            .map(|candidate| {
                let score = normalized_levenshtein(term, &candidate);
                (candidate, score)
            })
            .filter(|(_, score)| *score >= self.config.cutoff)
            .collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored.into_iter().take(limit).map(|(c, _)| c).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory_store::MemoryLexiconStore;
    use crate::store::EntryKind;

    fn engine_with(store: MemoryLexiconStore, config: SuggestConfig) -> SuggestionEngine {
        SuggestionEngine::new(Arc::new(store), config)
    }

    fn sample_store() -> MemoryLexiconStore {
        let store = MemoryLexiconStore::new();
        store.insert_approved(EntryKind::Word, "water", "bishaan").unwrap();
        store.insert_approved(EntryKind::Word, "big", "guddaa").unwrap();
        store.insert_approved(EntryKind::Word, "wash", "dhiquu").unwrap();
        store.insert_approved(EntryKind::Word, "waiter", "tajaajilaa").unwrap();
        store.insert_approved(EntryKind::Word, "waters", "bishaanota").unwrap();
        store.insert_pending(EntryKind::Word, "watermelon", "habbabii").unwrap();
        store
    }

    #[test]
    fn test_prefix_and_partial() {
        let engine = engine_with(sample_store(), SuggestConfig::default());
        let suggestions = engine.suggest("wat", Direction::EnOm);
        assert_eq!(suggestions.prefix, vec!["water", "waters"]);
        assert_eq!(suggestions.partial, vec!["water", "waters"]);

        let suggestions = engine.suggest("aa", Direction::OmEn);
        assert!(suggestions.prefix.is_empty());
        assert_eq!(suggestions.partial, vec!["bishaan", "guddaa", "tajaajilaa", "bishaanota"]);
    }

    #[test]
    fn test_closest_uses_source_column() {
        let engine = engine_with(sample_store(), SuggestConfig::default());
        let suggestions = engine.suggest("bishan", Direction::OmEn);
        assert_eq!(suggestions.closest, vec!["bishaan"]);

        let suggestions = engine.suggest("bishan", Direction::EnOm);
        assert!(suggestions.closest.is_empty());
    }

    #[test]
    fn test_closest_ranked_best_first() {
        let engine = engine_with(sample_store(), SuggestConfig::default());
        let suggestions = engine.suggest("watr", Direction::EnOm);
        // water: 1 edit / 5, waters: 2 edits / 6 falls under the cutoff
        assert_eq!(suggestions.closest, vec!["water"]);

        let config = SuggestConfig {
            cutoff: 0.6,
            ..SuggestConfig::default()
        };
        let engine = engine_with(sample_store(), config);
        let suggestions = engine.suggest("watr", Direction::EnOm);
        assert_eq!(suggestions.closest, vec!["water", "waters", "waiter"]);
    }

    #[test]
    fn test_pending_values_excluded() {
        let engine = engine_with(sample_store(), SuggestConfig::default());
        let suggestions = engine.suggest("watermelo", Direction::EnOm);
        assert!(suggestions.prefix.is_empty());
        assert!(!suggestions.closest.contains(&"watermelon".to_string()));
    }

    #[test]
    fn test_lists_are_deduplicated() {
        let store = MemoryLexiconStore::new();
        store.insert_approved(EntryKind::Word, "water", "bishaan").unwrap();
        store.insert_approved(EntryKind::Word, "water", "bishan").unwrap();
        store.insert_approved(EntryKind::Word, "waters", "bishaanota").unwrap();
        let engine = engine_with(store, SuggestConfig::default());
        let suggestions = engine.suggest("wate", Direction::EnOm);
        assert_eq!(suggestions.prefix, vec!["water", "waters"]);
        assert_eq!(suggestions.partial, vec!["water", "waters"]);
        assert_eq!(suggestions.closest, vec!["water"]);
    }

    #[test]
    fn test_duplicates_do_not_eat_into_limit() {
        let store = MemoryLexiconStore::new();
        store.insert_approved(EntryKind::Word, "water", "bishaan").unwrap();
        store.insert_approved(EntryKind::Word, "water", "bishan").unwrap();
        store.insert_approved(EntryKind::Word, "waters", "bishaanota").unwrap();
        let engine = engine_with(store, SuggestConfig::default());
        let suggestions = engine.suggest_with_limit("wat", Direction::EnOm, 2);
        assert_eq!(suggestions.prefix, vec!["water", "waters"]);
        assert_eq!(suggestions.partial, vec!["water", "waters"]);
    }

    #[test]
    fn test_limit_applies_to_each_list() {
        let store = MemoryLexiconStore::new();
        for (en, om) in [("cat", "adurree"), ("car", "konkolaataa"), ("cap", "qoophee"), ("can", "danda'a")] {
            store.insert_approved(EntryKind::Word, en, om).unwrap();
        }
        let engine = engine_with(store, SuggestConfig::default());
        let suggestions = engine.suggest_with_limit("ca", Direction::EnOm, 2);
        assert_eq!(suggestions.prefix, vec!["cat", "car"]);
        assert_eq!(suggestions.partial, vec!["cat", "car"]);
        assert!(suggestions.closest.is_empty());

        let config = SuggestConfig {
            cutoff: 0.6,
            ..SuggestConfig::default()
        };
        let engine = SuggestionEngine::new(engine.store.clone(), config);
        let suggestions = engine.suggest_with_limit("cax", Direction::EnOm, 2);
        // every candidate is one edit away; newest first wins the tie
        assert_eq!(suggestions.closest.len(), 2);
        assert_eq!(suggestions.closest, vec!["can", "cap"]);
    }

    #[test]
    fn test_pool_cap_bounds_candidates() {
        let store = MemoryLexiconStore::new();
        store.insert_approved(EntryKind::Word, "water", "bishaan").unwrap();
        store.insert_approved(EntryKind::Word, "house", "mana").unwrap();
        let config = SuggestConfig {
            pool_cap: 1,
            ..SuggestConfig::default()
        };
        let engine = engine_with(store, config);
        // only "house", the newest value, is in the pool
        assert!(engine.suggest("watr", Direction::EnOm).closest.is_empty());
    }

    #[test]
    fn test_empty_pool_and_empty_term() {
        let engine = engine_with(MemoryLexiconStore::new(), SuggestConfig::default());
        assert!(engine.suggest("bishaan", Direction::OmEn).is_empty());

        let engine = engine_with(sample_store(), SuggestConfig::default());
        assert!(engine.suggest("  ", Direction::OmEn).is_empty());
    }
}
