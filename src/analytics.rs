//! Search logging and trending counters

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::LexiconResult;
use crate::language::Direction;
use crate::normalize::normalize;
use crate::persistence::{read_json, write_json_atomic};

/// Immutable record of one search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchLogEntry {
    pub query: String,
    pub direction: Direction,
    pub is_phrase: bool,
    pub is_exact: bool,
    pub searched_at: DateTime<Utc>,
}

/// Aggregated counters for one normalized query.
///
/// `today_count` and `week_count` are only ever incremented here; resetting
/// them at day/week boundaries is up to whoever owns the schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchCount {
    pub query: String,
    pub total_count: u64,
    pub today_count: u64,
    pub week_count: u64,
    pub last_searched_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyticsSnapshot {
    pub log: Vec<SearchLogEntry>,
    pub counts: Vec<SearchCount>,
}

#[derive(Debug, Default)]
struct State {
    log: Vec<SearchLogEntry>,
    counts: HashMap<String, SearchCount>,
}

/// Log entries kept by default; older ones are dropped first.
pub const DEFAULT_LOG_CAP: usize = 10_000;

/// Search log plus per-query counters.
///
/// The log holds at most `log_cap` entries. Counters are never trimmed.
#[derive(Debug)]
pub struct SearchAnalytics {
    state: RwLock<State>,
    path: Option<PathBuf>,
    log_cap: usize,
}

impl Default for SearchAnalytics {
    fn default() -> Self {
        Self {
            state: RwLock::default(),
            path: None,
            log_cap: DEFAULT_LOG_CAP,
        }
    }
}

impl SearchAnalytics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep at most `cap` log entries, trimming the oldest ones now.
    pub fn with_log_cap(mut self, cap: usize) -> Self {
        self.log_cap = cap;
        trim_log(&mut self.state.get_mut().log, cap);
        self
    }

    /// Load from a JSON snapshot, starting empty when the file is absent.
    pub fn open(path: impl AsRef<Path>) -> LexiconResult<Self> {
        let path = path.as_ref().to_path_buf();
        let snapshot = read_json::<AnalyticsSnapshot>(&path)?.unwrap_or_default();
        let analytics = Self::restore(snapshot);
        Ok(Self {
            path: Some(path),
            ..analytics
        })
    }

    pub fn restore(snapshot: AnalyticsSnapshot) -> Self {
        let counts = snapshot
            .counts
            .into_iter()
            .map(|count| (count.query.clone(), count))
            .collect();
        let mut log = snapshot.log;
        trim_log(&mut log, DEFAULT_LOG_CAP);
        Self {
            state: RwLock::new(State { log, counts }),
            path: None,
            log_cap: DEFAULT_LOG_CAP,
        }
    }

    pub fn snapshot(&self) -> AnalyticsSnapshot {
        let state = self.state.read();
        let mut counts: Vec<SearchCount> = state.counts.values().cloned().collect();
        counts.sort_by(|a, b| a.query.cmp(&b.query));
        AnalyticsSnapshot {
            log: state.log.clone(),
            counts,
        }
    }

    pub fn save(&self) -> LexiconResult<()> {
        match &self.path {
            Some(path) => write_json_atomic(path, &self.snapshot()),
            None => Ok(()),
        }
    }

    pub fn record(&self, raw: &str, direction: Direction, is_phrase: bool, is_exact: bool) {
        self.record_at(raw, direction, is_phrase, is_exact, Utc::now());
    }

    fn record_at(
        &self,
        raw: &str,
        direction: Direction,
        is_phrase: bool,
        is_exact: bool,
        now: DateTime<Utc>,
    ) {
        let query = normalize(raw);
        if query.is_empty() {
            return;
        }

        let mut state = self.state.write();
        state.log.push(SearchLogEntry {
            query: query.clone(),
            direction,
            is_phrase,
            is_exact,
            searched_at: now,
        });
        trim_log(&mut state.log, self.log_cap);
        state
            .counts
            .entry(query.clone())
            .and_modify(|count| {
                count.total_count += 1;
                count.today_count += 1;
                count.week_count += 1;
                count.last_searched_at = now;
            })
            .or_insert_with(|| SearchCount {
                query: query.clone(),
                total_count: 1,
                today_count: 1,
                week_count: 1,
                last_searched_at: now,
            });
        debug!("Recorded search {:?} ({})", query, direction);
    }

    /// Most searched queries: today, then this week, then all time.
    pub fn trending(&self, limit: usize) -> Vec<SearchCount> {
        let state = self.state.read();
        let mut counts: Vec<SearchCount> = state.counts.values().cloned().collect();
        counts.sort_by(|a, b| {
            b.today_count
                .cmp(&a.today_count)
                .then(b.week_count.cmp(&a.week_count))
                .then(b.total_count.cmp(&a.total_count))
                .then_with(|| a.query.cmp(&b.query))
        });
        counts.truncate(limit);
        counts
    }

    /// Newest log entries first
    pub fn recent(&self, limit: usize) -> Vec<SearchLogEntry> {
        self.state.read().log.iter().rev().take(limit).cloned().collect()
    }
}

fn trim_log(log: &mut Vec<SearchLogEntry>, cap: usize) {
    if log.len() > cap {
        let excess = log.len() - cap;
        log.drain(..excess);
    }
}
