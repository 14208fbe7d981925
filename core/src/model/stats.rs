use crate::error::ReportError;
use crate::model::event::EventLog;
use crate::parser;
use crate::service::aggregate;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// The one percentage rule of the whole report: round the ratio to two
/// decimals, then scale to 0..100, i.e. percentages are quantized to whole
/// numbers (66.67% becomes 67.0, not 66.7). Zero attempts is 0.0, never NaN.
pub fn accuracy_pct(correct: u32, attempted: u32) -> f64 {
    if attempted == 0 {
        return 0.0;
    }
    (f64::from(correct) / f64::from(attempted) * 100.0).round()
}

/// Counters for one word on one day.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct WordDailyStat {
    pub correct: u32,
    pub incorrect: u32,
    pub skipped: u32,
    pub accuracy_pct: f64,
}

/// Aggregated counters for one day. `words_total` counts graded attempts
/// only; skipped attempts never enter a total or an accuracy.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct DailyStat {
    pub words_correct: u32,
    pub words_incorrect: u32,
    pub words_skipped: u32,
    pub words_total: u32,
    pub words_accuracy_pct: f64,
    pub by_word: BTreeMap<String, WordDailyStat>,
}

/// One row of the flattened per-word attempt history.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct AttemptRecord {
    pub date: NaiveDate,
    pub word: String,
    pub correct: u32,
    pub incorrect: u32,
    pub skipped: u32,
}

/// A single user's parsed log and its daily aggregation.
///
/// Built eagerly at construction and read-only afterwards; recomputing means
/// constructing a new instance from a new log.
#[derive(Debug, Clone)]
pub struct UserStatistics {
    uid: String,
    log: EventLog,
    daily: BTreeMap<NaiveDate, DailyStat>,
}

impl UserStatistics {
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Result<Self, ReportError> {
        Ok(Self::from_log(parser::parse_log(lines)?))
    }

    pub fn from_log(log: EventLog) -> Self {
        let daily = aggregate::aggregate(&log);
        Self {
            uid: log.uid().to_string(),
            log,
            daily,
        }
    }

    pub fn uid(&self) -> &str {
        &self.uid
    }

    pub fn event_log(&self) -> &EventLog {
        &self.log
    }

    pub fn daily_stats(&self) -> &BTreeMap<NaiveDate, DailyStat> {
        &self.daily
    }

    /// Active dates, ascending.
    pub fn ordered_dates(&self) -> Vec<NaiveDate> {
        self.daily.keys().copied().collect()
    }

    /// Every word seen in the log (whatever its grades), sorted.
    pub fn all_words(&self) -> Vec<String> {
        let words: BTreeSet<&str> = self
            .log
            .days()
            .values()
            .flat_map(|attempts| attempts.values())
            .map(|attempt| attempt.word.as_str())
            .collect();
        words.into_iter().map(str::to_string).collect()
    }

    /// Flat `(date, word, counts)` rows across all days, date-ordered.
    pub fn attempt_history(&self) -> Vec<AttemptRecord> {
        let mut history = Vec::new();
        for (date, stat) in &self.daily {
            for (word, word_stat) in &stat.by_word {
                history.push(AttemptRecord {
                    date: *date,
                    word: word.clone(),
                    correct: word_stat.correct,
                    incorrect: word_stat.incorrect,
                    skipped: word_stat.skipped,
                });
            }
        }
        history
    }

    /// History of a single word across all days.
    pub fn word_history(&self, target_word: &str) -> Vec<AttemptRecord> {
        self.attempt_history()
            .into_iter()
            .filter(|record| record.word == target_word)
            .collect()
    }
}
