use crate::error::ReportError;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Outcome of a single word-production attempt.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum Grade {
    Correct,
    Incorrect,
    Skipped,
    /// Codes outside the known table stay in the raw log but never count.
    Other(String),
}

impl Grade {
    pub fn from_code(code: &str) -> Self {
        match code {
            "1" => Grade::Correct,
            "0" => Grade::Incorrect,
            "2" => Grade::Skipped,
            other => Grade::Other(other.to_string()),
        }
    }

    pub fn is_counted(&self) -> bool {
        !matches!(self, Grade::Other(_))
    }
}

/// One parsed log line. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEvent {
    pub uid: String,
    pub word: String,
    pub grade: Grade,
    pub date: NaiveDate,
    pub time: NaiveTime,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    pub word: String,
    pub grade: Grade,
}

/// The validated production log of exactly one user, keyed
/// `date -> time -> attempt`. A later event with the same date and time
/// overwrites the earlier one (last write wins).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventLog {
    uid: String,
    days: BTreeMap<NaiveDate, BTreeMap<NaiveTime, Attempt>>,
}

impl EventLog {
    pub fn from_events(events: Vec<RawEvent>) -> Result<Self, ReportError> {
        let mut uids: Vec<String> = events.iter().map(|event| event.uid.clone()).collect();
        uids.sort();
        uids.dedup();
        let uid = match uids.as_slice() {
            [] => return Err(ReportError::EmptyInput),
            [single] => single.clone(),
            _ => return Err(ReportError::MultipleUids(uids)),
        };

        let mut days: BTreeMap<NaiveDate, BTreeMap<NaiveTime, Attempt>> = BTreeMap::new();
        for event in events {
            days.entry(event.date).or_default().insert(
                event.time,
                Attempt {
                    word: event.word,
                    grade: event.grade,
                },
            );
        }
        Ok(Self { uid, days })
    }

    pub fn uid(&self) -> &str {
        &self.uid
    }

    pub fn days(&self) -> &BTreeMap<NaiveDate, BTreeMap<NaiveTime, Attempt>> {
        &self.days
    }

    /// Dates with at least one event, ascending.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.days.keys().copied().collect()
    }

    /// Number of distinct `(date, time)` slots in the log.
    pub fn event_count(&self) -> usize {
        self.days.values().map(|attempts| attempts.len()).sum()
    }
}
