use crate::model::stats::{DailyStat, UserStatistics};
use crate::time;
use chrono::NaiveDate;
use serde::Serialize;

/// Flattened per-day summary for display surfaces (CLI table, JSON dump).
/// Dates are formatted at construction; the model keeps `NaiveDate`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct DailySummary {
    pub date: String,
    pub day_of_week: String,
    pub words_correct: u32,
    pub words_incorrect: u32,
    pub words_skipped: u32,
    pub words_total: u32,
    pub words_accuracy_pct: f64,
}

impl DailySummary {
    pub fn from_stat(date: NaiveDate, stat: &DailyStat) -> Self {
        Self {
            date: time::format_date(date),
            day_of_week: time::day_name(date),
            words_correct: stat.words_correct,
            words_incorrect: stat.words_incorrect,
            words_skipped: stat.words_skipped,
            words_total: stat.words_total,
            words_accuracy_pct: stat.words_accuracy_pct,
        }
    }
}

/// One summary row per active day, ascending.
pub fn daily_summaries(stats: &UserStatistics) -> Vec<DailySummary> {
    stats
        .daily_stats()
        .iter()
        .map(|(date, stat)| DailySummary::from_stat(*date, stat))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_daily_summaries() {
        let stats = UserStatistics::from_lines(&[
            "u1,Cat,1,01-01-2024 10:00:00",
            "u1,Cat,0,01-01-2024 10:05:00",
            "u1,Dog,2,02-01-2024 11:00:00",
        ])
        .unwrap();
        let summaries = daily_summaries(&stats);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].date, "01-01-2024");
        assert_eq!(summaries[0].day_of_week, "Monday");
        assert_eq!(summaries[0].words_total, 2);
        assert_eq!(summaries[0].words_accuracy_pct, 50.0);
        assert_eq!(summaries[1].date, "02-01-2024");
        assert_eq!(summaries[1].words_total, 0);
    }
}
