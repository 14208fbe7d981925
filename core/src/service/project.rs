use crate::model::stats::{accuracy_pct, DailyStat, WordDailyStat};
use crate::time;
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

/// Width of the reporting window, in days.
pub const REPORT_WINDOW_DAYS: u32 = 14;

/// How the end of the reporting window is chosen. `today` is always injected
/// by the caller; the projector never reads the wall clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorPolicy {
    /// End the window at the injected today, regardless of the data.
    Today,
    /// End the window at the most recent active date, falling back to today
    /// when there is no activity at all.
    MostRecent,
}

pub fn resolve_anchor(
    daily: &BTreeMap<NaiveDate, DailyStat>,
    policy: AnchorPolicy,
    today: NaiveDate,
) -> NaiveDate {
    match policy {
        AnchorPolicy::Today => today,
        AnchorPolicy::MostRecent => time::most_recent(daily.keys().copied()).unwrap_or(today),
    }
}

/// One bar of the chart: raw graded counts for one window day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub correct: u32,
    pub incorrect: u32,
}

/// Daily graded counts over the full window, oldest first. Days without
/// activity are emitted as zero points, not omitted.
pub fn time_series(
    daily: &BTreeMap<NaiveDate, DailyStat>,
    policy: AnchorPolicy,
    today: NaiveDate,
) -> Vec<SeriesPoint> {
    let anchor = resolve_anchor(daily, policy, today);
    time::date_window(anchor, REPORT_WINDOW_DAYS)
        .into_iter()
        .map(|date| {
            let (correct, incorrect) = daily
                .get(&date)
                .map(|stat| (stat.words_correct, stat.words_incorrect))
                .unwrap_or((0, 0));
            SeriesPoint {
                date,
                correct,
                incorrect,
            }
        })
        .collect()
}

/// Per-point `(correct_pct, incorrect_pct)` with the standard quantization.
/// Both are 0 for inactive days; for active days they sum to 100 give or
/// take one unit of rounding drift.
pub fn percentages(series: &[SeriesPoint]) -> Vec<(f64, f64)> {
    series
        .iter()
        .map(|point| {
            let total = point.correct + point.incorrect;
            (
                accuracy_pct(point.correct, total),
                accuracy_pct(point.incorrect, total),
            )
        })
        .collect()
}

/// One column of the heatmap table: a window day with its per-word counters.
/// `label` is the `DD/MM/YY` display form; ordering always follows `date`.
#[derive(Debug, Clone, PartialEq)]
pub struct GridColumn {
    pub date: NaiveDate,
    pub label: String,
    pub cells: BTreeMap<String, WordDailyStat>,
}

/// Word-by-date grid over the window, oldest column first. Inactive days
/// produce an empty column so the rendered table keeps its fixed width.
pub fn word_grid(
    daily: &BTreeMap<NaiveDate, DailyStat>,
    policy: AnchorPolicy,
    today: NaiveDate,
    num_days: u32,
) -> Vec<GridColumn> {
    let anchor = resolve_anchor(daily, policy, today);
    time::date_window(anchor, num_days)
        .into_iter()
        .map(|date| GridColumn {
            date,
            label: time::display_date(date),
            cells: daily
                .get(&date)
                .map(|stat| stat.by_word.clone())
                .unwrap_or_default(),
        })
        .collect()
}

/// Sorted union of the words appearing anywhere in the grid (the heatmap's
/// row set).
pub fn grid_words(grid: &[GridColumn]) -> Vec<String> {
    let words: BTreeSet<&str> = grid
        .iter()
        .flat_map(|column| column.cells.keys())
        .map(String::as_str)
        .collect();
    words.into_iter().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser;
    use crate::service::aggregate;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn sample_daily() -> BTreeMap<NaiveDate, DailyStat> {
        let log = parser::parse_log(&[
            "u1,Cat,1,10-01-2024 10:00:00",
            "u1,Cat,1,10-01-2024 10:01:00",
            "u1,Dog,0,10-01-2024 10:02:00",
            "u1,Dog,1,14-01-2024 09:00:00",
            "u1,Ant,2,14-01-2024 09:05:00",
        ])
        .unwrap();
        aggregate::aggregate(&log)
    }

    #[test]
    fn test_time_series_fills_gaps_with_zero_bars() {
        let series = time_series(&sample_daily(), AnchorPolicy::MostRecent, date(20));
        assert_eq!(series.len(), 14);
        // window ends at the most recent active date, not the injected today
        assert_eq!(series[13].date, date(14));
        assert_eq!(series[0].date, date(1));
        assert_eq!((series[9].correct, series[9].incorrect), (2, 1));
        assert_eq!((series[13].correct, series[13].incorrect), (1, 0));
        // gap day stays in the series as a zero bar
        assert_eq!((series[10].correct, series[10].incorrect), (0, 0));
    }

    #[test]
    fn test_time_series_today_anchor() {
        let series = time_series(&sample_daily(), AnchorPolicy::Today, date(20));
        assert_eq!(series[13].date, date(20));
        assert_eq!(series[0].date, date(7));
        // the 10th still falls inside this window
        assert_eq!((series[3].correct, series[3].incorrect), (2, 1));
    }

    #[test]
    fn test_anchor_falls_back_to_today_without_activity() {
        let empty = BTreeMap::new();
        assert_eq!(
            resolve_anchor(&empty, AnchorPolicy::MostRecent, date(8)),
            date(8)
        );
    }

    #[test]
    fn test_percentages_sum_to_100_for_active_days() {
        let series = time_series(&sample_daily(), AnchorPolicy::MostRecent, date(20));
        let pcts = percentages(&series);
        assert_eq!(pcts.len(), 14);
        // 2 correct, 1 incorrect: 67 + 33
        assert_eq!(pcts[9], (67.0, 33.0));
        // skip-only contribution does not count; 1/1 graded
        assert_eq!(pcts[13], (100.0, 0.0));
        // inactive day
        assert_eq!(pcts[10], (0.0, 0.0));
        for ((correct_pct, incorrect_pct), point) in pcts.iter().zip(&series) {
            if point.correct + point.incorrect > 0 {
                let sum = correct_pct + incorrect_pct;
                assert!((99.0..=101.0).contains(&sum), "sum was {sum}");
            }
        }
    }

    #[test]
    fn test_word_grid_keeps_empty_columns() {
        let grid = word_grid(&sample_daily(), AnchorPolicy::MostRecent, date(20), 14);
        assert_eq!(grid.len(), 14);
        assert_eq!(grid[13].label, "14/01/24");
        assert_eq!(grid[9].label, "10/01/24");
        assert!(grid[10].cells.is_empty());
        let cat = &grid[9].cells["Cat"];
        assert_eq!((cat.correct, cat.incorrect, cat.skipped), (2, 0, 0));
        assert_eq!(cat.accuracy_pct, 100.0);
        let ant = &grid[13].cells["Ant"];
        assert_eq!((ant.correct, ant.incorrect, ant.skipped), (0, 0, 1));
    }

    #[test]
    fn test_grid_words_union_sorted() {
        let grid = word_grid(&sample_daily(), AnchorPolicy::MostRecent, date(20), 14);
        assert_eq!(grid_words(&grid), vec!["Ant", "Cat", "Dog"]);
    }
}
