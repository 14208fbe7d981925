use crate::model::event::{EventLog, Grade};
use crate::model::stats::{accuracy_pct, DailyStat};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Folds a parsed log into per-day statistics.
///
/// Only dates with events are materialized; the projector fills window gaps
/// for display. A word gets its `by_word` entry on first occurrence even if
/// the grade is uncounted, so unrecognised codes stay visible with zero
/// counters.
pub fn aggregate(log: &EventLog) -> BTreeMap<NaiveDate, DailyStat> {
    let mut daily = BTreeMap::new();
    for (date, attempts) in log.days() {
        let mut stat = DailyStat::default();
        for attempt in attempts.values() {
            let word_stat = stat.by_word.entry(attempt.word.clone()).or_default();
            match &attempt.grade {
                Grade::Correct => {
                    stat.words_correct += 1;
                    word_stat.correct += 1;
                }
                Grade::Incorrect => {
                    stat.words_incorrect += 1;
                    word_stat.incorrect += 1;
                }
                Grade::Skipped => {
                    stat.words_skipped += 1;
                    word_stat.skipped += 1;
                }
                Grade::Other(_) => {}
            }
        }
        stat.words_total = stat.words_correct + stat.words_incorrect;
        stat.words_accuracy_pct = accuracy_pct(stat.words_correct, stat.words_total);
        for word_stat in stat.by_word.values_mut() {
            word_stat.accuracy_pct =
                accuracy_pct(word_stat.correct, word_stat.correct + word_stat.incorrect);
        }
        daily.insert(*date, stat);
    }
    daily
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser;
    use chrono::NaiveDate;

    fn aggregate_lines(lines: &[&str]) -> BTreeMap<NaiveDate, DailyStat> {
        aggregate(&parser::parse_log(lines).unwrap())
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[test]
    fn test_cat_dog_scenario() {
        let daily = aggregate_lines(&[
            "u1,Cat,1,01-01-2024 10:00:00",
            "u1,Cat,0,01-01-2024 10:05:00",
            "u1,Dog,2,01-01-2024 11:00:00",
        ]);
        let day = &daily[&date(1)];
        assert_eq!(day.words_correct, 1);
        assert_eq!(day.words_incorrect, 1);
        assert_eq!(day.words_skipped, 1);
        assert_eq!(day.words_total, 2);
        assert_eq!(day.words_accuracy_pct, 50.0);

        let cat = &day.by_word["Cat"];
        assert_eq!((cat.correct, cat.incorrect, cat.skipped), (1, 1, 0));
        assert_eq!(cat.accuracy_pct, 50.0);

        let dog = &day.by_word["Dog"];
        assert_eq!((dog.correct, dog.incorrect, dog.skipped), (0, 0, 1));
        assert_eq!(dog.accuracy_pct, 0.0);
    }

    #[test]
    fn test_counted_events_match_totals() {
        let lines = [
            "u1,Cat,1,01-01-2024 10:00:00",
            "u1,Cat,1,01-01-2024 10:01:00",
            "u1,Dog,0,01-01-2024 10:02:00",
            "u1,Cat,2,02-01-2024 10:00:00",
            "u1,Dog,1,02-01-2024 10:01:00",
            "u1,Owl,9,02-01-2024 10:02:00",
        ];
        let daily = aggregate_lines(&lines);
        let graded: u32 = daily
            .values()
            .map(|stat| stat.words_correct + stat.words_incorrect)
            .sum();
        // 4 graded events; one skipped and one unrecognised are excluded
        assert_eq!(graded, 4);
        for stat in daily.values() {
            assert_eq!(stat.words_total, stat.words_correct + stat.words_incorrect);
        }
    }

    #[test]
    fn test_skip_only_day_has_zero_accuracy() {
        let daily = aggregate_lines(&["u1,Cat,2,01-01-2024 10:00:00"]);
        let day = &daily[&date(1)];
        assert_eq!(day.words_total, 0);
        assert_eq!(day.words_accuracy_pct, 0.0);
        assert_eq!(day.by_word["Cat"].accuracy_pct, 0.0);
    }

    #[test]
    fn test_unrecognised_grade_is_visible_but_uncounted() {
        let daily = aggregate_lines(&[
            "u1,Cat,1,01-01-2024 10:00:00",
            "u1,Owl,9,01-01-2024 10:05:00",
        ]);
        let day = &daily[&date(1)];
        assert_eq!(day.words_total, 1);
        let owl = &day.by_word["Owl"];
        assert_eq!(*owl, Default::default());
    }

    #[test]
    fn test_accuracy_is_whole_number_quantized() {
        let daily = aggregate_lines(&[
            "u1,Cat,1,01-01-2024 10:00:00",
            "u1,Cat,1,01-01-2024 10:01:00",
            "u1,Cat,0,01-01-2024 10:02:00",
        ]);
        // 2/3 = 66.67% rounds to 67.0, not 66.7
        assert_eq!(daily[&date(1)].words_accuracy_pct, 67.0);
    }

    #[test]
    fn test_aggregate_is_idempotent() {
        let log = parser::parse_log(&[
            "u1,Cat,1,01-01-2024 10:00:00",
            "u1,Dog,0,03-01-2024 10:00:00",
        ])
        .unwrap();
        assert_eq!(aggregate(&log), aggregate(&log));
    }

    #[test]
    fn test_only_active_dates_materialized() {
        let daily = aggregate_lines(&[
            "u1,Cat,1,01-01-2024 10:00:00",
            "u1,Dog,0,05-01-2024 10:00:00",
        ]);
        assert_eq!(daily.keys().copied().collect::<Vec<_>>(), vec![date(1), date(5)]);
    }
}
