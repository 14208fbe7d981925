use crate::error::ReportError;
use crate::model::event::{EventLog, Grade, RawEvent};
use crate::time;
use std::collections::BTreeSet;

/// Parses one production line of the form
/// `uid,word,grade_code,DD-MM-YYYY HH:MM[:SS]`.
pub fn parse_line(line: &str) -> Result<RawEvent, ReportError> {
    let fields: Vec<&str> = line.split(',').collect();
    let (uid, word, grade, stamp) = match fields.as_slice() {
        [uid, word, grade, stamp] => (*uid, *word, *grade, *stamp),
        _ => return Err(ReportError::MalformedLine(line.to_string())),
    };

    let stamp_fields: Vec<&str> = stamp.trim().split(' ').collect();
    let (date_str, time_str) = match stamp_fields.as_slice() {
        [date, time] => (*date, *time),
        _ => return Err(ReportError::MalformedLine(line.to_string())),
    };

    let date = time::parse_date(date_str)?;
    let time = time::parse_time(time_str)
        .ok_or_else(|| ReportError::MalformedLine(line.to_string()))?;

    Ok(RawEvent {
        uid: uid.trim().to_string(),
        word: word.trim().to_string(),
        grade: Grade::from_code(grade.trim()),
        date,
        time,
    })
}

/// Parses a whole log into a single-user [`EventLog`].
///
/// Blank lines are filtered first; any remaining malformed line fails the
/// batch. Zero usable lines is `EmptyInput`, more than one distinct uid is
/// `MultipleUids`.
pub fn parse_log<S: AsRef<str>>(lines: &[S]) -> Result<EventLog, ReportError> {
    let mut events = Vec::new();
    for line in lines {
        let line = line.as_ref().trim();
        if line.is_empty() {
            continue;
        }
        events.push(parse_line(line)?);
    }
    EventLog::from_events(events)
}

/// The distinct uid across all non-blank lines. Every line carries it; seeing
/// more than one means the export mixed users and the whole log is unusable.
pub fn extract_uid<S: AsRef<str>>(lines: &[S]) -> Result<String, ReportError> {
    let mut uids = BTreeSet::new();
    for line in lines {
        let line = line.as_ref().trim();
        if line.is_empty() {
            continue;
        }
        let first = line.split(',').next().unwrap_or("");
        uids.insert(first.trim().to_string());
    }
    match uids.len() {
        0 => Err(ReportError::EmptyInput),
        1 => Ok(uids.into_iter().collect::<Vec<_>>().remove(0)),
        _ => Err(ReportError::MultipleUids(uids.into_iter().collect())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    #[test]
    fn test_parse_line() {
        let event = parse_line("amy_amy@example.com,Cat,1,01-01-2024 10:00:00").unwrap();
        assert_eq!(event.uid, "amy_amy@example.com");
        assert_eq!(event.word, "Cat");
        assert_eq!(event.grade, Grade::Correct);
        assert_eq!(event.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(event.time, NaiveTime::from_hms_opt(10, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_line_minute_precision_and_slash_date() {
        let event = parse_line("u1,Dog,0,05/03/24 09:15").unwrap();
        assert_eq!(event.date, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert_eq!(event.time, NaiveTime::from_hms_opt(9, 15, 0).unwrap());
        assert_eq!(event.grade, Grade::Incorrect);
    }

    #[test]
    fn test_parse_line_keeps_unknown_grade_codes() {
        let event = parse_line("u1,Cat,7,01-01-2024 10:00:00").unwrap();
        assert_eq!(event.grade, Grade::Other("7".to_string()));
    }

    #[test]
    fn test_malformed_lines_fail() {
        // wrong field count
        assert!(matches!(
            parse_line("u1,Cat,1"),
            Err(ReportError::MalformedLine(_))
        ));
        // timestamp not "date time"
        assert!(matches!(
            parse_line("u1,Cat,1,01-01-2024"),
            Err(ReportError::MalformedLine(_))
        ));
        // unparseable time
        assert!(matches!(
            parse_line("u1,Cat,1,01-01-2024 99:99"),
            Err(ReportError::MalformedLine(_))
        ));
        // unparseable date surfaces as its own error
        assert!(matches!(
            parse_line("u1,Cat,1,2024-01-01 10:00"),
            Err(ReportError::InvalidDateFormat(_))
        ));
    }

    #[test]
    fn test_parse_log_filters_blank_lines() {
        let lines = vec![
            "",
            "u1,Cat,1,01-01-2024 10:00:00",
            "   ",
            "u1,Dog,2,01-01-2024 11:00:00",
        ];
        let log = parse_log(&lines).unwrap();
        assert_eq!(log.uid(), "u1");
        assert_eq!(log.event_count(), 2);
    }

    #[test]
    fn test_parse_log_fails_the_batch_on_one_bad_line() {
        let lines = vec!["u1,Cat,1,01-01-2024 10:00:00", "u1,broken"];
        assert!(matches!(
            parse_log(&lines),
            Err(ReportError::MalformedLine(_))
        ));
    }

    #[test]
    fn test_extract_uid() {
        let lines = vec![
            "u1,Cat,1,01-01-2024 10:00:00",
            "",
            "u1,Dog,0,02-01-2024 10:00:00",
        ];
        assert_eq!(extract_uid(&lines).unwrap(), "u1");
    }

    #[test]
    fn test_extract_uid_rejects_mixed_logs() {
        let lines = vec![
            "u1,Cat,1,01-01-2024 10:00:00",
            "u2,Dog,0,02-01-2024 10:00:00",
        ];
        assert_eq!(
            extract_uid(&lines),
            Err(ReportError::MultipleUids(vec![
                "u1".to_string(),
                "u2".to_string()
            ]))
        );
    }

    #[test]
    fn test_extract_uid_empty_input() {
        let lines: Vec<&str> = vec!["", "  "];
        assert_eq!(extract_uid(&lines), Err(ReportError::EmptyInput));
    }
}
