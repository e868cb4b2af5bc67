use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use uuid::Uuid;
use crate::errors::{AppError, AppResult};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Todo {
    pub id: Uuid,
    pub title: String,
    pub deadline: DateTime<Utc>,
    pub done: bool,
    pub created_at: DateTime<Utc>,
}

impl Todo {
    pub fn new(title: String, deadline: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            deadline,
            done: false,
            created_at: Utc::now(),
        }
    }
}

/// Parses a client supplied deadline.
///
/// Accepts an RFC 3339 timestamp, a naive `YYYY-MM-DDTHH:MM:SS` date-time
/// (taken as UTC) or a bare `YYYY-MM-DD` date (midnight UTC).
pub fn parse_deadline(raw: &str) -> AppResult<DateTime<Utc>> {
    let value = raw.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }

    if let Ok(parsed) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(parsed.and_utc());
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
        .ok_or_else(|| AppError::InvalidDeadline(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn plain_date_is_midnight_utc() {
        let deadline = parse_deadline("2024-01-01").unwrap();
        assert_eq!(deadline, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn offsets_are_normalised_to_utc() {
        let deadline = parse_deadline("2024-01-01T10:00:00+02:00").unwrap();
        assert_eq!(deadline, Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap());
    }

    #[test]
    fn naive_datetime_is_read_as_utc() {
        let deadline = parse_deadline("2024-03-05T12:30:00").unwrap();
        assert_eq!(deadline, Utc.with_ymd_and_hms(2024, 3, 5, 12, 30, 0).unwrap());
    }

    #[test]
    fn garbage_is_rejected() {
        assert_eq!(
            parse_deadline("next tuesday"),
            Err(AppError::InvalidDeadline("next tuesday".to_string()))
        );
        assert!(parse_deadline("2024-13-01").is_err());
    }

    #[test]
    fn new_todo_starts_open() {
        let todo = Todo::new("buy milk".into(), Utc::now());
        assert!(!todo.done);
        assert!(todo.created_at <= Utc::now());
    }
}
